use std::fmt;

use mt4client_core::{ErrorCode, TransportError};

/// Errors returned by the client.
#[derive(Debug, thiserror::Error)]
pub enum Mt4Error {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
    #[error(transparent)]
    Remote(#[from] RemoteError),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Unexpected response payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Client has been shut down")]
    Shutdown,
}

impl Mt4Error {
    /// The terminal's error code, if this is a remote error.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Mt4Error::Remote(remote) => Some(remote.code()),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Mt4Error::Transport(TransportError::Timeout { .. }))
    }
}

/// An error reported by the terminal in a response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteError {
    code: ErrorCode,
    description: Option<String>,
    message: Option<String>,
}

impl RemoteError {
    pub fn new(code: ErrorCode, description: Option<String>, message: Option<String>) -> Self {
        Self {
            code,
            description,
            message,
        }
    }

    /// [`ErrorCode::Unknown`] when the terminal sent no usable code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Free-form detail, usually naming the failing call and its inputs.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[MT4 Error {}: {}]", self.code.id(), self.code.name())?;
        if let Some(description) = &self.description {
            write!(f, " {description}")?;
        }
        if let Some(message) = &self.message {
            write!(f, "\n  {message}")?;
        }
        Ok(())
    }
}

impl std::error::Error for RemoteError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_remote_error_display() {
        let err = RemoteError::new(
            ErrorCode::InvalidTicket,
            Some("invalid ticket".to_string()),
            Some("OrderSelect(12345) failed".to_string()),
        );
        assert_eq!(
            err.to_string(),
            "[MT4 Error 4108: ERR_INVALID_TICKET] invalid ticket\n  OrderSelect(12345) failed"
        );
    }

    #[test]
    fn test_remote_error_display_omits_missing_parts() {
        let err = RemoteError::new(ErrorCode::Unknown, None, None);
        assert_eq!(err.to_string(), "[MT4 Error -1: UNKNOWN]");

        let err = RemoteError::new(ErrorCode::CommonError, None, Some("boom".to_string()));
        assert_eq!(err.to_string(), "[MT4 Error 2: ERR_COMMON_ERROR]\n  boom");
    }

    #[test]
    fn test_error_helpers() {
        let remote: Mt4Error = RemoteError::new(ErrorCode::ServerBusy, None, None).into();
        assert_eq!(remote.code(), Some(ErrorCode::ServerBusy));
        assert!(!remote.is_timeout());

        let timeout: Mt4Error = TransportError::Timeout {
            op: mt4client_core::TransportOp::Receive,
            after: Duration::from_millis(10),
        }
        .into();
        assert!(timeout.is_timeout());
        assert_eq!(timeout.code(), None);
    }
}

use std::fmt;
use std::time::Duration;

// ---------------------------------------------------------------------------
// Transport Trait
// ---------------------------------------------------------------------------

/// Which half of an exchange failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportOp {
    Send,
    Receive,
}

impl fmt::Display for TransportOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportOp::Send => f.write_str("send"),
            TransportOp::Receive => f.write_str("receive"),
        }
    }
}

/// Errors raised while moving bytes to or from the terminal.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("{op} timed out after {}ms", .after.as_millis())]
    Timeout { op: TransportOp, after: Duration },
    #[error("Connection failed: {0}")]
    Connect(String),
    #[error("Socket error: {0}")]
    Socket(String),
    #[error("Transport is closed")]
    Closed,
}

/// A strictly alternating request/reply channel to one terminal.
///
/// Every `send` must be followed by exactly one `recv` before the next
/// `send`. Implementations block the calling thread and apply their own
/// timeouts.
pub trait Transport {
    /// Deliver one serialized request.
    fn send(&mut self, request: &[u8]) -> Result<(), TransportError>;

    /// Wait for the reply to the last request. An empty body is returned
    /// as-is; judging it is the caller's job.
    fn recv(&mut self) -> Result<Vec<u8>, TransportError>;

    /// Release the underlying socket. Later calls fail with
    /// [`TransportError::Closed`].
    fn close(&mut self);

    /// Whether `close` has been called.
    fn is_closed(&self) -> bool;
}

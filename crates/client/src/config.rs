use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_ADDRESS: &str = "tcp://127.0.0.1:28282";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_INDICATOR_TIMEOUT_MS: u64 = 5_000;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid client config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Connection settings for an MT4 terminal.
///
/// Every field has a default, so a config file only needs the ones it
/// changes:
///
/// ```toml
/// address = "tcp://192.168.1.20:28282"
/// response_timeout_ms = 30000
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// ZeroMQ endpoint of the terminal's listener.
    pub address: String,
    /// How long a request may wait to be handed to the socket.
    pub request_timeout_ms: u64,
    /// How long to wait for the terminal's reply.
    pub response_timeout_ms: u64,
    /// Chart-loading timeout passed along with indicator requests.
    pub indicator_timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.to_string(),
            request_timeout_ms: DEFAULT_TIMEOUT_MS,
            response_timeout_ms: DEFAULT_TIMEOUT_MS,
            indicator_timeout_ms: DEFAULT_INDICATOR_TIMEOUT_MS,
        }
    }
}

impl ClientConfig {
    pub fn with_address(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            ..Self::default()
        }
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn response_timeout(&self) -> Duration {
        Duration::from_millis(self.response_timeout_ms)
    }

    pub fn indicator_timeout(&self) -> Duration {
        Duration::from_millis(self.indicator_timeout_ms)
    }
}

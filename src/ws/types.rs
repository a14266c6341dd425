//! WebSocket types and configuration

use std::time::Duration;
use thiserror::Error;

/// WebSocket session configuration
#[derive(Debug, Clone)]
pub struct WsConfig {
    /// WebSocket URL to connect to
    pub url: String,
    /// Maximum time to establish the connection (TCP + TLS + handshake)
    pub connect_timeout: Duration,
    /// Maximum time to wait for a reply frame
    pub read_timeout: Duration,
}

impl Default for WsConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            connect_timeout: Duration::from_secs(10),
            read_timeout: Duration::from_secs(30),
        }
    }
}

impl WsConfig {
    /// Create a new config with the given URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Set connect timeout
    pub fn connect_timeout(mut self, d: Duration) -> Self {
        self.connect_timeout = d;
        self
    }

    /// Set read timeout
    pub fn read_timeout(mut self, d: Duration) -> Self {
        self.read_timeout = d;
        self
    }
}

/// WebSocket errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WsError {
    /// Connection failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    /// No frame arrived in time
    #[error("Timed out after {0:?}")]
    Timeout(Duration),
    /// Send failed
    #[error("Send failed: {0}")]
    SendFailed(String),
    /// Read failed
    #[error("Receive failed: {0}")]
    ReceiveFailed(String),
    /// Peer closed the connection
    #[error("Connection closed by peer")]
    Closed,
}

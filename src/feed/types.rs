//! Price feed wire and error types

use crate::price::TickerEntry;
use crate::ws::WsError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Status code of a successful streaming response
pub const STATUS_OK: u16 = 200;

/// Streaming method returning every ticker price
pub const TICKER_PRICE_METHOD: &str = "ticker.price";

/// Streaming price request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickerRequest {
    pub id: String,
    pub method: String,
}

impl TickerRequest {
    /// `ticker.price` request with a fresh id
    pub fn ticker_price() -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            method: TICKER_PRICE_METHOD.to_string(),
        }
    }
}

/// Error body attached to non-200 responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedErrorBody {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub msg: String,
}

/// Streaming price response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickerResponse {
    pub status: u16,
    #[serde(default)]
    pub result: Vec<TickerEntry>,
    #[serde(default)]
    pub error: Option<FeedErrorBody>,
}

impl TickerResponse {
    pub fn is_success(&self) -> bool {
        self.status == STATUS_OK
    }
}

/// Price feed errors
#[derive(Debug, Error)]
pub enum FeedError {
    /// Feed unreachable
    #[error("connect failed: {0}")]
    Connect(String),
    /// Transport failure on an open connection
    #[error("transport error: {0}")]
    Transport(#[from] WsError),
    /// Feed reported an error status
    #[error("feed returned status {status}: {message}")]
    Status { status: u16, message: String },
    /// Payload could not be decoded
    #[error("malformed payload: {0}")]
    Malformed(String),
    /// Point query failed
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    /// Point query timed out
    #[error("request timed out")]
    Timeout,
}

impl FeedError {
    /// Error for a non-success streaming response
    pub fn from_status(response: &TickerResponse) -> Self {
        let message = response
            .error
            .as_ref()
            .map(|e| format!("{} ({})", e.msg, e.code))
            .unwrap_or_else(|| "price not available".to_string());
        FeedError::Status {
            status: response.status,
            message,
        }
    }
}

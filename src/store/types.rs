//! Store error types

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Historical store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database driver failure
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    /// Stored row could not be turned back into a sample
    #[error("corrupt record: {0}")]
    Corrupt(String),
    /// Timestamp cannot be stored at full precision
    #[error("timestamp out of storable range: {0}")]
    TimestampOutOfRange(DateTime<Utc>),
    /// Store is unavailable (closed, misconfigured, ...)
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

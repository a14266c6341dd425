//! Historical price store
//!
//! Append-only time-series persistence for [`PriceSample`]s, plus the
//! downsampling applied to 24-hour history queries.

mod downsample;
mod memory;
mod sqlite;
mod types;

pub use downsample::{downsample, HISTORY_TARGET_POINTS};
pub use memory::{MemoryStore, DEFAULT_MAX_RECORDS};
pub use sqlite::{SqliteStore, DEFAULT_MAX_PAGE_COUNT};
pub use types::StoreError;

use crate::price::PriceSample;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

/// Length of the trailing history window
pub fn history_window() -> Duration {
    Duration::hours(24)
}

/// Read/write contract of the historical store
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Append one sample
    async fn insert_one(&self, sample: &PriceSample) -> Result<(), StoreError>;

    /// Append a batch of samples
    async fn bulk_insert(&self, samples: &[PriceSample]) -> Result<(), StoreError>;

    /// Most recent sample for `symbol` by timestamp
    async fn get_latest(&self, symbol: &str) -> Result<Option<PriceSample>, StoreError>;

    /// Samples for `symbol` with `timestamp >= since`, oldest first (ties in insertion order)
    async fn get_since(
        &self,
        symbol: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<PriceSample>, StoreError>;

    /// Distinct symbols ever stored, sorted
    async fn list_known_symbols(&self) -> Result<Vec<String>, StoreError>;

    /// Samples for `symbol` in the trailing 24 hours, oldest first
    async fn get_last_24h(&self, symbol: &str) -> Result<Vec<PriceSample>, StoreError> {
        self.get_since(symbol, Utc::now() - history_window()).await
    }
}

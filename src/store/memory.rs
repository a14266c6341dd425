//! In-memory historical store

use super::{HistoryStore, StoreError};
use crate::price::PriceSample;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{BTreeSet, VecDeque};
use tokio::sync::RwLock;

/// Default row cap
pub const DEFAULT_MAX_RECORDS: usize = 1_000_000;

/// Append-only store kept in process memory.
///
/// Rows are kept in insertion order; once `max_records` is reached the oldest
/// rows are evicted.
#[derive(Debug)]
pub struct MemoryStore {
    records: RwLock<VecDeque<PriceSample>>,
    max_records: usize,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_MAX_RECORDS)
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store capped at `max_records` rows
    pub fn with_capacity(max_records: usize) -> Self {
        Self {
            records: RwLock::new(VecDeque::new()),
            max_records: max_records.max(1),
        }
    }

    /// Number of stored rows
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    fn push(&self, records: &mut VecDeque<PriceSample>, sample: PriceSample) {
        if records.len() >= self.max_records {
            records.pop_front();
        }
        records.push_back(sample);
    }
}

#[async_trait]
impl HistoryStore for MemoryStore {
    async fn insert_one(&self, sample: &PriceSample) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        self.push(&mut records, sample.clone());
        Ok(())
    }

    async fn bulk_insert(&self, samples: &[PriceSample]) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        for sample in samples {
            self.push(&mut records, sample.clone());
        }
        Ok(())
    }

    async fn get_latest(&self, symbol: &str) -> Result<Option<PriceSample>, StoreError> {
        let records = self.records.read().await;
        // Later rows win ties
        let latest = records
            .iter()
            .filter(|s| s.symbol == symbol)
            .fold(None::<&PriceSample>, |best, s| match best {
                Some(b) if b.timestamp > s.timestamp => Some(b),
                _ => Some(s),
            });
        Ok(latest.cloned())
    }

    async fn get_since(
        &self,
        symbol: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<PriceSample>, StoreError> {
        let records = self.records.read().await;
        let mut samples: Vec<PriceSample> = records
            .iter()
            .filter(|s| s.symbol == symbol && s.timestamp >= since)
            .cloned()
            .collect();
        // Stable sort keeps insertion order among equal timestamps
        samples.sort_by_key(|s| s.timestamp);
        Ok(samples)
    }

    async fn list_known_symbols(&self) -> Result<Vec<String>, StoreError> {
        let records = self.records.read().await;
        let symbols: BTreeSet<&str> = records.iter().map(|s| s.symbol.as_str()).collect();
        Ok(symbols.into_iter().map(String::from).collect())
    }
}

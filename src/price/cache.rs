//! Shared latest-price cache

use super::PriceSample;
use dashmap::DashMap;
use std::sync::Arc;

/// Concurrent map from symbol to the most recent sample.
///
/// Cloning gives another handle to the same map. Each write replaces a whole
/// sample, so readers never observe a partially-updated value.
#[derive(Debug, Clone, Default)]
pub struct PriceCache {
    latest: Arc<DashMap<String, PriceSample>>,
}

impl PriceCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a sample under its symbol, replacing any previous one
    pub fn upsert(&self, sample: PriceSample) {
        self.latest.insert(sample.symbol.clone(), sample);
    }

    /// Latest sample for a symbol
    pub fn get(&self, symbol: &str) -> Option<PriceSample> {
        self.latest.get(symbol).map(|entry| entry.value().clone())
    }

    /// Whether the symbol has ever been ingested
    pub fn contains(&self, symbol: &str) -> bool {
        self.latest.contains_key(symbol)
    }

    /// Cached symbols, sorted
    pub fn symbols(&self) -> Vec<String> {
        let mut symbols: Vec<String> = self.latest.iter().map(|e| e.key().clone()).collect();
        symbols.sort();
        symbols
    }

    pub fn len(&self) -> usize {
        self.latest.len()
    }

    pub fn is_empty(&self) -> bool {
        self.latest.is_empty()
    }
}

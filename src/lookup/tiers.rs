//! Latest-price lookup tiers

use super::types::{LookupError, TierOutcome};
use crate::feed::PointPriceSource;
use crate::price::PriceCache;
use crate::store::HistoryStore;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Default bound on a point fetch
pub const POINT_FETCH_TIMEOUT: Duration = Duration::from_secs(2);

/// One stage of the latest-price fallback chain
#[async_trait]
pub trait LatestPriceTier: Send + Sync {
    /// Short name used in logs and metrics
    fn name(&self) -> &'static str;

    async fn lookup(&self, symbol: &str, currency: &str) -> TierOutcome;
}

/// Tier 1: the shared cache, regardless of currency
pub struct CacheTier {
    cache: PriceCache,
}

impl CacheTier {
    pub fn new(cache: PriceCache) -> Self {
        Self { cache }
    }
}

#[async_trait]
impl LatestPriceTier for CacheTier {
    fn name(&self) -> &'static str {
        "cache"
    }

    async fn lookup(&self, symbol: &str, _currency: &str) -> TierOutcome {
        match self.cache.get(symbol) {
            Some(sample) => TierOutcome::Found(sample),
            None => TierOutcome::Miss,
        }
    }
}

/// Tier 2: a live single-symbol query, bounded by a timeout.
///
/// Results are returned as-is and never written back.
pub struct PointFetchTier {
    source: Arc<dyn PointPriceSource>,
    timeout: Duration,
}

impl PointFetchTier {
    pub fn new(source: Arc<dyn PointPriceSource>, timeout: Duration) -> Self {
        Self { source, timeout }
    }
}

#[async_trait]
impl LatestPriceTier for PointFetchTier {
    fn name(&self) -> &'static str {
        "point_fetch"
    }

    async fn lookup(&self, symbol: &str, currency: &str) -> TierOutcome {
        match tokio::time::timeout(self.timeout, self.source.fetch_price(symbol, currency)).await {
            Ok(Ok(sample)) => TierOutcome::Found(sample),
            Ok(Err(e)) => {
                tracing::warn!(symbol, currency, error = %e, "Point fetch failed");
                TierOutcome::Miss
            }
            Err(_) => {
                tracing::warn!(symbol, currency, timeout = ?self.timeout, "Point fetch timed out");
                TierOutcome::Miss
            }
        }
    }
}

/// Tier 3: newest persisted sample
pub struct StoreTier {
    store: Arc<dyn HistoryStore>,
}

impl StoreTier {
    pub fn new(store: Arc<dyn HistoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl LatestPriceTier for StoreTier {
    fn name(&self) -> &'static str {
        "store"
    }

    async fn lookup(&self, symbol: &str, _currency: &str) -> TierOutcome {
        match self.store.get_latest(symbol).await {
            Ok(Some(sample)) => TierOutcome::Found(sample),
            Ok(None) => TierOutcome::Miss,
            Err(e) => TierOutcome::Failed(LookupError::Upstream(e)),
        }
    }
}

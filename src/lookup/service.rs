//! Price lookup service

use super::tiers::{CacheTier, LatestPriceTier, PointFetchTier, StoreTier};
use super::types::{LookupError, TierOutcome};
use crate::feed::PointPriceSource;
use crate::price::{PriceCache, PriceSample};
use crate::store::{downsample, HistoryStore, HISTORY_TARGET_POINTS};
use crate::telemetry::record_tier_hit;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;

/// Answers latest-price and history queries
pub struct LookupService {
    tiers: Vec<Box<dyn LatestPriceTier>>,
    cache: PriceCache,
    store: Arc<dyn HistoryStore>,
}

impl LookupService {
    /// Standard chain: cache → point fetch → store
    pub fn new(
        cache: PriceCache,
        point_source: Arc<dyn PointPriceSource>,
        store: Arc<dyn HistoryStore>,
        point_timeout: Duration,
    ) -> Self {
        let tiers: Vec<Box<dyn LatestPriceTier>> = vec![
            Box::new(CacheTier::new(cache.clone())),
            Box::new(PointFetchTier::new(point_source, point_timeout)),
            Box::new(StoreTier::new(Arc::clone(&store))),
        ];
        Self::with_tiers(tiers, cache, store)
    }

    /// Custom tier chain, tried in order
    pub fn with_tiers(
        tiers: Vec<Box<dyn LatestPriceTier>>,
        cache: PriceCache,
        store: Arc<dyn HistoryStore>,
    ) -> Self {
        Self {
            tiers,
            cache,
            store,
        }
    }

    /// Latest sample for `symbol`; first tier to find one wins.
    ///
    /// Earlier tier failures are logged and skipped. Once every tier is
    /// exhausted, a failure of the last tier is returned, otherwise `NotFound`.
    pub async fn get_latest_price(
        &self,
        symbol: &str,
        currency: &str,
    ) -> Result<PriceSample, LookupError> {
        let mut last_failure = None;

        for tier in &self.tiers {
            match tier.lookup(symbol, currency).await {
                TierOutcome::Found(sample) => {
                    tracing::debug!(symbol, tier = tier.name(), "Latest price found");
                    record_tier_hit(tier.name());
                    return Ok(sample);
                }
                TierOutcome::Miss => {
                    last_failure = None;
                }
                TierOutcome::Failed(e) => {
                    tracing::warn!(symbol, tier = tier.name(), error = %e, "Lookup tier failed");
                    last_failure = Some(e);
                }
            }
        }

        Err(last_failure.unwrap_or_else(|| LookupError::NotFound(symbol.to_string())))
    }

    /// Downsampled trailing-24h history for `symbol`, newest first.
    ///
    /// Stored samples are keyed by symbol only, so `currency` does not filter.
    pub async fn get_price_history_24h(
        &self,
        symbol: &str,
        _currency: &str,
    ) -> Result<Vec<PriceSample>, LookupError> {
        let samples = self.store.get_last_24h(symbol).await?;
        Ok(downsample(samples, HISTORY_TARGET_POINTS))
    }

    /// Same as [`get_price_history_24h`](Self::get_price_history_24h) with an explicit window start
    pub async fn get_price_history_since(
        &self,
        symbol: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<PriceSample>, LookupError> {
        let samples = self.store.get_since(symbol, since).await?;
        Ok(downsample(samples, HISTORY_TARGET_POINTS))
    }

    /// A symbol is valid once it has appeared in the cache
    pub fn is_symbol_valid(&self, symbol: &str) -> bool {
        self.cache.contains(symbol)
    }

    /// Distinct stored symbols
    pub async fn list_known_symbols(&self) -> Result<Vec<String>, LookupError> {
        Ok(self.store.list_known_symbols().await?)
    }
}

//! Prometheus metrics

use ::metrics::{counter, gauge};

/// Counter metric types
#[derive(Debug, Clone, Copy)]
pub enum CounterMetric {
    /// Successful feed ticks
    TicksProcessed,
    /// Samples written to the cache
    SamplesIngested,
    /// Ticker entries dropped for a bad price or symbol
    EntriesDropped,
    /// Feed reconnect attempts
    FeedReconnects,
    /// Connections torn down after an error
    FeedErrors,
    /// Failed background bulk inserts
    StoreWriteFailures,
}

/// Gauge metric types
#[derive(Debug, Clone, Copy)]
pub enum GaugeMetric {
    /// Symbols currently in the price cache
    CachedSymbols,
}

impl CounterMetric {
    pub fn name(self) -> &'static str {
        match self {
            CounterMetric::TicksProcessed => "price_tracker_ticks_total",
            CounterMetric::SamplesIngested => "price_tracker_samples_ingested_total",
            CounterMetric::EntriesDropped => "price_tracker_entries_dropped_total",
            CounterMetric::FeedReconnects => "price_tracker_feed_reconnects_total",
            CounterMetric::FeedErrors => "price_tracker_feed_errors_total",
            CounterMetric::StoreWriteFailures => "price_tracker_store_write_failures_total",
        }
    }
}

impl GaugeMetric {
    pub fn name(self) -> &'static str {
        match self {
            GaugeMetric::CachedSymbols => "price_tracker_cached_symbols",
        }
    }
}

/// Increment a counter
pub fn increment_counter(metric: CounterMetric, value: u64) {
    if value > 0 {
        counter!(metric.name()).increment(value);
    }
}

/// Set a gauge value
pub fn set_gauge(metric: GaugeMetric, value: f64) {
    gauge!(metric.name()).set(value);
}

/// Count a latest-price answer by the tier that produced it
pub fn record_tier_hit(tier: &'static str) {
    counter!("price_tracker_lookup_tier_hits_total", "tier" => tier).increment(1);
}

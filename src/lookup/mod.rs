//! Price lookups
//!
//! Latest price through an ordered fallback chain (cache, live point fetch,
//! historical store), downsampled 24h history, and symbol validation.

mod service;
mod tiers;
mod types;

pub use service::LookupService;
pub use tiers::{CacheTier, LatestPriceTier, PointFetchTier, StoreTier, POINT_FETCH_TIMEOUT};
pub use types::{LookupError, TierOutcome};

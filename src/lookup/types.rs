//! Lookup result and error types

use crate::price::PriceSample;
use crate::store::StoreError;
use thiserror::Error;

/// Lookup errors surfaced to callers
#[derive(Debug, Error)]
pub enum LookupError {
    /// No tier produced a value
    #[error("no price found for '{0}'")]
    NotFound(String),
    /// The historical store failed as the tier of last resort
    #[error("upstream failure: {0}")]
    Upstream(#[from] StoreError),
}

/// Result of asking one lookup tier
#[derive(Debug)]
pub enum TierOutcome {
    Found(PriceSample),
    Miss,
    Failed(LookupError),
}

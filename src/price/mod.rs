//! Price samples and the shared latest-price cache
//!
//! A [`PriceSample`] is one observation of a base asset quoted in a quote
//! currency. The [`PriceCache`] holds the newest sample per symbol and is
//! shared between the ingestion worker (writer) and lookups (readers).

mod cache;
mod types;

pub use cache::PriceCache;
pub use types::{
    split_ticker_symbol, PriceSample, SampleError, TickerEntry, CURRENCY_SUFFIX_LEN,
    SUPPORTED_CURRENCY,
};

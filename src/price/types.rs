//! Price sample types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Quote currency supported end-to-end
pub const SUPPORTED_CURRENCY: &str = "USDT";

/// Number of trailing characters of a raw ticker symbol that name the quote currency
pub const CURRENCY_SUFFIX_LEN: usize = 4;

/// Errors turning a raw ticker entry into a sample
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SampleError {
    /// Price string is not a positive decimal
    #[error("invalid price '{price}' for {symbol}")]
    InvalidPrice { symbol: String, price: String },
    /// Raw symbol too short to carry a base asset and a currency suffix
    #[error("malformed ticker symbol '{0}'")]
    MalformedSymbol(String),
}

/// Raw `{symbol, price}` entry as sent by the exchange (e.g. `BTCUSDT`, `"64235.12"`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickerEntry {
    pub symbol: String,
    pub price: String,
}

impl TickerEntry {
    pub fn new(symbol: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            price: price.into(),
        }
    }

    /// Whether the raw symbol ends in the given quote currency
    pub fn has_currency(&self, currency: &str) -> bool {
        split_ticker_symbol(&self.symbol)
            .map(|(_, suffix)| suffix == currency)
            .unwrap_or(false)
    }
}

/// Split a raw ticker symbol into `(base, currency)` by cutting off the fixed-width suffix.
///
/// Returns `None` when nothing would be left for the base asset.
pub fn split_ticker_symbol(raw: &str) -> Option<(&str, &str)> {
    if raw.len() <= CURRENCY_SUFFIX_LEN || !raw.is_char_boundary(raw.len() - CURRENCY_SUFFIX_LEN) {
        return None;
    }
    Some(raw.split_at(raw.len() - CURRENCY_SUFFIX_LEN))
}

/// One price observation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceSample {
    /// Observation time (shared by every sample of one ingestion batch)
    pub timestamp: DateTime<Utc>,
    /// Base asset, e.g. "BTC"
    pub symbol: String,
    /// Quote asset, e.g. "USDT"
    pub currency: String,
    /// Price of one unit of `symbol` in `currency`; a JSON number on the wire
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

impl PriceSample {
    /// Build a sample from a raw exchange entry observed at `timestamp`
    pub fn from_ticker(entry: &TickerEntry, timestamp: DateTime<Utc>) -> Result<Self, SampleError> {
        let (symbol, currency) = split_ticker_symbol(&entry.symbol)
            .ok_or_else(|| SampleError::MalformedSymbol(entry.symbol.clone()))?;

        let price = Decimal::from_str(entry.price.trim())
            .ok()
            .filter(|p| p.is_sign_positive() && !p.is_zero())
            .ok_or_else(|| SampleError::InvalidPrice {
                symbol: entry.symbol.clone(),
                price: entry.price.clone(),
            })?;

        Ok(Self {
            timestamp,
            symbol: symbol.to_string(),
            currency: currency.to_string(),
            price,
        })
    }
}

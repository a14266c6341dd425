//! Price feed module
//!
//! Live ticker prices from Binance: a streaming WebSocket API polled by the
//! ingestion worker, and a REST endpoint for single-symbol point queries.

mod binance;
mod rest;
mod types;

pub use binance::{BinanceConnection, BinanceFeed, BINANCE_WS_API_URL};
pub use rest::{BinanceRestClient, BINANCE_REST_URL};
pub use types::{
    FeedError, FeedErrorBody, TickerRequest, TickerResponse, STATUS_OK, TICKER_PRICE_METHOD,
};

use crate::price::PriceSample;
use async_trait::async_trait;

/// Source of streaming connections
#[async_trait]
pub trait PriceFeed: Send + Sync {
    /// Open a new connection to the feed
    async fn connect(&self) -> Result<Box<dyn FeedConnection>, FeedError>;
}

/// One open feed connection
#[async_trait]
pub trait FeedConnection: Send {
    /// Request all ticker prices and wait for the response
    async fn request_prices(&mut self) -> Result<TickerResponse, FeedError>;

    /// Tear the connection down
    async fn close(&mut self);
}

/// Single-symbol price lookup against the exchange
#[async_trait]
pub trait PointPriceSource: Send + Sync {
    async fn fetch_price(&self, symbol: &str, currency: &str) -> Result<PriceSample, FeedError>;
}

//! Binance WebSocket API price feed implementation

use super::{FeedConnection, FeedError, PriceFeed, TickerRequest, TickerResponse};
use crate::ws::{WsClient, WsConfig, WsError, WsSession};
use async_trait::async_trait;

/// Binance WebSocket API base URL
pub const BINANCE_WS_API_URL: &str = "wss://ws-api.binance.com:443/ws-api/v3";

/// Binance WebSocket API feed answering `ticker.price` requests
pub struct BinanceFeed {
    client: WsClient,
}

impl BinanceFeed {
    /// Create a new feed for the given WebSocket API URL
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_config(WsConfig::new(url))
    }

    pub fn with_config(config: WsConfig) -> Self {
        Self {
            client: WsClient::new(config),
        }
    }

    pub fn url(&self) -> &str {
        self.client.url()
    }

    /// Parse a raw response frame
    fn parse_response(text: &str) -> Result<TickerResponse, FeedError> {
        serde_json::from_str(text).map_err(|e| FeedError::Malformed(e.to_string()))
    }
}

impl Default for BinanceFeed {
    fn default() -> Self {
        Self::new(BINANCE_WS_API_URL)
    }
}

#[async_trait]
impl PriceFeed for BinanceFeed {
    async fn connect(&self) -> Result<Box<dyn FeedConnection>, FeedError> {
        let session = self.client.connect().await.map_err(|e| match e {
            WsError::Timeout(d) => FeedError::Connect(format!("timed out after {:?}", d)),
            other => FeedError::Connect(other.to_string()),
        })?;
        Ok(Box::new(BinanceConnection { session }))
    }
}

/// Open connection to the Binance WebSocket API
pub struct BinanceConnection {
    session: WsSession,
}

#[async_trait]
impl FeedConnection for BinanceConnection {
    async fn request_prices(&mut self) -> Result<TickerResponse, FeedError> {
        let request = serde_json::to_string(&TickerRequest::ticker_price())
            .map_err(|e| FeedError::Malformed(e.to_string()))?;
        let reply = self.session.request(request).await?;
        BinanceFeed::parse_response(&reply)
    }

    async fn close(&mut self) {
        self.session.close().await;
    }
}

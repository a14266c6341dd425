//! Binance REST client for single-symbol point queries

use super::{FeedError, PointPriceSource};
use crate::price::{PriceSample, TickerEntry};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use std::time::Duration;

/// Binance REST API base URL
pub const BINANCE_REST_URL: &str = "https://api.binance.com";

/// Client for `GET /api/v3/ticker/price`
#[derive(Debug, Clone)]
pub struct BinanceRestClient {
    base_url: String,
    client: Client,
    timeout: Duration,
}

impl BinanceRestClient {
    /// Create a client for `base_url` with a per-request timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FeedError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
            timeout,
        })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn ticker_url(&self) -> String {
        format!("{}/api/v3/ticker/price", self.base_url)
    }
}

#[async_trait]
impl PointPriceSource for BinanceRestClient {
    async fn fetch_price(&self, symbol: &str, currency: &str) -> Result<PriceSample, FeedError> {
        let pair = format!("{}{}", symbol, currency);
        tracing::debug!(pair = %pair, "Fetching point price");

        let response = self
            .client
            .get(self.ticker_url())
            .query(&[("symbol", pair.as_str())])
            .send()
            .await
            .map_err(|e| if e.is_timeout() { FeedError::Timeout } else { FeedError::Http(e) })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(FeedError::Status {
                status: status.as_u16(),
                message: body,
            });
        }

        let entry: TickerEntry = response
            .json()
            .await
            .map_err(|e| FeedError::Malformed(e.to_string()))?;

        PriceSample::from_ticker(&entry, Utc::now()).map_err(|e| FeedError::Malformed(e.to_string()))
    }
}

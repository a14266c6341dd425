//! Configuration types for price-tracker

use crate::feed::{BINANCE_REST_URL, BINANCE_WS_API_URL};
use crate::lookup::POINT_FETCH_TIMEOUT;
use crate::price::SUPPORTED_CURRENCY;
use crate::store::{DEFAULT_MAX_PAGE_COUNT, DEFAULT_MAX_RECORDS};
use crate::telemetry::LogFormat;
use crate::worker::WorkerConfig;
use serde::Deserialize;
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Price feed configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    /// Streaming WebSocket API endpoint
    #[serde(default = "default_ws_url")]
    pub ws_url: String,

    /// REST base URL for point queries
    #[serde(default = "default_rest_base_url")]
    pub rest_base_url: String,

    /// Quote currency to ingest
    #[serde(default = "default_quote_currency")]
    pub quote_currency: String,

    /// Seconds between two price requests
    #[serde(default = "default_fetch_interval_secs")]
    pub fetch_interval_secs: u64,

    /// Fixed delay before each connection attempt (seconds)
    #[serde(default = "default_reconnect_delay_secs")]
    pub reconnect_delay_secs: u64,

    /// Maximum wait for a streaming response (seconds)
    #[serde(default = "default_read_timeout_secs")]
    pub read_timeout_secs: u64,

    /// Point fetch timeout (milliseconds)
    #[serde(default = "default_point_fetch_timeout_ms")]
    pub point_fetch_timeout_ms: u64,
}

fn default_ws_url() -> String {
    BINANCE_WS_API_URL.to_string()
}
fn default_rest_base_url() -> String {
    BINANCE_REST_URL.to_string()
}
fn default_quote_currency() -> String {
    SUPPORTED_CURRENCY.to_string()
}
fn default_fetch_interval_secs() -> u64 {
    60
}
fn default_reconnect_delay_secs() -> u64 {
    5
}
fn default_read_timeout_secs() -> u64 {
    30
}
fn default_point_fetch_timeout_ms() -> u64 {
    POINT_FETCH_TIMEOUT.as_millis() as u64
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            ws_url: default_ws_url(),
            rest_base_url: default_rest_base_url(),
            quote_currency: default_quote_currency(),
            fetch_interval_secs: default_fetch_interval_secs(),
            reconnect_delay_secs: default_reconnect_delay_secs(),
            read_timeout_secs: default_read_timeout_secs(),
            point_fetch_timeout_ms: default_point_fetch_timeout_ms(),
        }
    }
}

impl FeedConfig {
    pub fn point_fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.point_fetch_timeout_ms)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }

    /// Worker settings derived from this section
    pub fn worker_config(&self) -> WorkerConfig {
        WorkerConfig {
            reconnect_delay: Duration::from_secs(self.reconnect_delay_secs),
            fetch_interval: Duration::from_secs(self.fetch_interval_secs),
            quote_currency: self.quote_currency.clone(),
        }
    }
}

/// Historical store backend
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Sqlite,
    Memory,
}

/// Historical store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,

    /// SQLite connection URL
    #[serde(default = "default_store_url")]
    pub url: String,

    /// SQLite page cap (size limit)
    #[serde(default = "default_max_page_count")]
    pub max_page_count: u64,

    /// Row cap for the in-memory backend
    #[serde(default = "default_max_records")]
    pub max_records: usize,
}

fn default_store_url() -> String {
    "sqlite://price-tracker.db".to_string()
}
fn default_max_page_count() -> u64 {
    DEFAULT_MAX_PAGE_COUNT
}
fn default_max_records() -> usize {
    DEFAULT_MAX_RECORDS
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            url: default_store_url(),
            max_page_count: default_max_page_count(),
            max_records: default_max_records(),
        }
    }
}

/// HTTP API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
    /// Prometheus exporter port; disabled when absent
    #[serde(default)]
    pub metrics_port: Option<u16>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::default(),
            metrics_port: None,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file, then apply environment overrides
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Apply `BINANCE_WEBSOCKET_URL`, `WEBSOCKET_FETCH_INTERVAL`, `SQLITE_URL`, `BIND_ADDR`
    pub fn apply_env_overrides(&mut self) -> anyhow::Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<()> {
        if let Some(url) = lookup("BINANCE_WEBSOCKET_URL") {
            self.feed.ws_url = url;
        }
        if let Some(interval) = lookup("WEBSOCKET_FETCH_INTERVAL") {
            self.feed.fetch_interval_secs = interval.trim().parse().map_err(|e| {
                anyhow::anyhow!("Invalid WEBSOCKET_FETCH_INTERVAL '{}': {}", interval, e)
            })?;
        }
        if let Some(url) = lookup("SQLITE_URL") {
            self.store.url = url;
        }
        if let Some(addr) = lookup("BIND_ADDR") {
            self.api.bind_addr = addr;
        }
        Ok(())
    }
}

//! price-tracker: live cryptocurrency price tracking
//!
//! This library provides the core components for:
//! - Ingesting ticker prices from the Binance WebSocket API
//! - A shared in-memory latest-price cache
//! - Persisting price history (SQLite or in-memory)
//! - Latest-price lookups with cache → point fetch → store fallback
//! - Downsampled 24h history queries
//! - An HTTP API over the lookups

pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod feed;
pub mod lookup;
pub mod price;
pub mod store;
pub mod telemetry;
pub mod worker;
pub mod ws;

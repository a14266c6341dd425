//! Ingestion worker configuration and state

use crate::feed::{FeedConnection, FeedError};
use crate::price::SUPPORTED_CURRENCY;
use std::time::Duration;

/// Ingestion worker configuration
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Fixed delay before every connection attempt
    pub reconnect_delay: Duration,
    /// Pause between two price requests on the same connection
    pub fetch_interval: Duration,
    /// Only entries quoted in this currency are ingested
    pub quote_currency: String,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            reconnect_delay: Duration::from_secs(5),
            fetch_interval: Duration::from_secs(60),
            quote_currency: SUPPORTED_CURRENCY.to_string(),
        }
    }
}

impl WorkerConfig {
    /// Set reconnect delay
    pub fn reconnect_delay(mut self, d: Duration) -> Self {
        self.reconnect_delay = d;
        self
    }

    /// Set fetch interval
    pub fn fetch_interval(mut self, d: Duration) -> Self {
        self.fetch_interval = d;
        self
    }
}

/// Connection state of the fetch loop
pub(crate) enum WorkerState {
    /// No open connection; the next step waits and connects
    Disconnected,
    /// Open connection ready for the next tick
    Connected(Box<dyn FeedConnection>),
    /// The connection failed and must be closed before reconnecting
    FatalThisConnection(Box<dyn FeedConnection>, FeedError),
}

impl WorkerState {
    pub(crate) fn name(&self) -> &'static str {
        match self {
            WorkerState::Disconnected => "disconnected",
            WorkerState::Connected(_) => "connected",
            WorkerState::FatalThisConnection(..) => "fatal",
        }
    }
}

//! Top-level assembly
//!
//! Owns the shared price cache and wires it, by handle, into the ingestion
//! worker and the lookup service.

use crate::api::AppState;
use crate::config::{Config, StoreBackend, StoreConfig};
use crate::feed::{BinanceFeed, BinanceRestClient};
use crate::lookup::LookupService;
use crate::price::PriceCache;
use crate::store::{HistoryStore, MemoryStore, SqliteStore};
use crate::worker::{IngestionWorker, WorkerHandle};
use crate::ws::WsConfig;
use std::sync::Arc;

/// Assembled application components
pub struct App {
    config: Config,
    cache: PriceCache,
    store: Arc<dyn HistoryStore>,
    lookup: Arc<LookupService>,
}

/// Open the configured historical store
pub async fn open_store(config: &StoreConfig) -> anyhow::Result<Arc<dyn HistoryStore>> {
    let store: Arc<dyn HistoryStore> = match config.backend {
        StoreBackend::Sqlite => Arc::new(SqliteStore::connect(&config.url, config.max_page_count).await?),
        StoreBackend::Memory => Arc::new(MemoryStore::with_capacity(config.max_records)),
    };
    Ok(store)
}

impl App {
    /// Build every component from configuration
    pub async fn build(config: Config) -> anyhow::Result<Self> {
        let store = open_store(&config.store).await?;
        Self::with_store(config, store)
    }

    /// Build around an existing store
    pub fn with_store(config: Config, store: Arc<dyn HistoryStore>) -> anyhow::Result<Self> {
        let cache = PriceCache::new();
        let point_source = Arc::new(BinanceRestClient::new(
            config.feed.rest_base_url.clone(),
            config.feed.point_fetch_timeout(),
        )?);
        let lookup = Arc::new(LookupService::new(
            cache.clone(),
            point_source,
            Arc::clone(&store),
            config.feed.point_fetch_timeout(),
        ));

        Ok(Self {
            config,
            cache,
            store,
            lookup,
        })
    }

    pub fn cache(&self) -> &PriceCache {
        &self.cache
    }

    pub fn lookup(&self) -> Arc<LookupService> {
        Arc::clone(&self.lookup)
    }

    /// Start the ingestion worker against the configured feed
    pub fn start_worker(&self) -> WorkerHandle {
        let feed = BinanceFeed::with_config(
            WsConfig::new(self.config.feed.ws_url.clone()).read_timeout(self.config.feed.read_timeout()),
        );
        IngestionWorker::new(
            Arc::new(feed),
            self.cache.clone(),
            Arc::clone(&self.store),
            self.config.feed.worker_config(),
        )
        .run()
    }

    /// Handler state for the HTTP API
    pub fn api_state(&self) -> AppState {
        AppState {
            lookup: self.lookup(),
            default_currency: self.config.feed.quote_currency.clone(),
        }
    }
}

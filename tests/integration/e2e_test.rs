//! End-to-end: feed → worker → cache/store → lookup

use crate::support::{wait_until, StubFeedServer};
use async_trait::async_trait;
use price_tracker::feed::{BinanceFeed, FeedError, PointPriceSource};
use price_tracker::lookup::{LookupError, LookupService};
use price_tracker::price::{PriceCache, PriceSample};
use price_tracker::store::{HistoryStore, MemoryStore};
use price_tracker::worker::{IngestionWorker, WorkerConfig};
use rust_decimal_macros::dec;
use std::sync::Arc;
use std::time::Duration;
use tokio_test::assert_ok;

const BTC_REPLY: &str = r#"{"status":200,"result":[
    {"symbol":"BTCUSDT","price":"64235.12"},
    {"symbol":"ETHBTC","price":"0.05"},
    {"symbol":"USDT","price":"1.0"}
]}"#;

const SERVER_ERROR_REPLY: &str = r#"{"status":500,"error":{"code":-1000,"msg":"internal"}}"#;

struct OfflinePointSource;

#[async_trait]
impl PointPriceSource for OfflinePointSource {
    async fn fetch_price(&self, _symbol: &str, _currency: &str) -> Result<PriceSample, FeedError> {
        Err(FeedError::Timeout)
    }
}

fn fast_config() -> WorkerConfig {
    WorkerConfig::default()
        .reconnect_delay(Duration::from_millis(10))
        .fetch_interval(Duration::from_millis(20))
}

#[tokio::test]
async fn test_worker_feeds_lookup() {
    let server = StubFeedServer::start(BTC_REPLY).await;
    let cache = PriceCache::new();
    let store = Arc::new(MemoryStore::new());

    let handle = IngestionWorker::new(
        Arc::new(BinanceFeed::new(server.url.clone())),
        cache.clone(),
        store.clone(),
        fast_config(),
    )
    .run();

    wait_until(|| cache.contains("BTC")).await;

    // Only the USDT-quoted, well-formed entry is ingested
    assert_eq!(cache.symbols(), vec!["BTC".to_string()]);

    let lookup = LookupService::new(
        cache.clone(),
        Arc::new(OfflinePointSource),
        store.clone(),
        Duration::from_millis(100),
    );
    assert!(lookup.is_symbol_valid("BTC"));
    assert!(!lookup.is_symbol_valid("ETH"));

    let latest = assert_ok!(lookup.get_latest_price("BTC", "USDT").await);
    assert_eq!(latest.symbol, "BTC");
    assert_eq!(latest.currency, "USDT");
    assert_eq!(latest.price, dec!(64235.12));

    // Persistence runs in the background
    tokio::time::timeout(Duration::from_secs(5), async {
        while store.is_empty().await {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("store never received a batch");

    handle.shutdown();
    handle.join().await;

    // One long-lived connection for every tick
    assert_eq!(server.connections(), 1);

    let history = assert_ok!(lookup.get_price_history_24h("BTC", "USDT").await);
    assert!(!history.is_empty());
    assert!(history.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
    assert!(history.iter().all(|s| s.price == dec!(64235.12)));

    let stored = assert_ok!(store.list_known_symbols().await);
    assert_eq!(stored, vec!["BTC".to_string()]);
}

#[tokio::test]
async fn test_server_error_forces_reconnect() {
    let server = StubFeedServer::start(SERVER_ERROR_REPLY).await;
    let cache = PriceCache::new();
    let store = Arc::new(MemoryStore::new());

    let handle = IngestionWorker::new(
        Arc::new(BinanceFeed::new(server.url.clone())),
        cache.clone(),
        store.clone(),
        fast_config(),
    )
    .run();

    wait_until(|| server.connections() >= 3).await;
    handle.shutdown();
    handle.join().await;

    // Each connection served exactly one failing request
    assert!(server.requests() <= server.connections());
    assert!(cache.is_empty());
    assert!(store.is_empty().await);

    let lookup = LookupService::new(
        cache,
        Arc::new(OfflinePointSource),
        store,
        Duration::from_millis(100),
    );
    let err = lookup.get_latest_price("BTC", "USDT").await.unwrap_err();
    assert!(matches!(err, LookupError::NotFound(_)));
}

#[tokio::test]
async fn test_worker_shutdown_while_disconnected() {
    let cache = PriceCache::new();
    let handle = IngestionWorker::new(
        Arc::new(BinanceFeed::new("ws://127.0.0.1:1")),
        cache.clone(),
        Arc::new(MemoryStore::new()),
        WorkerConfig::default().reconnect_delay(Duration::from_secs(30)),
    )
    .run();

    handle.shutdown();
    tokio::time::timeout(Duration::from_secs(2), handle.join())
        .await
        .expect("worker did not stop");
    assert!(cache.is_empty());
}

//! HTTP API over a real listener

use crate::support::closed_port_url;
use chrono::Utc;
use price_tracker::api::router;
use price_tracker::app::App;
use price_tracker::config::{Config, StoreBackend};
use price_tracker::price::PriceSample;
use price_tracker::store::{HistoryStore, MemoryStore};
use rust_decimal_macros::dec;
use serde_json::Value;
use std::sync::Arc;

async fn spawn_api() -> (String, App) {
    let mut config = Config::default();
    config.store.backend = StoreBackend::Memory;
    config.feed.rest_base_url = closed_port_url("http").await;
    config.feed.point_fetch_timeout_ms = 200;

    let store = Arc::new(MemoryStore::new());
    let sample = PriceSample {
        timestamp: Utc::now(),
        symbol: "BTC".to_string(),
        currency: "USDT".to_string(),
        price: dec!(64235.12),
    };
    store.insert_one(&sample).await.unwrap();

    let app = App::with_store(config, store).unwrap();
    app.cache().upsert(sample);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let service = router(app.api_state());
    tokio::spawn(async move {
        axum::serve(listener, service).await.unwrap();
    });
    (base, app)
}

async fn get_json(url: String) -> (u16, Value) {
    let resp = reqwest::get(url).await.unwrap();
    let status = resp.status().as_u16();
    (status, resp.json().await.unwrap())
}

#[tokio::test]
async fn test_latest_price_endpoint() {
    let (base, _app) = spawn_api().await;

    let (status, body) = get_json(format!("{}/price/latest?symbol=BTC", base)).await;
    assert_eq!(status, 200);
    assert_eq!(body["meta"]["code"], 200);
    assert_eq!(body["data"]["symbol"], "BTC");
    assert_eq!(body["data"]["price"], 64235.12);
}

#[tokio::test]
async fn test_latest_price_rejects_unknown_symbol() {
    let (base, _app) = spawn_api().await;

    let (status, body) = get_json(format!("{}/price/latest?symbol=DOGE", base)).await;
    assert_eq!(status, 400);
    assert_eq!(body["meta"]["code"], 400);
    assert!(body["data"].is_null());

    let (status, _) = get_json(format!("{}/price/latest", base)).await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn test_history_endpoint() {
    let (base, _app) = spawn_api().await;

    let (status, body) =
        get_json(format!("{}/price/interval?symbol=BTC&interval=24", base)).await;
    assert_eq!(status, 200);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["price"], 64235.12);

    let (status, _) = get_json(format!("{}/price/interval?symbol=BTC&interval=1", base)).await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn test_list_symbols_endpoint() {
    let (base, _app) = spawn_api().await;

    let (status, body) = get_json(format!("{}/list/name", base)).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"], serde_json::json!(["BTC"]));
}

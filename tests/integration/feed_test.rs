//! Integration tests for the price feed module

use crate::support::{closed_port_url, StubFeedServer};
use price_tracker::feed::{
    BinanceFeed, BinanceRestClient, FeedConnection, FeedError, PointPriceSource, PriceFeed,
};
use rust_decimal_macros::dec;
use std::time::Duration;
use tokio_test::assert_ok;

#[tokio::test]
async fn test_binance_feed_repeated_requests_on_one_connection() {
    let server =
        StubFeedServer::start(r#"{"status":200,"result":[{"symbol":"BTCUSDT","price":"1.5"}]}"#)
            .await;
    let feed = BinanceFeed::new(server.url.clone());

    let mut conn = assert_ok!(feed.connect().await);
    for _ in 0..3 {
        let resp = assert_ok!(conn.request_prices().await);
        assert_eq!(resp.result[0].price, "1.5");
    }
    conn.close().await;

    assert_eq!(server.connections(), 1);
    assert_eq!(server.requests(), 3);
}

#[tokio::test]
async fn test_binance_feed_malformed_payload() {
    let server = StubFeedServer::start("{not json").await;
    let feed = BinanceFeed::new(server.url.clone());

    let mut conn = assert_ok!(feed.connect().await);
    let err = conn.request_prices().await.unwrap_err();
    assert!(matches!(err, FeedError::Malformed(_)));
}

#[tokio::test]
async fn test_rest_client_unreachable() {
    let base = closed_port_url("http").await;
    let client = assert_ok!(BinanceRestClient::new(base, Duration::from_secs(2)));

    let err = client.fetch_price("BTC", "USDT").await.unwrap_err();
    assert!(matches!(err, FeedError::Http(_) | FeedError::Timeout));
}

#[tokio::test]
async fn test_rest_client_against_local_api() {
    use axum::routing::get;
    use axum::{Json, Router};
    use price_tracker::price::TickerEntry;

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let app = Router::new().route(
        "/api/v3/ticker/price",
        get(|| async { Json(TickerEntry::new("ETHUSDT", "3100.25")) }),
    );
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = assert_ok!(BinanceRestClient::new(base, Duration::from_secs(2)));
    let sample = assert_ok!(client.fetch_price("ETH", "USDT").await);
    assert_eq!(sample.symbol, "ETH");
    assert_eq!(sample.price, dec!(3100.25));
}

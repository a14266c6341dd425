//! HTTP API
//!
//! Thin boundary over [`LookupService`](crate::lookup::LookupService):
//! query validation, routing and the JSON response envelope.

mod handlers;
mod response;

pub use handlers::{latest_price, list_symbols, price_history, AppState, PriceQuery};
pub use response::{ApiError, ApiResponse, Meta};

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

/// Build the API router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/list/name", get(list_symbols))
        .route("/price/latest", get(latest_price))
        .route("/price/interval", get(price_history))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the API until `shutdown` resolves
pub async fn serve(
    bind_addr: &str,
    state: AppState,
    shutdown: impl std::future::Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "HTTP API listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

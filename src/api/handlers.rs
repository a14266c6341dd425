//! Request handlers

use super::response::{ApiError, ApiResponse};
use crate::lookup::LookupService;
use crate::price::PriceSample;
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use std::sync::Arc;

/// State shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub lookup: Arc<LookupService>,
    /// Used when a request names no currency
    pub default_currency: String,
}

/// Query string of the price endpoints
#[derive(Debug, Default, Deserialize)]
pub struct PriceQuery {
    pub symbol: Option<String>,
    pub currency: Option<String>,
    pub interval: Option<String>,
}

impl AppState {
    /// Extract a known symbol from the query
    fn validated_symbol(&self, query: &PriceQuery) -> Result<String, ApiError> {
        let symbol = query
            .symbol
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(ApiError::MissingSymbol)?;

        if !self.lookup.is_symbol_valid(symbol) {
            return Err(ApiError::InvalidSymbol(symbol.to_string()));
        }
        Ok(symbol.to_string())
    }

    fn currency<'a>(&'a self, query: &'a PriceQuery) -> &'a str {
        query
            .currency
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or(&self.default_currency)
    }
}

/// `GET /list/name`
pub async fn list_symbols(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<String>>>, ApiError> {
    let symbols = state.lookup.list_known_symbols().await?;
    Ok(ApiResponse::ok(symbols))
}

/// `GET /price/latest?symbol=BTC`
pub async fn latest_price(
    State(state): State<AppState>,
    Query(query): Query<PriceQuery>,
) -> Result<Json<ApiResponse<PriceSample>>, ApiError> {
    let symbol = state.validated_symbol(&query)?;
    let sample = state
        .lookup
        .get_latest_price(&symbol, state.currency(&query))
        .await?;
    Ok(ApiResponse::ok(sample))
}

/// `GET /price/interval?symbol=BTC&interval=24`
pub async fn price_history(
    State(state): State<AppState>,
    Query(query): Query<PriceQuery>,
) -> Result<Json<ApiResponse<Vec<PriceSample>>>, ApiError> {
    let symbol = state.validated_symbol(&query)?;
    match query.interval.as_deref().map(str::trim) {
        Some("24") | Some("24h") => {}
        _ => return Err(ApiError::UnsupportedInterval),
    }

    let history = state
        .lookup
        .get_price_history_24h(&symbol, state.currency(&query))
        .await?;
    Ok(ApiResponse::ok(history))
}

//! WebSocket client library
//!
//! Request/response sessions over a single WebSocket connection, with
//! connect/read timeouts and transparent ping handling.

mod client;
mod types;

pub use client::{WsClient, WsSession};
pub use types::{WsConfig, WsError};

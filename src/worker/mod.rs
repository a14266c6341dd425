//! Ingestion worker
//!
//! Polls the streaming price feed on a fixed interval, refreshes the shared
//! price cache and hands each batch to the historical store in the background.
//! Any failure closes the connection and reconnects after a fixed delay.

mod ingest;
mod types;

pub use ingest::{IngestionWorker, WorkerHandle};
pub use types::WorkerConfig;

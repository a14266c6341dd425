//! Ingestion worker: feed → cache + historical store

use super::types::{WorkerConfig, WorkerState};
use crate::feed::{FeedConnection, FeedError, PriceFeed, TickerResponse};
use crate::price::{PriceCache, PriceSample};
use crate::store::HistoryStore;
use crate::telemetry::{increment_counter, set_gauge, CounterMetric, GaugeMetric};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Background worker that keeps the price cache fresh
pub struct IngestionWorker {
    feed: Arc<dyn PriceFeed>,
    cache: PriceCache,
    store: Arc<dyn HistoryStore>,
    config: WorkerConfig,
}

/// Handle to a running [`IngestionWorker`]
///
/// Dropping the handle leaves the worker running.
pub struct WorkerHandle {
    shutdown_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl WorkerHandle {
    /// Ask the worker to stop at its next wait point
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(true);
    }

    /// Wait for the worker task to end
    pub async fn join(self) {
        if let Err(e) = self.task.await {
            tracing::error!(error = %e, "Ingestion worker task failed");
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl IngestionWorker {
    pub fn new(
        feed: Arc<dyn PriceFeed>,
        cache: PriceCache,
        store: Arc<dyn HistoryStore>,
        config: WorkerConfig,
    ) -> Self {
        Self {
            feed,
            cache,
            store,
            config,
        }
    }

    /// Spawn the fetch loop and return immediately
    pub fn run(self) -> WorkerHandle {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(async move {
            self.run_loop(shutdown_rx).await;
        });
        WorkerHandle { shutdown_tx, task }
    }

    /// Drive the connection state machine until shutdown is requested
    async fn run_loop(self, mut shutdown: watch::Receiver<bool>) {
        tracing::info!(
            reconnect_delay = ?self.config.reconnect_delay,
            fetch_interval = ?self.config.fetch_interval,
            "Ingestion worker started"
        );

        let mut state = WorkerState::Disconnected;
        loop {
            tracing::trace!(state = state.name(), "Worker step");
            state = match state {
                WorkerState::Disconnected => {
                    if pause(self.config.reconnect_delay, &mut shutdown).await {
                        break;
                    }
                    match self.feed.connect().await {
                        Ok(conn) => {
                            tracing::info!("Connected to price feed");
                            WorkerState::Connected(conn)
                        }
                        Err(e) => {
                            tracing::error!(error = %e, "Connect to price feed failed");
                            increment_counter(CounterMetric::FeedReconnects, 1);
                            WorkerState::Disconnected
                        }
                    }
                }
                WorkerState::Connected(mut conn) => match self.tick(conn.as_mut()).await {
                    Ok(_) => {
                        if pause(self.config.fetch_interval, &mut shutdown).await {
                            conn.close().await;
                            break;
                        }
                        WorkerState::Connected(conn)
                    }
                    Err(e) => WorkerState::FatalThisConnection(conn, e),
                },
                WorkerState::FatalThisConnection(mut conn, e) => {
                    tracing::error!(error = %e, "Price feed connection failed, reconnecting");
                    increment_counter(CounterMetric::FeedErrors, 1);
                    increment_counter(CounterMetric::FeedReconnects, 1);
                    conn.close().await;
                    WorkerState::Disconnected
                }
            };
        }

        tracing::info!("Ingestion worker stopped");
    }

    /// One request/response round on an open connection.
    ///
    /// Returns the number of samples ingested.
    async fn tick(&self, conn: &mut dyn FeedConnection) -> Result<usize, FeedError> {
        let response = conn.request_prices().await?;
        if !response.is_success() {
            return Err(FeedError::from_status(&response));
        }

        let batch = self.apply_response(&response, Utc::now());
        increment_counter(CounterMetric::TicksProcessed, 1);

        let count = batch.len();
        if !batch.is_empty() {
            self.persist(batch);
        }
        Ok(count)
    }

    /// Update the cache from a successful response and return the accepted batch.
    ///
    /// Every sample in the batch carries `timestamp`.
    pub(crate) fn apply_response(
        &self,
        response: &TickerResponse,
        timestamp: DateTime<Utc>,
    ) -> Vec<PriceSample> {
        let mut batch = Vec::with_capacity(response.result.len());
        let mut dropped = 0u64;

        for entry in response
            .result
            .iter()
            .filter(|e| e.has_currency(&self.config.quote_currency))
        {
            match PriceSample::from_ticker(entry, timestamp) {
                Ok(sample) => {
                    self.cache.upsert(sample.clone());
                    batch.push(sample);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Dropping ticker entry");
                    dropped += 1;
                }
            }
        }

        increment_counter(CounterMetric::SamplesIngested, batch.len() as u64);
        increment_counter(CounterMetric::EntriesDropped, dropped);
        set_gauge(GaugeMetric::CachedSymbols, self.cache.len() as f64);
        batch
    }

    /// Write a batch to the store without blocking the fetch loop
    fn persist(&self, batch: Vec<PriceSample>) {
        let store = Arc::clone(&self.store);
        tokio::spawn(async move {
            match store.bulk_insert(&batch).await {
                Ok(()) => tracing::info!(count = batch.len(), "Bulk insert"),
                Err(e) => {
                    tracing::error!(error = %e, count = batch.len(), "Bulk insert failed");
                    increment_counter(CounterMetric::StoreWriteFailures, 1);
                }
            }
        });
    }
}

/// Sleep for `duration`; returns true if shutdown was requested meanwhile
async fn pause(duration: Duration, shutdown: &mut watch::Receiver<bool>) -> bool {
    if *shutdown.borrow() {
        return true;
    }
    tokio::select! {
        _ = tokio::time::sleep(duration) => false,
        changed = shutdown.changed() => match changed {
            Ok(()) => *shutdown.borrow(),
            // Handle dropped: nobody can stop the worker anymore
            Err(_) => {
                tokio::time::sleep(duration).await;
                false
            }
        },
    }
}

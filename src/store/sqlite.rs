//! SQLite-backed historical store

use super::{HistoryStore, StoreError};
use crate::price::PriceSample;
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use std::borrow::Cow;
use std::str::FromStr;

/// Default page cap (1 GiB at 4 KiB pages)
pub const DEFAULT_MAX_PAGE_COUNT: u64 = 262_144;

/// Historical store persisted in a SQLite database
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (creating if missing) the database at `url` and prepare the schema.
    ///
    /// `max_page_count` bounds the database size; inserts fail once it is reached.
    pub async fn connect(url: &str, max_page_count: u64) -> Result<Self, StoreError> {
        // Pragmas are per connection, so the cap goes on the connect options
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .pragma("max_page_count", Cow::Owned(max_page_count.to_string()));

        // An in-memory database only lives as long as the connection that created it
        let pool_options = if url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };
        let pool = pool_options.connect_with(options).await?;

        let store = Self { pool };
        store.init_schema().await?;

        tracing::info!(url, max_page_count, "Historical store ready");
        Ok(store)
    }

    /// In-memory database, mainly for tests and dry runs
    pub async fn in_memory() -> Result<Self, StoreError> {
        Self::connect("sqlite::memory:", DEFAULT_MAX_PAGE_COUNT).await
    }

    async fn init_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS crypto_price (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                timestamp_ns INTEGER NOT NULL,
                symbol TEXT NOT NULL,
                currency TEXT NOT NULL,
                price TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_crypto_price_symbol_currency_timestamp
            ON crypto_price (symbol, currency, timestamp_ns)
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    fn row_to_sample(row: &SqliteRow) -> Result<PriceSample, StoreError> {
        let timestamp_ns: i64 = row.try_get("timestamp_ns")?;
        let price: String = row.try_get("price")?;

        let timestamp = Utc.timestamp_nanos(timestamp_ns);
        let price = Decimal::from_str(&price)
            .map_err(|e| StoreError::Corrupt(format!("price '{}': {}", price, e)))?;

        Ok(PriceSample {
            timestamp,
            symbol: row.try_get("symbol")?,
            currency: row.try_get("currency")?,
            price,
        })
    }
}

const INSERT_SQL: &str =
    "INSERT INTO crypto_price (timestamp_ns, symbol, currency, price) VALUES (?, ?, ?, ?)";

/// Nanoseconds since the epoch; representable from 1677 to 2262
fn timestamp_nanos(timestamp: &DateTime<Utc>) -> Result<i64, StoreError> {
    timestamp
        .timestamp_nanos_opt()
        .ok_or(StoreError::TimestampOutOfRange(*timestamp))
}

#[async_trait]
impl HistoryStore for SqliteStore {
    async fn insert_one(&self, sample: &PriceSample) -> Result<(), StoreError> {
        sqlx::query(INSERT_SQL)
            .bind(timestamp_nanos(&sample.timestamp)?)
            .bind(&sample.symbol)
            .bind(&sample.currency)
            .bind(sample.price.to_string())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn bulk_insert(&self, samples: &[PriceSample]) -> Result<(), StoreError> {
        if samples.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await?;
        for sample in samples {
            sqlx::query(INSERT_SQL)
                .bind(timestamp_nanos(&sample.timestamp)?)
                .bind(&sample.symbol)
                .bind(&sample.currency)
                .bind(sample.price.to_string())
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;

        tracing::debug!(count = samples.len(), "Bulk insert committed");
        Ok(())
    }

    async fn get_latest(&self, symbol: &str) -> Result<Option<PriceSample>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT timestamp_ns, symbol, currency, price
            FROM crypto_price
            WHERE symbol = ?
            ORDER BY timestamp_ns DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(symbol)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::row_to_sample).transpose()
    }

    async fn get_since(
        &self,
        symbol: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<PriceSample>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT timestamp_ns, symbol, currency, price
            FROM crypto_price
            WHERE symbol = ? AND timestamp_ns >= ?
            ORDER BY timestamp_ns ASC, id ASC
            "#,
        )
        .bind(symbol)
        .bind(timestamp_nanos(&since)?)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_sample).collect()
    }

    async fn list_known_symbols(&self) -> Result<Vec<String>, StoreError> {
        let rows = sqlx::query("SELECT DISTINCT symbol FROM crypto_price ORDER BY symbol")
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(|row| row.try_get::<String, _>("symbol").map_err(StoreError::from))
            .collect()
    }
}

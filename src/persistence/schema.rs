//! Table definitions, applied idempotently at startup.

use sqlx::SqlitePool;

use crate::error::BookingError;

/// DDL statements in dependency order.
const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS trade (
        trade_id        TEXT PRIMARY KEY NOT NULL,
        trader          TEXT NOT NULL,
        asset_class     TEXT NOT NULL,
        counterparty    TEXT NOT NULL,
        instrument_id   TEXT NOT NULL,
        instrument_name TEXT NOT NULL,
        trade_date_time TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_trade_counterparty ON trade (counterparty)",
    "CREATE INDEX IF NOT EXISTS idx_trade_trader ON trade (trader)",
    "CREATE INDEX IF NOT EXISTS idx_trade_instrument_id ON trade (instrument_id)",
    "CREATE INDEX IF NOT EXISTS idx_trade_instrument_name ON trade (instrument_name)",
    "CREATE TABLE IF NOT EXISTS trade_details (
        id                 INTEGER PRIMARY KEY AUTOINCREMENT,
        owner_id           TEXT NOT NULL REFERENCES trade (trade_id),
        buy_sell_indicator TEXT NOT NULL CHECK (buy_sell_indicator IN ('BUY', 'SELL')),
        price              REAL NOT NULL CHECK (price >= 0),
        quantity           INTEGER NOT NULL CHECK (quantity >= 0)
    )",
    "CREATE INDEX IF NOT EXISTS idx_trade_details_owner ON trade_details (owner_id)",
];

/// Creates any missing tables and indexes.
///
/// # Errors
///
/// Returns a [`BookingError::PersistenceError`] on database failure.
pub async fn create_schema(pool: &SqlitePool) -> Result<(), BookingError> {
    for statement in SCHEMA {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| BookingError::PersistenceError(e.to_string()))?;
    }
    tracing::debug!(statements = SCHEMA.len(), "schema applied");
    Ok(())
}

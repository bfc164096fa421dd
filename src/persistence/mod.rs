//! Persistence layer: SQLite storage for trades and trade details.
//!
//! Owns the schema and the connection pool. Repositories borrow a single
//! connection for their whole lifetime, so a request that acquires one
//! connection performs all of its reads and writes through it and returns
//! it to the pool when dropped.

pub mod models;
pub mod schema;
pub mod trade_details_repository;
pub mod trade_repository;

use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::config::BookingConfig;
use crate::error::BookingError;

pub use schema::create_schema;
pub use trade_details_repository::TradeDetailsRepository;
pub use trade_repository::TradeRepository;

/// Opens the connection pool described by `config`.
///
/// Foreign-key enforcement is switched on for every connection and file
/// databases are created when missing. A memory URL gives the pool one
/// shared-cache database that lives as long as any connection to it, so
/// idle connections are never reaped there.
///
/// # Errors
///
/// Returns [`BookingError::Internal`] for an unparsable `DATABASE_URL`, or
/// the mapped `sqlx` error if the first connection cannot be opened.
pub async fn connect(config: &BookingConfig) -> Result<SqlitePool, BookingError> {
    let options = SqliteConnectOptions::from_str(&config.database_url)
        .map_err(|e| BookingError::Internal(format!("invalid DATABASE_URL: {e}")))?
        .create_if_missing(true)
        .foreign_keys(true);

    let mut pool_options = SqlitePoolOptions::new()
        .max_connections(config.database_max_connections)
        .min_connections(config.database_min_connections)
        .acquire_timeout(config.connect_timeout());
    if config.database_url.contains(":memory:") {
        pool_options = pool_options.idle_timeout(None).max_lifetime(None);
    }

    let pool = pool_options
        .connect_with(options)
        .await
        .map_err(|e| BookingError::from_sqlx(e, &config.database_url))?;

    tracing::info!(
        url = %config.database_url,
        max_connections = config.database_max_connections,
        "database pool ready"
    );
    Ok(pool)
}

/// Opens the pool and creates the schema in one step.
///
/// # Errors
///
/// Propagates failures from [`connect`] and [`create_schema`].
pub async fn init(config: &BookingConfig) -> Result<SqlitePool, BookingError> {
    let pool = connect(config).await?;
    create_schema(&pool).await?;
    Ok(pool)
}

//! Shared application state injected into all Axum handlers.

use std::ops::{Deref, DerefMut};

use sqlx::pool::PoolConnection;
use sqlx::{Sqlite, SqliteConnection, SqlitePool};

use crate::error::BookingError;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
///
/// Holds only the connection pool. Handlers validate their input first and
/// then open a [`DbSession`] for the storage work.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Connection pool for the trade store.
    pub pool: SqlitePool,
}

impl AppState {
    /// Creates state around an open pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Acquires one pooled connection for the current request.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::ServiceUnavailable`] if no connection frees
    /// up within the acquire timeout.
    pub async fn session(&self) -> Result<DbSession, BookingError> {
        let conn = self.pool.acquire().await.map_err(|e| {
            tracing::error!(error = %e, "could not acquire database connection");
            BookingError::ServiceUnavailable(e.to_string())
        })?;
        Ok(DbSession(conn))
    }
}

/// One pooled database connection, private to the current request.
///
/// Handed back to the pool when dropped, whether the handler completed,
/// failed, or was cancelled by a disconnecting client.
#[derive(Debug)]
pub struct DbSession(PoolConnection<Sqlite>);

impl Deref for DbSession {
    type Target = SqliteConnection;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for DbSession {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

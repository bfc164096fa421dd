//! Reads and writes against the `trade` table.

use sqlx::SqliteConnection;

use super::models::{TRADE_COLUMNS, TradeRow, convert_rows};
use crate::domain::{Page, Trade, TradeField, TradeId};
use crate::error::BookingError;

/// Trade storage operations over one borrowed connection.
///
/// Every method issues a single statement, so each write commits on its
/// own and a failed insert leaves no row behind.
#[derive(Debug)]
pub struct TradeRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> TradeRepository<'c> {
    /// Wraps a connection for the duration of one request.
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }

    /// Inserts a new trade and returns it as stored.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Conflict`] if `trade.trade_id` is already
    /// booked; the existing row is left untouched.
    pub async fn create(&mut self, trade: &Trade) -> Result<Trade, BookingError> {
        let sql = format!(
            "INSERT INTO trade ({TRADE_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING {TRADE_COLUMNS}"
        );
        let row = sqlx::query_as::<_, TradeRow>(&sql)
            .bind(trade.trade_id.as_str())
            .bind(&trade.trader)
            .bind(&trade.asset_class)
            .bind(&trade.counterparty)
            .bind(&trade.instrument_id)
            .bind(&trade.instrument_name)
            .bind(trade.trade_date_time)
            .fetch_one(&mut *self.conn)
            .await
            .map_err(|e| BookingError::from_sqlx(e, trade.trade_id.as_str()))?;

        let stored = Trade::try_from(row)?;
        tracing::info!(trade_id = %stored.trade_id, trader = %stored.trader, "trade booked");
        Ok(stored)
    }

    /// Fetches one trade by id.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::TradeNotFound`] if no trade has this id.
    pub async fn get(&mut self, trade_id: &TradeId) -> Result<Trade, BookingError> {
        let sql = format!("SELECT {TRADE_COLUMNS} FROM trade WHERE trade_id = ?");
        let row = sqlx::query_as::<_, TradeRow>(&sql)
            .bind(trade_id.as_str())
            .fetch_optional(&mut *self.conn)
            .await
            .map_err(|e| BookingError::from_sqlx(e, trade_id.as_str()))?
            .ok_or_else(|| BookingError::TradeNotFound(trade_id.to_string()))?;

        Trade::try_from(row)
    }

    /// Returns `true` if a trade with this id is booked.
    ///
    /// # Errors
    ///
    /// Returns a [`BookingError::PersistenceError`] on database failure.
    pub async fn exists(&mut self, trade_id: &TradeId) -> Result<bool, BookingError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM trade WHERE trade_id = ?)")
            .bind(trade_id.as_str())
            .fetch_one(&mut *self.conn)
            .await
            .map_err(|e| BookingError::from_sqlx(e, trade_id.as_str()))
    }

    /// Lists trades in booking order.
    ///
    /// # Errors
    ///
    /// Returns a [`BookingError::PersistenceError`] on database failure.
    pub async fn list(&mut self, page: Page) -> Result<Vec<Trade>, BookingError> {
        let sql = format!("SELECT {TRADE_COLUMNS} FROM trade ORDER BY rowid LIMIT ? OFFSET ?");
        let rows = sqlx::query_as::<_, TradeRow>(&sql)
            .bind(i64::from(page.limit))
            .bind(i64::from(page.skip))
            .fetch_all(&mut *self.conn)
            .await
            .map_err(|e| BookingError::from_sqlx(e, "trade"))?;

        tracing::debug!(skip = page.skip, limit = page.limit, found = rows.len(), "listed trades");
        convert_rows(rows)
    }

    /// Lists every trade whose `field` equals `value` exactly, in booking
    /// order. No match yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns a [`BookingError::PersistenceError`] on database failure.
    pub async fn list_by_field(
        &mut self,
        field: TradeField,
        value: &str,
    ) -> Result<Vec<Trade>, BookingError> {
        let sql = format!(
            "SELECT {TRADE_COLUMNS} FROM trade WHERE {} = ? ORDER BY rowid",
            field.column()
        );
        let rows = sqlx::query_as::<_, TradeRow>(&sql)
            .bind(value)
            .fetch_all(&mut *self.conn)
            .await
            .map_err(|e| BookingError::from_sqlx(e, value))?;

        tracing::debug!(field = field.column(), value, found = rows.len(), "filtered trades");
        convert_rows(rows)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
pub(crate) mod tests {
    use chrono::TimeZone;
    use chrono::Utc;
    use sqlx::SqlitePool;
    use sqlx::pool::PoolConnection;
    use sqlx::Sqlite;

    use super::*;
    use crate::config::BookingConfig;

    pub(crate) fn make_trade(id: &str, trader: &str, counterparty: &str) -> Trade {
        let Ok(trade_id) = TradeId::new(id) else {
            panic!("valid trade id");
        };
        let Some(when) = Utc.with_ymd_and_hms(2024, 6, 1, 12, 30, 0).single() else {
            panic!("valid timestamp");
        };
        Trade {
            trade_id,
            trader: trader.to_string(),
            asset_class: "Equity".to_string(),
            counterparty: counterparty.to_string(),
            instrument_id: format!("INST-{trader}"),
            instrument_name: "Acme Corp".to_string(),
            trade_date_time: when,
        }
    }

    pub(crate) async fn make_pool() -> SqlitePool {
        let Ok(pool) = crate::persistence::init(&BookingConfig::in_memory()).await else {
            panic!("in-memory database");
        };
        pool
    }

    pub(crate) async fn acquire(pool: &SqlitePool) -> PoolConnection<Sqlite> {
        let Ok(conn) = pool.acquire().await else {
            panic!("connection available");
        };
        conn
    }

    #[tokio::test]
    async fn create_then_get_preserves_fields() {
        let pool = make_pool().await;
        let mut conn = acquire(&pool).await;
        let mut repo = TradeRepository::new(&mut conn);
        let trade = make_trade("T1", "alice", "CP1");

        let Ok(created) = repo.create(&trade).await else {
            panic!("create failed");
        };
        assert_eq!(created, trade);

        let Ok(fetched) = repo.get(&trade.trade_id).await else {
            panic!("get failed");
        };
        assert_eq!(fetched, trade);
    }

    #[tokio::test]
    async fn duplicate_id_conflicts_and_keeps_original() {
        let pool = make_pool().await;
        let mut conn = acquire(&pool).await;
        let mut repo = TradeRepository::new(&mut conn);
        let original = make_trade("T1", "alice", "CP1");
        let impostor = make_trade("T1", "mallory", "CP2");

        assert!(repo.create(&original).await.is_ok());
        let Err(err) = repo.create(&impostor).await else {
            panic!("duplicate accepted");
        };
        assert!(matches!(err, BookingError::Conflict(ref id) if id == "T1"));

        let Ok(fetched) = repo.get(&original.trade_id).await else {
            panic!("get failed");
        };
        assert_eq!(fetched.trader, "alice");
    }

    #[tokio::test]
    async fn get_missing_is_not_found() {
        let pool = make_pool().await;
        let mut conn = acquire(&pool).await;
        let mut repo = TradeRepository::new(&mut conn);
        let Ok(id) = TradeId::new("nope") else {
            panic!("valid id");
        };

        let result = repo.get(&id).await;
        assert!(matches!(result, Err(BookingError::TradeNotFound(_))));
        assert!(matches!(repo.exists(&id).await, Ok(false)));
    }

    #[tokio::test]
    async fn list_on_empty_store_is_empty() {
        let pool = make_pool().await;
        let mut conn = acquire(&pool).await;
        let mut repo = TradeRepository::new(&mut conn);

        let Ok(trades) = repo.list(Page::default()).await else {
            panic!("list failed");
        };
        assert!(trades.is_empty());
    }

    #[tokio::test]
    async fn list_respects_limit_skip_and_booking_order() {
        let pool = make_pool().await;
        let mut conn = acquire(&pool).await;
        let mut repo = TradeRepository::new(&mut conn);
        for id in ["T3", "T1", "T2", "T5", "T4"] {
            assert!(repo.create(&make_trade(id, "alice", "CP1")).await.is_ok());
        }

        let Ok(first_two) = repo.list(Page::new(None, Some(2))).await else {
            panic!("list failed");
        };
        let ids: Vec<_> = first_two.iter().map(|t| t.trade_id.as_str()).collect();
        assert_eq!(ids, vec!["T3", "T1"]);

        let Ok(rest) = repo.list(Page::new(Some(2), None)).await else {
            panic!("list failed");
        };
        let ids: Vec<_> = rest.iter().map(|t| t.trade_id.as_str()).collect();
        assert_eq!(ids, vec!["T2", "T5", "T4"]);

        let Ok(none) = repo.list(Page::new(None, Some(0))).await else {
            panic!("list failed");
        };
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn filters_match_exactly() {
        let pool = make_pool().await;
        let mut conn = acquire(&pool).await;
        let mut repo = TradeRepository::new(&mut conn);
        assert!(repo.create(&make_trade("T1", "alice", "CP1")).await.is_ok());
        assert!(repo.create(&make_trade("T2", "bob", "CP1")).await.is_ok());
        assert!(repo.create(&make_trade("T3", "alice", "CP2")).await.is_ok());

        let Ok(by_cp) = repo.list_by_field(TradeField::Counterparty, "CP1").await else {
            panic!("filter failed");
        };
        let ids: Vec<_> = by_cp.iter().map(|t| t.trade_id.as_str()).collect();
        assert_eq!(ids, vec!["T1", "T2"]);

        let Ok(by_trader) = repo.list_by_field(TradeField::Trader, "alice").await else {
            panic!("filter failed");
        };
        assert!(by_trader.iter().all(|t| t.trader == "alice"));
        assert_eq!(by_trader.len(), 2);

        let Ok(by_instrument) = repo
            .list_by_field(TradeField::InstrumentId, "INST-bob")
            .await
        else {
            panic!("filter failed");
        };
        assert_eq!(by_instrument.len(), 1);

        let Ok(by_name) = repo
            .list_by_field(TradeField::InstrumentName, "Acme Corp")
            .await
        else {
            panic!("filter failed");
        };
        assert_eq!(by_name.len(), 3);

        let Ok(case_differs) = repo.list_by_field(TradeField::Trader, "ALICE").await else {
            panic!("filter failed");
        };
        assert!(case_differs.is_empty());
    }
}

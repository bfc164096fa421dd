//! Reads and writes against the `trade_details` table.

use sqlx::SqliteConnection;

use super::models::{TRADE_DETAILS_COLUMNS, TradeDetailsRow, convert_rows};
use super::trade_repository::TradeRepository;
use crate::domain::{NewTradeDetails, Page, TradeDetails, TradeId};
use crate::error::BookingError;

/// Trade-details storage operations over one borrowed connection.
#[derive(Debug)]
pub struct TradeDetailsRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> TradeDetailsRepository<'c> {
    /// Wraps a connection for the duration of one request.
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }

    /// Attaches execution details to an existing trade.
    ///
    /// The owning trade is checked by the `trade_details.owner_id` foreign
    /// key inside the insert itself, so there is no window between check
    /// and write.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::ForeignKeyViolation`] if `owner` is not a
    /// booked trade; nothing is stored in that case.
    pub async fn create(
        &mut self,
        owner: &TradeId,
        details: &NewTradeDetails,
    ) -> Result<TradeDetails, BookingError> {
        let sql = format!(
            "INSERT INTO trade_details (owner_id, buy_sell_indicator, price, quantity) \
             VALUES (?, ?, ?, ?) RETURNING {TRADE_DETAILS_COLUMNS}"
        );
        let row = sqlx::query_as::<_, TradeDetailsRow>(&sql)
            .bind(owner.as_str())
            .bind(details.buy_sell_indicator.as_str())
            .bind(details.price)
            .bind(details.quantity)
            .fetch_one(&mut *self.conn)
            .await
            .map_err(|e| match BookingError::from_sqlx(e, owner.as_str()) {
                err @ BookingError::ForeignKeyViolation(_) => {
                    tracing::warn!(owner_id = %owner, "trade details rejected: unknown trade");
                    err
                }
                err => err,
            })?;

        let stored = TradeDetails::try_from(row)?;
        tracing::info!(
            id = stored.id,
            owner_id = %stored.owner_id,
            side = %stored.buy_sell_indicator,
            price = stored.price,
            quantity = stored.quantity,
            "trade details booked"
        );
        Ok(stored)
    }

    /// Lists all trade details in booking order.
    ///
    /// # Errors
    ///
    /// Returns a [`BookingError::PersistenceError`] on database failure.
    pub async fn list(&mut self, page: Page) -> Result<Vec<TradeDetails>, BookingError> {
        let sql = format!(
            "SELECT {TRADE_DETAILS_COLUMNS} FROM trade_details ORDER BY id LIMIT ? OFFSET ?"
        );
        let rows = sqlx::query_as::<_, TradeDetailsRow>(&sql)
            .bind(i64::from(page.limit))
            .bind(i64::from(page.skip))
            .fetch_all(&mut *self.conn)
            .await
            .map_err(|e| BookingError::from_sqlx(e, "trade_details"))?;

        tracing::debug!(skip = page.skip, limit = page.limit, found = rows.len(), "listed trade details");
        convert_rows(rows)
    }

    /// Lists the details owned by one trade, in booking order.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::TradeNotFound`] if `owner` is not a booked
    /// trade. A booked trade without details yields an empty list.
    pub async fn list_for_trade(
        &mut self,
        owner: &TradeId,
    ) -> Result<Vec<TradeDetails>, BookingError> {
        if !TradeRepository::new(&mut *self.conn).exists(owner).await? {
            return Err(BookingError::TradeNotFound(owner.to_string()));
        }

        let sql = format!(
            "SELECT {TRADE_DETAILS_COLUMNS} FROM trade_details WHERE owner_id = ? ORDER BY id"
        );
        let rows = sqlx::query_as::<_, TradeDetailsRow>(&sql)
            .bind(owner.as_str())
            .fetch_all(&mut *self.conn)
            .await
            .map_err(|e| BookingError::from_sqlx(e, owner.as_str()))?;

        convert_rows(rows)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::BuySellIndicator;
    use crate::persistence::trade_repository::tests::{acquire, make_pool, make_trade};

    fn details(side: BuySellIndicator, price: f64, quantity: i64) -> NewTradeDetails {
        let Ok(details) = NewTradeDetails::new(side, price, quantity) else {
            panic!("valid details");
        };
        details
    }

    #[tokio::test]
    async fn create_for_existing_trade() {
        let pool = make_pool().await;
        let mut conn = acquire(&pool).await;
        let trade = make_trade("T1", "bob", "CP9");
        assert!(TradeRepository::new(&mut conn).create(&trade).await.is_ok());

        let mut repo = TradeDetailsRepository::new(&mut conn);
        let Ok(stored) = repo
            .create(&trade.trade_id, &details(BuySellIndicator::Buy, 10.0, 5))
            .await
        else {
            panic!("create failed");
        };
        assert_eq!(stored.owner_id, trade.trade_id);
        assert_eq!(stored.buy_sell_indicator, BuySellIndicator::Buy);
        assert!((stored.price - 10.0).abs() < f64::EPSILON);
        assert_eq!(stored.quantity, 5);

        let Ok(all) = repo.list(Page::default()).await else {
            panic!("list failed");
        };
        assert_eq!(all, vec![stored]);
    }

    #[tokio::test]
    async fn unknown_owner_is_rejected_and_not_persisted() {
        let pool = make_pool().await;
        let mut conn = acquire(&pool).await;
        let mut repo = TradeDetailsRepository::new(&mut conn);
        let Ok(ghost) = TradeId::new("ghost") else {
            panic!("valid id");
        };

        let result = repo
            .create(&ghost, &details(BuySellIndicator::Sell, 1.0, 1))
            .await;
        assert!(matches!(result, Err(BookingError::ForeignKeyViolation(ref id)) if id == "ghost"));

        let Ok(all) = repo.list(Page::default()).await else {
            panic!("list failed");
        };
        assert!(all.is_empty());
    }

    #[tokio::test]
    async fn ids_are_generated_in_booking_order() {
        let pool = make_pool().await;
        let mut conn = acquire(&pool).await;
        let trade = make_trade("T1", "bob", "CP9");
        assert!(TradeRepository::new(&mut conn).create(&trade).await.is_ok());

        let mut repo = TradeDetailsRepository::new(&mut conn);
        for qty in 1..=3 {
            assert!(
                repo.create(&trade.trade_id, &details(BuySellIndicator::Buy, 2.5, qty))
                    .await
                    .is_ok()
            );
        }

        let Ok(page) = repo.list(Page::new(Some(1), Some(5))).await else {
            panic!("list failed");
        };
        let quantities: Vec<_> = page.iter().map(|d| d.quantity).collect();
        assert_eq!(quantities, vec![2, 3]);
        assert!(page.windows(2).all(|w| matches!(w, [a, b] if a.id < b.id)));
    }

    #[tokio::test]
    async fn list_for_trade_scopes_to_owner() {
        let pool = make_pool().await;
        let mut conn = acquire(&pool).await;
        let t1 = make_trade("T1", "bob", "CP9");
        let t2 = make_trade("T2", "bob", "CP9");
        {
            let mut trades = TradeRepository::new(&mut conn);
            assert!(trades.create(&t1).await.is_ok());
            assert!(trades.create(&t2).await.is_ok());
        }

        let mut repo = TradeDetailsRepository::new(&mut conn);
        assert!(repo.create(&t1.trade_id, &details(BuySellIndicator::Buy, 1.0, 1)).await.is_ok());
        assert!(repo.create(&t2.trade_id, &details(BuySellIndicator::Sell, 2.0, 2)).await.is_ok());

        let Ok(for_t2) = repo.list_for_trade(&t2.trade_id).await else {
            panic!("list failed");
        };
        assert_eq!(for_t2.len(), 1);
        assert!(for_t2.iter().all(|d| d.owner_id == t2.trade_id));

        let Ok(ghost) = TradeId::new("ghost") else {
            panic!("valid id");
        };
        assert!(matches!(
            repo.list_for_trade(&ghost).await,
            Err(BookingError::TradeNotFound(_))
        ));
    }

    #[tokio::test]
    async fn check_constraints_back_up_domain_validation() {
        let pool = make_pool().await;
        let mut conn = acquire(&pool).await;
        let trade = make_trade("T1", "bob", "CP9");
        assert!(TradeRepository::new(&mut conn).create(&trade).await.is_ok());

        let result = sqlx::query(
            "INSERT INTO trade_details (owner_id, buy_sell_indicator, price, quantity) \
             VALUES ('T1', 'HOLD', 1.0, 1)",
        )
        .execute(&mut *conn)
        .await
        .map_err(|e| BookingError::from_sqlx(e, "T1"));
        assert!(matches!(result, Err(BookingError::BadRequest(_))));
    }
}

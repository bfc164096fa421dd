//! Row models for the `trade` and `trade_details` tables.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::domain::{Trade, TradeDetails, TradeId};
use crate::error::BookingError;

/// Column list shared by every `trade` query, in [`TradeRow`] order.
pub const TRADE_COLUMNS: &str =
    "trade_id, trader, asset_class, counterparty, instrument_id, instrument_name, trade_date_time";

/// Column list shared by every `trade_details` query, in [`TradeDetailsRow`] order.
pub const TRADE_DETAILS_COLUMNS: &str = "id, owner_id, buy_sell_indicator, price, quantity";

/// A stored row from the `trade` table.
#[derive(Debug, Clone, FromRow)]
pub struct TradeRow {
    /// Primary key.
    pub trade_id: String,
    /// Trader name.
    pub trader: String,
    /// Asset class.
    pub asset_class: String,
    /// Counterparty name.
    pub counterparty: String,
    /// Instrument identifier.
    pub instrument_id: String,
    /// Instrument name.
    pub instrument_name: String,
    /// Execution timestamp, stored as RFC 3339 text.
    pub trade_date_time: DateTime<Utc>,
}

impl TryFrom<TradeRow> for Trade {
    type Error = BookingError;

    fn try_from(row: TradeRow) -> Result<Self, Self::Error> {
        let trade_id = TradeId::new(row.trade_id)
            .map_err(|e| BookingError::Internal(format!("corrupt trade row: {e}")))?;
        Ok(Self {
            trade_id,
            trader: row.trader,
            asset_class: row.asset_class,
            counterparty: row.counterparty,
            instrument_id: row.instrument_id,
            instrument_name: row.instrument_name,
            trade_date_time: row.trade_date_time,
        })
    }
}

/// A stored row from the `trade_details` table.
#[derive(Debug, Clone, FromRow)]
pub struct TradeDetailsRow {
    /// Auto-increment row ID.
    pub id: i64,
    /// Owning trade id.
    pub owner_id: String,
    /// `"BUY"` or `"SELL"`.
    pub buy_sell_indicator: String,
    /// Execution price.
    pub price: f64,
    /// Executed quantity.
    pub quantity: i64,
}

impl TryFrom<TradeDetailsRow> for TradeDetails {
    type Error = BookingError;

    fn try_from(row: TradeDetailsRow) -> Result<Self, Self::Error> {
        let corrupt = |e: BookingError| {
            BookingError::Internal(format!("corrupt trade_details row {}: {e}", row.id))
        };
        Ok(Self {
            id: row.id,
            owner_id: TradeId::new(row.owner_id).map_err(corrupt)?,
            buy_sell_indicator: row.buy_sell_indicator.parse().map_err(corrupt)?,
            price: row.price,
            quantity: row.quantity,
        })
    }
}

/// Converts a batch of rows, failing on the first corrupt one.
///
/// # Errors
///
/// Returns [`BookingError::Internal`] if any row violates a domain invariant.
pub fn convert_rows<R, T>(rows: Vec<R>) -> Result<Vec<T>, BookingError>
where
    T: TryFrom<R, Error = BookingError>,
{
    rows.into_iter().map(T::try_from).collect()
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::BuySellIndicator;

    #[test]
    fn details_row_with_unknown_side_is_corrupt() {
        let row = TradeDetailsRow {
            id: 7,
            owner_id: "T1".to_string(),
            buy_sell_indicator: "HOLD".to_string(),
            price: 1.0,
            quantity: 1,
        };
        let Err(err) = TradeDetails::try_from(row) else {
            panic!("unknown side accepted");
        };
        assert!(matches!(err, BookingError::Internal(_)));
    }

    #[test]
    fn details_row_converts() {
        let row = TradeDetailsRow {
            id: 1,
            owner_id: "T1".to_string(),
            buy_sell_indicator: "SELL".to_string(),
            price: 99.5,
            quantity: 10,
        };
        let Ok(details) = TradeDetails::try_from(row) else {
            panic!("valid row rejected");
        };
        assert_eq!(details.buy_sell_indicator, BuySellIndicator::Sell);
        assert_eq!(details.owner_id.as_str(), "T1");
    }
}

//! Execution details attached to a booked trade.

use std::fmt;
use std::str::FromStr;

use super::TradeId;
use crate::error::BookingError;

/// Direction of the trade from the booking party's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuySellIndicator {
    /// Booking party buys.
    Buy,
    /// Booking party sells.
    Sell,
}

impl BuySellIndicator {
    /// Wire and storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
        }
    }
}

impl fmt::Display for BuySellIndicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuySellIndicator {
    type Err = BookingError;

    /// Parses `"BUY"` or `"SELL"`. Matching is case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BUY" => Ok(Self::Buy),
            "SELL" => Ok(Self::Sell),
            other => Err(BookingError::BadRequest(format!(
                "buySellIndicator must be BUY or SELL, got {other:?}"
            ))),
        }
    }
}

/// Validated execution details, not yet attached to a trade.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewTradeDetails {
    /// Side of the execution.
    pub buy_sell_indicator: BuySellIndicator,
    /// Execution price, finite and non-negative.
    pub price: f64,
    /// Executed quantity, non-negative.
    pub quantity: i64,
}

impl NewTradeDetails {
    /// Validates and builds execution details.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::BadRequest`] if `price` is negative or not
    /// finite, or if `quantity` is negative.
    pub fn new(
        buy_sell_indicator: BuySellIndicator,
        price: f64,
        quantity: i64,
    ) -> Result<Self, BookingError> {
        if !price.is_finite() || price < 0.0 {
            return Err(BookingError::BadRequest(format!(
                "price must be a non-negative number, got {price}"
            )));
        }
        if quantity < 0 {
            return Err(BookingError::BadRequest(format!(
                "quantity must be non-negative, got {quantity}"
            )));
        }
        Ok(Self {
            buy_sell_indicator,
            price,
            quantity,
        })
    }
}

/// Stored execution details of one trade.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeDetails {
    /// System-generated identifier.
    pub id: i64,
    /// Id of the owning trade.
    pub owner_id: TradeId,
    /// Side of the execution.
    pub buy_sell_indicator: BuySellIndicator,
    /// Execution price.
    pub price: f64,
    /// Executed quantity.
    pub quantity: i64,
}

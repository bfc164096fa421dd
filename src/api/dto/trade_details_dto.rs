//! Trade-details DTOs.
//!
//! The side travels as `buySellIndicator` on the wire, matching the
//! established client contract.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{BuySellIndicator, NewTradeDetails, TradeDetails};
use crate::error::BookingError;

/// Request body for `POST /trade_details/{id}`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateTradeDetailsRequest {
    /// `"BUY"` or `"SELL"`.
    #[serde(rename = "buySellIndicator")]
    #[schema(example = "BUY")]
    pub buy_sell_indicator: String,
    /// Execution price, non-negative.
    #[schema(example = 101.5)]
    pub price: f64,
    /// Executed quantity, non-negative.
    #[schema(example = 100)]
    pub quantity: i64,
}

impl CreateTradeDetailsRequest {
    /// Validates the request into [`NewTradeDetails`].
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::BadRequest`] for an unknown side or a
    /// negative price or quantity.
    pub fn into_details(self) -> Result<NewTradeDetails, BookingError> {
        let side: BuySellIndicator = self.buy_sell_indicator.parse()?;
        NewTradeDetails::new(side, self.price, self.quantity)
    }
}

/// Stored trade details as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TradeDetailsResponse {
    /// System-generated identifier.
    pub id: i64,
    /// Id of the owning trade.
    pub owner_id: String,
    /// `"BUY"` or `"SELL"`.
    #[serde(rename = "buySellIndicator")]
    pub buy_sell_indicator: String,
    /// Execution price.
    pub price: f64,
    /// Executed quantity.
    pub quantity: i64,
}

impl From<TradeDetails> for TradeDetailsResponse {
    fn from(details: TradeDetails) -> Self {
        Self {
            id: details.id,
            owner_id: details.owner_id.into_inner(),
            buy_sell_indicator: details.buy_sell_indicator.to_string(),
            price: details.price,
            quantity: details.quantity,
        }
    }
}

//! Trade DTOs for create and lookup operations.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use crate::domain::{Trade, TradeId};
use crate::error::BookingError;

/// Request body for `POST /trade`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateTradeRequest {
    /// Client-chosen unique identifier; must not be blank.
    #[schema(example = "T1")]
    pub trade_id: String,
    /// Trader who booked the trade.
    #[schema(example = "alice")]
    pub trader: String,
    /// Category of the traded instrument.
    #[schema(example = "Equity")]
    pub asset_class: String,
    /// The other party to the trade.
    #[schema(example = "CP1")]
    pub counterparty: String,
    /// Identifier of the traded instrument.
    #[schema(example = "INST1")]
    pub instrument_id: String,
    /// Human-readable instrument name.
    #[schema(example = "Acme Corp")]
    pub instrument_name: String,
    /// ISO 8601 execution timestamp. Without an offset it is read as UTC.
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub trade_date_time: DateTime<Utc>,
}

impl CreateTradeRequest {
    /// Validates the request into a domain [`Trade`].
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::BadRequest`] if `trade_id` is blank.
    pub fn into_trade(self) -> Result<Trade, BookingError> {
        Ok(Trade {
            trade_id: TradeId::new(self.trade_id)?,
            trader: self.trader,
            asset_class: self.asset_class,
            counterparty: self.counterparty,
            instrument_id: self.instrument_id,
            instrument_name: self.instrument_name,
            trade_date_time: self.trade_date_time,
        })
    }
}

/// Parses an ISO 8601 timestamp, with or without a UTC offset.
///
/// Offset timestamps are converted to UTC; naive ones are taken as UTC.
///
/// # Errors
///
/// Returns a description of the expected formats if `raw` matches none.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    raw.parse::<NaiveDateTime>()
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .map(|naive| naive.and_utc())
        .map_err(|_| {
            format!("invalid timestamp {raw:?}: expected ISO 8601, e.g. 2024-06-01T00:00:00Z")
        })
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}

/// A booked trade as returned by every trade endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TradeResponse {
    /// Unique identifier.
    pub trade_id: String,
    /// Trader who booked the trade.
    pub trader: String,
    /// Category of the traded instrument.
    pub asset_class: String,
    /// The other party to the trade.
    pub counterparty: String,
    /// Identifier of the traded instrument.
    pub instrument_id: String,
    /// Human-readable instrument name.
    pub instrument_name: String,
    /// Execution timestamp.
    pub trade_date_time: DateTime<Utc>,
}

impl From<Trade> for TradeResponse {
    fn from(trade: Trade) -> Self {
        Self {
            trade_id: trade.trade_id.into_inner(),
            trader: trade.trader,
            asset_class: trade.asset_class,
            counterparty: trade.counterparty,
            instrument_id: trade.instrument_id,
            instrument_name: trade.instrument_name,
            trade_date_time: trade.trade_date_time,
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    const BODY: &str = r#"{
        "trade_id": "T1",
        "trader": "bob",
        "asset_class": "FX",
        "counterparty": "CP9",
        "instrument_id": "I1",
        "instrument_name": "X",
        "trade_date_time": "2024-06-01T00:00:00Z"
    }"#;

    #[test]
    fn response_echoes_request() {
        let Ok(req) = serde_json::from_str::<CreateTradeRequest>(BODY) else {
            panic!("valid body");
        };
        let Ok(trade) = req.into_trade() else {
            panic!("valid trade");
        };
        let Ok(echoed) = serde_json::to_value(TradeResponse::from(trade)) else {
            panic!("serializable");
        };
        let Ok(original) = serde_json::from_str::<serde_json::Value>(BODY) else {
            panic!("valid json");
        };
        assert_eq!(echoed, original);
    }

    #[test]
    fn missing_field_fails_to_parse() {
        let body = r#"{"trade_id": "T1", "trader": "bob"}"#;
        assert!(serde_json::from_str::<CreateTradeRequest>(body).is_err());
    }

    #[test]
    fn blank_trade_id_is_rejected() {
        let body = BODY.replace("\"T1\"", "\"  \"");
        let Ok(req) = serde_json::from_str::<CreateTradeRequest>(&body) else {
            panic!("valid body");
        };
        assert!(matches!(req.into_trade(), Err(BookingError::BadRequest(_))));
    }

    #[test]
    fn offset_timestamps_are_normalised_to_utc() {
        let body = BODY.replace("2024-06-01T00:00:00Z", "2024-06-01T02:00:00+02:00");
        let Ok(req) = serde_json::from_str::<CreateTradeRequest>(&body) else {
            panic!("valid body");
        };
        assert_eq!(req.trade_date_time.to_rfc3339(), "2024-06-01T00:00:00+00:00");
    }

    #[test]
    fn naive_timestamps_are_read_as_utc() {
        for raw in [
            "2024-06-01T00:00:00",
            "2024-06-01 00:00:00",
            "2024-06-01T00:00:00.000",
        ] {
            let Ok(ts) = parse_timestamp(raw) else {
                panic!("{raw:?} rejected");
            };
            assert_eq!(ts.to_rfc3339(), "2024-06-01T00:00:00+00:00", "{raw}");
        }
    }

    #[test]
    fn garbage_timestamps_are_rejected() {
        for raw in ["yesterday", "2024-06-01", "2024-13-01T00:00:00", ""] {
            assert!(parse_timestamp(raw).is_err(), "{raw:?} accepted");
        }
    }
}

//! The booked trade record.

use chrono::{DateTime, Utc};

use super::TradeId;

/// A single financial transaction as booked by a trader.
///
/// Trades are append-only: once stored, no field changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Trade {
    /// Client-chosen unique identifier.
    pub trade_id: TradeId,
    /// Trader who booked the trade.
    pub trader: String,
    /// Category of the traded instrument (e.g. `"Equity"`, `"Bond"`).
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

/// Trade columns that support exact-match lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeField {
    /// Filter on [`Trade::counterparty`].
    Counterparty,
    /// Filter on [`Trade::trader`].
    Trader,
    /// Filter on [`Trade::instrument_id`].
    InstrumentId,
    /// Filter on [`Trade::instrument_name`].
    InstrumentName,
}

impl TradeField {
    /// Column name in the `trade` table. Doubles as the wire field name.
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::Counterparty => "counterparty",
            Self::Trader => "trader",
            Self::InstrumentId => "instrument_id",
            Self::InstrumentName => "instrument_name",
        }
    }
}

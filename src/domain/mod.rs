//! Domain layer: trades, their execution details, and lookup vocabulary.
//!
//! These types are storage- and transport-agnostic. Validation that holds
//! regardless of where a value came from (non-blank ids, known sides,
//! non-negative amounts) lives here.

pub mod page;
pub mod trade;
pub mod trade_details;
pub mod trade_id;

pub use page::{MAX_PAGE_LIMIT, Page};
pub use trade::{Trade, TradeField};
pub use trade_details::{BuySellIndicator, NewTradeDetails, TradeDetails};
pub use trade_id::TradeId;

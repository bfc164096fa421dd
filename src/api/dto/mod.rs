//! Data Transfer Objects for REST request/response serialization.
//!
//! Request DTOs accept the loosest shape the wire format allows and are
//! turned into domain values by `into_*` methods, which is where boundary
//! validation happens.

pub mod common_dto;
pub mod trade_details_dto;
pub mod trade_dto;

pub use common_dto::*;
pub use trade_details_dto::*;
pub use trade_dto::*;

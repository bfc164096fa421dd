//! # trade-booking
//!
//! REST service for booking trades and their execution details.
//!
//! Clients book a [`domain::Trade`] under an id of their choosing, attach
//! any number of [`domain::TradeDetails`] to it, and look trades up by id,
//! counterparty, trader, or instrument. Records are append-only.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │     └── validate, then DbSession: one pooled connection per request
//!     │
//!     ├── TradeRepository / TradeDetailsRepository (persistence/)
//!     │
//!     └── SQLite
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;

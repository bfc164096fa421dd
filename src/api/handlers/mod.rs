//! REST endpoint handlers organized by resource.

pub mod system;
pub mod trade;
pub mod trade_details;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(trade::routes())
        .merge(trade_details::routes())
}

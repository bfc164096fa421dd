//! Trade handlers: book, fetch, list, and filter.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{CreateTradeRequest, PaginationParams, TradeDetailsResponse, TradeResponse};
use crate::api::extract::{AppJson, AppQuery};
use crate::app_state::AppState;
use crate::domain::{Trade, TradeField, TradeId};
use crate::error::{BookingError, ErrorResponse};
use crate::persistence::{TradeDetailsRepository, TradeRepository};

/// `POST /trade` — Book a new trade.
///
/// # Errors
///
/// Returns [`BookingError::BadRequest`] for an invalid body and
/// [`BookingError::Conflict`] if the `trade_id` is already booked.
#[utoipa::path(
    post,
    path = "/trade",
    tag = "Trades",
    summary = "Book a trade",
    description = "Stores a new trade. The client chooses the `trade_id`, which must be unique; resubmitting an existing id is rejected and leaves the stored trade untouched.",
    request_body = CreateTradeRequest,
    responses(
        (status = 201, description = "Trade booked", body = TradeResponse),
        (status = 400, description = "Malformed body or missing field", body = ErrorResponse),
        (status = 409, description = "Trade id already booked", body = ErrorResponse),
    )
)]
pub async fn create_trade(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateTradeRequest>,
) -> Result<impl IntoResponse, BookingError> {
    let trade = req.into_trade()?;
    let mut db = state.session().await?;
    let stored = TradeRepository::new(&mut db)
        .create(&trade)
        .await
        .inspect_err(|e| {
            if let BookingError::Conflict(_) = e {
                tracing::warn!(trade_id = %trade.trade_id, "duplicate trade rejected");
            }
        })?;

    Ok((StatusCode::CREATED, Json(TradeResponse::from(stored))))
}

/// `GET /trades` — List trades in booking order.
///
/// # Errors
///
/// Returns [`BookingError::BadRequest`] for non-numeric query values.
#[utoipa::path(
    get,
    path = "/trades",
    tag = "Trades",
    summary = "List trades",
    description = "Returns up to `limit` trades (default and maximum 100) after skipping `skip`, in booking order.",
    params(PaginationParams),
    responses(
        (status = 200, description = "Trades in booking order", body = Vec<TradeResponse>),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse),
    )
)]
pub async fn list_trades(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<PaginationParams>,
) -> Result<impl IntoResponse, BookingError> {
    let mut db = state.session().await?;
    let trades = TradeRepository::new(&mut db).list(params.page()).await?;
    Ok(Json(to_responses(trades)))
}

/// `GET /trade/{trade_id}` — Fetch one trade.
///
/// # Errors
///
/// Returns [`BookingError::TradeNotFound`] if the trade does not exist.
#[utoipa::path(
    get,
    path = "/trade/{trade_id}",
    tag = "Trades",
    summary = "Get a trade",
    params(
        ("trade_id" = String, Path, description = "Trade identifier"),
    ),
    responses(
        (status = 200, description = "The trade", body = TradeResponse),
        (status = 404, description = "Trade not found", body = ErrorResponse),
    )
)]
pub async fn get_trade(
    State(state): State<AppState>,
    Path(trade_id): Path<String>,
) -> Result<impl IntoResponse, BookingError> {
    let trade_id = lookup_id(trade_id)?;
    let mut db = state.session().await?;
    let trade = TradeRepository::new(&mut db).get(&trade_id).await?;
    Ok(Json(TradeResponse::from(trade)))
}

/// `GET /trade/{trade_id}/trade_details` — List the details owned by a trade.
///
/// # Errors
///
/// Returns [`BookingError::TradeNotFound`] if the trade does not exist.
#[utoipa::path(
    get,
    path = "/trade/{trade_id}/trade_details",
    tag = "Trades",
    summary = "List a trade's execution details",
    params(
        ("trade_id" = String, Path, description = "Trade identifier"),
    ),
    responses(
        (status = 200, description = "Details owned by the trade, oldest first", body = Vec<TradeDetailsResponse>),
        (status = 404, description = "Trade not found", body = ErrorResponse),
    )
)]
pub async fn list_trade_details_for_trade(
    State(state): State<AppState>,
    Path(trade_id): Path<String>,
) -> Result<impl IntoResponse, BookingError> {
    let trade_id = lookup_id(trade_id)?;
    let mut db = state.session().await?;
    let details = TradeDetailsRepository::new(&mut db)
        .list_for_trade(&trade_id)
        .await?;
    Ok(Json(
        details
            .into_iter()
            .map(TradeDetailsResponse::from)
            .collect::<Vec<_>>(),
    ))
}

/// `GET /trades/by-counterparty/{counterparty}`
///
/// # Errors
///
/// Returns [`BookingError::PersistenceError`] on storage failure.
#[utoipa::path(
    get,
    path = "/trades/by-counterparty/{counterparty}",
    tag = "Trades",
    summary = "List trades with a counterparty",
    params(("counterparty" = String, Path, description = "Exact counterparty name")),
    responses((status = 200, description = "Matching trades, possibly none", body = Vec<TradeResponse>))
)]
pub async fn list_by_counterparty(
    State(state): State<AppState>,
    Path(counterparty): Path<String>,
) -> Result<impl IntoResponse, BookingError> {
    filter_trades(&state, TradeField::Counterparty, &counterparty).await
}

/// `GET /trades/by-trader/{trader}`
///
/// # Errors
///
/// Returns [`BookingError::PersistenceError`] on storage failure.
#[utoipa::path(
    get,
    path = "/trades/by-trader/{trader}",
    tag = "Trades",
    summary = "List trades booked by a trader",
    params(("trader" = String, Path, description = "Exact trader name")),
    responses((status = 200, description = "Matching trades, possibly none", body = Vec<TradeResponse>))
)]
pub async fn list_by_trader(
    State(state): State<AppState>,
    Path(trader): Path<String>,
) -> Result<impl IntoResponse, BookingError> {
    filter_trades(&state, TradeField::Trader, &trader).await
}

/// `GET /trades/by-instrument-id/{instrument_id}`
///
/// # Errors
///
/// Returns [`BookingError::PersistenceError`] on storage failure.
#[utoipa::path(
    get,
    path = "/trades/by-instrument-id/{instrument_id}",
    tag = "Trades",
    summary = "List trades in an instrument",
    params(("instrument_id" = String, Path, description = "Exact instrument identifier")),
    responses((status = 200, description = "Matching trades, possibly none", body = Vec<TradeResponse>))
)]
pub async fn list_by_instrument_id(
    State(state): State<AppState>,
    Path(instrument_id): Path<String>,
) -> Result<impl IntoResponse, BookingError> {
    filter_trades(&state, TradeField::InstrumentId, &instrument_id).await
}

/// `GET /trades/by-instrument-name/{instrument_name}`
///
/// # Errors
///
/// Returns [`BookingError::PersistenceError`] on storage failure.
#[utoipa::path(
    get,
    path = "/trades/by-instrument-name/{instrument_name}",
    tag = "Trades",
    summary = "List trades by instrument name",
    params(("instrument_name" = String, Path, description = "Exact instrument name")),
    responses((status = 200, description = "Matching trades, possibly none", body = Vec<TradeResponse>))
)]
pub async fn list_by_instrument_name(
    State(state): State<AppState>,
    Path(instrument_name): Path<String>,
) -> Result<impl IntoResponse, BookingError> {
    filter_trades(&state, TradeField::InstrumentName, &instrument_name).await
}

/// Trade routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/trade", post(create_trade))
        .route("/trade/{trade_id}", get(get_trade))
        .route(
            "/trade/{trade_id}/trade_details",
            get(list_trade_details_for_trade),
        )
        .route("/trades", get(list_trades))
        .route(
            "/trades/by-counterparty/{counterparty}",
            get(list_by_counterparty),
        )
        .route("/trades/by-trader/{trader}", get(list_by_trader))
        .route(
            "/trades/by-instrument-id/{instrument_id}",
            get(list_by_instrument_id),
        )
        .route(
            "/trades/by-instrument-name/{instrument_name}",
            get(list_by_instrument_name),
        )
}

// ── Helpers ─────────────────────────────────────────────────────────────

async fn filter_trades(
    state: &AppState,
    field: TradeField,
    value: &str,
) -> Result<Json<Vec<TradeResponse>>, BookingError> {
    let mut db = state.session().await?;
    let trades = TradeRepository::new(&mut db)
        .list_by_field(field, value)
        .await?;
    Ok(Json(to_responses(trades)))
}

/// A blank id can never be booked, so a lookup for one is a miss.
fn lookup_id(raw: String) -> Result<TradeId, BookingError> {
    TradeId::new(raw.clone()).map_err(|_| BookingError::TradeNotFound(raw))
}

fn to_responses(trades: Vec<Trade>) -> Vec<TradeResponse> {
    trades.into_iter().map(TradeResponse::from).collect()
}

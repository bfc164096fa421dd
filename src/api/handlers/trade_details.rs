//! Trade-details handlers: attach execution details and list them.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{CreateTradeDetailsRequest, PaginationParams, TradeDetailsResponse};
use crate::api::extract::{AppJson, AppQuery};
use crate::app_state::AppState;
use crate::domain::TradeId;
use crate::error::{BookingError, ErrorResponse};
use crate::persistence::TradeDetailsRepository;

/// `POST /trade_details/{id}` — Attach execution details to a trade.
///
/// # Errors
///
/// Returns [`BookingError::BadRequest`] for an invalid body and
/// [`BookingError::ForeignKeyViolation`] if the owning trade is not booked.
#[utoipa::path(
    post,
    path = "/trade_details/{id}",
    tag = "Trade Details",
    summary = "Add execution details to a trade",
    description = "Creates a details record owned by trade `id`. The trade must already be booked; `buySellIndicator` must be `BUY` or `SELL` and `price`/`quantity` must be non-negative.",
    params(
        ("id" = String, Path, description = "Owning trade identifier"),
    ),
    request_body = CreateTradeDetailsRequest,
    responses(
        (status = 201, description = "Details stored", body = TradeDetailsResponse),
        (status = 400, description = "Malformed body or invalid value", body = ErrorResponse),
        (status = 404, description = "Owning trade not found", body = ErrorResponse),
    )
)]
pub async fn create_trade_details(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(req): AppJson<CreateTradeDetailsRequest>,
) -> Result<impl IntoResponse, BookingError> {
    let details = req.into_details()?;
    let owner =
        TradeId::new(id.clone()).map_err(|_| BookingError::ForeignKeyViolation(id))?;

    let mut db = state.session().await?;

    let stored = TradeDetailsRepository::new(&mut db)
        .create(&owner, &details)
        .await?;

    Ok((StatusCode::CREATED, Json(TradeDetailsResponse::from(stored))))
}

/// `GET /trade_details/` — List all trade details in booking order.
///
/// # Errors
///
/// Returns [`BookingError::BadRequest`] for non-numeric query values.
#[utoipa::path(
    get,
    path = "/trade_details/",
    tag = "Trade Details",
    summary = "List trade details",
    description = "Returns up to `limit` records (default and maximum 100) after skipping `skip`, oldest first.",
    params(PaginationParams),
    responses(
        (status = 200, description = "Trade details", body = Vec<TradeDetailsResponse>),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse),
    )
)]
pub async fn list_trade_details(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<PaginationParams>,
) -> Result<impl IntoResponse, BookingError> {
    let mut db = state.session().await?;
    let details = TradeDetailsRepository::new(&mut db)
        .list(params.page())
        .await?;
    Ok(Json(
        details
            .into_iter()
            .map(TradeDetailsResponse::from)
            .collect::<Vec<_>>(),
    ))
}

/// Trade-details routes. The listing answers with and without the
/// trailing slash.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/trade_details/{id}", post(create_trade_details))
        .route("/trade_details/", get(list_trade_details))
        .route("/trade_details", get(list_trade_details))
}

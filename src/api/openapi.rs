//! OpenAPI document for every REST endpoint.

use utoipa::OpenApi;

use super::dto::{
    CreateTradeDetailsRequest, CreateTradeRequest, TradeDetailsResponse, TradeResponse,
};
use super::handlers::{system, trade, trade_details};
use crate::error::{ErrorBody, ErrorResponse};

/// Generated OpenAPI 3.1 description of the service.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "trade-booking",
        description = "Book trades and their execution details, and look them up by id, counterparty, trader, or instrument."
    ),
    paths(
        trade::create_trade,
        trade::list_trades,
        trade::get_trade,
        trade::list_trade_details_for_trade,
        trade::list_by_counterparty,
        trade::list_by_trader,
        trade::list_by_instrument_id,
        trade::list_by_instrument_name,
        trade_details::create_trade_details,
        trade_details::list_trade_details,
        system::health_handler,
    ),
    components(schemas(
        CreateTradeRequest,
        TradeResponse,
        CreateTradeDetailsRequest,
        TradeDetailsResponse,
        ErrorResponse,
        ErrorBody,
    )),
    tags(
        (name = "Trades", description = "Booking and lookup of trades"),
        (name = "Trade Details", description = "Execution details owned by a trade"),
        (name = "System", description = "Operational endpoints"),
    )
)]
pub struct ApiDoc;

/// Swagger UI at `/swagger-ui`, serving the document at `/api-docs/openapi.json`.
#[cfg(feature = "swagger-ui")]
#[must_use]
pub fn swagger_ui() -> utoipa_swagger_ui::SwaggerUi {
    utoipa_swagger_ui::SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}

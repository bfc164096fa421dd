//! REST API layer: extractors, DTOs, route handlers, and router composition.

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod openapi;

use axum::Router;
use axum::error_handling::HandleErrorLayer;
use tower::timeout::error::Elapsed;
use tower::{BoxError, ServiceBuilder};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;
use crate::config::BookingConfig;
use crate::error::BookingError;

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    let router = Router::new()
        .merge(handlers::routes())
        .merge(handlers::system::routes());

    #[cfg(feature = "swagger-ui")]
    let router = router.merge(openapi::swagger_ui());

    router
}

/// Builds the servable application: routes, middleware, and state.
///
/// Requests running longer than the configured timeout are abandoned and
/// answered with [`BookingError::Timeout`].
pub fn build_app(state: AppState, config: &BookingConfig) -> Router {
    let timeout_secs = config.request_timeout_secs;
    let router = build_router().layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(HandleErrorLayer::new(move |err: BoxError| async move {
                middleware_error(err, timeout_secs)
            }))
            .timeout(config.request_timeout()),
    );

    let router = if config.cors_permissive {
        router.layer(CorsLayer::permissive())
    } else {
        router
    };

    router.with_state(state)
}

/// Maps a middleware failure onto the booking error taxonomy.
fn middleware_error(err: BoxError, timeout_secs: u64) -> BookingError {
    if err.is::<Elapsed>() {
        tracing::warn!(timeout_secs, "request timed out");
        BookingError::Timeout(timeout_secs)
    } else {
        BookingError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::*;

    #[test]
    fn elapsed_maps_to_request_timeout() {
        let err = middleware_error(Box::new(Elapsed::new()), 30);
        assert!(matches!(err, BookingError::Timeout(30)));
        assert_eq!(err.status_code(), StatusCode::REQUEST_TIMEOUT);
        assert_eq!(err.error_code(), 3003);
    }

    #[test]
    fn other_middleware_errors_are_internal() {
        let err = middleware_error(BoxError::from("layer exploded"), 30);
        assert!(matches!(err, BookingError::Internal(_)));
    }
}

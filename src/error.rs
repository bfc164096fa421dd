//! Booking error types with HTTP status code mapping.
//!
//! [`BookingError`] is the central error type for the service. Each variant
//! maps to a specific HTTP status code and structured JSON error response.
//! Storage constraint violations are translated here so that handlers never
//! see a raw database error.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 2002,
///     "message": "trade already exists: T1"
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code.
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category        | HTTP Status                  |
/// |-----------|-----------------|------------------------------|
/// | 1000–1999 | Validation      | 400 Bad Request              |
/// | 2000–2999 | State/Not Found | 404 Not Found / 409 Conflict |
/// | 3000–3999 | Server          | 408 / 500 / 503              |
#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    /// Malformed body, missing field, or a value outside its allowed set.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// No trade exists with the given id.
    #[error("trade not found: {0}")]
    TradeNotFound(String),

    /// A trade with the given id has already been booked.
    #[error("trade already exists: {0}")]
    Conflict(String),

    /// Trade details refer to a trade that does not exist.
    #[error("owning trade does not exist: {0}")]
    ForeignKeyViolation(String),

    /// Unexpected storage failure.
    #[error("persistence error: {0}")]
    PersistenceError(String),

    /// No database connection could be acquired for the request.
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),

    /// The request did not finish within the configured timeout.
    #[error("request timed out after {0} s")]
    Timeout(u64),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl BookingError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::BadRequest(_) => 1001,
            Self::TradeNotFound(_) => 2001,
            Self::Conflict(_) => 2002,
            Self::ForeignKeyViolation(_) => 2003,
            Self::Internal(_) => 3000,
            Self::PersistenceError(_) => 3001,
            Self::ServiceUnavailable(_) => 3002,
            Self::Timeout(_) => 3003,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::TradeNotFound(_) | Self::ForeignKeyViolation(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::PersistenceError(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Timeout(_) => StatusCode::REQUEST_TIMEOUT,
        }
    }

    /// Translates a `sqlx` error into the booking taxonomy.
    ///
    /// `key` names the record the failing statement was about; it becomes
    /// the payload of constraint-violation variants.
    #[must_use]
    pub fn from_sqlx(err: sqlx::Error, key: &str) -> Self {
        use sqlx::error::ErrorKind;

        match &err {
            sqlx::Error::Database(db_err) => match db_err.kind() {
                ErrorKind::UniqueViolation => Self::Conflict(key.to_string()),
                ErrorKind::ForeignKeyViolation => Self::ForeignKeyViolation(key.to_string()),
                ErrorKind::CheckViolation | ErrorKind::NotNullViolation => {
                    Self::BadRequest(db_err.message().to_string())
                }
                _ => Self::PersistenceError(err.to_string()),
            },
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                Self::ServiceUnavailable(err.to_string())
            }
            _ => Self::PersistenceError(err.to_string()),
        }
    }
}

impl IntoResponse for BookingError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        }
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

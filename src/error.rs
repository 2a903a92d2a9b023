//! Service error types with HTTP status code mapping.
//!
//! [`CarouselError`] is the central error type of the service. Each variant
//! maps to an HTTP status code, a numeric code and a stable string key that
//! front-ends use to look up a localized message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::CarouselItemId;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 2001,
///     "key": "carouselItemNotFound",
///     "message": "carousel item not found: 9999",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code, key and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code.
    pub code: u32,
    /// Stable error key (e.g. `"carouselItemNotFound"`).
    pub key: &'static str,
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
/// | Range     | Category          | HTTP Status               |
/// |-----------|-------------------|---------------------------|
/// | 1000–1099 | Validation        | 400 Bad Request           |
/// | 1400–1499 | Auth              | 401 / 403                 |
/// | 2000–2999 | Not Found         | 404 Not Found             |
/// | 3000–3999 | Server            | 500 Internal Server Error |
#[derive(Debug, thiserror::Error)]
pub enum CarouselError {
    /// No caller identity could be resolved from the request.
    #[error("authentication required")]
    AuthenticationRequired,

    /// The caller is authenticated but is not a system administrator.
    #[error("forbidden: system admin privileges required")]
    ForbiddenAccess,

    /// Carousel item with the given ID was not found.
    #[error("carousel item not found: {0}")]
    CarouselItemNotFound(CarouselItemId),

    /// Request validation failed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Persistence layer failure.
    #[error("persistence error: {0}")]
    PersistenceError(String),
}

impl CarouselError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::AuthenticationRequired => 1401,
            Self::ForbiddenAccess => 1403,
            Self::CarouselItemNotFound(_) => 2001,
            Self::PersistenceError(_) => 3001,
        }
    }

    /// Returns the stable string key for this variant.
    #[must_use]
    pub const fn error_key(&self) -> &'static str {
        match self {
            Self::InvalidRequest(_) => "parameterInvalid",
            Self::AuthenticationRequired => "loginRequired",
            Self::ForbiddenAccess => "userNotAllowed",
            Self::CarouselItemNotFound(_) => "carouselItemNotFound",
            Self::PersistenceError(_) => "persistenceError",
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::AuthenticationRequired => StatusCode::UNAUTHORIZED,
            Self::ForbiddenAccess => StatusCode::FORBIDDEN,
            Self::CarouselItemNotFound(_) => StatusCode::NOT_FOUND,
            Self::PersistenceError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for CarouselError {
    fn from(err: sqlx::Error) -> Self {
        Self::PersistenceError(err.to_string())
    }
}

impl IntoResponse for CarouselError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                key: self.error_key(),
                message: self.to_string(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

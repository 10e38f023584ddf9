//! API error types with HTTP status code mapping.
//!
//! [`ApiError`] is the central request-level error type. Each variant maps
//! to one HTTP status code and a flat JSON body of the form
//! `{"error": "<message>"}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::persistence::StoreError;

/// Message returned to clients for every 5xx response.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error.";

/// Message returned for unmatched routes.
pub const ROUTE_NOT_FOUND_MESSAGE: &str = "Route not found.";

/// Structured JSON error response body.
///
/// ```json
/// { "error": "Item not found." }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

/// Server-side error enum with HTTP status code mapping.
///
/// | Variant          | HTTP Status               |
/// |------------------|---------------------------|
/// | `InvalidRequest` | 400 Bad Request           |
/// | `ItemNotFound`   | 404 Not Found             |
/// | `RouteNotFound`  | 404 Not Found             |
/// | `Store`          | 500 Internal Server Error |
/// | `Internal`       | 500 Internal Server Error |
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Client-supplied data failed a precondition.
    #[error("{0}")]
    InvalidRequest(String),

    /// No item matched the given identifier. Holds the raw id as sent.
    #[error("item not found: {0}")]
    ItemNotFound(String),

    /// No route matched the request.
    #[error("route not found")]
    RouteNotFound,

    /// The store failed or was unreachable.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Unexpected failure outside the store.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::ItemNotFound(_) | Self::RouteNotFound => StatusCode::NOT_FOUND,
            Self::Store(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the message exposed to clients.
    ///
    /// Server-side failures collapse to a generic message; their detail
    /// only goes to the log.
    #[must_use]
    pub fn client_message(&self) -> String {
        match self {
            Self::InvalidRequest(msg) => msg.clone(),
            Self::ItemNotFound(_) => "Item not found.".to_string(),
            Self::RouteNotFound => ROUTE_NOT_FOUND_MESSAGE.to_string(),
            Self::Store(_) | Self::Internal(_) => INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = ErrorResponse {
            error: self.client_message(),
        };
        (status, axum::Json(body)).into_response()
    }
}

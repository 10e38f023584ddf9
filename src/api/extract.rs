//! Request extractors that report failures as [`ApiError`]s.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// JSON object body extractor whose rejection is a 400 [`ApiError`].
///
/// Axum's own `Json` rejects with plain-text 415/422 responses; this keeps
/// every client error in the `{"error": ...}` shape. Only a top-level JSON
/// object is accepted, so a derived `T` is never filled from an array.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let value = match Json::<serde_json::Value>::from_request(req, state).await {
            Ok(Json(value)) => value,
            Err(rejection) => return Err(rejection_error(&rejection)),
        };
        if !value.is_object() {
            return Err(ApiError::InvalidRequest(
                "Request body must be a JSON object.".to_string(),
            ));
        }
        serde_json::from_value(value)
            .map(Self)
            .map_err(|e| ApiError::InvalidRequest(format!("Invalid JSON body: {e}")))
    }
}

fn rejection_error(rejection: &JsonRejection) -> ApiError {
    let message = match rejection {
        JsonRejection::MissingJsonContentType(_) => {
            "Request body must be JSON (Content-Type: application/json).".to_string()
        }
        other => format!("Invalid JSON body: {}", other.body_text()),
    };
    ApiError::InvalidRequest(message)
}

/// Raw `{id}` path segment of an item route.
///
/// A segment that axum cannot decode (e.g. invalid UTF-8 after
/// percent-decoding) can never name an item, so it is a 404
/// [`ApiError::ItemNotFound`] rather than axum's plain-text 400.
#[derive(Debug)]
pub struct ItemIdPath(pub String);

impl<S> FromRequestParts<S> for ItemIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<String>::from_request_parts(parts, state).await {
            Ok(Path(id)) => Ok(Self(id)),
            Err(rejection) => Err(path_rejection_error(&rejection, parts.uri.path())),
        }
    }
}

fn path_rejection_error(rejection: &PathRejection, path: &str) -> ApiError {
    tracing::debug!(%path, reason = %rejection.body_text(), "undecodable item id");
    ApiError::ItemNotFound(path.to_string())
}

//! REST API layer: route handlers, DTOs, and router composition.
//!
//! Item endpoints live under `/items`; `/health` and the OpenAPI document
//! sit beside them at the root.

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod openapi;

use std::any::Any;

use axum::Router;
use axum::http::header::{self, HeaderValue, InvalidHeaderValue};
use axum::http::Method;
use axum::response::{IntoResponse, Response};
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::app_state::AppState;
use crate::error::ApiError;

/// Path serving the generated OpenAPI document.
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// Builds the REST router with all endpoints, without middleware.
pub fn build_router() -> Router<AppState> {
    let router = Router::new()
        .merge(handlers::routes())
        .merge(handlers::system::routes());

    #[cfg(feature = "swagger-ui")]
    let router = router.merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
            .url(OPENAPI_PATH, openapi::ApiDoc::openapi()),
    );

    #[cfg(not(feature = "swagger-ui"))]
    let router = router.route(OPENAPI_PATH, axum::routing::get(openapi_json));

    router
}

/// Builds the complete application: routes, fallbacks and middleware.
///
/// Unmatched paths and unsupported methods answer
/// `404 {"error": "Route not found."}`; handler panics answer
/// `500 {"error": "Internal server error."}`.
pub fn build_app(state: AppState, cors: CorsLayer) -> Router {
    build_router()
        .fallback(handlers::system::route_not_found)
        .method_not_allowed_fallback(handlers::system::route_not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(CatchPanicLayer::custom(handle_panic)),
        )
        .with_state(state)
}

/// CORS policy allowing only the configured frontend origin.
///
/// # Errors
///
/// Returns [`InvalidHeaderValue`] if `frontend_url` cannot be used as an
/// `Origin` header value.
pub fn cors_layer(frontend_url: &str) -> Result<CorsLayer, InvalidHeaderValue> {
    let origin = HeaderValue::from_str(frontend_url.trim_end_matches('/'))?;
    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list([origin]))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]))
}

#[cfg(not(feature = "swagger-ui"))]
async fn openapi_json() -> impl IntoResponse {
    axum::Json(openapi::ApiDoc::openapi())
}

fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");
    ApiError::Internal(format!("handler panicked: {detail}")).into_response()
}

//! Item CRUD handlers: list, create, update bought flag, delete.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, put};
use axum::{Json, Router};

use crate::api::dto::{CreateItemRequest, ItemDto, MessageResponse, UpdateItemRequest};
use crate::api::extract::{ItemIdPath, JsonBody};
use crate::app_state::AppState;
use crate::error::{ApiError, ErrorResponse};

/// `GET /items` — List all items, newest first.
///
/// # Errors
///
/// Returns [`ApiError::Store`] if the store is unreachable.
#[utoipa::path(
    get,
    path = "/items",
    tag = "Items",
    summary = "List items",
    description = "Returns every item on the shopping list sorted by creation time, newest first.",
    responses(
        (status = 200, description = "All items", body = Vec<ItemDto>),
        (status = 500, description = "Store failure", body = ErrorResponse),
    )
)]
pub async fn list_items(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let items = state.item_service.list_items().await?;
    let data: Vec<ItemDto> = items.into_iter().map(ItemDto::from).collect();
    Ok(Json(data))
}

/// `POST /items` — Add an item.
///
/// # Errors
///
/// Returns [`ApiError::InvalidRequest`] if `name` is missing, not a string
/// or blank, and [`ApiError::Store`] on store failure.
#[utoipa::path(
    post,
    path = "/items",
    tag = "Items",
    summary = "Create an item",
    description = "Adds an item with the given name. New items start with `bought = false`.",
    request_body = CreateItemRequest,
    responses(
        (status = 201, description = "Item created", body = ItemDto),
        (status = 400, description = "Missing or empty name", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse),
    )
)]
pub async fn create_item(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CreateItemRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let item = state.item_service.create_item(req.name_str()).await?;
    Ok((StatusCode::CREATED, Json(ItemDto::from(item))))
}

/// `PUT /items/{id}` — Set an item's bought flag.
///
/// # Errors
///
/// Returns [`ApiError::InvalidRequest`] if `bought` is not a boolean,
/// [`ApiError::ItemNotFound`] for unknown or malformed ids, and
/// [`ApiError::Store`] on store failure.
#[utoipa::path(
    put,
    path = "/items/{id}",
    tag = "Items",
    summary = "Update bought flag",
    description = "Sets the `bought` flag of one item. Other body fields are ignored.",
    params(
        ("id" = String, Path, description = "Item identifier"),
    ),
    request_body = UpdateItemRequest,
    responses(
        (status = 200, description = "Item updated", body = MessageResponse),
        (status = 400, description = "`bought` is not a boolean", body = ErrorResponse),
        (status = 404, description = "Item not found", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse),
    )
)]
pub async fn update_item(
    State(state): State<AppState>,
    ItemIdPath(id): ItemIdPath,
    JsonBody(req): JsonBody<UpdateItemRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let bought = req
        .bought_flag()
        .ok_or_else(|| ApiError::InvalidRequest("'bought' must be a boolean.".to_string()))?;

    state.item_service.set_bought(&id, bought).await?;

    Ok(Json(MessageResponse {
        message: "Item updated.".to_string(),
    }))
}

/// `DELETE /items/{id}` — Remove an item.
///
/// # Errors
///
/// Returns [`ApiError::ItemNotFound`] for unknown or malformed ids and
/// [`ApiError::Store`] on store failure.
#[utoipa::path(
    delete,
    path = "/items/{id}",
    tag = "Items",
    summary = "Delete an item",
    description = "Removes one item from the shopping list.",
    params(
        ("id" = String, Path, description = "Item identifier"),
    ),
    responses(
        (status = 204, description = "Item deleted"),
        (status = 404, description = "Item not found", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse),
    )
)]
pub async fn delete_item(
    State(state): State<AppState>,
    ItemIdPath(id): ItemIdPath,
) -> Result<impl IntoResponse, ApiError> {
    state.item_service.delete_item(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Item routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/items", get(list_items).post(create_item))
        .route("/items/{id}", put(update_item).delete(delete_item))
}

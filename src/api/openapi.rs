//! OpenAPI document for the REST surface.

use utoipa::OpenApi;

use crate::api::dto::{CreateItemRequest, ItemDto, MessageResponse, UpdateItemRequest};
use crate::api::handlers::{items, system};
use crate::error::ErrorResponse;

/// Generated OpenAPI 3 description of every REST endpoint.
#[derive(Debug, OpenApi)]
#[openapi(
    info(title = "Shopping List API", description = "CRUD API for a shopping list."),
    paths(
        items::list_items,
        items::create_item,
        items::update_item,
        items::delete_item,
        system::health_handler,
    ),
    components(schemas(
        ItemDto,
        CreateItemRequest,
        UpdateItemRequest,
        MessageResponse,
        ErrorResponse,
        system::HealthResponse,
    )),
    tags(
        (name = "Items", description = "Shopping-list items"),
        (name = "System", description = "Service status"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_item_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/items"));
        assert!(doc.paths.paths.contains_key("/items/{id}"));
        assert!(doc.paths.paths.contains_key("/health"));
    }
}

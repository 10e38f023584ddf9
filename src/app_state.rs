//! Shared application state injected into all Axum handlers.

use crate::service::ItemService;

/// Process-scoped state available to all handlers via Axum's `State`
/// extractor.
///
/// Built once after the store is connected, so every handler sees a ready
/// store handle.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Item service over the shared store handle.
    pub item_service: ItemService,
}

impl AppState {
    /// Wraps an item service into application state.
    #[must_use]
    pub fn new(item_service: ItemService) -> Self {
        Self { item_service }
    }
}

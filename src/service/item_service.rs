//! Item service: validation and not-found mapping over the item store.

use std::sync::Arc;

use crate::domain::{Item, ItemId, ItemName};
use crate::error::ApiError;
use crate::persistence::ItemStore;

/// Orchestration layer for all item operations.
///
/// Stateless apart from the shared store handle. Each method performs at
/// most one store call.
#[derive(Debug, Clone)]
pub struct ItemService {
    store: Arc<dyn ItemStore>,
}

impl ItemService {
    /// Creates a new `ItemService` over the given store handle.
    #[must_use]
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self { store }
    }

    /// Returns all items, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Store`] if the store call fails.
    pub async fn list_items(&self) -> Result<Vec<Item>, ApiError> {
        Ok(self.store.list().await?)
    }

    /// Creates an item from a client-supplied name.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] if `name` is missing or blank
    /// (nothing is persisted in that case), or [`ApiError::Store`] if the
    /// insert fails.
    pub async fn create_item(&self, name: Option<&str>) -> Result<Item, ApiError> {
        let name = name
            .and_then(ItemName::parse)
            .ok_or_else(|| ApiError::InvalidRequest("Item name is required.".to_string()))?;

        let item = self.store.insert(name).await?;
        tracing::info!(item_id = %item.id, name = %item.name, "item created");
        Ok(item)
    }

    /// Sets the bought flag of the item identified by `raw_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ItemNotFound`] if `raw_id` is malformed or no
    /// item matches it, or [`ApiError::Store`] if the update fails.
    pub async fn set_bought(&self, raw_id: &str, bought: bool) -> Result<(), ApiError> {
        let id = parse_id(raw_id)?;
        if !self.store.set_bought(id, bought).await? {
            return Err(ApiError::ItemNotFound(raw_id.to_string()));
        }
        tracing::info!(item_id = %id, bought, "item updated");
        Ok(())
    }

    /// Deletes the item identified by `raw_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ItemNotFound`] if `raw_id` is malformed or no
    /// item matches it, or [`ApiError::Store`] if the delete fails.
    pub async fn delete_item(&self, raw_id: &str) -> Result<(), ApiError> {
        let id = parse_id(raw_id)?;
        if !self.store.delete(id).await? {
            return Err(ApiError::ItemNotFound(raw_id.to_string()));
        }
        tracing::info!(item_id = %id, "item deleted");
        Ok(())
    }

    /// Reports whether the store answers.
    pub async fn store_is_up(&self) -> bool {
        match self.store.ping().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "store ping failed");
                false
            }
        }
    }
}

/// Interprets a client-supplied id; unparseable ids are lookup misses.
fn parse_id(raw_id: &str) -> Result<ItemId, ApiError> {
    raw_id
        .parse()
        .map_err(|_| ApiError::ItemNotFound(raw_id.to_string()))
}

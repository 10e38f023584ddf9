//! Item DTOs for list, create and update operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Item, ItemId};

/// An item as returned by the API.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemDto {
    /// Store-generated identifier.
    #[schema(value_type = String, format = Uuid)]
    pub id: ItemId,
    /// Item name.
    pub name: String,
    /// Whether the item has been purchased.
    pub bought: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<Item> for ItemDto {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            name: item.name,
            bought: item.bought,
            created_at: item.created_at,
        }
    }
}

/// Request body for `POST /items`.
///
/// `name` is kept as raw JSON so that a missing, `null` or non-string value
/// is reported as a validation error instead of a deserialization failure.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateItemRequest {
    /// Item name; must be a non-blank string.
    #[serde(default)]
    #[schema(value_type = String, example = "milk")]
    pub name: Option<serde_json::Value>,
}

impl CreateItemRequest {
    /// Returns `name` if it is a JSON string.
    #[must_use]
    pub fn name_str(&self) -> Option<&str> {
        self.name.as_ref().and_then(serde_json::Value::as_str)
    }
}

/// Request body for `PUT /items/{id}`.
///
/// Fields other than `bought` are ignored.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateItemRequest {
    /// New bought flag; must be a JSON boolean.
    #[serde(default)]
    #[schema(value_type = bool)]
    pub bought: Option<serde_json::Value>,
}

impl UpdateItemRequest {
    /// Returns `bought` if it is a JSON boolean.
    #[must_use]
    pub fn bought_flag(&self) -> Option<bool> {
        self.bought.as_ref().and_then(serde_json::Value::as_bool)
    }
}

/// Confirmation body for successful updates.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    /// Human-readable confirmation.
    pub message: String,
}

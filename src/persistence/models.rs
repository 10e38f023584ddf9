//! Database models for the items collection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::StoreError;
use crate::domain::{Item, ItemId};

/// The JSONB document body persisted per item.
///
/// Only `name` and `bought` live in the document; the identifier and
/// creation timestamp are store-managed columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemDocument {
    /// Item name, validated before insert.
    pub name: String,
    /// Purchase flag.
    #[serde(default)]
    pub bought: bool,
}

/// A raw row from the `items` table: `(id, doc, created_at)`.
pub type ItemRow = (Uuid, serde_json::Value, DateTime<Utc>);

impl ItemDocument {
    /// Decodes a raw row into an [`Item`].
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::CorruptDocument`] if `doc` does not have the
    /// expected shape.
    pub fn decode_row((id, doc, created_at): ItemRow) -> Result<Item, StoreError> {
        let document: Self =
            serde_json::from_value(doc).map_err(|e| StoreError::CorruptDocument {
                id: id.to_string(),
                reason: e.to_string(),
            })?;
        Ok(document.into_item(id, created_at))
    }

    /// Combines the document with its store-managed columns.
    #[must_use]
    pub fn into_item(self, id: Uuid, created_at: DateTime<Utc>) -> Item {
        Item {
            id: ItemId::from_uuid(id),
            name: self.name,
            bought: self.bought,
            created_at,
        }
    }
}

//! The shopping-list item entity.

use chrono::{DateTime, Utc};

use super::ItemId;

/// A single shopping-list entry as held by the store.
///
/// `name` is fixed at creation; `bought` is the only field that changes
/// over an item's lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Store-generated identifier.
    pub id: ItemId,
    /// Non-empty, trimmed item name.
    pub name: String,
    /// Whether the item has been purchased.
    pub bought: bool,
    /// Creation timestamp; drives the newest-first list order.
    pub created_at: DateTime<Utc>,
}

/// A validated item name.
///
/// Construction trims surrounding whitespace and rejects empty results, so
/// every `ItemName` satisfies the non-empty invariant the store relies on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemName(String);

impl ItemName {
    /// Trims `raw` and wraps it, or returns `None` if nothing is left.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the wrapper and returns the owned name.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

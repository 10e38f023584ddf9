//! Type-safe item identifier.
//!
//! [`ItemId`] is a newtype wrapper around [`uuid::Uuid`] so that item
//! identifiers cannot be confused with other UUIDs. Clients only ever see
//! its string form; parsing that string back is fallible and callers treat
//! a parse failure as a lookup miss.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Unique identifier for a shopping-list item.
///
/// Generated by the store when the item is inserted and immutable
/// thereafter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ItemId(uuid::Uuid);

impl ItemId {
    /// Creates a new random `ItemId` (UUID v4).
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Creates an `ItemId` from an existing [`uuid::Uuid`].
    #[must_use]
    pub const fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner [`uuid::Uuid`].
    #[must_use]
    pub const fn as_uuid(&self) -> &uuid::Uuid {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ItemId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        uuid::Uuid::parse_str(s.trim()).map(Self)
    }
}

//! In-process item store.
//!
//! [`MemoryItemStore`] keeps the collection in a `HashMap` behind a
//! [`tokio::sync::RwLock`]. Each entry remembers an insertion sequence so
//! items created within the same clock tick still list newest first.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{ItemStore, StoreError};
use crate::domain::{Item, ItemId, ItemName};

#[derive(Debug)]
struct Entry {
    item: Item,
    seq: u64,
}

/// Item store backed by process memory.
///
/// Reads run concurrently; each write takes the map lock once, which makes
/// every single-item mutation atomic.
#[derive(Debug, Default)]
pub struct MemoryItemStore {
    items: RwLock<HashMap<ItemId, Entry>>,
    next_seq: AtomicU64,
    closed: AtomicBool,
}

impl MemoryItemStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored items.
    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    /// Returns `true` if the store holds no items.
    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }

    fn ensure_open(&self) -> Result<(), StoreError> {
        if self.closed.load(Ordering::Acquire) {
            Err(StoreError::Closed)
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ItemStore for MemoryItemStore {
    async fn insert(&self, name: ItemName) -> Result<Item, StoreError> {
        self.ensure_open()?;
        let item = Item {
            id: ItemId::new(),
            name: name.into_inner(),
            bought: false,
            created_at: Utc::now(),
        };
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);

        let mut map = self.items.write().await;
        map.insert(
            item.id,
            Entry {
                item: item.clone(),
                seq,
            },
        );
        Ok(item)
    }

    async fn list(&self) -> Result<Vec<Item>, StoreError> {
        self.ensure_open()?;
        let map = self.items.read().await;
        let mut entries: Vec<&Entry> = map.values().collect();
        entries.sort_by(|a, b| {
            b.item
                .created_at
                .cmp(&a.item.created_at)
                .then_with(|| b.seq.cmp(&a.seq))
        });
        Ok(entries.into_iter().map(|e| e.item.clone()).collect())
    }

    async fn set_bought(&self, id: ItemId, bought: bool) -> Result<bool, StoreError> {
        self.ensure_open()?;
        let mut map = self.items.write().await;
        match map.get_mut(&id) {
            Some(entry) => {
                entry.item.bought = bought;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: ItemId) -> Result<bool, StoreError> {
        self.ensure_open()?;
        Ok(self.items.write().await.remove(&id).is_some())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.ensure_open()
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }
}

//! Persistence layer: the item store abstraction and its backends.
//!
//! [`ItemStore`] is the single seam between request handling and storage.
//! [`connect`] builds the process-wide store handle once at startup; the
//! handle is shared by every request and closed explicitly on shutdown.

pub mod memory;
pub mod models;
pub mod postgres;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;

use crate::config::{AppConfig, StoreBackend};
use crate::domain::{Item, ItemId, ItemName};

pub use memory::MemoryItemStore;
pub use postgres::PostgresItemStore;

/// Failures raised by a store backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Driver-level failure (connection refused, query error, pool closed).
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration failed at connect time.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// The store handle was closed; no further operations are served.
    #[error("store is closed")]
    Closed,

    /// A stored document could not be decoded.
    #[error("corrupt document {id}: {reason}")]
    CorruptDocument {
        /// Identifier of the offending document.
        id: String,
        /// Decoder message.
        reason: String,
    },
}

/// Storage operations over the single items collection.
///
/// Every method is one independent read or one atomic single-document
/// write. `set_bought` and `delete` report whether a document matched so
/// callers can tell "not found" apart from success.
#[async_trait]
pub trait ItemStore: Send + Sync + std::fmt::Debug {
    /// Inserts a new item with `bought = false` and returns it with its
    /// store-generated id and timestamp.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the write fails.
    async fn insert(&self, name: ItemName) -> Result<Item, StoreError>;

    /// Returns all items, newest first.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the read fails or a document is corrupt.
    async fn list(&self) -> Result<Vec<Item>, StoreError>;

    /// Sets the bought flag. Returns `false` if no item matched `id`.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the write fails.
    async fn set_bought(&self, id: ItemId, bought: bool) -> Result<bool, StoreError>;

    /// Removes an item. Returns `false` if no item matched `id`.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the write fails.
    async fn delete(&self, id: ItemId) -> Result<bool, StoreError>;

    /// Checks that the store is reachable.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the store does not answer.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Releases the underlying connection(s). Later calls fail.
    async fn close(&self);
}

/// Establishes the store handle selected by `config`.
///
/// For PostgreSQL this opens the connection pool eagerly and applies the
/// embedded migrations, so a misconfigured or unreachable database fails
/// here rather than on the first request.
///
/// # Errors
///
/// Returns [`StoreError::Database`] if the connection cannot be
/// established and [`StoreError::Migration`] if migrations fail.
pub async fn connect(config: &AppConfig) -> Result<Arc<dyn ItemStore>, StoreError> {
    match config.store_backend {
        StoreBackend::Memory => {
            tracing::warn!("using in-memory item store; data will not survive restarts");
            Ok(Arc::new(MemoryItemStore::new()))
        }
        StoreBackend::Postgres => {
            let pool = PgPoolOptions::new()
                .max_connections(config.database_max_connections.max(1))
                .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
                .connect(&config.database_url)
                .await?;
            tracing::info!("connected to document store");

            let store = PostgresItemStore::new(pool);
            store.migrate().await?;
            Ok(Arc::new(store))
        }
    }
}

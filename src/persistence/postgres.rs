//! PostgreSQL implementation of the item store.
//!
//! PostgreSQL is used as a document store: each item is one JSONB document
//! in the `items` table, keyed by a server-generated UUID.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::types::Json;
use uuid::Uuid;

use super::models::{ItemDocument, ItemRow};
use super::{ItemStore, StoreError};
use crate::domain::{Item, ItemId, ItemName};

static MIGRATOR: Migrator = sqlx::migrate!();

/// PostgreSQL-backed item store using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresItemStore {
    pool: PgPool,
}

impl PostgresItemStore {
    /// Creates a store over an already connected pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Applies the embedded schema migrations.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Migration`] if a migration fails.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        MIGRATOR.run(&self.pool).await?;
        tracing::info!("item collection migrations applied");
        Ok(())
    }
}

#[async_trait]
impl ItemStore for PostgresItemStore {
    async fn insert(&self, name: ItemName) -> Result<Item, StoreError> {
        let document = ItemDocument {
            name: name.into_inner(),
            bought: false,
        };

        let (id, created_at) = sqlx::query_as::<_, (Uuid, DateTime<Utc>)>(
            "INSERT INTO items (doc) VALUES ($1) RETURNING id, created_at",
        )
        .bind(Json(&document))
        .fetch_one(&self.pool)
        .await?;

        Ok(document.into_item(id, created_at))
    }

    async fn list(&self) -> Result<Vec<Item>, StoreError> {
        let rows = sqlx::query_as::<_, ItemRow>(
            "SELECT id, doc, created_at FROM items ORDER BY created_at DESC, seq DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ItemDocument::decode_row).collect()
    }

    async fn set_bought(&self, id: ItemId, bought: bool) -> Result<bool, StoreError> {
        let result = sqlx::query(
            "UPDATE items SET doc = jsonb_set(doc, '{bought}', to_jsonb($2::boolean), true) \
             WHERE id = $1",
        )
        .bind(*id.as_uuid())
        .bind(bought)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: ItemId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(*id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
        tracing::info!("document store connection closed");
    }
}

//! # Collection Repository
//!
//! Database access for designer collections. Deleting a collection cascades
//! to its products and their sizes (foreign-key actions in the schema).

use super::models::{Collection, CollectionForCreate, CollectionForUpdate};
use super::DbPool;
use sqlx::query_as;

pub struct CollectionRepository;

impl CollectionRepository {
    pub async fn create(
        pool: &DbPool,
        collection: CollectionForCreate,
    ) -> Result<Collection, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO collections (designer_id, name, collection_address, description) \
             VALUES (?, ?, ?, ?)",
        )
        .bind(collection.designer_id)
        .bind(&collection.name)
        .bind(&collection.collection_address)
        .bind(&collection.description)
        .execute(pool)
        .await?;

        let id = result.last_insert_rowid();

        query_as::<_, Collection>("SELECT * FROM collections WHERE id = ?")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &DbPool, id: i64) -> Result<Option<Collection>, sqlx::Error> {
        query_as::<_, Collection>("SELECT * FROM collections WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Look up a collection by its on-chain address.
    pub async fn find_by_address(
        pool: &DbPool,
        address: &str,
    ) -> Result<Option<Collection>, sqlx::Error> {
        query_as::<_, Collection>("SELECT * FROM collections WHERE collection_address = ?")
            .bind(address)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_by_designer(
        pool: &DbPool,
        designer_id: i64,
    ) -> Result<Vec<Collection>, sqlx::Error> {
        query_as::<_, Collection>(
            "SELECT * FROM collections WHERE designer_id = ? ORDER BY created_at DESC",
        )
        .bind(designer_id)
        .fetch_all(pool)
        .await
    }

    pub async fn list_all(pool: &DbPool) -> Result<Vec<Collection>, sqlx::Error> {
        query_as::<_, Collection>("SELECT * FROM collections ORDER BY created_at DESC")
            .fetch_all(pool)
            .await
    }

    /// Apply a partial update; absent fields keep their value.
    pub async fn update(
        pool: &DbPool,
        id: i64,
        update: CollectionForUpdate,
    ) -> Result<Option<Collection>, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE collections SET \
                name = COALESCE(?, name), \
                collection_address = COALESCE(?, collection_address), \
                description = COALESCE(?, description), \
                updated_at = CURRENT_TIMESTAMP \
             WHERE id = ?",
        )
        .bind(&update.name)
        .bind(&update.collection_address)
        .bind(&update.description)
        .bind(id)
        .execute(pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        Self::find_by_id(pool, id).await
    }

    /// Delete a collection. Returns `false` when the id did not resolve.
    pub async fn delete(pool: &DbPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM collections WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

//! # Product Repository
//!
//! Database access for products. A product belongs to exactly one collection;
//! the handlers verify the parent exists (and is owned by the caller) before
//! calling in here.

use super::models::{Product, ProductForCreate, ProductForUpdate};
use super::DbPool;
use sqlx::query_as;

pub struct ProductRepository;

impl ProductRepository {
    pub async fn create(pool: &DbPool, product: ProductForCreate) -> Result<Product, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO products (collection_id, name, description, image_url, price) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(product.collection_id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(&product.image_url)
        .bind(product.price)
        .execute(pool)
        .await?;

        let id = result.last_insert_rowid();

        query_as::<_, Product>("SELECT * FROM products WHERE id = ?")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &DbPool, id: i64) -> Result<Option<Product>, sqlx::Error> {
        query_as::<_, Product>("SELECT * FROM products WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_by_collection(
        pool: &DbPool,
        collection_id: i64,
    ) -> Result<Vec<Product>, sqlx::Error> {
        query_as::<_, Product>(
            "SELECT * FROM products WHERE collection_id = ? ORDER BY created_at DESC",
        )
        .bind(collection_id)
        .fetch_all(pool)
        .await
    }

    /// Products in the active-listing subset.
    pub async fn list_listed(pool: &DbPool) -> Result<Vec<Product>, sqlx::Error> {
        query_as::<_, Product>(
            "SELECT * FROM products WHERE is_listed = 1 ORDER BY created_at DESC",
        )
        .fetch_all(pool)
        .await
    }

    /// Apply a partial update; absent fields keep their value.
    pub async fn update(
        pool: &DbPool,
        id: i64,
        update: ProductForUpdate,
    ) -> Result<Option<Product>, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE products SET \
                name = COALESCE(?, name), \
                description = COALESCE(?, description), \
                image_url = COALESCE(?, image_url), \
                price = COALESCE(?, price), \
                updated_at = CURRENT_TIMESTAMP \
             WHERE id = ?",
        )
        .bind(&update.name)
        .bind(&update.description)
        .bind(&update.image_url)
        .bind(update.price)
        .bind(id)
        .execute(pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        Self::find_by_id(pool, id).await
    }

    /// Flip the active-listing flag.
    pub async fn set_listed(pool: &DbPool, id: i64, listed: bool) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE products SET is_listed = ?, updated_at = CURRENT_TIMESTAMP WHERE id = ?",
        )
        .bind(listed)
        .bind(id)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Delete a product; cascades to its sizes and listings.
    pub async fn delete(pool: &DbPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

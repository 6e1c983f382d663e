//! # Size Repository

use super::models::{Size, SizeForCreate, SizeForUpdate};
use super::DbPool;
use sqlx::query_as;

pub struct SizeRepository;

impl SizeRepository {
    pub async fn create(pool: &DbPool, size: SizeForCreate) -> Result<Size, sqlx::Error> {
        let result =
            sqlx::query("INSERT INTO sizes (product_id, label, quantity) VALUES (?, ?, ?)")
                .bind(size.product_id)
                .bind(&size.label)
                .bind(size.quantity)
                .execute(pool)
                .await?;

        let id = result.last_insert_rowid();

        query_as::<_, Size>("SELECT * FROM sizes WHERE id = ?")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &DbPool, id: i64) -> Result<Option<Size>, sqlx::Error> {
        query_as::<_, Size>("SELECT * FROM sizes WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_by_product(
        pool: &DbPool,
        product_id: i64,
    ) -> Result<Vec<Size>, sqlx::Error> {
        query_as::<_, Size>("SELECT * FROM sizes WHERE product_id = ? ORDER BY id")
            .bind(product_id)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &DbPool,
        id: i64,
        update: SizeForUpdate,
    ) -> Result<Option<Size>, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE sizes SET label = COALESCE(?, label), quantity = COALESCE(?, quantity) \
             WHERE id = ?",
        )
        .bind(&update.label)
        .bind(update.quantity)
        .bind(id)
        .execute(pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        Self::find_by_id(pool, id).await
    }

    pub async fn delete(pool: &DbPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sizes WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

//! # Listing Repository
//!
//! Marketplace sale state for products. A listing references a product that
//! exists at creation time; it goes away with the product (cascade).

use super::models::Listing;
use super::DbPool;
use sqlx::query_as;

pub struct ListingRepository;

impl ListingRepository {
    pub async fn create(
        pool: &DbPool,
        product_id: i64,
        price: i64,
    ) -> Result<Listing, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO listings (product_id, price, is_active) VALUES (?, ?, 1)",
        )
        .bind(product_id)
        .bind(price)
        .execute(pool)
        .await?;

        let id = result.last_insert_rowid();

        query_as::<_, Listing>("SELECT * FROM listings WHERE id = ?")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    pub async fn list_active(pool: &DbPool) -> Result<Vec<Listing>, sqlx::Error> {
        query_as::<_, Listing>(
            "SELECT * FROM listings WHERE is_active = 1 ORDER BY created_at DESC",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn find_active_by_product(
        pool: &DbPool,
        product_id: i64,
    ) -> Result<Option<Listing>, sqlx::Error> {
        query_as::<_, Listing>(
            "SELECT * FROM listings WHERE product_id = ? AND is_active = 1 LIMIT 1",
        )
        .bind(product_id)
        .fetch_optional(pool)
        .await
    }
}

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// User entity representing a complete user record from the database.
///
/// Users are never hard-deleted; Google sign-in users carry a hashed random
/// placeholder password.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub name: Option<String>,
    pub role: String,
    pub profile_picture: Option<String>,
    pub google_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data structure for creating a new user.
#[derive(Debug, Clone)]
pub struct UserForCreate {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub name: Option<String>,
    pub role: String,
    pub profile_picture: Option<String>,
    pub google_id: Option<String>,
}

/// Partial profile update; only provided fields are written.
#[derive(Debug, Clone, Default)]
pub struct UserForUpdate {
    pub username: Option<String>,
    pub name: Option<String>,
    pub profile_picture: Option<String>,
}

/// Collection entity, owned by a designer and optionally bound to an
/// on-chain address.
#[derive(Debug, Clone, FromRow)]
pub struct Collection {
    pub id: i64,
    pub designer_id: i64,
    pub name: String,
    pub collection_address: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CollectionForCreate {
    pub designer_id: i64,
    pub name: String,
    pub collection_address: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct CollectionForUpdate {
    pub name: Option<String>,
    pub collection_address: Option<String>,
    pub description: Option<String>,
}

/// Product entity; belongs to exactly one collection. Price is stored in
/// lamports.
#[derive(Debug, Clone, FromRow)]
pub struct Product {
    pub id: i64,
    pub collection_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub price: i64,
    pub is_listed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ProductForCreate {
    pub collection_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub price: i64,
}

#[derive(Debug, Clone, Default)]
pub struct ProductForUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub price: Option<i64>,
}

/// Size variant of a product.
#[derive(Debug, Clone, FromRow)]
pub struct Size {
    pub id: i64,
    pub product_id: i64,
    pub label: String,
    pub quantity: i64,
}

#[derive(Debug, Clone)]
pub struct SizeForCreate {
    pub product_id: i64,
    pub label: String,
    pub quantity: i64,
}

#[derive(Debug, Clone, Default)]
pub struct SizeForUpdate {
    pub label: Option<String>,
    pub quantity: Option<i64>,
}

/// Marketplace sale state for a product.
#[derive(Debug, Clone, FromRow)]
pub struct Listing {
    pub id: i64,
    pub product_id: i64,
    pub price: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Persisted metadata mirror of an on-chain mint, decoupled from the chain.
#[derive(Debug, Clone, FromRow)]
pub struct Nft {
    pub id: i64,
    pub mint_address: String,
    pub name: String,
    pub symbol: Option<String>,
    pub uri: Option<String>,
    pub group_address: Option<String>,
    pub seller_address: Option<String>,
    pub price_lamports: Option<i64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NftForCreate {
    pub mint_address: String,
    pub name: String,
    pub symbol: Option<String>,
    pub uri: Option<String>,
    pub group_address: Option<String>,
    pub seller_address: Option<String>,
    pub price_lamports: Option<i64>,
}

//! # Catalog Data Transfer Objects
//!
//! Request/response structures for collections, products, and sizes.

use crate::model::store::models::{Collection, Product, Size, User};
use lib_utils::time::format_time;
use serde::{Deserialize, Serialize};

// region: --- Collections

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionCreateRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollectionUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionResponse {
    pub id: i64,
    pub designer_id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: String,
}

impl From<Collection> for CollectionResponse {
    fn from(collection: Collection) -> Self {
        Self {
            id: collection.id,
            designer_id: collection.designer_id,
            name: collection.name,
            collection_address: collection.collection_address,
            description: collection.description,
            created_at: format_time(collection.created_at),
        }
    }
}

// endregion: --- Collections

// region: --- Products

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreateRequest {
    pub collection_id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Price in lamports.
    pub price: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductResponse {
    pub id: i64,
    pub collection_id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub price: i64,
    pub is_listed: bool,
    pub created_at: String,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            collection_id: product.collection_id,
            name: product.name,
            description: product.description,
            image_url: product.image_url,
            price: product.price,
            is_listed: product.is_listed,
            created_at: format_time(product.created_at),
        }
    }
}

// endregion: --- Products

// region: --- Sizes

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SizeCreateRequest {
    pub product_id: i64,
    pub label: String,
    pub quantity: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SizeUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SizeResponse {
    pub id: i64,
    pub product_id: i64,
    pub label: String,
    pub quantity: i64,
}

impl From<Size> for SizeResponse {
    fn from(size: Size) -> Self {
        Self {
            id: size.id,
            product_id: size.product_id,
            label: size.label,
            quantity: size.quantity,
        }
    }
}

// endregion: --- Sizes

// region: --- Designers

/// Public designer projection for the unauthenticated designer routes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignerResponse {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
}

impl From<User> for DesignerResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            name: user.name,
            profile_picture: user.profile_picture,
        }
    }
}

// endregion: --- Designers

//! # Marketplace Data Transfer Objects
//!
//! Request/response structures for the persisted NFT mirror and product
//! listings. The on-chain marketplace DTOs live next to their handlers in
//! `lib-web` since they wrap `lib-solana` types.

use crate::model::store::models::{Listing, Nft};
use lib_utils::time::format_time;
use serde::{Deserialize, Serialize};

/// `POST /api/saveNFT` payload: a metadata mirror of an on-chain mint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveNftRequest {
    pub mint_address: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seller_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_lamports: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NftResponse {
    pub id: i64,
    pub mint_address: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seller_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_lamports: Option<i64>,
    pub created_at: String,
}

impl From<Nft> for NftResponse {
    fn from(nft: Nft) -> Self {
        Self {
            id: nft.id,
            mint_address: nft.mint_address,
            name: nft.name,
            symbol: nft.symbol,
            uri: nft.uri,
            group_address: nft.group_address,
            seller_address: nft.seller_address,
            price_lamports: nft.price_lamports,
            created_at: format_time(nft.created_at),
        }
    }
}

/// `POST /api/listings` / `POST /api/products/list` payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingCreateRequest {
    pub product_id: i64,
    /// Price in lamports.
    pub price: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingResponse {
    pub id: i64,
    pub product_id: i64,
    pub price: i64,
    pub is_active: bool,
    pub created_at: String,
}

impl From<Listing> for ListingResponse {
    fn from(listing: Listing) -> Self {
        Self {
            id: listing.id,
            product_id: listing.product_id,
            price: listing.price,
            is_active: listing.is_active,
            created_at: format_time(listing.created_at),
        }
    }
}

//! # NFT Record Handlers
//!
//! Persisted mirror of minted NFT metadata, keyed by mint address. The
//! mirror is what the storefront shows without hitting the chain; the
//! authoritative state stays on-chain.
//!
//! ## Endpoints
//!
//! - `POST /api/saveNFT` (auth) - upsert by mint address
//! - `GET /api/nfts` - all saved records

use axum::{
    extract::{Json, State},
    http::StatusCode,
};
use lib_core::dto::{NftResponse, SaveNftRequest};
use lib_core::error::AppError;
use lib_core::model::store::models::NftForCreate;
use lib_core::model::store::nft_repository::NftRepository;
use lib_core::DbPool;
use lib_utils::validation::validate_not_empty;
use tracing::{info, instrument};

/// Upsert a metadata mirror row. Saving the same mint twice updates the
/// record in place instead of failing.
#[instrument(skip(pool, req), fields(mint = %req.mint_address))]
pub async fn save_nft(
    State(pool): State<DbPool>,
    Json(req): Json<SaveNftRequest>,
) -> Result<(StatusCode, Json<NftResponse>), AppError> {
    validate_not_empty(&req.mint_address, "mint_address").map_err(AppError::BadRequest)?;
    validate_not_empty(&req.name, "name").map_err(AppError::BadRequest)?;

    let nft = NftRepository::upsert(
        &pool,
        NftForCreate {
            mint_address: req.mint_address,
            name: req.name,
            symbol: req.symbol,
            uri: req.uri,
            group_address: req.group_address,
            seller_address: req.seller_address,
            price_lamports: req.price_lamports,
        },
    )
    .await?;

    info!("[NFTS] Saved record for mint {}", nft.mint_address);

    Ok((StatusCode::CREATED, Json(NftResponse::from(nft))))
}

pub async fn list_nfts(
    State(pool): State<DbPool>,
) -> Result<(StatusCode, Json<Vec<NftResponse>>), AppError> {
    let nfts = NftRepository::list_all(&pool).await?;
    let body: Vec<NftResponse> = nfts.into_iter().map(NftResponse::from).collect();
    Ok((StatusCode::OK, Json(body)))
}

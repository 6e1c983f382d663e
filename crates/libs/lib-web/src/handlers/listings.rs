//! # Listing Handlers
//!
//! Sale records for catalog products.
//!
//! ## Endpoints
//!
//! - `POST /api/listings` (auth) - record a sale listing for a product
//! - `GET /api/listings` - active listings

use axum::{
    extract::{Json, State},
    http::StatusCode,
};
use lib_core::dto::{ListingCreateRequest, ListingResponse};
use lib_core::error::AppError;
use lib_core::model::store::listing_repository::ListingRepository;
use lib_core::model::store::product_repository::ProductRepository;
use lib_core::DbPool;
use lib_utils::validation::validate_price;
use tracing::{info, instrument};

/// Record a listing. 404 when the product does not exist.
#[instrument(skip(pool, req), fields(product = req.product_id))]
pub async fn create_listing(
    State(pool): State<DbPool>,
    Json(req): Json<ListingCreateRequest>,
) -> Result<(StatusCode, Json<ListingResponse>), AppError> {
    validate_price(req.price).map_err(AppError::BadRequest)?;

    ProductRepository::find_by_id(&pool, req.product_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    let listing = ListingRepository::create(&pool, req.product_id, req.price).await?;
    ProductRepository::set_listed(&pool, req.product_id, true).await?;

    info!("[LISTINGS] Recorded listing {} for product {}", listing.id, req.product_id);

    Ok((StatusCode::CREATED, Json(ListingResponse::from(listing))))
}

pub async fn list_listings(
    State(pool): State<DbPool>,
) -> Result<(StatusCode, Json<Vec<ListingResponse>>), AppError> {
    let listings = ListingRepository::list_active(&pool).await?;
    let body: Vec<ListingResponse> = listings.into_iter().map(ListingResponse::from).collect();
    Ok((StatusCode::OK, Json(body)))
}

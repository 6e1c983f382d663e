//! # Product Handlers
//!
//! Product CRUD and listing state. Products hang off a collection; ownership
//! of a product is ownership of its collection.
//!
//! ## Endpoints
//!
//! - `POST /api/products` (auth) - create under an owned collection
//! - `GET /api/products/listed` - products with an active listing
//! - `GET /api/products/{id}` - one product
//! - `PUT /api/products/{id}` / `DELETE /api/products/{id}` (auth)
//! - `GET /api/collections/{collection_id}/products` and the public variant
//! - `POST /api/products/list` (auth) - list a product for sale at a price

use axum::{
    extract::{Extension, Json, Path, State},
    http::StatusCode,
};
use lib_auth::Claims;
use lib_core::dto::{
    ListingCreateRequest, ListingResponse, ProductCreateRequest, ProductResponse,
    ProductUpdateRequest,
};
use lib_core::error::AppError;
use lib_core::model::store::collection_repository::CollectionRepository;
use lib_core::model::store::listing_repository::ListingRepository;
use lib_core::model::store::models::{Product, ProductForCreate, ProductForUpdate};
use lib_core::model::store::product_repository::ProductRepository;
use lib_core::DbPool;
use lib_utils::validation::{validate_not_empty, validate_price};
use tracing::{info, instrument, warn};

#[cfg(test)]
mod tests;

/// Require the caller to own the collection the product belongs to.
async fn check_collection_owner(
    pool: &DbPool,
    collection_id: i64,
    claims: &Claims,
) -> Result<(), AppError> {
    let collection = CollectionRepository::find_by_id(pool, collection_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Collection not found".to_string()))?;

    let caller_id = claims.user_id().map_err(AppError::Unauthorized)?;
    if collection.designer_id != caller_id {
        warn!(
            "[PRODUCTS] User {} denied on collection {} owned by {}",
            caller_id, collection_id, collection.designer_id
        );
        return Err(AppError::Forbidden(
            "Collection belongs to another designer".to_string(),
        ));
    }
    Ok(())
}

/// Load a product and require ownership of its collection.
async fn owned_product(pool: &DbPool, id: i64, claims: &Claims) -> Result<Product, AppError> {
    let product = ProductRepository::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    check_collection_owner(pool, product.collection_id, claims).await?;
    Ok(product)
}

#[instrument(skip(pool, claims, req), fields(designer = %claims.sub))]
pub async fn create_product(
    State(pool): State<DbPool>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<ProductCreateRequest>,
) -> Result<(StatusCode, Json<ProductResponse>), AppError> {
    validate_not_empty(&req.name, "name").map_err(AppError::BadRequest)?;
    validate_price(req.price).map_err(AppError::BadRequest)?;

    check_collection_owner(&pool, req.collection_id, &claims).await?;

    let product = ProductRepository::create(
        &pool,
        ProductForCreate {
            collection_id: req.collection_id,
            name: req.name,
            description: req.description,
            image_url: req.image_url,
            price: req.price,
        },
    )
    .await?;

    info!("[PRODUCTS] Created product {} in collection {}", product.id, product.collection_id);

    Ok((StatusCode::CREATED, Json(ProductResponse::from(product))))
}

pub async fn get_product(
    State(pool): State<DbPool>,
    Path(id): Path<i64>,
) -> Result<(StatusCode, Json<ProductResponse>), AppError> {
    let product = ProductRepository::find_by_id(&pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;
    Ok((StatusCode::OK, Json(ProductResponse::from(product))))
}

#[instrument(skip(pool, claims, req), fields(designer = %claims.sub, product = id))]
pub async fn update_product(
    State(pool): State<DbPool>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
    Json(req): Json<ProductUpdateRequest>,
) -> Result<(StatusCode, Json<ProductResponse>), AppError> {
    if let Some(price) = req.price {
        validate_price(price).map_err(AppError::BadRequest)?;
    }

    owned_product(&pool, id, &claims).await?;

    let updated = ProductRepository::update(
        &pool,
        id,
        ProductForUpdate {
            name: req.name,
            description: req.description,
            image_url: req.image_url,
            price: req.price,
        },
    )
    .await?
    .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    Ok((StatusCode::OK, Json(ProductResponse::from(updated))))
}

#[instrument(skip(pool, claims), fields(designer = %claims.sub, product = id))]
pub async fn delete_product(
    State(pool): State<DbPool>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    owned_product(&pool, id, &claims).await?;

    let deleted = ProductRepository::delete(&pool, id).await?;
    if !deleted {
        return Err(AppError::NotFound("Product not found".to_string()));
    }

    info!("[PRODUCTS] Deleted product {} (cascade to sizes, listings)", id);

    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_by_collection(
    State(pool): State<DbPool>,
    Path(collection_id): Path<i64>,
) -> Result<(StatusCode, Json<Vec<ProductResponse>>), AppError> {
    // 404 for a collection that does not exist, empty list for one that does
    CollectionRepository::find_by_id(&pool, collection_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Collection not found".to_string()))?;

    let products = ProductRepository::list_by_collection(&pool, collection_id).await?;
    let body: Vec<ProductResponse> = products.into_iter().map(ProductResponse::from).collect();
    Ok((StatusCode::OK, Json(body)))
}

/// Mark a product as listed for sale at a price.
///
/// Creates the listing row and flips `is_listed` in one transaction-ish
/// sequence; the listing row is the source of truth for sale state.
#[instrument(skip(pool, claims, req), fields(designer = %claims.sub, product = req.product_id))]
pub async fn list_product(
    State(pool): State<DbPool>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<ListingCreateRequest>,
) -> Result<(StatusCode, Json<ListingResponse>), AppError> {
    validate_price(req.price).map_err(AppError::BadRequest)?;

    owned_product(&pool, req.product_id, &claims).await?;

    if ListingRepository::find_active_by_product(&pool, req.product_id)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict("Product is already listed".to_string()));
    }

    let listing = ListingRepository::create(&pool, req.product_id, req.price).await?;
    ProductRepository::set_listed(&pool, req.product_id, true).await?;

    info!("[PRODUCTS] Listed product {} at {} lamports", req.product_id, req.price);

    Ok((StatusCode::CREATED, Json(ListingResponse::from(listing))))
}

/// Products in the active-listing subset.
pub async fn listed_products(
    State(pool): State<DbPool>,
) -> Result<(StatusCode, Json<Vec<ProductResponse>>), AppError> {
    let products = ProductRepository::list_listed(&pool).await?;
    let body: Vec<ProductResponse> = products.into_iter().map(ProductResponse::from).collect();
    Ok((StatusCode::OK, Json(body)))
}

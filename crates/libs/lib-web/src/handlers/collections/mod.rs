//! # Collection Handlers
//!
//! Designer collection CRUD plus the public browse variants.
//!
//! ## Endpoints
//!
//! - `POST /api/collections` (auth) - create, owned by the caller
//! - `GET /api/collections` (auth) - caller's collections
//! - `PUT /api/collections/{id}` (auth) - partial update, owner only
//! - `DELETE /api/collections/{id}` (auth) - owner only; cascades to
//!   products, sizes, and listings
//! - `GET /api/collections/by-designer/{designer_id}` - collections of one designer
//! - `GET /api/public/collections` - all collections
//! - `GET /api/public/collections/{id}` - one collection
//! - `GET /api/public/collections/address/{address}` - lookup by on-chain address
//!
//! ## Ownership
//!
//! Write operations check the designer id from the verified token claims
//! against the collection row; a mismatch is a 403 regardless of role.

use axum::{
    extract::{Extension, Json, Path, State},
    http::StatusCode,
};
use lib_auth::Claims;
use lib_core::dto::{CollectionCreateRequest, CollectionResponse, CollectionUpdateRequest};
use lib_core::error::AppError;
use lib_core::model::store::collection_repository::CollectionRepository;
use lib_core::model::store::models::{Collection, CollectionForCreate, CollectionForUpdate};
use lib_core::DbPool;
use lib_utils::validation::validate_not_empty;
use tracing::{info, instrument, warn};


/// Load a collection and require the caller to own it.
async fn owned_collection(
    pool: &DbPool,
    id: i64,
    claims: &Claims,
) -> Result<Collection, AppError> {
    let collection = CollectionRepository::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Collection not found".to_string()))?;

    let caller_id = claims.user_id().map_err(AppError::Unauthorized)?;
    if collection.designer_id != caller_id {
        warn!(
            "[COLLECTIONS] User {} attempted to modify collection {} owned by {}",
            caller_id, id, collection.designer_id
        );
        return Err(AppError::Forbidden(
            "Collection belongs to another designer".to_string(),
        ));
    }

    Ok(collection)
}

#[instrument(skip(pool, claims, req), fields(designer = %claims.sub))]
pub async fn create_collection(
    State(pool): State<DbPool>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CollectionCreateRequest>,
) -> Result<(StatusCode, Json<CollectionResponse>), AppError> {
    validate_not_empty(&req.name, "name").map_err(AppError::BadRequest)?;

    let designer_id = claims.user_id().map_err(AppError::Unauthorized)?;

    let collection = CollectionRepository::create(
        &pool,
        CollectionForCreate {
            designer_id,
            name: req.name,
            collection_address: req.collection_address,
            description: req.description,
        },
    )
    .await?;

    info!("[COLLECTIONS] Created collection {} for designer {}", collection.id, designer_id);

    Ok((StatusCode::CREATED, Json(CollectionResponse::from(collection))))
}

pub async fn list_my_collections(
    State(pool): State<DbPool>,
    Extension(claims): Extension<Claims>,
) -> Result<(StatusCode, Json<Vec<CollectionResponse>>), AppError> {
    let designer_id = claims.user_id().map_err(AppError::Unauthorized)?;
    let collections = CollectionRepository::list_by_designer(&pool, designer_id).await?;
    let body: Vec<CollectionResponse> =
        collections.into_iter().map(CollectionResponse::from).collect();
    Ok((StatusCode::OK, Json(body)))
}

#[instrument(skip(pool, claims, req), fields(designer = %claims.sub, collection = id))]
pub async fn update_collection(
    State(pool): State<DbPool>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
    Json(req): Json<CollectionUpdateRequest>,
) -> Result<(StatusCode, Json<CollectionResponse>), AppError> {
    owned_collection(&pool, id, &claims).await?;

    let updated = CollectionRepository::update(
        &pool,
        id,
        CollectionForUpdate {
            name: req.name,
            collection_address: req.collection_address,
            description: req.description,
        },
    )
    .await?
    .ok_or_else(|| AppError::NotFound("Collection not found".to_string()))?;

    Ok((StatusCode::OK, Json(CollectionResponse::from(updated))))
}

#[instrument(skip(pool, claims), fields(designer = %claims.sub, collection = id))]
pub async fn delete_collection(
    State(pool): State<DbPool>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    owned_collection(&pool, id, &claims).await?;

    let deleted = CollectionRepository::delete(&pool, id).await?;
    if !deleted {
        return Err(AppError::NotFound("Collection not found".to_string()));
    }

    info!("[COLLECTIONS] Deleted collection {} (cascade)", id);

    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_by_designer(
    State(pool): State<DbPool>,
    Path(designer_id): Path<i64>,
) -> Result<(StatusCode, Json<Vec<CollectionResponse>>), AppError> {
    let collections = CollectionRepository::list_by_designer(&pool, designer_id).await?;
    let body: Vec<CollectionResponse> =
        collections.into_iter().map(CollectionResponse::from).collect();
    Ok((StatusCode::OK, Json(body)))
}

// region:    --- Public variants

pub async fn public_list_collections(
    State(pool): State<DbPool>,
) -> Result<(StatusCode, Json<Vec<CollectionResponse>>), AppError> {
    let collections = CollectionRepository::list_all(&pool).await?;
    let body: Vec<CollectionResponse> =
        collections.into_iter().map(CollectionResponse::from).collect();
    Ok((StatusCode::OK, Json(body)))
}

pub async fn public_get_collection(
    State(pool): State<DbPool>,
    Path(id): Path<i64>,
) -> Result<(StatusCode, Json<CollectionResponse>), AppError> {
    let collection = CollectionRepository::find_by_id(&pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Collection not found".to_string()))?;
    Ok((StatusCode::OK, Json(CollectionResponse::from(collection))))
}

pub async fn public_get_collection_by_address(
    State(pool): State<DbPool>,
    Path(address): Path<String>,
) -> Result<(StatusCode, Json<CollectionResponse>), AppError> {
    let collection = CollectionRepository::find_by_address(&pool, &address)
        .await?
        .ok_or_else(|| AppError::NotFound("Collection not found".to_string()))?;
    Ok((StatusCode::OK, Json(CollectionResponse::from(collection))))
}

// endregion: --- Public variants

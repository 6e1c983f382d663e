//! # Size Handlers
//!
//! Size variants per product (label + stock quantity).
//!
//! ## Endpoints
//!
//! - `POST /api/sizes` (auth) - add a size to an owned product
//! - `PUT /api/sizes/{id}` / `DELETE /api/sizes/{id}` (auth)
//! - `GET /api/products/{product_id}/sizes`

use axum::{
    extract::{Extension, Json, Path, State},
    http::StatusCode,
};
use lib_auth::Claims;
use lib_core::dto::{SizeCreateRequest, SizeResponse, SizeUpdateRequest};
use lib_core::error::AppError;
use lib_core::model::store::collection_repository::CollectionRepository;
use lib_core::model::store::models::{SizeForCreate, SizeForUpdate};
use lib_core::model::store::product_repository::ProductRepository;
use lib_core::model::store::size_repository::SizeRepository;
use lib_core::DbPool;
use lib_utils::validation::validate_not_empty;
use tracing::{instrument, warn};

/// Ownership chain: size -> product -> collection -> designer.
async fn check_product_owner(
    pool: &DbPool,
    product_id: i64,
    claims: &Claims,
) -> Result<(), AppError> {
    let product = ProductRepository::find_by_id(pool, product_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    let collection = CollectionRepository::find_by_id(pool, product.collection_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Collection not found".to_string()))?;

    let caller_id = claims.user_id().map_err(AppError::Unauthorized)?;
    if collection.designer_id != caller_id {
        warn!(
            "[SIZES] User {} denied on product {} owned by {}",
            caller_id, product_id, collection.designer_id
        );
        return Err(AppError::Forbidden(
            "Product belongs to another designer".to_string(),
        ));
    }
    Ok(())
}

#[instrument(skip(pool, claims, req), fields(designer = %claims.sub, product = req.product_id))]
pub async fn create_size(
    State(pool): State<DbPool>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<SizeCreateRequest>,
) -> Result<(StatusCode, Json<SizeResponse>), AppError> {
    validate_not_empty(&req.label, "label").map_err(AppError::BadRequest)?;
    if req.quantity < 0 {
        return Err(AppError::BadRequest("quantity must not be negative".to_string()));
    }

    check_product_owner(&pool, req.product_id, &claims).await?;

    let size = SizeRepository::create(
        &pool,
        SizeForCreate {
            product_id: req.product_id,
            label: req.label,
            quantity: req.quantity,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(SizeResponse::from(size))))
}

#[instrument(skip(pool, claims, req), fields(designer = %claims.sub, size = id))]
pub async fn update_size(
    State(pool): State<DbPool>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
    Json(req): Json<SizeUpdateRequest>,
) -> Result<(StatusCode, Json<SizeResponse>), AppError> {
    let size = SizeRepository::find_by_id(&pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Size not found".to_string()))?;

    check_product_owner(&pool, size.product_id, &claims).await?;

    if let Some(quantity) = req.quantity {
        if quantity < 0 {
            return Err(AppError::BadRequest("quantity must not be negative".to_string()));
        }
    }

    let updated = SizeRepository::update(
        &pool,
        id,
        SizeForUpdate {
            label: req.label,
            quantity: req.quantity,
        },
    )
    .await?
    .ok_or_else(|| AppError::NotFound("Size not found".to_string()))?;

    Ok((StatusCode::OK, Json(SizeResponse::from(updated))))
}

#[instrument(skip(pool, claims), fields(designer = %claims.sub, size = id))]
pub async fn delete_size(
    State(pool): State<DbPool>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let size = SizeRepository::find_by_id(&pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Size not found".to_string()))?;

    check_product_owner(&pool, size.product_id, &claims).await?;

    let deleted = SizeRepository::delete(&pool, id).await?;
    if !deleted {
        return Err(AppError::NotFound("Size not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_by_product(
    State(pool): State<DbPool>,
    Path(product_id): Path<i64>,
) -> Result<(StatusCode, Json<Vec<SizeResponse>>), AppError> {
    ProductRepository::find_by_id(&pool, product_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

    let sizes = SizeRepository::list_by_product(&pool, product_id).await?;
    let body: Vec<SizeResponse> = sizes.into_iter().map(SizeResponse::from).collect();
    Ok((StatusCode::OK, Json(body)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{auth_token, seed_designer, setup_test_db, test_app};
    use axum::body::Body;
    use axum::http::Request;
    use lib_core::model::store::models::{CollectionForCreate, ProductForCreate};
    use tower::ServiceExt;

    async fn seed_product(pool: &DbPool, designer_id: i64) -> i64 {
        let collection = CollectionRepository::create(
            pool,
            CollectionForCreate {
                designer_id,
                name: "Drop".to_string(),
                collection_address: None,
                description: None,
            },
        )
        .await
        .unwrap();
        ProductRepository::create(
            pool,
            ProductForCreate {
                collection_id: collection.id,
                name: "Hoodie".to_string(),
                description: None,
                image_url: None,
                price: 100,
            },
        )
        .await
        .unwrap()
        .id
    }

    #[tokio::test]
    async fn test_create_size_for_owned_product() {
        // Arrange
        let pool = setup_test_db().await;
        let user = seed_designer(&pool, "alice", "alice@example.com").await;
        let product_id = seed_product(&pool, user.id).await;
        let token = auth_token(&user);
        let app = test_app(pool);

        let payload = format!(r#"{{"product_id":{},"label":"M","quantity":10}}"#, product_id);

        // Act
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/sizes")
                    .header("authorization", format!("Bearer {}", token))
                    .header("content-type", "application/json")
                    .body(Body::from(payload))
                    .unwrap(),
            )
            .await
            .unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let size: SizeResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(size.label, "M");
        assert_eq!(size.quantity, 10);
    }

    #[tokio::test]
    async fn test_create_size_missing_product_is_404() {
        // Arrange
        let pool = setup_test_db().await;
        let user = seed_designer(&pool, "alice", "alice@example.com").await;
        let token = auth_token(&user);
        let app = test_app(pool);

        // Act
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/sizes")
                    .header("authorization", format!("Bearer {}", token))
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"product_id":99,"label":"M","quantity":1}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_foreign_product_size_is_403() {
        // Arrange
        let pool = setup_test_db().await;
        let owner = seed_designer(&pool, "owner", "owner@example.com").await;
        let intruder = seed_designer(&pool, "intruder", "intruder@example.com").await;
        let product_id = seed_product(&pool, owner.id).await;
        let token = auth_token(&intruder);
        let app = test_app(pool);

        let payload = format!(r#"{{"product_id":{},"label":"S","quantity":1}}"#, product_id);

        // Act
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/sizes")
                    .header("authorization", format!("Bearer {}", token))
                    .header("content-type", "application/json")
                    .body(Body::from(payload))
                    .unwrap(),
            )
            .await
            .unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_sizes_listed_per_product() {
        // Arrange
        let pool = setup_test_db().await;
        let user = seed_designer(&pool, "alice", "alice@example.com").await;
        let product_id = seed_product(&pool, user.id).await;
        SizeRepository::create(
            &pool,
            SizeForCreate {
                product_id,
                label: "S".to_string(),
                quantity: 2,
            },
        )
        .await
        .unwrap();
        SizeRepository::create(
            &pool,
            SizeForCreate {
                product_id,
                label: "L".to_string(),
                quantity: 4,
            },
        )
        .await
        .unwrap();
        let app = test_app(pool);

        // Act
        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri(format!("/api/products/{}/sizes", product_id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let sizes: Vec<SizeResponse> = serde_json::from_slice(&body).unwrap();
        assert_eq!(sizes.len(), 2);
    }
}

//! Product handler tests: parent checks, ownership, listing state.

use crate::test_support::{auth_token, seed_designer, setup_test_db, test_app};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use lib_core::dto::{ListingResponse, ProductResponse};
use lib_core::model::store::collection_repository::CollectionRepository;
use lib_core::model::store::models::{CollectionForCreate, ProductForCreate};
use lib_core::model::store::product_repository::ProductRepository;
use lib_core::DbPool;
use tower::ServiceExt;

async fn seed_collection(pool: &DbPool, designer_id: i64) -> i64 {
    CollectionRepository::create(
        pool,
        CollectionForCreate {
            designer_id,
            name: "Drop".to_string(),
            collection_address: None,
            description: None,
        },
    )
    .await
    .unwrap()
    .id
}

async fn seed_product(pool: &DbPool, collection_id: i64, name: &str, price: i64) -> i64 {
    ProductRepository::create(
        pool,
        ProductForCreate {
            collection_id,
            name: name.to_string(),
            description: None,
            image_url: None,
            price,
        },
    )
    .await
    .unwrap()
    .id
}

#[tokio::test]
async fn test_create_product_in_owned_collection() {
    // Arrange
    let pool = setup_test_db().await;
    let user = seed_designer(&pool, "alice", "alice@example.com").await;
    let collection_id = seed_collection(&pool, user.id).await;
    let token = auth_token(&user);
    let app = test_app(pool);

    let payload = format!(
        r#"{{"collection_id":{},"name":"Hoodie","price":1500000000}}"#,
        collection_id
    );

    // Act
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/products")
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
    let product: ProductResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(product.name, "Hoodie");
    assert_eq!(product.price, 1_500_000_000);
    assert!(!product.is_listed);
}

#[tokio::test]
async fn test_create_product_missing_collection_is_404() {
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
                .uri("/api/products")
                .header("authorization", format!("Bearer {}", token))
                .header("content-type", "application/json")
                .body(Body::from(
                    r#"{"collection_id":999,"name":"Orphan","price":1}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    // Assert
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_product_in_foreign_collection_is_403() {
    // Arrange
    let pool = setup_test_db().await;
    let owner = seed_designer(&pool, "owner", "owner@example.com").await;
    let intruder = seed_designer(&pool, "intruder", "intruder@example.com").await;
    let collection_id = seed_collection(&pool, owner.id).await;
    let token = auth_token(&intruder);
    let app = test_app(pool);

    let payload = format!(
        r#"{{"collection_id":{},"name":"Stolen","price":100}}"#,
        collection_id
    );

    // Act
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/products")
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
async fn test_create_product_rejects_non_positive_price() {
    // Arrange
    let pool = setup_test_db().await;
    let user = seed_designer(&pool, "alice", "alice@example.com").await;
    let collection_id = seed_collection(&pool, user.id).await;
    let token = auth_token(&user);
    let app = test_app(pool);

    let payload = format!(
        r#"{{"collection_id":{},"name":"Freebie","price":0}}"#,
        collection_id
    );

    // Act
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/products")
                .header("authorization", format!("Bearer {}", token))
                .header("content-type", "application/json")
                .body(Body::from(payload))
                .unwrap(),
        )
        .await
        .unwrap();

    // Assert
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_product_flips_listed_state() {
    // Arrange
    let pool = setup_test_db().await;
    let user = seed_designer(&pool, "alice", "alice@example.com").await;
    let collection_id = seed_collection(&pool, user.id).await;
    let product_id = seed_product(&pool, collection_id, "Hoodie", 1_000_000_000).await;
    let token = auth_token(&user);
    let app = test_app(pool.clone());

    let payload = format!(r#"{{"product_id":{},"price":2000000000}}"#, product_id);

    // Act
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/products/list")
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
    let listing: ListingResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(listing.product_id, product_id);
    assert_eq!(listing.price, 2_000_000_000);
    assert!(listing.is_active);

    let product = ProductRepository::find_by_id(&pool, product_id)
        .await
        .unwrap()
        .unwrap();
    assert!(product.is_listed);
}

#[tokio::test]
async fn test_list_product_twice_is_conflict() {
    // Arrange
    let pool = setup_test_db().await;
    let user = seed_designer(&pool, "alice", "alice@example.com").await;
    let collection_id = seed_collection(&pool, user.id).await;
    let product_id = seed_product(&pool, collection_id, "Hoodie", 1_000_000_000).await;
    let token = auth_token(&user);

    let payload = format!(r#"{{"product_id":{},"price":2000000000}}"#, product_id);
    let request = |body: String, token: &str| {
        Request::builder()
            .method("POST")
            .uri("/api/products/list")
            .header("authorization", format!("Bearer {}", token))
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    };

    // Act
    let first = test_app(pool.clone())
        .oneshot(request(payload.clone(), &token))
        .await
        .unwrap();
    let second = test_app(pool)
        .oneshot(request(payload, &token))
        .await
        .unwrap();

    // Assert
    assert_eq!(first.status(), StatusCode::CREATED);
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_listed_products_endpoint() {
    // Arrange
    let pool = setup_test_db().await;
    let user = seed_designer(&pool, "alice", "alice@example.com").await;
    let collection_id = seed_collection(&pool, user.id).await;
    let listed_id = seed_product(&pool, collection_id, "Listed", 100).await;
    seed_product(&pool, collection_id, "Unlisted", 200).await;
    ProductRepository::set_listed(&pool, listed_id, true)
        .await
        .unwrap();
    let app = test_app(pool);

    // Act
    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/products/listed")
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
    let products: Vec<ProductResponse> = serde_json::from_slice(&body).unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].name, "Listed");
}

#[tokio::test]
async fn test_get_missing_product_is_404() {
    // Arrange
    let pool = setup_test_db().await;
    let app = test_app(pool);

    // Act
    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/products/42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // Assert
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

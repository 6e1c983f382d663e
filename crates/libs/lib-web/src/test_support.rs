//! Shared harness for handler tests: in-memory database, seeded accounts,
//! and a router wired exactly like the production one but with a stub
//! Google verifier.

use crate::server::{create_router, AppState};
use crate::services::{MarketService, WalletService};
use async_trait::async_trait;
use axum::Router;
use lib_auth::google::{GoogleAuthError, GoogleIdentity, IdTokenVerifier};
use lib_auth::{encode_jwt, hash_password};
use lib_core::model::store::models::{User, UserForCreate};
use lib_core::model::store::user_repository::UserRepository;
use lib_core::{Config, DbPool};
use lib_solana::client::{Network, SolanaClient};
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;

pub const TEST_JWT_SECRET: &str = "test-secret-key-must-be-at-least-32-characters-long!";

/// Setup test database with the full schema.
pub async fn setup_test_db() -> DbPool {
    // A single connection keeps the in-memory database alive and shared.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&pool)
        .await
        .expect("Failed to enable foreign keys");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE,
            email TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            name TEXT,
            role TEXT NOT NULL DEFAULT 'designer',
            profile_picture TEXT,
            google_id TEXT UNIQUE,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(&pool)
    .await
    .expect("Failed to create users table");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS collections (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            designer_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            name TEXT NOT NULL,
            collection_address TEXT UNIQUE,
            description TEXT,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(&pool)
    .await
    .expect("Failed to create collections table");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS products (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            collection_id INTEGER NOT NULL REFERENCES collections(id) ON DELETE CASCADE,
            name TEXT NOT NULL,
            description TEXT,
            image_url TEXT,
            price INTEGER NOT NULL,
            is_listed BOOLEAN NOT NULL DEFAULT 0,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(&pool)
    .await
    .expect("Failed to create products table");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sizes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            product_id INTEGER NOT NULL REFERENCES products(id) ON DELETE CASCADE,
            label TEXT NOT NULL,
            quantity INTEGER NOT NULL DEFAULT 0
        )
        "#,
    )
    .execute(&pool)
    .await
    .expect("Failed to create sizes table");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS listings (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            product_id INTEGER NOT NULL REFERENCES products(id) ON DELETE CASCADE,
            price INTEGER NOT NULL,
            is_active BOOLEAN NOT NULL DEFAULT 1,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(&pool)
    .await
    .expect("Failed to create listings table");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS nfts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            mint_address TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            symbol TEXT,
            uri TEXT,
            group_address TEXT,
            seller_address TEXT,
            price_lamports INTEGER,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(&pool)
    .await
    .expect("Failed to create nfts table");

    pool
}

/// Test configuration matching the env the global config is seeded with.
pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: TEST_JWT_SECRET.to_string(),
        jwt_expiration_hours: 24,
        google_client_id: "test-client-id.apps.googleusercontent.com".to_string(),
        client_url: "http://localhost:3000".to_string(),
        solana_rpc_url: "https://api.devnet.solana.com".to_string(),
        marketplace_program_id: String::new(),
    }
}

/// Seed the global config so `core_config()` works inside middleware.
fn ensure_global_config() {
    std::env::set_var("JWT_SECRET", TEST_JWT_SECRET);
    std::env::set_var(
        "GOOGLE_CLIENT_ID",
        "test-client-id.apps.googleusercontent.com",
    );
    // Concurrent tests race here; the values are identical either way.
    let _ = lib_core::config::init_config();
}

/// Stub verifier returning a fixed outcome.
pub struct StaticVerifier {
    outcome: Result<GoogleIdentity, String>,
}

impl StaticVerifier {
    pub fn accepting(identity: GoogleIdentity) -> Self {
        Self {
            outcome: Ok(identity),
        }
    }

    pub fn rejecting(reason: &str) -> Self {
        Self {
            outcome: Err(reason.to_string()),
        }
    }
}

#[async_trait]
impl IdTokenVerifier for StaticVerifier {
    async fn verify(&self, _credential: &str) -> Result<GoogleIdentity, GoogleAuthError> {
        match &self.outcome {
            Ok(identity) => Ok(identity.clone()),
            Err(reason) => Err(GoogleAuthError::InvalidToken(reason.clone())),
        }
    }
}

/// Insert a designer account with a known password (`Secret123!`).
pub async fn seed_designer(pool: &DbPool, username: &str, email: &str) -> User {
    let password_hash = hash_password("Secret123!").expect("hash should succeed");
    UserRepository::create(
        pool,
        UserForCreate {
            username: username.to_string(),
            email: email.to_string(),
            password_hash,
            name: None,
            role: "designer".to_string(),
            profile_picture: None,
            google_id: None,
        },
    )
    .await
    .expect("seed user should insert")
}

/// Mint a session token for a seeded user.
pub fn auth_token(user: &User) -> String {
    encode_jwt(
        user.id,
        user.email.clone(),
        user.role.clone(),
        TEST_JWT_SECRET,
        24,
    )
    .expect("token encoding should succeed")
}

/// Production router over a test database and a rejecting Google verifier.
pub fn test_app(pool: DbPool) -> Router {
    test_app_with_verifier(pool, Arc::new(StaticVerifier::rejecting("no stub configured")))
}

/// Production router with a custom Google verifier stub.
pub fn test_app_with_verifier(pool: DbPool, verifier: Arc<dyn IdTokenVerifier>) -> Router {
    ensure_global_config();

    let config = test_config();
    let client = Arc::new(
        SolanaClient::builder()
            .network(Network::Devnet)
            .build(),
    );
    let market = Arc::new(
        MarketService::new(Arc::clone(&client), &config.marketplace_program_id)
            .expect("market service should build"),
    );
    let wallet = Arc::new(WalletService::new(client));

    let state = AppState {
        db: pool,
        config,
        market,
        wallet,
        google: verifier,
    };

    create_router(state)
}

//! # Server Setup
//!
//! Server initialization, route registration, and HTTP server startup.
//!
//! This module provides the main server setup function that creates the Axum
//! router, registers all routes, applies middleware, and starts the HTTP
//! server.

// region: --- Imports
use crate::handlers;
use crate::middleware::{log_requests, require_auth, stamp_req};
use crate::services::{MarketService, WalletService};
use axum::{
    http::{HeaderValue, StatusCode},
    routing::{get, post, put},
    Router,
};
use lib_auth::google::{GoogleVerifier, IdTokenVerifier};
use lib_core::{config::init_config, core_config, create_pool, Config, DbPool};
use lib_solana::client::SolanaClient;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
// endregion: --- Imports

// region: --- AppState

/// Application state shared across all routes.
#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub config: Config,
    pub market: Arc<MarketService>,
    pub wallet: Arc<WalletService>,
    pub google: Arc<dyn IdTokenVerifier>,
}

impl axum::extract::FromRef<AppState> for DbPool {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}

impl axum::extract::FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl axum::extract::FromRef<AppState> for Arc<MarketService> {
    fn from_ref(state: &AppState) -> Self {
        state.market.clone()
    }
}

impl axum::extract::FromRef<AppState> for Arc<WalletService> {
    fn from_ref(state: &AppState) -> Self {
        state.wallet.clone()
    }
}

impl axum::extract::FromRef<AppState> for Arc<dyn IdTokenVerifier> {
    fn from_ref(state: &AppState) -> Self {
        state.google.clone()
    }
}

// endregion: --- AppState

// region: --- Server Configuration

/// Server configuration.
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:3001")
    pub bind_address: String,
    /// Database migrations path
    pub migrations_path: &'static str,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:3001".to_string(),
            migrations_path: "./migrations",
        }
    }
}

// endregion: --- Server Configuration

// region: --- Server Setup

/// Initialize and start the HTTP server.
///
/// # Errors
///
/// This function will return an error if:
/// - Configuration loading or validation fails
/// - Database connection or migrations fail
/// - Server binding fails
pub async fn start_server(server_config: ServerConfig) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    info!("ATELIER STOREFRONT BACKEND STARTING");

    dotenvy::dotenv().ok();

    info!("Loading configuration...");
    init_config().map_err(|e| anyhow::anyhow!(e))?;
    let config = core_config().clone();

    // Ensure data directory exists for the SQLite database
    if let Some(db_path) = config.database_url.strip_prefix("sqlite:") {
        if let Some(parent) = std::path::Path::new(db_path).parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent)?;
                info!("Created database directory: {:?}", parent);
            }
        }
    }

    info!("Connecting to database...");
    let pool = create_pool(&config.database_url).await?;

    info!("Running database migrations from: {}", server_config.migrations_path);
    let migrator =
        sqlx::migrate::Migrator::new(std::path::Path::new(server_config.migrations_path)).await?;
    migrator.run(&pool).await?;
    info!("Migrations complete");

    info!("Connecting to Solana RPC at {}", config.solana_rpc_url);
    let solana = Arc::new(
        SolanaClient::builder()
            .custom_rpc_url(config.solana_rpc_url.clone())
            .build(),
    );

    let market = Arc::new(MarketService::new(
        Arc::clone(&solana),
        &config.marketplace_program_id,
    )?);
    let wallet = Arc::new(WalletService::new(solana));
    let google: Arc<dyn IdTokenVerifier> =
        Arc::new(GoogleVerifier::new(config.google_client_id.clone()));

    let state = AppState {
        db: pool,
        config: config.clone(),
        market,
        wallet,
        google,
    };

    let app = create_router(state);

    info!("Server listening on {}", server_config.bind_address);
    log_routes();

    let listener = tokio::net::TcpListener::bind(&server_config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Routes that require a valid session token.
fn protected_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/userinfo",
            get(handlers::users::get_userinfo).put(handlers::users::update_userinfo),
        )
        .route(
            "/api/collections",
            post(handlers::collections::create_collection)
                .get(handlers::collections::list_my_collections),
        )
        .route(
            "/api/collections/{id}",
            put(handlers::collections::update_collection)
                .delete(handlers::collections::delete_collection),
        )
        .route("/api/products", post(handlers::products::create_product))
        .route("/api/products/list", post(handlers::products::list_product))
        .route(
            "/api/products/{id}",
            put(handlers::products::update_product).delete(handlers::products::delete_product),
        )
        .route("/api/sizes", post(handlers::sizes::create_size))
        .route(
            "/api/sizes/{id}",
            put(handlers::sizes::update_size).delete(handlers::sizes::delete_size),
        )
        .route("/api/saveNFT", post(handlers::nfts::save_nft))
        .route("/api/listings", post(handlers::listings::create_listing))
        .route_layer(axum::middleware::from_fn(require_auth))
}

/// Routes open to anyone.
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/api/register", post(handlers::auth::register))
        .route("/api/login", post(handlers::auth::login))
        .route("/api/auth/google", post(handlers::auth::google_auth))
        .route("/api/designers", get(handlers::users::list_designers))
        .route(
            "/api/public/designers/username/{username}",
            get(handlers::users::get_designer_by_username),
        )
        .route(
            "/api/public/designers/{designer_id}",
            get(handlers::users::get_designer_by_id),
        )
        .route(
            "/api/collections/by-designer/{designer_id}",
            get(handlers::collections::list_by_designer),
        )
        .route(
            "/api/collections/{id}/products",
            get(handlers::products::list_by_collection),
        )
        .route(
            "/api/public/collections",
            get(handlers::collections::public_list_collections),
        )
        .route(
            "/api/public/collections/address/{address}",
            get(handlers::collections::public_get_collection_by_address),
        )
        .route(
            "/api/public/collections/{id}",
            get(handlers::collections::public_get_collection),
        )
        .route(
            "/api/public/collections/{id}/products",
            get(handlers::products::list_by_collection),
        )
        .route("/api/products/listed", get(handlers::products::listed_products))
        .route("/api/products/{id}", get(handlers::products::get_product))
        .route(
            "/api/products/{id}/sizes",
            get(handlers::sizes::list_by_product),
        )
        .route("/api/nfts", get(handlers::nfts::list_nfts))
        .route("/api/listings", get(handlers::listings::list_listings))
        .route("/api/market/listings", get(handlers::market::get_market_listings))
        .route("/api/wallet/balance", get(handlers::wallet::get_wallet_balance))
        .route("/api/ws/balance", get(handlers::websocket::balance_websocket))
        .route("/health", get(|| async { "OK" }))
}

/// Create the main application router with all routes.
pub fn create_router(state: AppState) -> Router {
    let cors = match state.config.client_url.parse::<HeaderValue>() {
        Ok(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(Any)
            .allow_headers(Any),
        Err(_) => CorsLayer::new().allow_methods(Any).allow_headers(Any),
    };

    public_routes()
        .merge(protected_routes())
        .fallback(|| async { (StatusCode::NOT_FOUND, "Not found") })
        .with_state(state)
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    let request_id = request
                        .extensions()
                        .get::<crate::middleware::mw_req_stamp::RequestStamp>()
                        .map(|s| s.id.clone())
                        .unwrap_or_else(|| "unknown".to_string());
                    tracing::info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = %request.method(),
                        uri = %request.uri(),
                    )
                },
            ),
        )
        .layer(axum::middleware::from_fn(log_requests))
        // Outermost so every other layer sees the request id
        .layer(axum::middleware::from_fn(stamp_req))
        .layer(cors)
}

/// Log the route table at startup.
fn log_routes() {
    info!("AUTH:");
    info!("   • POST /api/register");
    info!("   • POST /api/login");
    info!("   • POST /api/auth/google");
    info!("USERS:");
    info!("   • GET/PUT /api/userinfo");
    info!("   • GET  /api/designers");
    info!("CATALOG:");
    info!("   • POST/GET /api/collections");
    info!("   • PUT/DELETE /api/collections/{{id}}");
    info!("   • POST /api/products, /api/products/list, /api/sizes");
    info!("   • GET  /api/products/listed, /api/products/{{id}}");
    info!("MARKET:");
    info!("   • POST /api/saveNFT");
    info!("   • GET  /api/nfts, /api/listings");
    info!("   • GET  /api/market/listings?search=&min_price=&max_price=&group=&seller=&sort=");
    info!("WALLET:");
    info!("   • GET  /api/wallet/balance?address={{pubkey}}");
    info!("   • GET  /api/ws/balance?address={{pubkey}}");
    info!("HEALTH:");
    info!("   • GET  /health");
}

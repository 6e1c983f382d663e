//! # Database Store
//!
//! Database connection pool and repository implementations.

// region: --- Modules
pub mod collection_repository;
pub mod listing_repository;
pub mod models;
pub mod nft_repository;
pub mod product_repository;
pub mod size_repository;
pub mod user_repository;
// endregion: --- Modules

// region: --- Re-exports
pub use collection_repository::CollectionRepository;
pub use listing_repository::ListingRepository;
pub use nft_repository::NftRepository;
pub use product_repository::ProductRepository;
pub use size_repository::SizeRepository;
pub use user_repository::UserRepository;
// endregion: --- Re-exports

// region: --- Types and Functions
use sqlx::{sqlite::SqliteConnectOptions, SqlitePool};

/// Type alias for SQLite connection pool.
pub type DbPool = SqlitePool;

/// Create a new SQLite connection pool.
///
/// Foreign keys are enforced so that the collection → product → size cascade
/// declared in the schema actually fires.
pub async fn create_pool(database_url: &str) -> anyhow::Result<DbPool> {
    let options = database_url
        .parse::<SqliteConnectOptions>()?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePool::connect_with(options).await?;

    Ok(pool)
}
// endregion: --- Types and Functions

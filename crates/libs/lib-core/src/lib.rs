//! # Core Library
//!
//! Core models, database, configuration, and DTOs for the storefront API.

pub mod config;
pub mod dto;
pub mod error;
pub mod model;

// Re-export commonly used types
pub use config::{core_config, init_config, Config};
pub use error::{AppError, Result};
pub use model::store::{create_pool, DbPool};

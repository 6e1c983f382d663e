//! # Data Transfer Objects (DTOs)
//!
//! Typed request/response structures for the REST API. Every endpoint's
//! input and output is an explicit schema rather than an arbitrary object
//! shape; all DTOs use snake_case JSON field names (default serde behavior)
//! and optional fields are omitted when `None`.

pub mod auth;
pub mod catalog;
pub mod market;

pub use auth::*;
pub use catalog::*;
pub use market::*;

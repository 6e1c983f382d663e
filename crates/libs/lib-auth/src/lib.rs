//! # Authentication Library
//!
//! Password hashing, session-token (JWT) management, and Google ID-token
//! verification.

pub mod google;
pub mod pwd;
pub mod token;

// Re-export commonly used types
pub use google::{GoogleIdentity, GoogleVerifier, IdTokenVerifier};
pub use pwd::{hash_password, placeholder_password, verify_password};
pub use token::{decode_jwt, encode_jwt, Claims};

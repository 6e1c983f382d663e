//! # Authentication Data Transfer Objects
//!
//! Request and response structures for the authentication endpoints.
//!
//! ## Endpoints Using These DTOs
//!
//! - `POST /api/register` - [`RegisterRequest`] -> [`AuthResponse`]
//! - `POST /api/login` - [`LoginRequest`] -> [`AuthResponse`]
//! - `POST /api/auth/google` - [`GoogleAuthRequest`] -> [`AuthResponse`]
//! - `GET/PUT /api/userinfo` - [`UserPublic`] / [`UserUpdateRequest`]
//!
//! ## Wire Format
//!
//! ```text
//! POST /api/login
//! Content-Type: application/json
//!
//! {
//!   "email": "alice@example.com",
//!   "password": "MyPassword123!"
//! }
//! ```
//!
//! Response:
//! ```text
//! {
//!   "token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
//!   "user": {
//!     "id": "1",
//!     "email": "alice@example.com",
//!     "username": "alice",
//!     "role": "designer"
//!   },
//!   "message": "Login successful"
//! }
//! ```

use crate::model::store::models::User;
use serde::{Deserialize, Serialize};

/// Registration request payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Login request payload. Login is keyed on email only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Google sign-in request payload.
///
/// `credential` stays optional so that a missing field surfaces as a 400
/// from the handler instead of a JSON-rejection 422.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleAuthRequest {
    #[serde(default)]
    pub credential: Option<String>,
}

/// Public-safe user projection: no password hash, no Google subject id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPublic {
    pub id: String,
    pub email: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
}

impl From<User> for UserPublic {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email,
            username: user.username,
            name: user.name,
            role: user.role,
            profile_picture: user.profile_picture,
        }
    }
}

/// Successful authentication response carrying the session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserPublic,
    pub message: String,
}

/// Partial profile update; absent fields are untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
}

/// Standard error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

//! # Authentication Handlers
//!
//! HTTP request handlers for account creation and sign-in.
//!
//! ## Overview
//!
//! Three ways into a session token:
//! - Email/password registration (`POST /api/register`)
//! - Email/password login (`POST /api/login`)
//! - Google sign-in (`POST /api/auth/google`), which finds or creates the
//!   account keyed by the verified email
//!
//! All three return the same [`AuthResponse`]: a JWT plus the public user
//! projection.
//!
//! ## Example
//!
//! ```bash
//! curl -X POST http://localhost:3001/api/register \
//!   -H "Content-Type: application/json" \
//!   -d '{"email":"alice@example.com","username":"alice","password":"Secret123!"}'
//! ```

use axum::{
    extract::{Json, State},
    http::StatusCode,
};
use lib_auth::{encode_jwt, hash_password, placeholder_password, verify_password};
use lib_auth::{GoogleIdentity, IdTokenVerifier};
use lib_core::dto::{
    AuthResponse, GoogleAuthRequest, LoginRequest, RegisterRequest, UserPublic,
};
use lib_core::error::AppError;
use lib_core::model::store::models::{User, UserForCreate};
use lib_core::model::store::user_repository::UserRepository;
use lib_core::{Config, DbPool};
use lib_utils::validation::{validate_email, validate_min_length};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

#[cfg(test)]
mod tests;

/// Role granted to accounts created through the storefront.
const DEFAULT_ROLE: &str = "designer";

fn issue_token(user: &User, config: &Config) -> Result<String, AppError> {
    encode_jwt(
        user.id,
        user.email.clone(),
        user.role.clone(),
        &config.jwt_secret,
        config.jwt_expiration_hours,
    )
    .map_err(|e| {
        error!("[AUTH] JWT encoding failed: {}", e);
        AppError::Internal("Failed to generate token".to_string())
    })
}

/// Register handler - creates a new account with an argon2-hashed password.
///
/// # Returns
///
/// * `201` with [`AuthResponse`] on success
/// * `400` on validation failure (short username, bad email, weak password)
/// * `409` when the email or username is already taken
#[instrument(skip(pool, config, req), fields(email = %req.email, username = %req.username))]
pub async fn register(
    State(pool): State<DbPool>,
    State(config): State<Config>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    info!("[REGISTER] New account request for {}", req.email);

    validate_min_length(&req.username, 3, "username").map_err(AppError::BadRequest)?;
    validate_email(&req.email).map_err(AppError::BadRequest)?;

    if UserRepository::find_by_email(&pool, &req.email).await?.is_some() {
        warn!("[REGISTER] Email already registered: {}", req.email);
        return Err(AppError::Conflict("Email already registered".to_string()));
    }

    if UserRepository::find_by_username(&pool, &req.username)
        .await?
        .is_some()
    {
        warn!("[REGISTER] Username already taken: {}", req.username);
        return Err(AppError::Conflict("Username already taken".to_string()));
    }

    let password_hash = hash_password(&req.password).map_err(AppError::BadRequest)?;

    let user = UserRepository::create(
        &pool,
        UserForCreate {
            username: req.username,
            email: req.email,
            password_hash,
            name: req.name,
            role: DEFAULT_ROLE.to_string(),
            profile_picture: None,
            google_id: None,
        },
    )
    .await?;

    let token = issue_token(&user, &config)?;

    info!("[REGISTER] Account created: id={} email={}", user.id, user.email);

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: UserPublic::from(user),
            message: "Registration successful".to_string(),
        }),
    ))
}

/// Login handler - authenticates by email and password.
///
/// Unknown email and wrong password produce the same 401 so the response
/// does not leak which emails exist.
#[instrument(skip(pool, config, req), fields(email = %req.email))]
pub async fn login(
    State(pool): State<DbPool>,
    State(config): State<Config>,
    Json(req): Json<LoginRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    info!("[LOGIN] Login attempt for {}", req.email);

    let user = UserRepository::find_by_email(&pool, &req.email)
        .await?
        .ok_or_else(|| {
            warn!("[LOGIN] Unknown email: {}", req.email);
            AppError::Unauthorized("Invalid email or password".to_string())
        })?;

    let valid = verify_password(&req.password, &user.password_hash)
        .map_err(AppError::Internal)?;
    if !valid {
        warn!("[LOGIN] Password mismatch for {}", req.email);
        return Err(AppError::Unauthorized(
            "Invalid email or password".to_string(),
        ));
    }

    let token = issue_token(&user, &config)?;

    info!("[LOGIN] Authenticated: id={} email={}", user.id, user.email);

    Ok((
        StatusCode::OK,
        Json(AuthResponse {
            token,
            user: UserPublic::from(user),
            message: "Login successful".to_string(),
        }),
    ))
}

/// Google sign-in handler.
///
/// Verifies the ID token, then finds or creates the account keyed by the
/// verified email. Repeating the call with the same credential signs into
/// the same account.
///
/// # Returns
///
/// * `200` with [`AuthResponse`]
/// * `400` when the credential is missing or fails verification
#[instrument(skip_all)]
pub async fn google_auth(
    State(pool): State<DbPool>,
    State(config): State<Config>,
    State(verifier): State<Arc<dyn IdTokenVerifier>>,
    Json(req): Json<GoogleAuthRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let credential = req.credential.ok_or_else(|| {
        warn!("[GOOGLE] Missing credential in request");
        AppError::BadRequest("Missing Google credential".to_string())
    })?;

    let identity = verifier.verify(&credential).await.map_err(|e| {
        warn!("[GOOGLE] Credential verification failed: {}", e);
        AppError::BadRequest("Invalid Google credential".to_string())
    })?;

    info!("[GOOGLE] Verified identity for {}", identity.email);

    let user = match UserRepository::find_by_email(&pool, &identity.email).await? {
        Some(user) => {
            debug!("[GOOGLE] Existing account: id={}", user.id);
            user
        }
        None => create_google_user(&pool, &identity).await?,
    };

    let token = issue_token(&user, &config)?;

    Ok((
        StatusCode::OK,
        Json(AuthResponse {
            token,
            user: UserPublic::from(user),
            message: "Login successful".to_string(),
        }),
    ))
}

/// First Google sign-in: derive a username from the email local part and
/// store a hashed random placeholder so the password path stays unusable.
async fn create_google_user(pool: &DbPool, identity: &GoogleIdentity) -> Result<User, AppError> {
    let username = identity
        .email
        .split('@')
        .next()
        .unwrap_or(&identity.email)
        .to_string();

    let password_hash = hash_password(&placeholder_password()).map_err(AppError::Internal)?;

    let user = UserRepository::create(
        pool,
        UserForCreate {
            username,
            email: identity.email.clone(),
            password_hash,
            name: identity.name.clone(),
            role: DEFAULT_ROLE.to_string(),
            profile_picture: identity.picture.clone(),
            google_id: Some(identity.sub.clone()),
        },
    )
    .await?;

    info!("[GOOGLE] Account created: id={} email={}", user.id, user.email);
    Ok(user)
}

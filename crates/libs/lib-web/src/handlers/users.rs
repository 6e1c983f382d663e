//! # User Handlers
//!
//! Profile info for the authenticated user plus public designer lookup.
//!
//! ## Endpoints
//!
//! - `GET /api/userinfo` (auth) - current user from token claims
//! - `PUT /api/userinfo` (auth) - partial profile update
//! - `GET /api/designers` - all designers, public projection
//! - `GET /api/public/designers/{designer_id}` - designer by id
//! - `GET /api/public/designers/username/{username}` - designer by username

use axum::{
    extract::{Extension, Json, Path, State},
    http::StatusCode,
};
use lib_auth::Claims;
use lib_core::dto::{DesignerResponse, UserPublic, UserUpdateRequest};
use lib_core::error::AppError;
use lib_core::model::store::models::UserForUpdate;
use lib_core::model::store::user_repository::UserRepository;
use lib_core::DbPool;
use tracing::{info, instrument, warn};

/// Current user, resolved from the session token.
///
/// 404 when the account behind the token no longer exists.
#[instrument(skip(pool, claims), fields(user_id = %claims.sub))]
pub async fn get_userinfo(
    State(pool): State<DbPool>,
    Extension(claims): Extension<Claims>,
) -> Result<(StatusCode, Json<UserPublic>), AppError> {
    let user_id = claims.user_id().map_err(AppError::Unauthorized)?;

    let user = UserRepository::find_by_id(&pool, user_id)
        .await?
        .ok_or_else(|| {
            warn!("[USERINFO] Token for missing user id {}", user_id);
            AppError::NotFound("User not found".to_string())
        })?;

    Ok((StatusCode::OK, Json(UserPublic::from(user))))
}

/// Partial profile update: only the provided fields change.
#[instrument(skip(pool, claims, req), fields(user_id = %claims.sub))]
pub async fn update_userinfo(
    State(pool): State<DbPool>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<UserUpdateRequest>,
) -> Result<(StatusCode, Json<UserPublic>), AppError> {
    let user_id = claims.user_id().map_err(AppError::Unauthorized)?;

    let user = UserRepository::update(
        &pool,
        user_id,
        UserForUpdate {
            username: req.username,
            name: req.name,
            profile_picture: req.profile_picture,
        },
    )
    .await?
    .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    info!("[USERINFO] Profile updated for user {}", user_id);

    Ok((StatusCode::OK, Json(UserPublic::from(user))))
}

/// All designers (public projection, no credentials).
pub async fn list_designers(
    State(pool): State<DbPool>,
) -> Result<(StatusCode, Json<Vec<DesignerResponse>>), AppError> {
    let designers = UserRepository::list_designers(&pool).await?;
    let body: Vec<DesignerResponse> = designers.into_iter().map(DesignerResponse::from).collect();
    Ok((StatusCode::OK, Json(body)))
}

/// Public designer lookup by id.
pub async fn get_designer_by_id(
    State(pool): State<DbPool>,
    Path(designer_id): Path<i64>,
) -> Result<(StatusCode, Json<DesignerResponse>), AppError> {
    let user = UserRepository::find_by_id(&pool, designer_id)
        .await?
        .filter(|u| u.role == "designer")
        .ok_or_else(|| AppError::NotFound("Designer not found".to_string()))?;

    Ok((StatusCode::OK, Json(DesignerResponse::from(user))))
}

/// Public designer lookup by username.
pub async fn get_designer_by_username(
    State(pool): State<DbPool>,
    Path(username): Path<String>,
) -> Result<(StatusCode, Json<DesignerResponse>), AppError> {
    let user = UserRepository::find_by_username(&pool, &username)
        .await?
        .filter(|u| u.role == "designer")
        .ok_or_else(|| AppError::NotFound("Designer not found".to_string()))?;

    Ok((StatusCode::OK, Json(DesignerResponse::from(user))))
}

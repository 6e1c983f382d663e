//! # User Repository
//!
//! Database access layer for user records, implementing the repository
//! pattern as a clean abstraction over SQL queries.
//!
//! User creation happens on registration or on first Google sign-in; users
//! are never hard-deleted.

use super::models::{User, UserForCreate, UserForUpdate};
use super::DbPool;
use sqlx::query_as;

/// User repository for database operations.
pub struct UserRepository;

impl UserRepository {
    /// Find a user by their email address.
    pub async fn find_by_email(pool: &DbPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        query_as::<_, User>("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by their username.
    pub async fn find_by_username(
        pool: &DbPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        query_as::<_, User>("SELECT * FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by id.
    pub async fn find_by_id(pool: &DbPool, id: i64) -> Result<Option<User>, sqlx::Error> {
        query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Create a new user.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` on a UNIQUE constraint violation (duplicate
    /// email or username) or connection failure.
    pub async fn create(pool: &DbPool, user: UserForCreate) -> Result<User, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO users (username, email, password_hash, name, role, profile_picture, google_id) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.name)
        .bind(&user.role)
        .bind(&user.profile_picture)
        .bind(&user.google_id)
        .execute(pool)
        .await?;

        let id = result.last_insert_rowid();

        query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Apply a partial profile update; absent fields keep their value.
    pub async fn update(
        pool: &DbPool,
        id: i64,
        update: UserForUpdate,
    ) -> Result<Option<User>, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET \
                username = COALESCE(?, username), \
                name = COALESCE(?, name), \
                profile_picture = COALESCE(?, profile_picture), \
                updated_at = CURRENT_TIMESTAMP \
             WHERE id = ?",
        )
        .bind(&update.username)
        .bind(&update.name)
        .bind(&update.profile_picture)
        .bind(id)
        .execute(pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        Self::find_by_id(pool, id).await
    }

    /// List all users carrying the `designer` role.
    pub async fn list_designers(pool: &DbPool) -> Result<Vec<User>, sqlx::Error> {
        query_as::<_, User>("SELECT * FROM users WHERE role = 'designer' ORDER BY username")
            .fetch_all(pool)
            .await
    }
}

//! # Application Configuration
//!
//! Configuration loaded from environment variables and validated on startup
//! to fail fast if misconfigured.
//!
//! Use [`core_config()`] to access the global configuration instance after
//! calling [`init_config()`] once at application startup.

use lib_utils::envs::{get_env, get_env_or};
use std::env;
use std::sync::OnceLock;

/// Application configuration loaded from environment variables.
#[derive(Clone, Debug)]
pub struct Config {
    /// SQLite database connection URL
    pub database_url: String,

    /// Secret key for JWT session token signing and verification.
    ///
    /// **Must be at least 32 characters long.**
    pub jwt_secret: String,

    /// Session token validity period in hours (default: 24).
    pub jwt_expiration_hours: i64,

    /// Google OAuth client id; ID tokens are verified against this audience.
    pub google_client_id: String,

    /// Frontend origin allowed by CORS.
    pub client_url: String,

    /// Solana RPC endpoint used for balances and marketplace accounts.
    pub solana_rpc_url: String,

    /// On-chain marketplace program id (base58).
    pub marketplace_program_id: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, String> {
        let database_url = get_env_or("DATABASE_URL", "sqlite:data/atelier.db");

        let jwt_secret = get_env("JWT_SECRET")
            .map_err(|_| "JWT_SECRET must be set in environment")?;

        let jwt_expiration_hours = get_env_or("JWT_EXPIRATION_HOURS", "24")
            .parse()
            .map_err(|e| format!("JWT_EXPIRATION_HOURS must be a valid number: {}", e))?;

        let google_client_id = get_env("GOOGLE_CLIENT_ID")
            .map_err(|_| "GOOGLE_CLIENT_ID must be set in environment")?;

        let client_url = get_env_or("CLIENT_URL", "http://localhost:3000");

        let solana_rpc_url = get_env_or("SOLANA_RPC_URL", "https://api.devnet.solana.com");

        // No sane default exists for the program id; an empty value disables
        // the marketplace routes at validation time rather than at first use.
        let marketplace_program_id = env::var("MARKETPLACE_PROGRAM_ID").unwrap_or_default();

        Ok(Self {
            database_url,
            jwt_secret,
            jwt_expiration_hours,
            google_client_id,
            client_url,
            solana_rpc_url,
            marketplace_program_id,
        })
    }

    /// Validate configuration values against security and business rules.
    pub fn validate(&self) -> Result<(), String> {
        if self.jwt_secret.len() < 32 {
            return Err("JWT_SECRET must be at least 32 characters long".to_string());
        }

        if self.jwt_expiration_hours < 1 || self.jwt_expiration_hours > 720 {
            return Err("JWT_EXPIRATION_HOURS must be between 1 and 720 (30 days)".to_string());
        }

        if self.google_client_id.trim().is_empty() {
            return Err("GOOGLE_CLIENT_ID cannot be empty".to_string());
        }

        Ok(())
    }
}

/// Global configuration instance (initialized once at startup).
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Initialize the global configuration.
///
/// Call once at application startup, before any handlers or middleware that
/// need configuration run.
pub fn init_config() -> Result<(), String> {
    let config = Config::from_env()?;
    config.validate()?;

    CONFIG
        .set(config)
        .map_err(|_| "Config has already been initialized".to_string())
}

/// Get a reference to the global configuration.
///
/// # Panics
///
/// Panics if [`init_config()`] has not been called yet.
pub fn core_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Config must be initialized with init_config() before use")
}

//! # Google ID-Token Verification
//!
//! Verifies Google sign-in credentials (ID tokens) against Google's
//! published JWKS for the configured OAuth client id.
//!
//! ## Overview
//!
//! The verification seam is the [`IdTokenVerifier`] trait so handlers can be
//! tested with a static verifier. The production [`GoogleVerifier`]:
//!
//! 1. reads the unverified token header to find the signing key id (`kid`),
//! 2. fetches Google's JWKS over HTTPS (cached for an hour),
//! 3. validates the RS256 signature, audience (client id), issuer, and
//!    expiry,
//! 4. returns the identity claims (`sub`, `email`, `name`, `picture`).

use async_trait::async_trait;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Google's JWKS endpoint.
const GOOGLE_CERTS_URL: &str = "https://www.googleapis.com/oauth2/v3/certs";

/// How long fetched JWKS keys are trusted before a refetch.
const CERTS_TTL: Duration = Duration::from_secs(3600);

/// Verified identity claims extracted from a Google ID token.
#[derive(Debug, Clone)]
pub struct GoogleIdentity {
    /// Google subject id
    pub sub: String,
    pub email: String,
    pub name: Option<String>,
    pub picture: Option<String>,
}

/// Errors surfaced by credential verification.
#[derive(Debug, Error)]
pub enum GoogleAuthError {
    /// The credential is malformed, expired, or signed for another audience.
    #[error("Invalid Google credential: {0}")]
    InvalidToken(String),

    /// Google's JWKS endpoint could not be reached or parsed.
    #[error("Failed to fetch Google signing keys: {0}")]
    Jwks(String),
}

/// Verification seam so handlers can substitute a static verifier in tests.
#[async_trait]
pub trait IdTokenVerifier: Send + Sync {
    async fn verify(&self, credential: &str) -> Result<GoogleIdentity, GoogleAuthError>;
}

#[derive(Debug, Clone, Deserialize)]
struct Jwk {
    kid: String,
    n: String,
    e: String,
}

#[derive(Debug, Deserialize)]
struct JwkSet {
    keys: Vec<Jwk>,
}

struct CachedCerts {
    keys: Vec<Jwk>,
    fetched_at: Instant,
}

/// Claims Google embeds in an ID token. Audience/issuer/expiry are enforced
/// by the `jsonwebtoken` validation, not read from here.
#[derive(Debug, Deserialize)]
struct GoogleClaims {
    sub: String,
    email: String,
    name: Option<String>,
    picture: Option<String>,
}

/// Production verifier backed by Google's JWKS.
pub struct GoogleVerifier {
    http: reqwest::Client,
    client_id: String,
    certs_url: String,
    cached: RwLock<Option<CachedCerts>>,
}

impl GoogleVerifier {
    pub fn new(client_id: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            client_id,
            certs_url: GOOGLE_CERTS_URL.to_string(),
            cached: RwLock::new(None),
        }
    }

    /// Override the JWKS endpoint (integration tests point this at a local
    /// server).
    pub fn with_certs_url(mut self, certs_url: String) -> Self {
        self.certs_url = certs_url;
        self
    }

    /// Return the signing key for `kid`, refetching the JWKS when the cache
    /// is empty, stale, or does not know the key.
    async fn signing_key(&self, kid: &str) -> Result<Jwk, GoogleAuthError> {
        {
            let cached = self.cached.read().await;
            if let Some(certs) = cached.as_ref() {
                if certs.fetched_at.elapsed() < CERTS_TTL {
                    if let Some(jwk) = certs.keys.iter().find(|k| k.kid == kid) {
                        return Ok(jwk.clone());
                    }
                }
            }
        }

        debug!("[GOOGLE] Refreshing JWKS from {}", self.certs_url);
        let jwks: JwkSet = self
            .http
            .get(&self.certs_url)
            .send()
            .await
            .map_err(|e| GoogleAuthError::Jwks(e.to_string()))?
            .error_for_status()
            .map_err(|e| GoogleAuthError::Jwks(e.to_string()))?
            .json()
            .await
            .map_err(|e| GoogleAuthError::Jwks(e.to_string()))?;

        let mut cached = self.cached.write().await;
        *cached = Some(CachedCerts {
            keys: jwks.keys.clone(),
            fetched_at: Instant::now(),
        });

        jwks.keys
            .into_iter()
            .find(|k| k.kid == kid)
            .ok_or_else(|| {
                GoogleAuthError::InvalidToken(format!("Unknown signing key id: {}", kid))
            })
    }
}

#[async_trait]
impl IdTokenVerifier for GoogleVerifier {
    async fn verify(&self, credential: &str) -> Result<GoogleIdentity, GoogleAuthError> {
        // Header first: a malformed credential fails before any network call.
        let header = decode_header(credential)
            .map_err(|e| GoogleAuthError::InvalidToken(e.to_string()))?;

        let kid = header
            .kid
            .ok_or_else(|| GoogleAuthError::InvalidToken("Token has no key id".to_string()))?;

        let jwk = self.signing_key(&kid).await?;

        let decoding_key = DecodingKey::from_rsa_components(&jwk.n, &jwk.e)
            .map_err(|e| GoogleAuthError::InvalidToken(e.to_string()))?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[self.client_id.clone()]);
        validation.set_issuer(&["accounts.google.com", "https://accounts.google.com"]);

        let token_data = decode::<GoogleClaims>(credential, &decoding_key, &validation)
            .map_err(|e| {
                warn!("[GOOGLE] Credential rejected: {}", e);
                GoogleAuthError::InvalidToken(e.to_string())
            })?;

        Ok(GoogleIdentity {
            sub: token_data.claims.sub,
            email: token_data.claims.email,
            name: token_data.claims.name,
            picture: token_data.claims.picture,
        })
    }
}

//! # Marketplace Handlers
//!
//! On-chain marketplace view with buyer-side filtering.
//!
//! ## Endpoints
//!
//! - `GET /api/market/listings` - active on-chain listings with per-mint
//!   metadata, filtered and sorted
//!
//! ## Query Parameters
//!
//! - `search` - case-insensitive substring match on the asset name
//! - `min_price` / `max_price` - inclusive bounds in SOL
//! - `group` / `seller` - exact match (`all` passes everything through)
//! - `sort` - `price-asc` | `price-desc` | `name` (default: arrival order)
//!
//! ## Example
//!
//! ```bash
//! curl "http://localhost:3001/api/market/listings?min_price=0.5&max_price=2&sort=price-asc"
//! ```
//!
//! The response carries `assets` plus a `failed` list; a mint whose metadata
//! fetch failed shows up there instead of erasing the whole refresh.

use crate::services::market::{MarketService, MarketSnapshot};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use lib_core::error::AppError;
use lib_solana::filters::MarketFilter;
use std::sync::Arc;
use tracing::instrument;

#[instrument(skip(market))]
pub async fn get_market_listings(
    State(market): State<Arc<MarketService>>,
    Query(filter): Query<MarketFilter>,
) -> Result<(StatusCode, Json<MarketSnapshot>), AppError> {
    let snapshot = market.snapshot(&filter).await?;
    Ok((StatusCode::OK, Json(snapshot)))
}

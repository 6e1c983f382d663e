//! # Wallet Handlers
//!
//! Public queries against Solana wallet balances.
//!
//! ## Endpoints
//!
//! - `GET /api/wallet/balance?address={pubkey}`
//!
//! ## Example
//!
//! ```bash
//! curl "http://localhost:3001/api/wallet/balance?address=8W6QginkhTTxoP2deQjq7rZ9YMwN5FH9JYuLfSKuJKAL"
//! ```
//!
//! Invalid addresses return 400; RPC failures return 502.

use crate::services::wallet::{WalletBalance, WalletService};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use lib_core::error::AppError;
use serde::Deserialize;
use std::sync::Arc;
use tracing::instrument;

#[derive(Debug, Deserialize)]
pub struct WalletQuery {
    pub address: String,
}

#[instrument(skip(wallet), fields(address = %query.address))]
pub async fn get_wallet_balance(
    State(wallet): State<Arc<WalletService>>,
    Query(query): Query<WalletQuery>,
) -> Result<(StatusCode, Json<WalletBalance>), AppError> {
    let balance = wallet.get_balance(&query.address).await?;
    Ok((StatusCode::OK, Json(balance)))
}

//! # Market Service
//!
//! Builds the marketplace view: scans the on-chain program for active
//! listings, gathers per-mint metadata, and applies the buyer's filters.
//!
//! A snapshot never fails as a whole because of one bad mint: mints whose
//! metadata cannot be fetched or parsed are reported in `failed` while the
//! rest of the assets come back normally.

use lib_core::error::AppError;
use lib_solana::client::SolanaClient;
use lib_solana::filters::{apply_filters, MarketFilter, NftDetail};
use lib_solana::marketplace::{FailedMint, MarketplaceClient};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

/// Marketplace response payload: filtered assets plus per-mint failures.
#[derive(Debug, Clone, Serialize)]
pub struct MarketSnapshot {
    pub assets: Vec<NftDetail>,
    pub failed: Vec<FailedMint>,
    pub total_listings: usize,
}

pub struct MarketService {
    marketplace: Option<MarketplaceClient>,
}

impl MarketService {
    /// `program_id` may be empty when the marketplace is not deployed; the
    /// snapshot endpoint then reports a configuration error instead of
    /// panicking at startup.
    pub fn new(client: Arc<SolanaClient>, program_id: &str) -> Result<Self, AppError> {
        let marketplace = if program_id.is_empty() {
            None
        } else {
            Some(
                MarketplaceClient::new(client, program_id)
                    .map_err(|e| AppError::Config(e.to_string()))?,
            )
        };
        Ok(Self { marketplace })
    }

    /// Fetch active listings, gather details, filter.
    pub async fn snapshot(&self, filter: &MarketFilter) -> Result<MarketSnapshot, AppError> {
        let marketplace = self.marketplace.as_ref().ok_or_else(|| {
            AppError::Config("MARKETPLACE_PROGRAM_ID is not configured".to_string())
        })?;

        let listings = marketplace
            .fetch_listings()
            .await
            .map_err(|e| AppError::Rpc(e.to_string()))?;
        let total_listings = listings.len();

        let outcome = marketplace.gather_details(listings).await;

        info!(
            "[MARKET] Snapshot: {} assets, {} failed of {} listings",
            outcome.assets.len(),
            outcome.failed.len(),
            total_listings
        );

        Ok(MarketSnapshot {
            assets: apply_filters(&outcome.assets, filter),
            failed: outcome.failed,
            total_listings,
        })
    }
}

//! # Wallet Service
//!
//! Validates wallet addresses and queries balances through the shared RPC
//! client. Subscriptions hand out `watch` receivers fed by the polling
//! [`BalanceWatcher`].

use lib_core::error::AppError;
use lib_solana::balance::{BalanceSource, BalanceUpdate, BalanceWatcher};
use lib_solana::client::SolanaClient;
use lib_solana::filters::LAMPORTS_PER_SOL;
use serde::Serialize;
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::time::Duration;
use tracing::debug;

/// SOL balance of a wallet.
#[derive(Debug, Clone, Serialize)]
pub struct WalletBalance {
    pub address: String,
    pub balance_lamports: u64,
    pub balance_sol: f64,
}

pub struct WalletService {
    client: Arc<SolanaClient>,
    watcher: BalanceWatcher,
}

impl WalletService {
    pub fn new(client: Arc<SolanaClient>) -> Self {
        let watcher = BalanceWatcher::new(
            Arc::clone(&client) as Arc<dyn BalanceSource>,
            Duration::from_secs(3),
        );
        Self { client, watcher }
    }

    fn parse_address(address: &str) -> Result<Pubkey, AppError> {
        Pubkey::from_str(address)
            .map_err(|_| AppError::BadRequest(format!("Invalid wallet address: {}", address)))
    }

    /// One-shot balance query.
    pub async fn get_balance(&self, address: &str) -> Result<WalletBalance, AppError> {
        let pubkey = Self::parse_address(address)?;

        let lamports = self
            .client
            .get_balance(&pubkey)
            .await
            .map_err(|e| AppError::Rpc(e.to_string()))?;

        debug!("[WALLET] Balance for {}: {} lamports", address, lamports);

        Ok(WalletBalance {
            address: address.to_string(),
            balance_lamports: lamports,
            balance_sol: lamports as f64 / LAMPORTS_PER_SOL as f64,
        })
    }

    /// Start a balance subscription for a wallet.
    pub fn subscribe(&self, address: &str) -> Result<watch::Receiver<BalanceUpdate>, AppError> {
        let pubkey = Self::parse_address(address)?;
        Ok(self.watcher.watch(pubkey))
    }
}

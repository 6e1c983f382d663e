//! # Solana RPC Client
//!
//! Provides a high-level wrapper around the Solana RPC client with network
//! management and connection pooling.
//!
//! ## Features
//!
//! - **Network Selection**: Easy switching between Mainnet and Devnet
//! - **Custom Endpoints**: Point at any RPC URL via the builder
//! - **Account Queries**: Retrieve account data and lamport balances by public key
//! - **Program Scans**: List all accounts owned by a program
//! - **Health Checks**: Verify RPC endpoint connectivity
//!
//! ## RPC Endpoints
//!
//! ### Mainnet
//! - URL: `https://api.mainnet-beta.solana.com`
//! - Rate Limit: ~10 req/sec
//!
//! ### Devnet
//! - URL: `https://api.devnet.solana.com`
//! - Rate Limit: ~10 req/sec
//! - Recommended for: Development and integration testing
//!
//! ## Example
//!
//! ```rust,no_run
//! use lib_solana::client::{SolanaClient, Network};
//! use solana_sdk::pubkey::Pubkey;
//! use std::str::FromStr;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = SolanaClient::builder()
//!     .network(Network::Devnet)
//!     .build();
//!
//! let pubkey = Pubkey::from_str("So11111111111111111111111111111111111111112")?;
//! let lamports = client.get_balance(&pubkey).await?;
//! println!("Balance: {} SOL", lamports as f64 / 1e9);
//! # Ok(())
//! # }
//! ```

use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::account::Account;
use solana_sdk::pubkey::Pubkey;
use std::sync::Arc;
use tracing::info;

/// Solana network selection.
///
/// - **Mainnet**: Production network with real economic value
/// - **Devnet**: Test network for development with free test tokens
#[derive(Debug, Clone)]
pub enum Network {
    /// Solana mainnet-beta (production network)
    Mainnet,
    /// Solana devnet (test network)
    Devnet,
}

/// High-level Solana RPC client wrapper.
///
/// Wraps the official `solana_client::RpcClient` with network configuration
/// and descriptive errors. All methods are async; the connection is lazy and
/// only touches the network when a method is called.
pub struct SolanaClient {
    rpc: Arc<RpcClient>,
    network: Network,
}

/// Builder for configuring SolanaClient.
#[derive(Debug, Clone)]
pub struct SolanaClientBuilder {
    network: Option<Network>,
    custom_rpc_url: Option<String>,
}

impl Default for SolanaClientBuilder {
    fn default() -> Self {
        Self {
            network: Some(Network::Devnet),
            custom_rpc_url: None,
        }
    }
}

impl SolanaClientBuilder {
    /// Set the Solana network.
    pub fn network(mut self, network: Network) -> Self {
        self.network = Some(network);
        self
    }

    /// Set a custom RPC URL (overrides network-based URL).
    pub fn custom_rpc_url(mut self, url: String) -> Self {
        self.custom_rpc_url = Some(url);
        self
    }

    /// Build the SolanaClient with configured settings.
    pub fn build(self) -> SolanaClient {
        let network = self.network.unwrap_or(Network::Devnet);
        let rpc_url = if let Some(custom_url) = self.custom_rpc_url {
            custom_url
        } else {
            match network {
                Network::Mainnet => "https://api.mainnet-beta.solana.com".to_string(),
                Network::Devnet => "https://api.devnet.solana.com".to_string(),
            }
        };

        info!("🔗 Connecting to Solana RPC: {}", rpc_url);

        SolanaClient {
            rpc: Arc::new(RpcClient::new(rpc_url)),
            network,
        }
    }
}

impl SolanaClient {
    /// Create a new Solana RPC client using a builder for configuration.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use lib_solana::client::{SolanaClient, Network};
    ///
    /// let client = SolanaClient::builder()
    ///     .network(Network::Mainnet)
    ///     .build();
    /// ```
    pub fn builder() -> SolanaClientBuilder {
        SolanaClientBuilder::default()
    }

    /// Retrieve the lamport balance of an account.
    ///
    /// Returns 0 for accounts that have never been funded.
    pub async fn get_balance(&self, pubkey: &Pubkey) -> anyhow::Result<u64> {
        self.rpc
            .get_balance(pubkey)
            .await
            .map_err(|e| anyhow::anyhow!("RPC error: {}", e))
    }

    /// Retrieve account data from the blockchain.
    ///
    /// Fetches the complete account state including balance (lamports),
    /// owner program, data, and executable flag.
    ///
    /// # Returns
    ///
    /// * `Ok(Account)` - Account data including lamports, owner, and data bytes
    /// * `Err(_)` - If account doesn't exist or RPC request fails
    pub async fn get_account(&self, pubkey: &Pubkey) -> anyhow::Result<Account> {
        self.rpc
            .get_account(pubkey)
            .await
            .map_err(|e| anyhow::anyhow!("RPC error: {}", e))
    }

    /// List all accounts owned by a program.
    ///
    /// Used to scan the marketplace program for listing accounts. Returns
    /// each account with its address.
    pub async fn get_program_accounts(
        &self,
        program_id: &Pubkey,
    ) -> anyhow::Result<Vec<(Pubkey, Account)>> {
        self.rpc
            .get_program_accounts(program_id)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to scan program accounts: {}", e))
    }

    /// Verify RPC endpoint connectivity.
    pub async fn health_check(&self) -> anyhow::Result<()> {
        self.rpc
            .get_health()
            .await
            .map_err(|e| anyhow::anyhow!("RPC health check failed: {}", e))
    }

    /// Get the configured network.
    pub fn network(&self) -> &Network {
        &self.network
    }
}

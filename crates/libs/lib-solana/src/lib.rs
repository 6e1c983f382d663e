//! # Solana Library
//!
//! Solana blockchain integration: RPC client, marketplace account decoding,
//! listing filters, and wallet balance watching.

pub mod balance;
pub mod client;
pub mod filters;
pub mod marketplace;

// Re-export commonly used types from root for convenience
pub use balance::{BalanceSource, BalanceUpdate, BalanceWatcher};
pub use client::{Network, SolanaClient};
pub use filters::{apply_filters, MarketFilter, NftDetail, SortKey, LAMPORTS_PER_SOL};
pub use marketplace::{
    FailedMint, GatherOutcome, ListingAccount, MarketError, MarketplaceClient, NftMetadata,
};

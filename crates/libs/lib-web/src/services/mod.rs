//! # Services
//!
//! Business logic sitting between handlers and `lib-solana`.
//!
//! ## Modules
//!
//! - **[`market`]**: On-chain marketplace snapshot and filtering
//! - **[`wallet`]**: Wallet balance queries and subscriptions

pub mod market;
pub mod wallet;

pub use market::{MarketService, MarketSnapshot};
pub use wallet::{WalletBalance, WalletService};

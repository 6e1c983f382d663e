//! # HTTP Handlers
//!
//! Request handlers, grouped by resource.
//!
//! ## Modules
//!
//! - **[`auth`]**: Registration, login, Google sign-in
//! - **[`users`]**: Profile info and public designer lookup
//! - **[`collections`]**: Designer collection CRUD
//! - **[`products`]**: Product CRUD and listing state
//! - **[`sizes`]**: Size variants per product
//! - **[`nfts`]**: Persisted NFT metadata mirror
//! - **[`listings`]**: Product sale records
//! - **[`market`]**: On-chain marketplace view
//! - **[`wallet`]**: Wallet balance queries
//! - **[`websocket`]**: Balance streaming over WebSocket

pub mod auth;
pub mod collections;
pub mod listings;
pub mod market;
pub mod nfts;
pub mod products;
pub mod sizes;
pub mod users;
pub mod wallet;
pub mod websocket;

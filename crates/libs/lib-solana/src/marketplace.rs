//! # Marketplace Account Decoding
//!
//! Reads the on-chain state of the NFT marketplace program: listing accounts
//! owned by the program, and the Metaplex token-metadata account of each
//! listed mint.
//!
//! ## Account Layouts
//!
//! Listing accounts are Anchor accounts:
//!
//! | offset | size | field         |
//! |--------|------|---------------|
//! | 0      | 8    | discriminator |
//! | 8      | 32   | mint          |
//! | 40     | 32   | seller        |
//! | 72     | 8    | price (u64 LE, lamports) |
//! | 80     | 1    | is_active     |
//!
//! Metadata accounts follow the Metaplex token-metadata layout; strings are
//! borsh-encoded and null-padded to their declared capacity.
//!
//! ## Partial Failures
//!
//! `MarketplaceClient::gather_details` fetches per-mint metadata
//! concurrently and reports each mint's outcome individually: a single
//! unreachable or malformed mint lands in the `failed` list without blanking
//! the rest of the response.

use crate::client::SolanaClient;
use crate::filters::NftDetail;
use serde::Serialize;
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Metaplex token-metadata program.
pub const METADATA_PROGRAM_ID: &str = "metaqbxxUerdq28cj1RbAWkYQm3ybzjb6a8bt518x1s";

/// Discriminator (8) + mint (32) + seller (32) + price (8) + active (1).
const LISTING_DATA_LEN: usize = 81;

/// Errors surfaced while decoding marketplace state.
#[derive(Debug, Clone, Error)]
pub enum MarketError {
    #[error("Account data too short: expected at least {expected} bytes, got {got}")]
    DataTooShort { expected: usize, got: usize },

    #[error("Invalid text in account data: {0}")]
    InvalidText(String),

    #[error("Invalid public key: {0}")]
    BadPubkey(String),

    #[error("Metadata account not found for mint {0}")]
    MetadataNotFound(String),

    #[error("RPC error: {0}")]
    Rpc(String),
}

/// A decoded marketplace listing account.
#[derive(Debug, Clone)]
pub struct ListingAccount {
    /// Address of the listing account itself
    pub address: Pubkey,
    pub mint: Pubkey,
    pub seller: Pubkey,
    pub price_lamports: u64,
    pub is_active: bool,
}

/// Identity fields parsed from a Metaplex metadata account.
#[derive(Debug, Clone)]
pub struct NftMetadata {
    pub name: String,
    pub symbol: String,
    pub uri: String,
    /// Verified collection key, when the NFT belongs to one
    pub collection: Option<Pubkey>,
}

/// A mint whose detail fetch failed during a gather.
#[derive(Debug, Clone, Serialize)]
pub struct FailedMint {
    pub mint: String,
    pub error: String,
}

/// Outcome of a concurrent detail gather: every mint lands in exactly one
/// of the two lists.
#[derive(Debug, Clone)]
pub struct GatherOutcome {
    pub assets: Vec<NftDetail>,
    pub failed: Vec<FailedMint>,
}

// region:    --- Byte Reader

/// Cursor over raw account data.
struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], MarketError> {
        let end = self.pos + n;
        if end > self.data.len() {
            return Err(MarketError::DataTooShort {
                expected: end,
                got: self.data.len(),
            });
        }
        let slice = &self.data[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn read_u8(&mut self) -> Result<u8, MarketError> {
        Ok(self.take(1)?[0])
    }

    fn read_u16(&mut self) -> Result<u16, MarketError> {
        let bytes = self.take(2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    fn read_u32(&mut self) -> Result<u32, MarketError> {
        let bytes = self.take(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn read_u64(&mut self) -> Result<u64, MarketError> {
        let bytes = self.take(8)?;
        let mut buf = [0u8; 8];
        buf.copy_from_slice(bytes);
        Ok(u64::from_le_bytes(buf))
    }

    fn read_pubkey(&mut self) -> Result<Pubkey, MarketError> {
        let bytes = self.take(32)?;
        let mut buf = [0u8; 32];
        buf.copy_from_slice(bytes);
        Ok(Pubkey::new_from_array(buf))
    }

    /// Borsh string: u32 LE length prefix, then that many bytes. Metaplex
    /// pads strings to capacity with trailing nulls, which are stripped.
    fn read_string(&mut self) -> Result<String, MarketError> {
        let len = self.read_u32()? as usize;
        let bytes = self.take(len)?;
        let text = std::str::from_utf8(bytes)
            .map_err(|e| MarketError::InvalidText(e.to_string()))?;
        Ok(text.trim_end_matches('\0').to_string())
    }
}

// endregion: --- Byte Reader

// region:    --- Decoders

/// Decode a listing account owned by the marketplace program.
pub fn decode_listing(address: Pubkey, data: &[u8]) -> Result<ListingAccount, MarketError> {
    if data.len() < LISTING_DATA_LEN {
        return Err(MarketError::DataTooShort {
            expected: LISTING_DATA_LEN,
            got: data.len(),
        });
    }

    let mut reader = ByteReader::new(data);
    reader.take(8)?; // discriminator
    let mint = reader.read_pubkey()?;
    let seller = reader.read_pubkey()?;
    let price_lamports = reader.read_u64()?;
    let is_active = reader.read_u8()? != 0;

    Ok(ListingAccount {
        address,
        mint,
        seller,
        price_lamports,
        is_active,
    })
}

/// Derive the Metaplex metadata PDA for a mint.
pub fn metadata_address(mint: &Pubkey) -> Result<Pubkey, MarketError> {
    let program = Pubkey::from_str(METADATA_PROGRAM_ID)
        .map_err(|e| MarketError::BadPubkey(e.to_string()))?;
    let (address, _bump) = Pubkey::find_program_address(
        &[b"metadata", program.as_ref(), mint.as_ref()],
        &program,
    );
    Ok(address)
}

/// Parse a Metaplex token-metadata account down to its collection field.
pub fn decode_metadata(data: &[u8]) -> Result<NftMetadata, MarketError> {
    let mut reader = ByteReader::new(data);

    reader.read_u8()?; // key
    reader.read_pubkey()?; // update authority
    reader.read_pubkey()?; // mint

    let name = reader.read_string()?;
    let symbol = reader.read_string()?;
    let uri = reader.read_string()?;

    reader.read_u16()?; // seller fee basis points

    // Option<Vec<Creator>>, each creator is pubkey + verified + share
    if reader.read_u8()? != 0 {
        let count = reader.read_u32()? as usize;
        for _ in 0..count {
            reader.take(32 + 1 + 1)?;
        }
    }

    reader.read_u8()?; // primary sale happened
    reader.read_u8()?; // is mutable

    // Option<u8> edition nonce
    if reader.read_u8()? != 0 {
        reader.read_u8()?;
    }

    // Option<u8> token standard
    if reader.read_u8()? != 0 {
        reader.read_u8()?;
    }

    // Option<Collection> { verified, key }
    let collection = if reader.read_u8()? != 0 {
        reader.read_u8()?; // verified
        Some(reader.read_pubkey()?)
    } else {
        None
    };

    Ok(NftMetadata {
        name,
        symbol,
        uri,
        collection,
    })
}

// endregion: --- Decoders

// region:    --- MarketplaceClient

/// Read-side client for the marketplace program.
pub struct MarketplaceClient {
    client: Arc<SolanaClient>,
    program_id: Pubkey,
}

impl MarketplaceClient {
    pub fn new(client: Arc<SolanaClient>, program_id: &str) -> Result<Self, MarketError> {
        let program_id = Pubkey::from_str(program_id)
            .map_err(|e| MarketError::BadPubkey(format!("{}: {}", program_id, e)))?;
        Ok(Self { client, program_id })
    }

    /// Scan the program for listing accounts and keep the active ones.
    ///
    /// Accounts that fail to decode are skipped: the program owns other
    /// account types whose layouts we do not read.
    pub async fn fetch_listings(&self) -> Result<Vec<ListingAccount>, MarketError> {
        let accounts = self
            .client
            .get_program_accounts(&self.program_id)
            .await
            .map_err(|e| MarketError::Rpc(e.to_string()))?;

        let mut listings = Vec::new();
        for (address, account) in accounts {
            match decode_listing(address, &account.data) {
                Ok(listing) if listing.is_active => listings.push(listing),
                Ok(_) => {}
                Err(e) => debug!("[MARKET] Skipping non-listing account {}: {}", address, e),
            }
        }

        debug!("[MARKET] Found {} active listings", listings.len());
        Ok(listings)
    }

    /// Fetch per-mint metadata for each listing concurrently.
    ///
    /// Results keep the arrival order of `listings`. Each mint succeeds or
    /// fails on its own; failures carry the mint address and the error text.
    pub async fn gather_details(&self, listings: Vec<ListingAccount>) -> GatherOutcome {
        let mut handles = Vec::with_capacity(listings.len());

        for listing in listings {
            let client = Arc::clone(&self.client);
            handles.push(tokio::spawn(async move {
                let mint = listing.mint.to_string();
                fetch_detail(client, &listing)
                    .await
                    .map_err(|e| FailedMint {
                        mint,
                        error: e.to_string(),
                    })
            }));
        }

        let mut outcome = GatherOutcome {
            assets: Vec::new(),
            failed: Vec::new(),
        };

        for handle in handles {
            match handle.await {
                Ok(Ok(detail)) => outcome.assets.push(detail),
                Ok(Err(failed)) => {
                    warn!("[MARKET] Detail fetch failed for {}: {}", failed.mint, failed.error);
                    outcome.failed.push(failed);
                }
                Err(join_err) => outcome.failed.push(FailedMint {
                    mint: "unknown".to_string(),
                    error: join_err.to_string(),
                }),
            }
        }

        outcome
    }
}

async fn fetch_detail(
    client: Arc<SolanaClient>,
    listing: &ListingAccount,
) -> Result<NftDetail, MarketError> {
    let pda = metadata_address(&listing.mint)?;
    let account = client
        .get_account(&pda)
        .await
        .map_err(|_| MarketError::MetadataNotFound(listing.mint.to_string()))?;
    let metadata = decode_metadata(&account.data)?;

    Ok(NftDetail {
        mint: listing.mint.to_string(),
        name: metadata.name,
        symbol: metadata.symbol,
        uri: metadata.uri,
        group: metadata.collection.map(|c| c.to_string()),
        seller: listing.seller.to_string(),
        price_lamports: listing.price_lamports,
        listing: listing.address.to_string(),
    })
}

// endregion: --- MarketplaceClient

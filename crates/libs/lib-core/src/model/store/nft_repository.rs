//! # NFT Repository
//!
//! Persisted metadata mirrors of on-chain mints. The mint address is the
//! natural key; saving the same mint twice refreshes the mirror instead of
//! duplicating it.

use super::models::{Nft, NftForCreate};
use super::DbPool;
use sqlx::query_as;

pub struct NftRepository;

impl NftRepository {
    /// Insert or refresh the mirror row for a mint.
    pub async fn upsert(pool: &DbPool, nft: NftForCreate) -> Result<Nft, sqlx::Error> {
        sqlx::query(
            "INSERT INTO nfts (mint_address, name, symbol, uri, group_address, seller_address, price_lamports) \
             VALUES (?, ?, ?, ?, ?, ?, ?) \
             ON CONFLICT(mint_address) DO UPDATE SET \
                name = excluded.name, \
                symbol = excluded.symbol, \
                uri = excluded.uri, \
                group_address = excluded.group_address, \
                seller_address = excluded.seller_address, \
                price_lamports = excluded.price_lamports",
        )
        .bind(&nft.mint_address)
        .bind(&nft.name)
        .bind(&nft.symbol)
        .bind(&nft.uri)
        .bind(&nft.group_address)
        .bind(&nft.seller_address)
        .bind(nft.price_lamports)
        .execute(pool)
        .await?;

        query_as::<_, Nft>("SELECT * FROM nfts WHERE mint_address = ?")
            .bind(&nft.mint_address)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_mint(
        pool: &DbPool,
        mint_address: &str,
    ) -> Result<Option<Nft>, sqlx::Error> {
        query_as::<_, Nft>("SELECT * FROM nfts WHERE mint_address = ?")
            .bind(mint_address)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_all(pool: &DbPool) -> Result<Vec<Nft>, sqlx::Error> {
        query_as::<_, Nft>("SELECT * FROM nfts ORDER BY created_at DESC")
            .fetch_all(pool)
            .await
    }
}

use alloy_primitives::Address;
use nftsync_types::{Item, Nft};
use sqlx::postgres::PgPool;

use crate::{
    convert::{address_to_text, decimal_to_token_id, text_to_address, token_id_to_decimal},
    error::StoreError
};

#[derive(sqlx::FromRow)]
struct NftRow {
    id:           i64,
    contract:     String,
    token_id:     rust_decimal::Decimal,
    owner:        String,
    token_uri:    String,
    metadata:     String,
    confidence:   i32,
    confirmed:    bool,
    source_nodes: String
}

impl NftRow {
    fn into_nft(self, items: Vec<Item>) -> Result<Nft, StoreError> {
        Ok(Nft {
            contract: text_to_address(&self.contract)?,
            token_id: decimal_to_token_id(self.token_id)?,
            owner: text_to_address(&self.owner)?,
            token_uri: self.token_uri,
            metadata: self.metadata,
            items,
            confidence: self.confidence as usize,
            confirmed: self.confirmed,
            source_nodes: self.source_nodes
        })
    }
}

#[derive(sqlx::FromRow)]
struct ItemRow {
    name:       String,
    trait_type: String,
    value:      String
}

impl From<ItemRow> for Item {
    fn from(row: ItemRow) -> Self {
        Item { name: row.name, trait_type: row.trait_type, value: row.value }
    }
}

/// Idempotently upserts `nft` keyed on `(contract, token_id)` and replaces its
/// trait items wholesale, all in one transaction — `SaveOrUpdateNFT` from §4.
/// Re-running with the same `nft` produces no net change.
pub async fn save_or_update_nft(pool: &PgPool, nft: &Nft, now: i64) -> Result<(), StoreError> {
    let mut tx = pool.begin().await?;

    let id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO nft (contract, token_id, owner, token_uri, metadata, confidence, confirmed, source_nodes, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9)
        ON CONFLICT (contract, token_id) DO UPDATE SET
            owner = EXCLUDED.owner,
            token_uri = EXCLUDED.token_uri,
            metadata = EXCLUDED.metadata,
            confidence = EXCLUDED.confidence,
            confirmed = EXCLUDED.confirmed,
            source_nodes = EXCLUDED.source_nodes,
            updated_at = EXCLUDED.updated_at
        RETURNING id
        "#
    )
    .bind(address_to_text(nft.contract))
    .bind(token_id_to_decimal(nft.token_id))
    .bind(address_to_text(nft.owner))
    .bind(&nft.token_uri)
    .bind(&nft.metadata)
    .bind(nft.confidence as i32)
    .bind(nft.confirmed)
    .bind(&nft.source_nodes)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query("DELETE FROM item WHERE nft_id = $1").bind(id).execute(&mut *tx).await?;

    for item in &nft.items {
        sqlx::query("INSERT INTO item (nft_id, name, trait_type, value) VALUES ($1, $2, $3, $4)")
            .bind(id)
            .bind(&item.name)
            .bind(&item.trait_type)
            .bind(&item.value)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    Ok(())
}

/// Looks up an NFT by its natural key, including its items. Returns `None`
/// when no row matches — this is a lookup miss, not an error.
pub async fn get_nft(pool: &PgPool, contract: Address, token_id: u128) -> Result<Option<Nft>, StoreError> {
    let row: Option<NftRow> = sqlx::query_as(
        r#"
        SELECT id, contract, token_id, owner, token_uri, metadata, confidence, confirmed, source_nodes
        FROM nft
        WHERE contract = $1 AND token_id = $2 AND deleted_at IS NULL
        "#
    )
    .bind(address_to_text(contract))
    .bind(token_id_to_decimal(token_id))
    .fetch_optional(pool)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let items: Vec<ItemRow> = sqlx::query_as("SELECT name, trait_type, value FROM item WHERE nft_id = $1")
        .bind(row.id)
        .fetch_all(pool)
        .await?;
    let items = items.into_iter().map(Item::from).collect();

    Ok(Some(row.into_nft(items)?))
}

/// Lists every NFT currently owned by `owner`, items included.
pub async fn list_by_owner(pool: &PgPool, owner: Address) -> Result<Vec<Nft>, StoreError> {
    let rows: Vec<NftRow> = sqlx::query_as(
        r#"
        SELECT id, contract, token_id, owner, token_uri, metadata, confidence, confirmed, source_nodes
        FROM nft
        WHERE owner = $1 AND deleted_at IS NULL
        ORDER BY id
        "#
    )
    .bind(address_to_text(owner))
    .fetch_all(pool)
    .await?;

    let mut result = Vec::with_capacity(rows.len());
    for row in rows {
        let items: Vec<ItemRow> = sqlx::query_as("SELECT name, trait_type, value FROM item WHERE nft_id = $1")
            .bind(row.id)
            .fetch_all(pool)
            .await?;
        let items = items.into_iter().map(Item::from).collect();
        result.push(row.into_nft(items)?);
    }
    Ok(result)
}

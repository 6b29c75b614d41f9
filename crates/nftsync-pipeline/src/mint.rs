use std::time::Duration;

use alloy_primitives::Address;
use nftsync_decode::decode_mint;
use nftsync_rpc::{CrossNodeFetcher, CrossValidatedLog, NodePool};
use nftsync_store::nft as nft_store;
use nftsync_types::{Nft, TokenMetadata};
use sqlx::PgPool;

use crate::error::PipelineError;

/// Mint ingestion (§4.5): cross-validated `Transfer(from=0x0)` logs turned
/// into NFT records, enriched with off-chain metadata fetched from the
/// token's own `tokenURI`.
pub struct MintPipeline {
    pool: PgPool,
    http: reqwest::Client
}

impl MintPipeline {
    pub fn new(pool: PgPool) -> Self {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(10))
            .build()
            .expect("static reqwest client config is always valid");
        Self { pool, http }
    }

    /// Processes a single block range for every configured NFT contract,
    /// logging and skipping any event that fails at any stage. Returns the
    /// number of NFTs successfully persisted.
    pub async fn process_range(
        &self,
        rpc: &NodePool,
        contracts: &[Address],
        start_block: u64,
        end_block: u64
    ) -> usize {
        let fetcher = CrossNodeFetcher::new(rpc);
        let mut persisted = 0;

        for &contract in contracts {
            let logs = fetcher.fetch(contract, start_block, end_block, &[]).await;
            for log in logs {
                match self.process_log(rpc, contract, &log).await {
                    Ok(true) => persisted += 1,
                    Ok(false) => {}
                    Err(err) => tracing::warn!(error = %err, contract = %contract, "skipping mint event")
                }
            }
        }

        persisted
    }

    /// Returns `Ok(true)` if `log` was a mint and was persisted, `Ok(false)`
    /// if it wasn't a mint at all (not an error).
    async fn process_log(
        &self,
        rpc: &NodePool,
        contract: Address,
        log: &CrossValidatedLog
    ) -> Result<bool, PipelineError> {
        let Some(event) = decode_mint(contract, &log.log)? else {
            return Ok(false);
        };

        let token_uri = rpc.primary().token_uri(contract, event.token_id).await?;
        let metadata_json = self
            .http
            .get(&token_uri)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|err| PipelineError::MetadataFetch(err.to_string()))?
            .text()
            .await
            .map_err(|err| PipelineError::MetadataFetch(err.to_string()))?;

        let metadata: TokenMetadata = serde_json::from_str(&metadata_json)
            .map_err(|err| PipelineError::MetadataFetch(err.to_string()))?;

        let items = Nft::items_from_metadata(&metadata.name, &metadata.attributes);

        let confirmed = log.confirmed(rpc.len());
        let nft = Nft {
            contract,
            token_id: event.token_id,
            owner: event.to,
            token_uri,
            metadata: metadata_json,
            items,
            confidence: log.confidence,
            confirmed,
            source_nodes: log.source_nodes.join(",")
        };

        nft_store::save_or_update_nft(&self.pool, &nft, nftsync_types::clock::unix_now()).await?;
        Ok(true)
    }
}

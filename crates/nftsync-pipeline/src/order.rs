use std::collections::HashMap;

use alloy_primitives::{Address, B256};
use nftsync_decode::{
    decode_order,
    topics::{OrderCancelled, OrderCreated, OrderFilled}
};
use nftsync_floorprice::Producer;
use nftsync_rpc::NodePool;
use nftsync_store::order as order_store;
use nftsync_types::{Order, OrderEventKind, OrderStatus};
use sqlx::PgPool;

use crate::error::PipelineError;

/// The three order-contract topics the polling order driver watches, used to
/// filter `logs()` so unrelated contract events never reach the decoder.
pub fn order_topics() -> [B256; 3] {
    [OrderCreated::SIGNATURE_HASH, OrderCancelled::SIGNATURE_HASH, OrderFilled::SIGNATURE_HASH]
}

/// Order ingestion (§4.6): decodes `OrderCreated`/`OrderCancelled`/
/// `OrderFilled` logs from the primary RPC member (with fallback) and
/// applies the corresponding idempotent state transition.
pub struct OrderPipeline {
    pool:        PgPool,
    floor_price: Producer
}

impl OrderPipeline {
    pub fn new(pool: PgPool, floor_price: Producer) -> Self {
        Self { pool, floor_price }
    }

    /// Processes `[start_block, end_block]` for every configured order
    /// contract. A single log's failure is logged and skipped; it never
    /// aborts the batch (§4.6).
    pub async fn process_range(&self, rpc: &NodePool, contracts: &[Address], start_block: u64, end_block: u64) {
        let topics = order_topics();
        let mut block_times: HashMap<u64, i64> = HashMap::new();

        for &contract in contracts {
            let logs = rpc
                .with_fallback("order_logs", |node| node.logs(contract, start_block, end_block, &topics))
                .await;

            let logs = match logs {
                Ok(logs) => logs,
                Err(err) => {
                    tracing::warn!(error = %err, contract = %contract, "order log fetch failed on every node, skipping batch");
                    continue;
                }
            };

            for log in logs {
                let Some(block_number) = log.block_number else {
                    continue;
                };

                let block_time = match self.block_time(rpc, &mut block_times, block_number).await {
                    Ok(time) => time,
                    Err(err) => {
                        tracing::warn!(error = %err, block_number, "failed to resolve block time, skipping event");
                        continue;
                    }
                };

                if let Err(err) = self.apply(&log, block_time).await {
                    tracing::warn!(error = %err, contract = %contract, "skipping order event");
                }
            }
        }
    }

    async fn block_time(
        &self,
        rpc: &NodePool,
        cache: &mut HashMap<u64, i64>,
        block_number: u64
    ) -> Result<i64, PipelineError> {
        if let Some(&time) = cache.get(&block_number) {
            return Ok(time);
        }
        let header = rpc.with_fallback("block_header", |node| node.block_header(block_number)).await?;
        let time = header.map(|h| h.timestamp as i64).unwrap_or(0);
        cache.insert(block_number, time);
        Ok(time)
    }

    async fn apply(&self, log: &alloy::rpc::types::Log, block_time: i64) -> Result<(), PipelineError> {
        let Some(event) = decode_order(log, block_time)? else {
            return Ok(());
        };

        match event {
            OrderEventKind::Created(created) => {
                let order = Order {
                    order_id:     created.order_id,
                    nft_token:    created.nft_token,
                    seller:       created.seller,
                    buyer:        None,
                    price:        created.price,
                    fee:          created.fee,
                    status:       OrderStatus::Listed,
                    order_type:   created.order_type,
                    tx_hash:      created.tx_hash,
                    block_number: created.block_number,
                    block_time:   created.block_time,
                    created_at:   created.block_time,
                    updated_at:   created.block_time
                };
                order_store::create_order(&self.pool, &order, nftsync_types::clock::unix_now()).await?;
                self.notify(created.nft_token).await;
            }
            OrderEventKind::Cancelled(cancelled) => {
                if let Some(order) = order_store::get_order(&self.pool, cancelled.order_id).await? {
                    order_store::cancel_order(&self.pool, cancelled.order_id, cancelled.block_time).await?;
                    self.notify(order.nft_token).await;
                } else {
                    tracing::debug!(order_id = %cancelled.order_id, "cancel for unknown order, skipping");
                }
            }
            OrderEventKind::Filled(filled) => {
                for order_id in [filled.seller_order_id, filled.buyer_order_id] {
                    if let Some(order) = order_store::get_order(&self.pool, order_id).await? {
                        order_store::complete_order(&self.pool, order_id, filled.buyer, filled.block_time).await?;
                        self.notify(order.nft_token).await;
                    } else {
                        tracing::debug!(order_id = %order_id, "fill for unknown order, skipping");
                    }
                }
            }
        }

        Ok(())
    }

    async fn notify(&self, collection: Address) {
        if let Err(err) = self.floor_price.notify_floor_price_changed(collection).await {
            tracing::warn!(error = %err, collection = %collection, "failed to publish floor-price-changed");
        }
    }
}

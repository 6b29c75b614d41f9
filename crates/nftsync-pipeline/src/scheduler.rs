use std::sync::Arc;

use alloy_primitives::Address;
use nftsync_rpc::NodePool;
use nftsync_types::Stream;
use sqlx::PgPool;
use tokio::time::interval;
use tokio_util::sync::CancellationToken;

use crate::{mint::MintPipeline, order::OrderPipeline, watermark_manager::WatermarkManager};

/// Wires the three periodic drivers of §4.3 together with their shared
/// dependencies. Each driver owns its own ticker; a driver processes ticks
/// serially by construction — the loop body is awaited to completion before
/// the next `tick().await` resolves, so overlapping ticks queue rather than
/// run concurrently (§5).
pub struct Scheduler {
    rpc:             Arc<NodePool>,
    mint:            Arc<MintPipeline>,
    order:           Arc<OrderPipeline>,
    pool:            PgPool,
    nft_contracts:   Vec<Address>,
    order_contracts: Vec<Address>,
    confirm_blocks:  u64
}

impl Scheduler {
    pub fn new(
        rpc: Arc<NodePool>,
        mint: Arc<MintPipeline>,
        order: Arc<OrderPipeline>,
        pool: PgPool,
        nft_contracts: Vec<Address>,
        order_contracts: Vec<Address>,
        confirm_blocks: u64
    ) -> Self {
        Self { rpc, mint, order, pool, nft_contracts, order_contracts, confirm_blocks }
    }

    /// Runs the realtime mint driver until `cancel` fires. Never advances a
    /// watermark; it only widens coverage for mints that are still too
    /// recent for the polling driver's confirmation depth.
    pub async fn run_realtime_mint(&self, period: std::time::Duration, cancel: CancellationToken) {
        let mut ticker = interval(period);
        loop {
            tokio::select! {
                _ = cancel.cancelled() => return,
                _ = ticker.tick() => {
                    let Some(head) = self.rpc.min_head().await else {
                        tracing::warn!("realtime mint driver: no reachable rpc node, skipping tick");
                        continue;
                    };
                    self.mint.process_range(&self.rpc, &self.nft_contracts, head, head).await;
                }
            }
        }
    }

    /// Runs the polling mint driver until `cancel` fires, advancing the
    /// `mint` watermark on every successful tick.
    pub async fn run_polling_mint(&self, period: std::time::Duration, cancel: CancellationToken) {
        let mut ticker = interval(period);
        loop {
            tokio::select! {
                _ = cancel.cancelled() => return,
                _ = ticker.tick() => self.poll_mint_once().await
            }
        }
    }

    async fn poll_mint_once(&self) {
        let watermarks = WatermarkManager::new(&self.pool);
        let Some((start, safe)) = self.confirmed_range(&watermarks, Stream::Mint).await else {
            return;
        };

        self.mint.process_range(&self.rpc, &self.nft_contracts, start, safe).await;

        if let Err(err) = watermarks.advance(Stream::Mint, safe).await {
            tracing::warn!(error = %err, "failed to advance mint watermark");
        }
    }

    /// Runs the polling order driver until `cancel` fires, advancing the
    /// `order` watermark on every successful tick.
    pub async fn run_polling_order(&self, period: std::time::Duration, cancel: CancellationToken) {
        let mut ticker = interval(period);
        loop {
            tokio::select! {
                _ = cancel.cancelled() => return,
                _ = ticker.tick() => self.poll_order_once().await
            }
        }
    }

    async fn poll_order_once(&self) {
        let watermarks = WatermarkManager::new(&self.pool);
        let Some((start, safe)) = self.confirmed_range(&watermarks, Stream::Order).await else {
            return;
        };

        self.order.process_range(&self.rpc, &self.order_contracts, start, safe).await;

        if let Err(err) = watermarks.advance(Stream::Order, safe).await {
            tracing::warn!(error = %err, "failed to advance order watermark");
        }
    }

    /// Computes `(start, safe)` for a polling tick: `start = watermark + 1`,
    /// `safe = head - confirm_blocks`. Returns `None` (noop tick) when
    /// `safe < start` or the head can't be determined.
    async fn confirmed_range(&self, watermarks: &WatermarkManager<'_>, stream: Stream) -> Option<(u64, u64)> {
        let head = match self.rpc.with_fallback("head", |node| node.head()).await {
            Ok(head) => head,
            Err(err) => {
                tracing::warn!(error = %err, "polling driver: no reachable rpc node, skipping tick");
                return None;
            }
        };
        let safe = head.saturating_sub(self.confirm_blocks);

        let watermark = match watermarks.current(stream).await {
            Ok(watermark) => watermark,
            Err(err) => {
                tracing::warn!(error = %err, "failed to read watermark, skipping tick");
                return None;
            }
        };

        next_range(watermark, head, self.confirm_blocks)
    }
}

/// The pure range arithmetic behind a polling tick: `start = watermark + 1`,
/// `safe = head - confirm_blocks`. `None` means noop — either the chain
/// hasn't advanced far enough past `confirm_blocks` yet, or there's nothing
/// new since `watermark`.
fn next_range(watermark: u64, head: u64, confirm_blocks: u64) -> Option<(u64, u64)> {
    let safe = head.saturating_sub(confirm_blocks);
    let start = watermark + 1;
    (safe >= start).then_some((start, safe))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirmation_depth_blocks_premature_commit() {
        // Scenario 6: head=500, confirm_blocks=12, watermark=480 -> [481, 488].
        assert_eq!(next_range(480, 500, 12), Some((481, 488)));
    }

    #[test]
    fn noop_when_safe_is_behind_watermark() {
        assert_eq!(next_range(490, 500, 12), None);
    }

    #[test]
    fn noop_when_chain_has_not_advanced() {
        assert_eq!(next_range(100, 105, 12), None);
    }

    #[test]
    fn exactly_one_new_block_is_still_processed() {
        assert_eq!(next_range(487, 500, 12), Some((488, 488)));
    }
}


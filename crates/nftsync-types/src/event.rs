use alloy_primitives::{Address, B256};
use rust_decimal::Decimal;

use crate::order::OrderType;

/// Wraps a decoded event with the cross-node validation metadata the fetcher
/// attached to its raw log: how many pool members independently observed it,
/// and which ones.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossValidated<T> {
    pub event:        T,
    pub confidence:   usize,
    pub source_nodes: Vec<String>
}

impl<T> CrossValidated<T> {
    /// `confidence == pool_size`, the definition of `confirmed` in §3.
    pub fn confirmed(&self, pool_size: usize) -> bool {
        self.confidence == pool_size
    }

    /// Comma-joined source node names, already lexicographically sorted by
    /// the fetcher that produced this record.
    pub fn source_nodes_joined(&self) -> String {
        self.source_nodes.join(",")
    }
}

/// An ERC-721 `Transfer` with `from == 0x0`, i.e. a mint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintEvent {
    pub contract:     Address,
    pub to:           Address,
    pub token_id:     u128,
    pub block_number: u64
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderCreatedEvent {
    pub order_id:     B256,
    pub seller:       Address,
    pub nft_token:    Address,
    pub token_id:     u128,
    pub price:        Decimal,
    pub fee:          Decimal,
    pub order_type:   OrderType,
    pub tx_hash:      B256,
    pub block_number: u64,
    pub block_time:   i64
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderCancelledEvent {
    pub order_id:     B256,
    pub canceller:    Address,
    pub tx_hash:      B256,
    pub block_number: u64,
    pub block_time:   i64
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderFilledEvent {
    pub seller_order_id: B256,
    pub buyer_order_id:  B256,
    pub seller:          Address,
    pub buyer:           Address,
    pub token_id:        u128,
    pub price:           Decimal,
    pub fee:             Decimal,
    pub tx_hash:         B256,
    pub block_number:    u64,
    pub block_time:      i64
}

/// The three order-contract events the decoder may produce from a single
/// log, already dispatched by topic so the order pipeline never re-inspects
/// raw topics.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderEventKind {
    Created(OrderCreatedEvent),
    Cancelled(OrderCancelledEvent),
    Filled(OrderFilledEvent)
}

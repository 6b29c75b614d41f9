use alloy_primitives::{Address, B256};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Status of an [`Order`]. The ingestion path only ever produces `Listed`,
/// `Cancelled`, and `Completed` transitions; `Matched` is preserved in the
/// taxonomy for an off-chain atomic matching engine that is not part of this
/// core (see the design notes on `UpdateOrderMatched`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
pub enum OrderStatus {
    Listed,
    Matched,
    Completed,
    Cancelled
}

impl OrderStatus {
    /// Whether `self -> next` is a legal transition per the order state
    /// machine (`listed -> {matched, cancelled, completed}`, `matched ->
    /// completed`; `cancelled`/`completed` are absorbing).
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Listed, Matched) | (Listed, Cancelled) | (Listed, Completed) | (Matched, Completed)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
pub enum OrderType {
    Listing,
    ItemBid,
    CollectionBid
}

impl OrderType {
    /// Derives the order type from the two boolean flags carried by
    /// `OrderCreated`: `!is_bid => Listing`, `is_bid && !is_collection_bid =>
    /// ItemBid`, `is_bid && is_collection_bid => CollectionBid`.
    pub fn from_flags(is_bid: bool, is_collection_bid: bool) -> Self {
        match (is_bid, is_collection_bid) {
            (false, _) => OrderType::Listing,
            (true, false) => OrderType::ItemBid,
            (true, true) => OrderType::CollectionBid
        }
    }
}

/// A sell listing or buy bid placed on-chain through a marketplace contract,
/// identified by an opaque 32-byte `order_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id:     B256,
    pub nft_token:    Address,
    pub seller:       Address,
    pub buyer:        Option<Address>,
    pub price:        Decimal,
    pub fee:          Decimal,
    pub status:       OrderStatus,
    pub order_type:   OrderType,
    pub tx_hash:      B256,
    pub block_number: u64,
    pub block_time:   i64,
    pub created_at:   i64,
    pub updated_at:   i64
}

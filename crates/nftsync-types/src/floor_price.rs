use alloy_primitives::Address;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The minimum `price` across all `listed` orders for a collection. One row
/// per collection, upserted by the floor-price service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorPrice {
    pub collection: Address,
    pub price:      Decimal
}

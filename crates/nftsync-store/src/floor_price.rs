use alloy_primitives::Address;
use nftsync_types::FloorPrice;
use rust_decimal::Decimal;
use sqlx::postgres::PgPool;

use crate::{
    convert::{address_to_text, text_to_address},
    error::StoreError
};

#[derive(sqlx::FromRow)]
struct FloorPriceRow {
    collection: String,
    price:      Decimal
}

impl FloorPriceRow {
    fn into_floor_price(self) -> Result<FloorPrice, StoreError> {
        Ok(FloorPrice { collection: text_to_address(&self.collection)?, price: self.price })
    }
}

/// Upserts the floor price for a collection — the terminal write of the
/// floor-price aggregator's consume loop.
pub async fn upsert(pool: &PgPool, floor_price: &FloorPrice, now: i64) -> Result<(), StoreError> {
    sqlx::query(
        r#"
        INSERT INTO floor_price (collection, price, updated_at)
        VALUES ($1, $2, $3)
        ON CONFLICT (collection) DO UPDATE SET price = EXCLUDED.price, updated_at = EXCLUDED.updated_at
        "#
    )
    .bind(address_to_text(floor_price.collection))
    .bind(floor_price.price)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn get(pool: &PgPool, collection: Address) -> Result<Option<FloorPrice>, StoreError> {
    let row: Option<FloorPriceRow> = sqlx::query_as("SELECT collection, price FROM floor_price WHERE collection = $1")
        .bind(address_to_text(collection))
        .fetch_optional(pool)
        .await?;

    row.map(FloorPriceRow::into_floor_price).transpose()
}

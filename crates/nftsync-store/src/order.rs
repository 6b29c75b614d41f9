use alloy_primitives::{Address, B256};
use nftsync_types::{Order, OrderStatus, OrderType};
use rust_decimal::Decimal;
use sqlx::postgres::PgPool;

use crate::{
    convert::{address_to_text, b256_to_text, text_to_address, text_to_b256},
    error::StoreError
};

#[derive(sqlx::FromRow)]
struct OrderRow {
    order_id:     String,
    nft_token:    String,
    seller:       String,
    buyer:        Option<String>,
    price:        Decimal,
    fee:          Decimal,
    status:       OrderStatus,
    order_type:   OrderType,
    tx_hash:      String,
    block_number: i64,
    block_time:   i64,
    created_at:   i64,
    updated_at:   i64
}

impl OrderRow {
    fn into_order(self) -> Result<Order, StoreError> {
        Ok(Order {
            order_id: text_to_b256(&self.order_id)?,
            nft_token: text_to_address(&self.nft_token)?,
            seller: text_to_address(&self.seller)?,
            buyer: self.buyer.as_deref().map(text_to_address).transpose()?,
            price: self.price,
            fee: self.fee,
            status: self.status,
            order_type: self.order_type,
            tx_hash: text_to_b256(&self.tx_hash)?,
            block_number: self.block_number as u64,
            block_time: self.block_time,
            created_at: self.created_at,
            updated_at: self.updated_at
        })
    }
}

/// Inserts a freshly observed `Listed` order. A conflict on `order_id` means
/// this exact creation was already applied — idempotent no-op, not an error.
pub async fn create_order(pool: &PgPool, order: &Order, now: i64) -> Result<(), StoreError> {
    sqlx::query(
        r#"
        INSERT INTO "order" (order_id, nft_token, seller, buyer, price, fee, status, order_type, tx_hash, block_number, block_time, created_at, updated_at)
        VALUES ($1, $2, $3, NULL, $4, $5, $6, $7, $8, $9, $10, $11, $11)
        ON CONFLICT (order_id) DO NOTHING
        "#
    )
    .bind(b256_to_text(order.order_id))
    .bind(address_to_text(order.nft_token))
    .bind(address_to_text(order.seller))
    .bind(order.price)
    .bind(order.fee)
    .bind(order.status)
    .bind(order.order_type)
    .bind(b256_to_text(order.tx_hash))
    .bind(order.block_number as i64)
    .bind(order.block_time)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(())
}

/// Applies a cancellation. Guarded by `can_transition_to` so a cancel
/// replayed after a later fill doesn't regress a `Completed` order back to
/// `Cancelled`.
pub async fn cancel_order(pool: &PgPool, order_id: B256, now: i64) -> Result<(), StoreError> {
    transition(pool, order_id, OrderStatus::Cancelled, None, now).await
}

/// Applies a fill: records the buyer and marks the order `Completed`.
pub async fn complete_order(pool: &PgPool, order_id: B256, buyer: Address, now: i64) -> Result<(), StoreError> {
    transition(pool, order_id, OrderStatus::Completed, Some(buyer), now).await
}

async fn transition(
    pool: &PgPool,
    order_id: B256,
    next: OrderStatus,
    buyer: Option<Address>,
    now: i64
) -> Result<(), StoreError> {
    let mut tx = pool.begin().await?;

    let current: Option<OrderRow> = sqlx::query_as(
        r#"
        SELECT order_id, nft_token, seller, buyer, price, fee, status, order_type, tx_hash, block_number, block_time, created_at, updated_at
        FROM "order" WHERE order_id = $1 FOR UPDATE
        "#
    )
    .bind(b256_to_text(order_id))
    .fetch_optional(&mut *tx)
    .await?;

    let Some(current) = current else {
        tracing::warn!(order_id = %order_id, "transition on unknown order, skipping");
        return Ok(());
    };

    if !current.status.can_transition_to(next) {
        tracing::debug!(order_id = %order_id, from = ?current.status, to = ?next, "no-op transition, already applied or superseded");
        return Ok(());
    }

    sqlx::query(r#"UPDATE "order" SET status = $1, buyer = COALESCE($2, buyer), updated_at = $3 WHERE order_id = $4"#)
        .bind(next)
        .bind(buyer.map(address_to_text))
        .bind(now)
        .bind(b256_to_text(order_id))
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(())
}

/// Looks up an order by its on-chain id.
pub async fn get_order(pool: &PgPool, order_id: B256) -> Result<Option<Order>, StoreError> {
    let row: Option<OrderRow> = sqlx::query_as(
        r#"
        SELECT order_id, nft_token, seller, buyer, price, fee, status, order_type, tx_hash, block_number, block_time, created_at, updated_at
        FROM "order" WHERE order_id = $1
        "#
    )
    .bind(b256_to_text(order_id))
    .fetch_optional(pool)
    .await?;

    row.map(OrderRow::into_order).transpose()
}

/// The minimum `price` across every `Listed` order against `collection`, or
/// `None` if it currently has none — the floor-price computation of §4.7.
pub async fn min_listed_price(pool: &PgPool, collection: Address) -> Result<Option<Decimal>, StoreError> {
    let row: Option<(Option<Decimal>,)> =
        sqlx::query_as(r#"SELECT MIN(price) FROM "order" WHERE nft_token = $1 AND status = 'listed'"#)
            .bind(address_to_text(collection))
            .fetch_optional(pool)
            .await?;

    Ok(row.and_then(|(min,)| min))
}

/// Lists every order a `seller` has placed, most recent first.
pub async fn list_by_seller(pool: &PgPool, seller: Address) -> Result<Vec<Order>, StoreError> {
    let rows: Vec<OrderRow> = sqlx::query_as(
        r#"
        SELECT order_id, nft_token, seller, buyer, price, fee, status, order_type, tx_hash, block_number, block_time, created_at, updated_at
        FROM "order" WHERE seller = $1 ORDER BY block_number DESC
        "#
    )
    .bind(address_to_text(seller))
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(OrderRow::into_order).collect()
}

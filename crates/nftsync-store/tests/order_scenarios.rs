use alloy_primitives::{address, B256};
use nftsync_types::{Order, OrderStatus, OrderType};
use rust_decimal::Decimal;
use sqlx::PgPool;

fn listing(order_id: B256, nft_token: alloy_primitives::Address, block_number: u64) -> Order {
    Order {
        order_id,
        nft_token,
        seller: address!("00000000000000000000000000000000000aaa"),
        buyer: None,
        price: Decimal::from(1000),
        fee: Decimal::from(10),
        status: OrderStatus::Listed,
        order_type: OrderType::Listing,
        tx_hash: B256::repeat_byte(0xab),
        block_number,
        block_time: 1_700_000_000,
        created_at: 1_700_000_000,
        updated_at: 1_700_000_000
    }
}

/// Scenario 4: an order created then cancelled ends up `cancelled`.
#[sqlx::test]
async fn order_created_then_cancelled(pool: PgPool) -> sqlx::Result<()> {
    let collection = address!("00000000000000000000000000000000000ccc");
    let order_id = B256::repeat_byte(0x01);
    let order = listing(order_id, collection, 200);

    nftsync_store::order::create_order(&pool, &order, 1_700_000_000).await.unwrap();
    nftsync_store::order::cancel_order(&pool, order_id, 1_700_000_100).await.unwrap();

    let stored = nftsync_store::order::get_order(&pool, order_id).await.unwrap().unwrap();
    assert_eq!(stored.status, OrderStatus::Cancelled);
    assert_eq!(stored.order_type, OrderType::Listing);
    Ok(())
}

/// Re-applying a create or a cancel produces no net change (idempotence law).
#[sqlx::test]
async fn order_transitions_are_idempotent(pool: PgPool) -> sqlx::Result<()> {
    let collection = address!("00000000000000000000000000000000000ccc");
    let order_id = B256::repeat_byte(0x02);
    let order = listing(order_id, collection, 200);

    nftsync_store::order::create_order(&pool, &order, 1_700_000_000).await.unwrap();
    nftsync_store::order::create_order(&pool, &order, 1_700_000_000).await.unwrap();
    nftsync_store::order::cancel_order(&pool, order_id, 1_700_000_100).await.unwrap();
    nftsync_store::order::cancel_order(&pool, order_id, 1_700_000_200).await.unwrap();

    let stored = nftsync_store::order::get_order(&pool, order_id).await.unwrap().unwrap();
    assert_eq!(stored.status, OrderStatus::Cancelled);
    Ok(())
}

/// Scenario 5: a fill transitions both the seller's and buyer's orders to
/// `completed`.
#[sqlx::test]
async fn order_fill_completes_both_sides(pool: PgPool) -> sqlx::Result<()> {
    let collection = address!("00000000000000000000000000000000000ccc");
    let seller_order_id = B256::repeat_byte(0x03);
    let buyer_order_id = B256::repeat_byte(0x04);
    let buyer = address!("00000000000000000000000000000000000bbb");

    nftsync_store::order::create_order(&pool, &listing(seller_order_id, collection, 300), 1_700_000_000)
        .await
        .unwrap();
    nftsync_store::order::create_order(&pool, &listing(buyer_order_id, collection, 300), 1_700_000_000)
        .await
        .unwrap();

    nftsync_store::order::complete_order(&pool, seller_order_id, buyer, 1_700_000_300).await.unwrap();
    nftsync_store::order::complete_order(&pool, buyer_order_id, buyer, 1_700_000_300).await.unwrap();

    let seller_order = nftsync_store::order::get_order(&pool, seller_order_id).await.unwrap().unwrap();
    let buyer_order = nftsync_store::order::get_order(&pool, buyer_order_id).await.unwrap().unwrap();
    assert_eq!(seller_order.status, OrderStatus::Completed);
    assert_eq!(buyer_order.status, OrderStatus::Completed);
    assert_eq!(buyer_order.buyer, Some(buyer));
    Ok(())
}

/// A cancel replayed after a later completion must not regress the order.
#[sqlx::test]
async fn cancel_after_complete_does_not_regress(pool: PgPool) -> sqlx::Result<()> {
    let collection = address!("00000000000000000000000000000000000ccc");
    let order_id = B256::repeat_byte(0x05);
    let buyer = address!("00000000000000000000000000000000000bbb");

    nftsync_store::order::create_order(&pool, &listing(order_id, collection, 400), 1_700_000_000).await.unwrap();
    nftsync_store::order::complete_order(&pool, order_id, buyer, 1_700_000_300).await.unwrap();
    nftsync_store::order::cancel_order(&pool, order_id, 1_700_000_400).await.unwrap();

    let stored = nftsync_store::order::get_order(&pool, order_id).await.unwrap().unwrap();
    assert_eq!(stored.status, OrderStatus::Completed);
    Ok(())
}

/// The floor price of a collection is the minimum price across its listed
/// orders.
#[sqlx::test]
async fn floor_price_is_minimum_of_listed_orders(pool: PgPool) -> sqlx::Result<()> {
    let collection = address!("00000000000000000000000000000000000ccc");

    let mut cheap = listing(B256::repeat_byte(0x06), collection, 500);
    cheap.price = Decimal::from(500);
    let mut expensive = listing(B256::repeat_byte(0x07), collection, 500);
    expensive.price = Decimal::from(900);

    nftsync_store::order::create_order(&pool, &cheap, 1_700_000_000).await.unwrap();
    nftsync_store::order::create_order(&pool, &expensive, 1_700_000_000).await.unwrap();

    let minimum = nftsync_store::order::min_listed_price(&pool, collection).await.unwrap();
    assert_eq!(minimum, Some(Decimal::from(500)));
    Ok(())
}

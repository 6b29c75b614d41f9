use alloy_primitives::address;
use nftsync_types::{Item, Nft};
use sqlx::PgPool;

fn sample_nft(confidence: usize, confirmed: bool, source_nodes: &str) -> Nft {
    Nft {
        contract: address!("00000000000000000000000000000000000abc"),
        token_id: 0x2a,
        owner: address!("00000000000000000000000000000000000def"),
        token_uri: "ipfs://token/42".to_string(),
        metadata: r#"{"name":"K","attributes":[{"trait_type":"color","value":"red"}]}"#.to_string(),
        items: vec![Item { name: "K".to_string(), trait_type: "color".to_string(), value: "red".to_string() }],
        confidence,
        confirmed,
        source_nodes: source_nodes.to_string()
    }
}

/// Scenario 1: both pool members agree on one mint.
#[sqlx::test]
async fn single_mint_all_nodes_agree(pool: PgPool) -> sqlx::Result<()> {
    let nft = sample_nft(2, true, "A,B");
    nftsync_store::nft::save_or_update_nft(&pool, &nft, 1).await.unwrap();

    let stored = nftsync_store::nft::get_nft(&pool, nft.contract, nft.token_id).await.unwrap().unwrap();
    assert_eq!(stored.owner, nft.owner);
    assert_eq!(stored.confidence, 2);
    assert!(stored.confirmed);
    assert_eq!(stored.source_nodes, "A,B");
    assert_eq!(stored.items.len(), 1);
    assert_eq!(stored.items[0].trait_type, "color");
    Ok(())
}

/// Scenario 2: one of three pool members missed the event.
#[sqlx::test]
async fn partial_observation_is_not_confirmed(pool: PgPool) -> sqlx::Result<()> {
    let nft = sample_nft(2, false, "A,B");
    nftsync_store::nft::save_or_update_nft(&pool, &nft, 1).await.unwrap();

    let stored = nftsync_store::nft::get_nft(&pool, nft.contract, nft.token_id).await.unwrap().unwrap();
    assert_eq!(stored.confidence, 2);
    assert!(!stored.confirmed);
    Ok(())
}

/// Scenario 3: replaying the same mint a second time is a no-op on the item
/// set (still exactly one item, not duplicated).
#[sqlx::test]
async fn mint_reapplication_does_not_duplicate_items(pool: PgPool) -> sqlx::Result<()> {
    let nft = sample_nft(2, true, "A,B");
    nftsync_store::nft::save_or_update_nft(&pool, &nft, 1).await.unwrap();
    nftsync_store::nft::save_or_update_nft(&pool, &nft, 2).await.unwrap();

    let stored = nftsync_store::nft::get_nft(&pool, nft.contract, nft.token_id).await.unwrap().unwrap();
    assert_eq!(stored.items.len(), 1);
    Ok(())
}

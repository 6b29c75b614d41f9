use alloy::rpc::types::Log;
use alloy_primitives::B256;
use nftsync_types::{OrderCancelledEvent, OrderCreatedEvent, OrderEventKind, OrderFilledEvent, OrderType};

use crate::{
    amount::u256_to_decimal,
    error::DecodeError,
    topics::{OrderCancelled, OrderCreated, OrderFilled}
};

/// Dispatches a raw order-contract log to its decoder by topic0. Returns
/// `Ok(None)` for any log whose topic0 isn't one of the three order events —
/// the order contract may emit other events this sync engine doesn't track.
///
/// `block_time` is the timestamp of `log`'s block; logs carry no timestamp of
/// their own; callers resolve it once per block via the RPC pool and pass it
/// in here rather than making this crate depend on the pool.
pub fn decode_order(log: &Log, block_time: i64) -> Result<Option<OrderEventKind>, DecodeError> {
    let Some(topic0) = log.topics().first().copied() else {
        return Ok(None);
    };

    if topic0 == OrderCreated::SIGNATURE_HASH {
        return decode_created(log, block_time).map(|e| Some(OrderEventKind::Created(e)));
    }
    if topic0 == OrderCancelled::SIGNATURE_HASH {
        return decode_cancelled(log, block_time).map(|e| Some(OrderEventKind::Cancelled(e)));
    }
    if topic0 == OrderFilled::SIGNATURE_HASH {
        return decode_filled(log, block_time).map(|e| Some(OrderEventKind::Filled(e)));
    }

    Ok(None)
}

fn decode_created(log: &Log, block_time: i64) -> Result<OrderCreatedEvent, DecodeError> {
    let decoded = OrderCreated::decode_log(&log.inner, true)?;

    let token_id: u128 = decoded
        .tokenId
        .try_into()
        .map_err(|_| DecodeError::TokenIdOverflow(decoded.tokenId))?;

    Ok(OrderCreatedEvent {
        order_id: B256::from(decoded.orderId),
        seller: decoded.seller,
        nft_token: decoded.nftToken,
        token_id,
        price: u256_to_decimal(decoded.price)?,
        fee: u256_to_decimal(decoded.fee)?,
        order_type: OrderType::from_flags(decoded.isBid, decoded.isCollectionBid),
        tx_hash: log.transaction_hash.unwrap_or_default(),
        block_number: log.block_number.unwrap_or_default(),
        block_time
    })
}

fn decode_cancelled(log: &Log, block_time: i64) -> Result<OrderCancelledEvent, DecodeError> {
    let decoded = OrderCancelled::decode_log(&log.inner, true)?;

    Ok(OrderCancelledEvent {
        order_id: B256::from(decoded.orderId),
        canceller: decoded.canceller,
        tx_hash: log.transaction_hash.unwrap_or_default(),
        block_number: log.block_number.unwrap_or_default(),
        block_time
    })
}

fn decode_filled(log: &Log, block_time: i64) -> Result<OrderFilledEvent, DecodeError> {
    let decoded = OrderFilled::decode_log(&log.inner, true)?;

    let token_id: u128 = decoded
        .tokenId
        .try_into()
        .map_err(|_| DecodeError::TokenIdOverflow(decoded.tokenId))?;

    Ok(OrderFilledEvent {
        seller_order_id: B256::from(decoded.sellerOrderId),
        buyer_order_id: B256::from(decoded.buyerOrderId),
        seller: decoded.seller,
        buyer: decoded.buyer,
        token_id,
        price: u256_to_decimal(decoded.price)?,
        fee: u256_to_decimal(decoded.fee)?,
        tx_hash: log.transaction_hash.unwrap_or_default(),
        block_number: log.block_number.unwrap_or_default(),
        block_time
    })
}

#[cfg(test)]
mod tests {
    use alloy::rpc::types::Log as RpcLog;
    use alloy_primitives::{address, LogData, U256};
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn decodes_an_order_created_event() {
        let order_id = B256::repeat_byte(0x11);
        let seller = address!("0000000000000000000000000000000000000a");
        let nft_token = address!("0000000000000000000000000000000000000b");

        let event = OrderCreated { orderId: order_id.into(), seller, nftToken: nft_token, tokenId: U256::from(7u64), price: U256::from(1_000u64), fee: U256::from(25u64), isBid: false, isCollectionBid: false };
        let data = event.encode_log_data();

        let mut log = RpcLog::default();
        log.inner.data = LogData::new_unchecked(data.topics().to_vec(), data.data);
        log.block_number = Some(10);

        let decoded = decode_order(&log, 1_700_000_000).unwrap().unwrap();
        match decoded {
            OrderEventKind::Created(created) => {
                assert_eq!(created.order_id, order_id);
                assert_eq!(created.seller, seller);
                assert_eq!(created.token_id, 7);
                assert_eq!(created.price, Decimal::from(1_000u64));
                assert_eq!(created.order_type, OrderType::Listing);
                assert_eq!(created.block_time, 1_700_000_000);
            }
            other => panic!("expected Created, got {other:?}")
        }
    }

    #[test]
    fn unknown_topic_is_not_an_error() {
        let mut log = RpcLog::default();
        log.inner.data = LogData::new_unchecked(vec![B256::repeat_byte(0xff)], Default::default());

        assert!(decode_order(&log, 0).unwrap().is_none());
    }
}

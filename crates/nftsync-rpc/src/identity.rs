use alloy::rpc::types::Log;
use alloy_primitives::{Address, B256};

/// The deterministic key the cross-node fetcher merges raw logs on. Two
/// pool members that observed the "same" chain event produce logs that hash
/// to the same key, independent of which member's copy the merge keeps.
pub fn identity_key(contract: Address, log: &Log) -> String {
    match transfer_fields(log) {
        Some((_from, to, token_id)) => {
            let block_number = log.block_number.unwrap_or_default();
            format!("{contract:?}|{token_id:#x}|{to:?}|{block_number}")
        }
        None => {
            let tx_hash = log.transaction_hash.unwrap_or(B256::ZERO);
            let log_index = log.log_index.unwrap_or_default();
            format!("{tx_hash:?}|{log_index}")
        }
    }
}

/// Whether `log` looks like an ERC-721 `Transfer`: exactly 4 topics
/// (signature + from + to + tokenId). Transfer identity keys use the
/// decoded from/to/tokenId; everything else (order events) keys on
/// `tx_hash|log_index`, which is unique across the whole chain.
fn transfer_fields(log: &Log) -> Option<(Address, Address, B256)> {
    let topics = log.topics();
    if topics.len() != 4 {
        return None;
    }
    let from = Address::from_word(topics[1]);
    let to = Address::from_word(topics[2]);
    let token_id = topics[3];
    Some((from, to, token_id))
}

#[cfg(test)]
mod tests {
    use alloy::rpc::types::Log as RpcLog;
    use alloy_primitives::{address, b256, LogData};

    use super::*;

    fn transfer_log(from: Address, to: Address, token_id: B256, block_number: u64) -> Log {
        let topics =
            vec![b256!("ddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef"), from.into_word(), to.into_word(), token_id];
        let mut log = RpcLog::default();
        log.inner.data = LogData::new_unchecked(topics, Default::default());
        log.block_number = Some(block_number);
        log
    }

    #[test]
    fn transfer_logs_key_on_contract_token_to_block() {
        let contract = address!("00000000000000000000000000000000000001");
        let to = address!("00000000000000000000000000000000000002");
        let from = Address::ZERO;
        let token_id = B256::from(alloy_primitives::U256::from(42u64));
        let log = transfer_log(from, to, token_id, 100);

        let key = identity_key(contract, &log);
        assert!(key.contains("100"));
        assert!(key.to_lowercase().contains(&format!("{to:?}").to_lowercase()));
    }

    #[test]
    fn order_logs_key_on_tx_hash_and_log_index() {
        let contract = address!("00000000000000000000000000000000000001");
        let mut log = RpcLog::default();
        log.inner.data = LogData::new_unchecked(vec![b256!("0000000000000000000000000000000000000000000000000000000000000001")], Default::default());
        log.transaction_hash = Some(b256!("0000000000000000000000000000000000000000000000000000000000000002"));
        log.log_index = Some(3);

        let key = identity_key(contract, &log);
        assert_eq!(
            key,
            format!(
                "{:?}|3",
                b256!("0000000000000000000000000000000000000000000000000000000000000002")
            )
        );
    }
}

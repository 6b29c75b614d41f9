use alloy::rpc::types::Log;
use alloy_primitives::Address;
use nftsync_types::MintEvent;

use crate::{error::DecodeError, topics::Transfer};

/// `Transfer`'s topic0, computed at compile time by the `sol!` macro.
pub fn topic0() -> alloy_primitives::B256 {
    Transfer::SIGNATURE_HASH
}

/// Decodes a raw log as an ERC-721 mint. Returns `Ok(None)` (not an error)
/// when the log isn't a 4-topic `Transfer` or its `from` isn't the zero
/// address — both are "this log isn't a mint", not a decode failure (§4.4:
/// "a log with fewer than 4 topics is discarded").
pub fn decode_mint(contract: Address, log: &Log) -> Result<Option<MintEvent>, DecodeError> {
    if log.topics().len() != 4 {
        return Ok(None);
    }

    let decoded = Transfer::decode_log(&log.inner, true)?;
    if decoded.from != Address::ZERO {
        return Ok(None);
    }

    let token_id: u128 = decoded
        .tokenId
        .try_into()
        .map_err(|_| DecodeError::TokenIdOverflow(decoded.tokenId))?;

    Ok(Some(MintEvent {
        contract,
        to: decoded.to,
        token_id,
        block_number: log.block_number.unwrap_or_default()
    }))
}

#[cfg(test)]
mod tests {
    use alloy::rpc::types::Log as RpcLog;
    use alloy_primitives::{address, LogData, U256};

    use super::*;

    fn transfer_log(from: Address, to: Address, token_id: U256) -> Log {
        let topics = vec![Transfer::SIGNATURE_HASH, from.into_word(), to.into_word(), token_id.into()];
        let mut log = RpcLog::default();
        log.inner.data = LogData::new_unchecked(topics, Default::default());
        log.block_number = Some(100);
        log
    }

    #[test]
    fn decodes_a_mint() {
        let contract = address!("0000000000000000000000000000000000000a");
        let to = address!("0000000000000000000000000000000000000b");
        let log = transfer_log(Address::ZERO, to, U256::from(42u64));

        let event = decode_mint(contract, &log).unwrap().unwrap();
        assert_eq!(event.contract, contract);
        assert_eq!(event.to, to);
        assert_eq!(event.token_id, 42);
        assert_eq!(event.block_number, 100);
    }

    #[test]
    fn non_mint_transfer_is_not_an_event() {
        let contract = address!("0000000000000000000000000000000000000a");
        let from = address!("0000000000000000000000000000000000000c");
        let to = address!("0000000000000000000000000000000000000b");
        let log = transfer_log(from, to, U256::from(1u64));

        assert!(decode_mint(contract, &log).unwrap().is_none());
    }

    #[test]
    fn short_topic_log_is_discarded_not_an_error() {
        let contract = address!("0000000000000000000000000000000000000a");
        let mut log = RpcLog::default();
        log.inner.data = LogData::new_unchecked(vec![Transfer::SIGNATURE_HASH], Default::default());

        assert!(decode_mint(contract, &log).unwrap().is_none());
    }
}

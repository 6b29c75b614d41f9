use std::str::FromStr;

use alloy_primitives::U256;
use rust_decimal::Decimal;

use crate::error::DecodeError;

/// Converts an on-chain `uint256` into a `Decimal` by round-tripping through
/// its base-10 string form, so callers never truncate through a float.
pub fn u256_to_decimal(value: U256) -> Result<Decimal, DecodeError> {
    Decimal::from_str(&value.to_string()).map_err(|_| DecodeError::AmountOverflow(value))
}

use std::str::FromStr;

use alloy_primitives::{Address, B256};
use rust_decimal::Decimal;

use crate::error::StoreError;

pub fn address_to_text(address: Address) -> String {
    address.to_string()
}

pub fn text_to_address(text: &str) -> Result<Address, StoreError> {
    Address::from_str(text).map_err(|_| StoreError::ValueOutOfRange(text.to_owned()))
}

pub fn b256_to_text(value: B256) -> String {
    value.to_string()
}

pub fn text_to_b256(text: &str) -> Result<B256, StoreError> {
    B256::from_str(text).map_err(|_| StoreError::ValueOutOfRange(text.to_owned()))
}

/// `token_id` is a `u128` in every in-process type, but the `NUMERIC` column
/// round-trips through `rust_decimal::Decimal` under sqlx's `rust_decimal`
/// feature; both conversions go through the base-10 string form.
pub fn token_id_to_decimal(token_id: u128) -> Decimal {
    Decimal::from_str(&token_id.to_string()).expect("u128 always fits a Decimal")
}

pub fn decimal_to_token_id(value: Decimal) -> Result<u128, StoreError> {
    value.to_string().parse().map_err(|_| StoreError::ValueOutOfRange(value.to_string()))
}

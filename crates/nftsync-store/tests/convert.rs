use alloy_primitives::{address, B256};
use nftsync_store::convert::{address_to_text, b256_to_text, decimal_to_token_id, text_to_address, text_to_b256, token_id_to_decimal};

#[test]
fn address_round_trips_through_text() {
    let address = address!("000000000000000000000000000000000000aa");
    let text = address_to_text(address);
    assert_eq!(text_to_address(&text).unwrap(), address);
}

#[test]
fn b256_round_trips_through_text() {
    let value = B256::repeat_byte(0x11);
    let text = b256_to_text(value);
    assert_eq!(text_to_b256(&text).unwrap(), value);
}

#[test]
fn token_id_round_trips_through_decimal() {
    let token_id = 340_282_366_920_938_463_463u128;
    let decimal = token_id_to_decimal(token_id);
    assert_eq!(decimal_to_token_id(decimal).unwrap(), token_id);
}

#[test]
fn invalid_text_is_rejected() {
    assert!(text_to_address("not-an-address").is_err());
    assert!(text_to_b256("not-a-hash").is_err());
}

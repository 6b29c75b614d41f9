#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("failed to abi-decode log: {0}")]
    Abi(#[from] alloy_sol_types::Error),

    #[error("token id {0} does not fit in a u128")]
    TokenIdOverflow(alloy_primitives::U256),

    #[error("price/fee value {0} does not fit in a decimal")]
    AmountOverflow(alloy_primitives::U256)
}

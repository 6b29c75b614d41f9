//! Pure log decoders (§4.4): turn raw RPC logs into the typed mint and order
//! events the pipeline persists. No RPC or store dependency — callers supply
//! anything a raw log can't carry itself, such as a resolved block timestamp.

pub mod amount;
pub mod error;
pub mod mint;
pub mod order;
pub mod topics;

pub use error::DecodeError;
pub use mint::decode_mint;
pub use order::decode_order;

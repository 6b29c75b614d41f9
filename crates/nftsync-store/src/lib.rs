//! The relational persistence layer (§6): connection pool and migrations,
//! plus one module per table family. Every write here is the transactional,
//! idempotent boundary the pipelines rely on to make re-processing safe.

pub mod convert;
pub mod error;
pub mod floor_price;
pub mod nft;
pub mod order;
pub mod pool;
pub mod watermark;

pub use error::StoreError;
pub use pool::connect;

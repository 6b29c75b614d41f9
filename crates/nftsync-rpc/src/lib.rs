//! The RPC client pool (§4.1) and the cross-node fetcher that cross-validates
//! log observations across every pool member (§4.2).

pub mod error;
pub mod fetcher;
pub mod identity;
pub mod pool;

pub use error::PoolError;
pub use fetcher::{CrossNodeFetcher, CrossValidatedLog};
pub use pool::{BlockHeader, Node, NodePool};

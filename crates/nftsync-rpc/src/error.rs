use alloy::transports::{RpcError, TransportErrorKind};

/// Failure modes a caller of the RPC pool or the cross-node fetcher needs to
/// distinguish: a single endpoint's transport error vs. every endpoint
/// having failed for the same call.
#[derive(Debug, thiserror::Error)]
pub enum PoolError {
    #[error("failed to dial rpc node {name:?} at {url}: {source}")]
    Dial {
        name:   String,
        url:    String,
        #[source]
        source: RpcError<TransportErrorKind>
    },

    #[error("rpc node {name:?} call failed: {source}")]
    Transport {
        name:   String,
        #[source]
        source: RpcError<TransportErrorKind>
    },

    #[error("all {pool_size} rpc nodes failed for {operation}")]
    AllNodesFailed { operation: &'static str, pool_size: usize },

    #[error("no rpc nodes configured")]
    EmptyPool
}

use alloy::{
    network::Ethereum,
    providers::{Provider, ProviderBuilder, RootProvider},
    rpc::types::{Filter, Log},
    sol,
    transports::http::{Client, Http}
};
use alloy_primitives::{Address, U256};
use nftsync_types::config::NodeConfig;

use crate::error::PoolError;

type HttpProvider = RootProvider<Http<Client>, Ethereum>;

sol! {
    #[sol(rpc)]
    interface IErc721Metadata {
        function tokenURI(uint256 tokenId) external view returns (string);
    }
}

/// Block header fields the sync engine needs: the block's timestamp, used
/// as `block_time` on decoded order events.
#[derive(Debug, Clone, Copy)]
pub struct BlockHeader {
    pub number:    u64,
    pub timestamp: u64
}

/// A single dialed connection to one redundant RPC endpoint.
pub struct Node {
    pub name: String,
    pub url:  String,
    provider: HttpProvider
}

impl Node {
    /// Dials `config.url` once. A dial failure here aborts process startup
    /// per §4.1 — the pool itself never retries.
    pub fn dial(config: &NodeConfig) -> Result<Self, PoolError> {
        let url = config.url.parse().map_err(|_| PoolError::Dial {
            name:   config.name.clone(),
            url:    config.url.clone(),
            source: alloy::transports::TransportErrorKind::custom_str("invalid rpc url")
        })?;
        let provider = ProviderBuilder::new().on_http(url);
        Ok(Self { name: config.name.clone(), url: config.url.clone(), provider })
    }

    pub async fn head(&self) -> Result<u64, PoolError> {
        self.provider
            .get_block_number()
            .await
            .map_err(|source| PoolError::Transport { name: self.name.clone(), source })
    }

    pub async fn block_header(&self, number: u64) -> Result<Option<BlockHeader>, PoolError> {
        let block = self
            .provider
            .get_block_by_number(number.into(), false)
            .await
            .map_err(|source| PoolError::Transport { name: self.name.clone(), source })?;
        Ok(block.map(|b| BlockHeader { number: b.header.number, timestamp: b.header.timestamp }))
    }

    pub async fn logs(
        &self,
        contract: Address,
        start_block: u64,
        end_block: u64,
        topics: &[alloy_primitives::B256]
    ) -> Result<Vec<Log>, PoolError> {
        let mut filter = Filter::new().address(contract).from_block(start_block).to_block(end_block);
        if !topics.is_empty() {
            filter = filter.event_signature(topics.to_vec());
        }
        self.provider
            .get_logs(&filter)
            .await
            .map_err(|source| PoolError::Transport { name: self.name.clone(), source })
    }

    pub async fn token_uri(&self, contract: Address, token_id: u128) -> Result<String, PoolError> {
        let instance = IErc721Metadata::new(contract, &self.provider);
        let result = instance
            .tokenURI(U256::from(token_id))
            .call()
            .await
            .map_err(|source| PoolError::Transport {
                name:   self.name.clone(),
                source: alloy::transports::TransportErrorKind::custom_str(&source.to_string())
            })?;
        Ok(result._0)
    }
}

/// The ordered set of redundant RPC endpoints. The first member dialed is
/// the pool's primary; fallbacks are tried in configured order. Immutable
/// after construction.
pub struct NodePool {
    nodes: Vec<Node>
}

impl NodePool {
    /// Dials every configured endpoint, in order. Aborts on the first dial
    /// failure (startup is fatal per §7).
    pub fn dial_all(configs: &[NodeConfig]) -> Result<Self, PoolError> {
        if configs.is_empty() {
            return Err(PoolError::EmptyPool);
        }
        let nodes = configs.iter().map(Node::dial).collect::<Result<Vec<_>, _>>()?;
        Ok(Self { nodes })
    }

    pub fn primary(&self) -> &Node {
        &self.nodes[0]
    }

    pub fn fallbacks(&self) -> &[Node] {
        &self.nodes[1..]
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The minimum head across every reachable pool member, used by the
    /// realtime mint driver so it never queries a member that lags behind
    /// the slowest one (§4.3). Members that fail to report a head are
    /// excluded rather than failing the whole call.
    pub async fn min_head(&self) -> Option<u64> {
        let mut min = None;
        for node in &self.nodes {
            match node.head().await {
                Ok(head) => min = Some(min.map_or(head, |m: u64| m.min(head))),
                Err(err) => {
                    tracing::warn!(node = %node.name, error = %err, "failed to fetch head block");
                }
            }
        }
        min
    }

    /// Runs `primary().op()`, falling back to the next member in order on
    /// error, until one succeeds or every member has failed (§4.3's
    /// polling-order driver policy).
    pub async fn with_fallback<T, F, Fut>(&self, operation: &'static str, mut op: F) -> Result<T, PoolError>
    where
        F: FnMut(&Node) -> Fut,
        Fut: std::future::Future<Output = Result<T, PoolError>>
    {
        for node in &self.nodes {
            match op(node).await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    tracing::warn!(node = %node.name, error = %err, operation, "rpc node failed, trying next");
                }
            }
        }
        Err(PoolError::AllNodesFailed { operation, pool_size: self.nodes.len() })
    }
}

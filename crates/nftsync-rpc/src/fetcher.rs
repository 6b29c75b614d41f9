use std::collections::BTreeMap;

use alloy::rpc::types::Log;
use alloy_primitives::{Address, B256};
use futures::future::join_all;

use crate::{identity::identity_key, pool::NodePool};

/// One raw log merged across every pool member that produced it, annotated
/// with how many members agreed and which ones they were.
#[derive(Debug, Clone)]
pub struct CrossValidatedLog {
    pub log:          Log,
    pub confidence:   usize,
    pub source_nodes: Vec<String>
}

impl CrossValidatedLog {
    pub fn confirmed(&self, pool_size: usize) -> bool {
        self.confidence == pool_size
    }
}

/// Fans a `logs` query out to every pool member in parallel and merges the
/// results keyed by event identity (§4.2). Per-member failures are counted
/// but never fail the fetch as a whole — only if *every* member fails does
/// the caller see an empty result, which the pipelines treat as "skip this
/// batch, retry next tick".
pub struct CrossNodeFetcher<'a> {
    pool: &'a NodePool
}

impl<'a> CrossNodeFetcher<'a> {
    pub fn new(pool: &'a NodePool) -> Self {
        Self { pool }
    }

    pub async fn fetch(
        &self,
        contract: Address,
        start_block: u64,
        end_block: u64,
        topics: &[B256]
    ) -> Vec<CrossValidatedLog> {
        let calls = self
            .pool
            .nodes()
            .iter()
            .map(|node| async move { (node.name.as_str(), node.logs(contract, start_block, end_block, topics).await) });

        let results = join_all(calls).await;

        // BTreeMap gives a deterministic iteration order independent of
        // which member's future resolved first, matching the
        // order-independence law in §5.
        let mut merged: BTreeMap<String, CrossValidatedLog> = BTreeMap::new();
        for (node_name, result) in results {
            let logs = match result {
                Ok(logs) => logs,
                Err(err) => {
                    tracing::warn!(node = node_name, error = %err, "log fetch failed on this node, dropping its contribution");
                    continue;
                }
            };
            for log in logs {
                let key = identity_key(contract, &log);
                merged
                    .entry(key)
                    .and_modify(|existing| {
                        existing.confidence += 1;
                        if let Err(pos) = existing.source_nodes.binary_search(&node_name.to_string()) {
                            existing.source_nodes.insert(pos, node_name.to_string());
                        }
                    })
                    .or_insert_with(|| CrossValidatedLog {
                        log:          log.clone(),
                        confidence:   1,
                        source_nodes: vec![node_name.to_string()]
                    });
            }
        }

        merged.into_values().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_nodes_stay_sorted_and_deduplicated() {
        let mut nodes = vec!["b".to_string()];
        let insert = |nodes: &mut Vec<String>, name: &str| {
            if let Err(pos) = nodes.binary_search(&name.to_string()) {
                nodes.insert(pos, name.to_string());
            }
        };
        insert(&mut nodes, "a");
        insert(&mut nodes, "b");
        insert(&mut nodes, "c");
        assert_eq!(nodes, vec!["a".to_string(), "b".to_string(), "c".to_string()]);
    }
}

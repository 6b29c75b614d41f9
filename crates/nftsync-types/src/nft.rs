use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

/// A single attribute of an [`Nft`]'s metadata, e.g. `{"trait_type": "color",
/// "value": "red"}`. Owned exclusively by its parent NFT: the full set is
/// replaced atomically whenever the NFT record is re-applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name:       String,
    pub trait_type: String,
    pub value:      String
}

/// An ERC-721 token tracked by the sync engine, keyed by `(contract,
/// token_id)`. Created on first mint-event application; owner and metadata
/// are mutated only by subsequent confirmed events for the same key, and the
/// record is never deleted by the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nft {
    pub contract:     Address,
    pub token_id:     u128,
    pub owner:        Address,
    pub token_uri:    String,
    /// Raw JSON blob of the metadata returned by the token URI, stored
    /// verbatim so downstream consumers can re-derive fields we don't model.
    pub metadata:     String,
    pub items:        Vec<Item>,
    /// Number of RPC endpoints that independently observed this mint.
    pub confidence:   usize,
    /// True iff `confidence == pool_size` at the time this record was built.
    pub confirmed:    bool,
    /// Comma-joined, lexicographically sorted names of the nodes that
    /// observed the mint (e.g. `"a,b"`).
    pub source_nodes: String
}

impl Nft {
    /// Metadata returned by an ERC-721 token URI, conforming to the de facto
    /// OpenSea-style schema: `{name, description, image, attributes}`.
    pub fn items_from_metadata(name: &str, attributes: &[MetadataAttribute]) -> Vec<Item> {
        attributes
            .iter()
            .map(|attr| Item {
                name:       name.to_string(),
                trait_type: attr.trait_type.clone(),
                value:      attr.value.clone()
            })
            .collect()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MetadataAttribute {
    pub trait_type: String,
    pub value:      String
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenMetadata {
    pub name:        String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image:       String,
    #[serde(default)]
    pub attributes:  Vec<MetadataAttribute>
}

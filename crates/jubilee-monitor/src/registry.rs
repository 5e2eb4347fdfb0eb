//! Registered chains.

use std::collections::BTreeMap;

use jubilee_core::JubileeEvent;
use serde::{Deserialize, Serialize};

/// The chains a full Jubilee system watches, Layer 3s last.
pub const DEFAULT_CHAINS: [&str; 24] = [
    "ethereum", "bitcoin", "solana", "arbitrum", "optimism",
    "polygon", "base", "zk_sync", "scroll", "linea",
    "mantle", "blast", "mode", "taiko", "zora",
    "l3_1", "l3_2", "l3_3", "l3_4", "l3_5", "l3_6", "l3_7", "l3_8", "l3_9",
];

/// A watched chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainInfo {
    pub name: String,
    pub rpc_url: String,
    pub contract_address: String,
    /// Last height the monitor counted up to
    pub current_block: u64,
    /// Jubilee events seen on this chain, oldest first
    pub jubilee_blocks: Vec<JubileeEvent>,
}

impl ChainInfo {
    pub fn new(name: impl Into<String>, rpc_url: impl Into<String>, contract_address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rpc_url: rpc_url.into(),
            contract_address: contract_address.into(),
            current_block: 0,
            jubilee_blocks: Vec::new(),
        }
    }

    /// Chain with placeholder endpoint and contract derived from its name.
    pub fn with_default_endpoints(name: &str) -> Self {
        Self::new(
            name,
            format!("https://rpc.{}.com", name),
            format!("0x{}Address", name),
        )
    }
}

/// Chains keyed by name.
#[derive(Debug, Default)]
pub struct ChainRegistry {
    chains: BTreeMap<String, ChainInfo>,
}

impl ChainRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a chain. Re-registering a name replaces the old entry.
    pub fn add_chain(&mut self, info: ChainInfo) -> &ChainInfo {
        let name = info.name.clone();
        self.chains.insert(name.clone(), info);
        &self.chains[&name]
    }

    pub fn get(&self, name: &str) -> Option<&ChainInfo> {
        self.chains.get(name)
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut ChainInfo> {
        self.chains.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.chains.contains_key(name)
    }

    /// Chain names in sorted order.
    pub fn names(&self) -> Vec<String> {
        self.chains.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChainInfo> {
        self.chains.values()
    }

    pub fn len(&self) -> usize {
        self.chains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_endpoints() {
        let info = ChainInfo::with_default_endpoints("ethereum");
        assert_eq!(info.rpc_url, "https://rpc.ethereum.com");
        assert_eq!(info.contract_address, "0xethereumAddress");
        assert_eq!(info.current_block, 0);
        assert!(info.jubilee_blocks.is_empty());
    }

    #[test]
    fn add_replaces() {
        let mut registry = ChainRegistry::new();
        let mut first = ChainInfo::with_default_endpoints("base");
        first.current_block = 40;
        registry.add_chain(first);
        registry.add_chain(ChainInfo::with_default_endpoints("base"));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("base").unwrap().current_block, 0);
    }

    #[test]
    fn default_chain_names_unique() {
        let mut registry = ChainRegistry::new();
        for name in DEFAULT_CHAINS {
            registry.add_chain(ChainInfo::with_default_endpoints(name));
        }
        assert_eq!(registry.len(), DEFAULT_CHAINS.len());
        assert!(registry.contains("l3_9"));
        assert!(!registry.contains("dogecoin"));
    }
}

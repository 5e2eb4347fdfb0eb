//! Counting blocks across registered chains.

use std::collections::BTreeMap;

use jubilee_core::{JubileeCounter, JubileeEvent, JubileePolicy};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::JubileeConfig;
use crate::error::{Error, Result};
use crate::registry::{ChainInfo, ChainRegistry};
use crate::source::BlockSource;

/// What one monitoring pass saw on a chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainReport {
    pub chain: String,
    pub current_block: u64,
    /// Blocks counted during this pass
    pub blocks_counted: u64,
    /// Jubilee events fired during this pass
    pub new_jubilees: Vec<JubileeEvent>,
    /// Jubilee events seen on this chain so far
    pub total_jubilees: usize,
}

/// Totals across every chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalStatus {
    pub chains: usize,
    pub total_jubilee_blocks: usize,
    /// Events in the counter's log, including blocks counted outside a monitoring pass
    pub tracked_events: usize,
}

/// Registry plus the counter that owns all Jubilee state.
#[derive(Debug, Default)]
pub struct Monitor {
    registry: ChainRegistry,
    counter: JubileeCounter,
}

impl Monitor {
    pub fn new(policy: JubileePolicy) -> Self {
        Self {
            registry: ChainRegistry::new(),
            counter: JubileeCounter::with_policy(policy),
        }
    }

    /// Monitor with every configured chain registered.
    pub fn from_config(config: &JubileeConfig) -> Self {
        let mut monitor = Self::new(config.policy);
        for name in &config.chains {
            monitor.add_chain(ChainInfo::with_default_endpoints(name));
        }
        info!(chains = monitor.registry.len(), threshold = config.policy.reset_threshold, "monitor ready");
        monitor
    }

    pub fn add_chain(&mut self, info: ChainInfo) -> &ChainInfo {
        debug!(chain = %info.name, rpc = %info.rpc_url, "chain registered");
        self.registry.add_chain(info)
    }

    pub fn registry(&self) -> &ChainRegistry {
        &self.registry
    }

    pub fn counter(&self) -> &JubileeCounter {
        &self.counter
    }

    /// Count a single block on a registered chain.
    pub fn count_block(&mut self, chain: &str) -> Result<jubilee_core::JubileeResult> {
        let info = self
            .registry
            .get_mut(chain)
            .ok_or_else(|| Error::UnknownChain(chain.to_string()))?;
        let result = self.counter.count_block(chain)?;
        info.current_block = info.current_block.saturating_add(1);
        if let Some(event) = &result.event {
            info.jubilee_blocks.push(event.clone());
        }
        Ok(result)
    }

    /// Count every block between the chain's last seen height and the height
    /// `source` reports now.
    ///
    /// A reported height below the last seen one counts nothing.
    pub fn monitor_chain<S: BlockSource + ?Sized>(&mut self, chain: &str, source: &mut S) -> Result<ChainReport> {
        let info = self
            .registry
            .get_mut(chain)
            .ok_or_else(|| Error::UnknownChain(chain.to_string()))?;
        let height = source.current_height(info)?;
        let previous = info.current_block;

        if height < previous {
            warn!(chain, previous, height, "reported height went backwards, ignoring");
        }

        let mut new_jubilees = Vec::new();
        let mut counted = 0u64;
        for _ in previous..height {
            let result = self.counter.count_block(chain)?;
            counted += 1;
            if let Some(event) = result.event {
                info!(chain, term = event.fibonacci_number(), "jubilee block created");
                info.jubilee_blocks.push(event.clone());
                new_jubilees.push(event);
            }
        }
        info.current_block = info.current_block.max(height);

        Ok(ChainReport {
            chain: chain.to_string(),
            current_block: info.current_block,
            blocks_counted: counted,
            new_jubilees,
            total_jubilees: info.jubilee_blocks.len(),
        })
    }

    /// One monitoring pass over every registered chain.
    pub fn monitor_all<S: BlockSource + ?Sized>(&mut self, source: &mut S) -> Result<BTreeMap<String, ChainReport>> {
        let mut reports = BTreeMap::new();
        for name in self.registry.names() {
            let report = self.monitor_chain(&name, source)?;
            reports.insert(name, report);
        }
        Ok(reports)
    }

    pub fn global_status(&self) -> GlobalStatus {
        GlobalStatus {
            chains: self.registry.len(),
            total_jubilee_blocks: self.registry.iter().map(|c| c.jubilee_blocks.len()).sum(),
            tracked_events: self.counter.jubilee_count(),
        }
    }
}

//! Per-chain Jubilee counters.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::event::{now_millis, EventId, JubileeEvent, JubileeResult};
use crate::policy::JubileePolicy;
use crate::sequence::is_fibonacci_number;

/// Counter state for one chain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct ChainCounter {
    count: u64,
    cycle: u64,
}

/// Block counters for every chain plus the Jubilee event log.
///
/// The log is append-only. Each event keeps the cycle it fired in, so a chain
/// that hits term 5 in two different cycles records two distinct events.
#[derive(Debug, Default)]
pub struct JubileeCounter {
    policy: JubileePolicy,
    chains: HashMap<String, ChainCounter>,
    events: Vec<JubileeEvent>,
    /// (chain, term) -> index of the latest matching event.
    latest: HashMap<(String, u64), usize>,
    by_id: HashMap<EventId, usize>,
}

impl JubileeCounter {
    /// Create a counter with the default policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a counter with a custom policy.
    pub fn with_policy(policy: JubileePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn policy(&self) -> JubileePolicy {
        self.policy
    }

    /// Count one block on `chain_id` (with current timestamp).
    pub fn count_block(&mut self, chain_id: &str) -> Result<JubileeResult> {
        self.count_block_at(chain_id, now_millis())
    }

    /// Count one block on `chain_id` with an explicit timestamp.
    ///
    /// Increments the chain's counter and records a Jubilee event when the new
    /// count is a term of the fixed sequence. A term at or above the policy
    /// threshold resets the counter to 0 and starts a new cycle.
    pub fn count_block_at(&mut self, chain_id: &str, timestamp: u64) -> Result<JubileeResult> {
        if chain_id.trim().is_empty() {
            return Err(Error::EmptyChainId);
        }

        let state = self.chains.entry(chain_id.to_string()).or_default();
        let count = state
            .count
            .checked_add(1)
            .ok_or_else(|| Error::CounterOverflow {
                chain: chain_id.to_string(),
            })?;
        state.count = count;
        debug!(chain = chain_id, count, "block counted");

        if !is_fibonacci_number(count) {
            return Ok(JubileeResult::plain(count));
        }

        let event = JubileeEvent::new(chain_id, count, state.cycle, timestamp);
        info!(chain = chain_id, term = count, cycle = state.cycle, "jubilee block");

        if self.policy.should_reset(count) {
            state.count = 0;
            state.cycle += 1;
            info!(chain = chain_id, next_cycle = state.cycle, "counter reset");
        }

        self.record(event.clone());
        Ok(JubileeResult::jubilee(event))
    }

    fn record(&mut self, event: JubileeEvent) {
        let index = self.events.len();
        self.latest
            .insert((event.chain_id().to_string(), event.fibonacci_number()), index);
        self.by_id.insert(event.id(), index);
        self.events.push(event);
    }

    /// Current count for a chain (0 if never seen).
    pub fn count(&self, chain_id: &str) -> u64 {
        self.chains.get(chain_id).map(|c| c.count).unwrap_or(0)
    }

    /// Number of resets a chain has gone through.
    pub fn cycle(&self, chain_id: &str) -> u64 {
        self.chains.get(chain_id).map(|c| c.cycle).unwrap_or(0)
    }

    /// Reset a chain's counter by hand. Returns the count it held.
    ///
    /// Starts a new cycle if the chain had counted anything.
    pub fn reset_chain(&mut self, chain_id: &str) -> u64 {
        match self.chains.get_mut(chain_id) {
            Some(state) if state.count > 0 => {
                let previous = state.count;
                state.count = 0;
                state.cycle += 1;
                info!(chain = chain_id, previous, "counter reset by hand");
                previous
            }
            _ => 0,
        }
    }

    /// All events in the order they fired.
    pub fn events(&self) -> &[JubileeEvent] {
        &self.events
    }

    /// Events for one chain, oldest first.
    pub fn events_for<'a>(&'a self, chain_id: &'a str) -> impl Iterator<Item = &'a JubileeEvent> {
        self.events.iter().filter(move |e| e.chain_id() == chain_id)
    }

    /// The most recent event for `chain_id` at `term`.
    pub fn latest_event(&self, chain_id: &str, term: u64) -> Option<&JubileeEvent> {
        self.latest
            .get(&(chain_id.to_string(), term))
            .map(|&i| &self.events[i])
    }

    /// Look up an event by identifier.
    pub fn event(&self, id: &EventId) -> Option<&JubileeEvent> {
        self.by_id.get(id).map(|&i| &self.events[i])
    }

    /// Total number of events recorded.
    pub fn jubilee_count(&self) -> usize {
        self.events.len()
    }

    /// Chains that have counted at least one block.
    pub fn chains(&self) -> impl Iterator<Item = &str> {
        self.chains.keys().map(String::as_str)
    }
}

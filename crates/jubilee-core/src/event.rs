//! Jubilee events and per-block results.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Current Unix time in milliseconds.
pub(crate) fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// A 32-byte event identifier (Blake3 of chain, cycle and term).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventId(pub [u8; 32]);

impl EventId {
    /// Derive the identifier for a Jubilee on `chain_id` at `term` in `cycle`.
    pub fn derive(chain_id: &str, cycle: u64, term: u64) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(chain_id.as_bytes());
        hasher.update(b":");
        hasher.update(&cycle.to_le_bytes());
        hasher.update(&term.to_le_bytes());
        Self(*hasher.finalize().as_bytes())
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}...", &self.to_hex()[..8])
    }
}

/// A Jubilee block. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JubileeEvent {
    chain_id: String,
    fibonacci_number: u64,
    block_number: u64,
    /// Unix timestamp in milliseconds.
    timestamp: u64,
    cycle: u64,
}

impl JubileeEvent {
    pub(crate) fn new(chain_id: &str, fibonacci_number: u64, cycle: u64, timestamp: u64) -> Self {
        Self {
            chain_id: chain_id.to_string(),
            fibonacci_number,
            block_number: fibonacci_number,
            timestamp,
            cycle,
        }
    }

    pub fn chain_id(&self) -> &str {
        &self.chain_id
    }

    /// The matched term.
    pub fn fibonacci_number(&self) -> u64 {
        self.fibonacci_number
    }

    /// Block count at which the event fired (equals the matched term).
    pub fn block_number(&self) -> u64 {
        self.block_number
    }

    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// Number of resets the chain had gone through when this fired.
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    pub fn id(&self) -> EventId {
        EventId::derive(&self.chain_id, self.cycle, self.fibonacci_number)
    }
}

/// Outcome of counting one block.
///
/// Serializes flat: `{"count": 4, "jubilee": false}` or, on a Jubilee, with
/// the event fields alongside.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JubileeResult {
    /// Count reached by this block, before any reset.
    pub count: u64,
    pub jubilee: bool,
    #[serde(flatten)]
    pub event: Option<JubileeEvent>,
}

impl JubileeResult {
    pub(crate) fn plain(count: u64) -> Self {
        Self {
            count,
            jubilee: false,
            event: None,
        }
    }

    pub(crate) fn jubilee(event: JubileeEvent) -> Self {
        Self {
            count: event.block_number,
            jubilee: true,
            event: Some(event),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_number_equals_term() {
        let event = JubileeEvent::new("ethereum", 8, 0, 100);
        assert_eq!(event.block_number(), 8);
        assert_eq!(event.fibonacci_number(), 8);
    }

    #[test]
    fn event_id_distinguishes_cycles() {
        let first = EventId::derive("ethereum", 0, 13);
        let second = EventId::derive("ethereum", 1, 13);
        assert_ne!(first, second);
        assert_eq!(first, EventId::derive("ethereum", 0, 13));
        assert_eq!(first.to_hex().len(), 64);
    }

    #[test]
    fn plain_result_json() {
        let json = serde_json::to_value(JubileeResult::plain(4)).unwrap();
        assert_eq!(json, serde_json::json!({ "count": 4, "jubilee": false }));
    }

    #[test]
    fn jubilee_result_json() {
        let result = JubileeResult::jubilee(JubileeEvent::new("bitcoin", 5, 2, 1_700_000_000_000));
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["count"], 5);
        assert_eq!(json["jubilee"], true);
        assert_eq!(json["chainId"], "bitcoin");
        assert_eq!(json["fibonacciNumber"], 5);
        assert_eq!(json["blockNumber"], 5);
        assert_eq!(json["timestamp"], 1_700_000_000_000u64);
        assert_eq!(json["cycle"], 2);

        let parsed: JubileeResult = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, result);
    }
}

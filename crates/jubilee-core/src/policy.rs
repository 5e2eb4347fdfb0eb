//! Counter reset policy.
//!
//! A chain's counter resets once a Jubilee term at or above the threshold
//! fires. The default of 13 has no derivation; it is kept as a tunable.

use serde::{Deserialize, Serialize};

/// Terms at or above this value reset the counter.
pub const DEFAULT_RESET_THRESHOLD: u64 = 13;

/// Policy applied by a [`JubileeCounter`](crate::JubileeCounter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JubileePolicy {
    /// Smallest matched term that resets the counter.
    pub reset_threshold: u64,
}

impl Default for JubileePolicy {
    fn default() -> Self {
        Self {
            reset_threshold: DEFAULT_RESET_THRESHOLD,
        }
    }
}

impl JubileePolicy {
    /// Create a policy with a custom threshold.
    pub const fn with_threshold(reset_threshold: u64) -> Self {
        Self { reset_threshold }
    }

    /// Whether a Jubilee at `term` resets the counter.
    pub const fn should_reset(&self, term: u64) -> bool {
        term >= self.reset_threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_threshold() {
        let policy = JubileePolicy::default();
        assert_eq!(policy.reset_threshold, 13);
        assert!(!policy.should_reset(8));
        assert!(policy.should_reset(13));
        assert!(policy.should_reset(144));
    }

    #[test]
    fn custom_threshold() {
        let policy = JubileePolicy::with_threshold(55);
        assert!(!policy.should_reset(34));
        assert!(policy.should_reset(55));
    }
}

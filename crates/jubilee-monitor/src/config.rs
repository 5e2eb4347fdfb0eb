//! Monitor configuration.

use jubilee_core::{JubileePolicy, DEFAULT_RESET_THRESHOLD};

use crate::error::Result;
use crate::registry::DEFAULT_CHAINS;

/// Seed used by the simulated block source when none is set.
pub const DEFAULT_SEED: u64 = 42;

/// Configuration for a Jubilee monitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JubileeConfig {
    /// Reset policy applied to every chain
    pub policy: JubileePolicy,

    /// Chains to register
    pub chains: Vec<String>,

    /// Seed for simulated block heights
    pub seed: u64,
}

impl Default for JubileeConfig {
    fn default() -> Self {
        Self {
            policy: JubileePolicy::default(),
            chains: DEFAULT_CHAINS.iter().map(|c| c.to_string()).collect(),
            seed: DEFAULT_SEED,
        }
    }
}

impl JubileeConfig {
    /// Create config from environment variables with sensible defaults.
    ///
    /// - `JUBILEE_RESET_THRESHOLD` (default 13)
    /// - `JUBILEE_CHAINS`, comma separated (default: the 24 standard chains)
    /// - `JUBILEE_SEED` (default 42)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let reset_threshold = match lookup("JUBILEE_RESET_THRESHOLD") {
            Some(v) => parse_u64("JUBILEE_RESET_THRESHOLD", &v)?,
            None => DEFAULT_RESET_THRESHOLD,
        };

        let chains = match lookup("JUBILEE_CHAINS") {
            Some(v) => {
                let chains: Vec<String> = v
                    .split(',')
                    .map(|c| c.trim().to_string())
                    .filter(|c| !c.is_empty())
                    .collect();
                if chains.is_empty() {
                    return Err(invalid("JUBILEE_CHAINS lists no chains".to_string()));
                }
                chains
            }
            None => DEFAULT_CHAINS.iter().map(|c| c.to_string()).collect(),
        };

        let seed = match lookup("JUBILEE_SEED") {
            Some(v) => parse_u64("JUBILEE_SEED", &v)?,
            None => DEFAULT_SEED,
        };

        Ok(Self {
            policy: JubileePolicy::with_threshold(reset_threshold),
            chains,
            seed,
        })
    }
}

fn parse_u64(key: &str, value: &str) -> Result<u64> {
    value
        .trim()
        .parse()
        .map_err(|e| invalid(format!("{}={:?}: {}", key, value, e)))
}

fn invalid(msg: String) -> crate::error::Error {
    jubilee_core::Error::InvalidConfig(msg).into()
}

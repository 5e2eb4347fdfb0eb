//! Error types for jubilee-core.

use thiserror::Error;

/// Result type for jubilee-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while counting blocks.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Chain identifiers must contain at least one non-whitespace character.
    #[error("chain id must not be empty")]
    EmptyChainId,

    /// The chain's counter would exceed `u64::MAX`.
    #[error("block counter overflow on chain {chain}")]
    CounterOverflow { chain: String },

    /// A configuration value could not be used.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

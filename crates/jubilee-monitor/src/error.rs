//! Error types for jubilee-monitor.

use thiserror::Error;

/// Result type for monitor operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while monitoring chains.
#[derive(Debug, Error)]
pub enum Error {
    /// Counting failed
    #[error(transparent)]
    Core(#[from] jubilee_core::Error),

    /// The chain is not registered
    #[error("unknown chain: {0}")]
    UnknownChain(String),

    /// A block source could not report a height
    #[error("block source error: {0}")]
    Source(String),
}

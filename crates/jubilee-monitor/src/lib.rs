//! Jubilee Monitor
//!
//! Watches a set of chains and feeds every new block into a
//! [`JubileeCounter`](jubilee_core::JubileeCounter).
//!
//! # Architecture
//!
//! - **Registry**: chains keyed by name, with their last counted height
//! - **Source**: [`BlockSource`] reports heights (fixed or seeded simulation)
//! - **Monitor**: counts the gap between the last and current height
//! - **Handle**: `Arc<Mutex<_>>` wrapper so tasks can share one monitor
//!
//! # Example
//!
//! ```
//! use jubilee_monitor::{JubileeConfig, Monitor, SimulatedSource};
//!
//! let config = JubileeConfig::default();
//! let mut monitor = Monitor::from_config(&config);
//! let mut source = SimulatedSource::new(config.seed);
//! monitor.monitor_all(&mut source).unwrap();
//! assert_eq!(monitor.global_status().chains, 24);
//! ```

pub mod config;
pub mod error;
pub mod handle;
pub mod monitor;
pub mod registry;
pub mod source;

pub use config::JubileeConfig;
pub use error::{Error, Result};
pub use handle::MonitorHandle;
pub use monitor::{ChainReport, GlobalStatus, Monitor};
pub use registry::{ChainInfo, ChainRegistry, DEFAULT_CHAINS};
pub use source::{BlockSource, FixedHeights, SimulatedSource};

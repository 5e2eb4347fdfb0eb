//! Shared access to a monitor from many tasks.
//!
//! Increments are read-modify-write, so every call goes through one mutex.

use std::collections::BTreeMap;
use std::sync::Arc;

use jubilee_core::JubileeResult;
use tokio::sync::Mutex;

use crate::error::Result;
use crate::monitor::{ChainReport, GlobalStatus, Monitor};
use crate::registry::ChainInfo;
use crate::source::BlockSource;

/// Cloneable handle to a shared [`Monitor`].
#[derive(Debug, Clone)]
pub struct MonitorHandle {
    inner: Arc<Mutex<Monitor>>,
}

impl MonitorHandle {
    pub fn new(monitor: Monitor) -> Self {
        Self {
            inner: Arc::new(Mutex::new(monitor)),
        }
    }

    pub async fn add_chain(&self, info: ChainInfo) {
        self.inner.lock().await.add_chain(info);
    }

    pub async fn count_block(&self, chain: &str) -> Result<JubileeResult> {
        self.inner.lock().await.count_block(chain)
    }

    pub async fn monitor_all<S: BlockSource + ?Sized>(&self, source: &mut S) -> Result<BTreeMap<String, ChainReport>> {
        self.inner.lock().await.monitor_all(source)
    }

    pub async fn count(&self, chain: &str) -> u64 {
        self.inner.lock().await.counter().count(chain)
    }

    pub async fn global_status(&self) -> GlobalStatus {
        self.inner.lock().await.global_status()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn concurrent_counts_are_serialized() {
        let handle = MonitorHandle::new(Monitor::default());
        handle.add_chain(ChainInfo::with_default_endpoints("ethereum")).await;

        let mut tasks = Vec::new();
        for _ in 0..8 {
            let handle = handle.clone();
            tasks.push(tokio::spawn(async move {
                for _ in 0..10 {
                    handle.count_block("ethereum").await.unwrap();
                }
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        // 80 blocks = 6 full cycles of 13, then 2 more
        assert_eq!(handle.count("ethereum").await, 80 % 13);
        let status = handle.global_status().await;
        assert_eq!(status.total_jubilee_blocks, 6 * 6 + 2);
    }

    #[test]
    fn handle_blocking_use() {
        let handle = MonitorHandle::new(Monitor::default());
        tokio_test::block_on(async {
            handle.add_chain(ChainInfo::with_default_endpoints("bitcoin")).await;
            let result = handle.count_block("bitcoin").await.unwrap();
            assert!(result.jubilee);
            assert_eq!(handle.count("bitcoin").await, 1);
        });
    }
}

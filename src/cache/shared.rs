//! Shared Store Handle
//!
//! Wraps one [`EntryStore`] behind a single async lock so concurrent hosts
//! serialize every mutation of an instance.

use std::sync::Arc;

use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::cache::{EntryStore, EvictionPolicy};
use crate::config::Config;

// == Shared Store ==
/// Cloneable handle to a lock-guarded store.
#[derive(Debug, Clone)]
pub struct SharedStore {
    inner: Arc<RwLock<EntryStore>>,
}

impl SharedStore {
    /// Wraps an existing store.
    pub fn new(store: EntryStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    /// Builds the store described by `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(EntryStore::with_policy(
            config.max_entries,
            config.eviction_policy,
        ))
    }

    /// Shared access for operations that do not touch counters or entries.
    pub async fn read(&self) -> RwLockReadGuard<'_, EntryStore> {
        self.inner.read().await
    }

    /// Exclusive access; needed by every mutating operation, `get` included.
    pub async fn write(&self) -> RwLockWriteGuard<'_, EntryStore> {
        self.inner.write().await
    }

    pub async fn policy(&self) -> EvictionPolicy {
        self.inner.read().await.policy()
    }
}

impl Default for SharedStore {
    fn default() -> Self {
        Self::new(EntryStore::default())
    }
}

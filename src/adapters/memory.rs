// src/adapters/memory.rs
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::{ContractError, StateStore};

/// A write the contract issued against the store, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Write {
    Put { key: String, value: Vec<u8> },
    Delete { key: String },
}

#[derive(Clone, Default)]
struct MemoryStore {
    state: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    writes: Arc<Mutex<Vec<Write>>>,
}

/// World state held in process memory.
///
/// Stands in for the ledger runtime in tests and local hosting. Seeding goes
/// straight to the map and is not recorded as a write. Every put and delete
/// is appended to a write log until drained with [`take_writes`]; long-lived
/// hosts should drain it periodically.
///
/// [`take_writes`]: MemoryStateStore::take_writes
#[derive(Clone, Default)]
pub struct MemoryStateStore {
    store: MemoryStore,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, key: &str, value: Vec<u8>) {
        self.state().insert(key.to_string(), value);
    }

    /// Raw bytes under `key`, bypassing the async interface.
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.state().get(key).cloned()
    }

    /// Ordered copy of the whole state.
    pub fn snapshot(&self) -> BTreeMap<String, Vec<u8>> {
        self.state()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn writes(&self) -> Vec<Write> {
        self.write_log().clone()
    }

    /// Return the logged writes and start a fresh log.
    pub fn take_writes(&self) -> Vec<Write> {
        std::mem::take(&mut *self.write_log())
    }

    pub fn write_count(&self) -> usize {
        self.write_log().len()
    }

    fn state(&self) -> MutexGuard<'_, HashMap<String, Vec<u8>>> {
        // A poisoned map is still a consistent map: every mutation is a
        // single insert or remove.
        self.store
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_log(&self) -> MutexGuard<'_, Vec<Write>> {
        self.store
            .writes
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl StateStore for MemoryStateStore {
    async fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, ContractError> {
        Ok(self.state().get(key).cloned())
    }

    async fn put_state(&self, key: &str, value: Vec<u8>) -> Result<(), ContractError> {
        self.state().insert(key.to_string(), value.clone());
        self.write_log().push(Write::Put {
            key: key.to_string(),
            value,
        });
        Ok(())
    }

    async fn delete_state(&self, key: &str) -> Result<(), ContractError> {
        self.state().remove(key);
        self.write_log().push(Write::Delete {
            key: key.to_string(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_get_delete() {
        let store = MemoryStateStore::new();
        assert_eq!(store.get_state("a").await.unwrap(), None);

        store.put_state("a", b"1".to_vec()).await.unwrap();
        store.put_state("a", b"2".to_vec()).await.unwrap();
        assert_eq!(store.get_state("a").await.unwrap(), Some(b"2".to_vec()));

        store.delete_state("a").await.unwrap();
        assert_eq!(store.get_state("a").await.unwrap(), None);
        assert_eq!(
            store.writes(),
            vec![
                Write::Put {
                    key: "a".to_string(),
                    value: b"1".to_vec()
                },
                Write::Put {
                    key: "a".to_string(),
                    value: b"2".to_vec()
                },
                Write::Delete {
                    key: "a".to_string()
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_seed_is_not_a_write() {
        let store = MemoryStateStore::new();
        store.seed("b", b"x".to_vec());
        assert_eq!(store.write_count(), 0);
        assert_eq!(store.snapshot().len(), 1);
    }

    #[tokio::test]
    async fn test_take_writes_drains_log_but_keeps_state() {
        let store = MemoryStateStore::new();
        store.put_state("a", b"1".to_vec()).await.unwrap();
        store.delete_state("missing").await.unwrap();

        let drained = store.take_writes();
        assert_eq!(drained.len(), 2);
        assert_eq!(store.write_count(), 0);
        assert!(store.take_writes().is_empty());
        assert_eq!(store.get("a"), Some(b"1".to_vec()));

        store.put_state("b", b"2".to_vec()).await.unwrap();
        assert_eq!(store.write_count(), 1);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = MemoryStateStore::new();
        let other = store.clone();
        other.put_state("k", b"v".to_vec()).await.unwrap();
        assert_eq!(store.get("k"), Some(b"v".to_vec()));
    }
}

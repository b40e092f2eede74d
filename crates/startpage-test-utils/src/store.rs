//! [`MemoryStore`]: an in-memory key-value cache with write counting.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;
use startpage_host::{CacheStore, Result};

/// An in-memory [`CacheStore`] that counts writes per key.
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    values: HashMap<String, Value>,
    writes: HashMap<String, u64>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Pre-populate a key without counting it as a write.
    pub fn seed(&self, key: &str, value: Value) {
        let mut inner = self.inner.lock().unwrap();
        inner.values.insert(key.to_string(), value);
    }

    /// Current value of a key.
    pub fn value(&self, key: &str) -> Option<Value> {
        self.inner.lock().unwrap().values.get(key).cloned()
    }

    /// Number of writes issued against one key through the trait.
    pub fn write_count(&self, key: &str) -> u64 {
        self.inner
            .lock()
            .unwrap()
            .writes
            .get(key)
            .copied()
            .unwrap_or(0)
    }

    /// Total writes issued through the trait, across all keys.
    pub fn total_writes(&self) -> u64 {
        self.inner.lock().unwrap().writes.values().sum()
    }

    /// All present keys starting with `prefix`, sorted.
    pub fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        let inner = self.inner.lock().unwrap();
        let mut keys: Vec<String> = inner
            .values
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect();
        keys.sort();
        keys
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.inner.lock().unwrap().values.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.values.insert(key.to_string(), value);
        *inner.writes.entry(key.to_string()).or_insert(0) += 1;
        Ok(())
    }
}

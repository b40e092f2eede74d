//! Durable key-value store seam and change payloads

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Result;

/// One key's transition, as reported by hosts that notify on writes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateChange {
    pub key: String,
    pub old_value: Option<Value>,
    pub new_value: Option<Value>,
}

impl StateChange {
    pub fn new(key: impl Into<String>, old_value: Option<Value>, new_value: Option<Value>) -> Self {
        Self {
            key: key.into(),
            old_value,
            new_value,
        }
    }
}

/// Durable key-value store holding the engine's derived state.
///
/// Values are JSON-shaped. The engine addresses keys one at a time and
/// never enumerates or deletes them.
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Value>>;
    async fn set(&self, key: &str, value: Value) -> Result<()>;
}

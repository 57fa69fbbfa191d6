//! In-memory [`KeyValueStore`] backend.

use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::Value;

use super::{KeyValueStore, StoreKey, Subscription, WatchCallback, WatcherRegistry};
use crate::types::errors::StoreError;

/// Store backed by a `HashMap`. Contents are lost when dropped.
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<StoreKey, Value>>,
    watchers: WatcherRegistry,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: StoreKey) -> Result<Option<Value>, StoreError> {
        let values = self
            .values
            .lock()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;
        Ok(values.get(&key).cloned())
    }

    fn set(&self, key: StoreKey, value: Value) -> Result<(), StoreError> {
        let old = {
            let mut values = self
                .values
                .lock()
                .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;
            values.insert(key, value.clone())
        };
        self.watchers
            .notify(key, &value, old.as_ref().unwrap_or(&Value::Null));
        Ok(())
    }

    fn watch(&self, key: StoreKey, callback: WatchCallback) -> Subscription {
        self.watchers.subscribe(key, callback)
    }
}

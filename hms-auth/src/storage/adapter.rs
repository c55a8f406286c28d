//! Typed persistence adapter
//!
//! Serializes domain values to JSON for the key-value substrate and reads
//! them back, absorbing malformed or unreadable data instead of propagating
//! it.

use super::KeyValueStore;
use hms_core::HmsResult;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// Typed view over a [`KeyValueStore`]
#[derive(Clone)]
pub struct StorageAdapter {
    store: Arc<dyn KeyValueStore>,
}

impl StorageAdapter {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Load the value stored under `key`
    ///
    /// An absent key yields `T::default()`. Unreadable or malformed data
    /// does the same: the problem is logged and the caller sees a clean
    /// default, never an error. The stored bytes stay in place until the
    /// next save overwrites them.
    pub fn load<T>(&self, key: &str) -> T
    where
        T: DeserializeOwned + Default,
    {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return T::default(),
            Err(e) => {
                warn!("Failed to read entry '{}': {}", key, e);
                return T::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!(
                    "Failed to parse entry '{}', falling back to default: {}",
                    key, e
                );
                T::default()
            }
        }
    }

    /// Serialize `value` and store it under `key`, replacing any previous
    /// value
    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> HmsResult<()> {
        let json_data = serde_json::to_string(value)?;
        self.store.set(key, &json_data)?;

        debug!("Saved entry {} ({} bytes)", key, json_data.len());
        Ok(())
    }

    /// Delete the value under `key`, if any
    pub fn remove(&self, key: &str) -> HmsResult<()> {
        self.store.remove(key)
    }
}

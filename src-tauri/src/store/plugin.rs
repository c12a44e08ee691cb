use std::sync::Arc;

use serde_json::Value;
use tauri::Runtime;
use tauri_plugin_store::Store;
use tracing::warn;

use super::KeyValueStore;
use crate::error::StudyError;

/// `tauri-plugin-store` file store, saved to disk on every write.
pub struct PluginStore<R: Runtime> {
    store: Arc<Store<R>>,
}

impl<R: Runtime> PluginStore<R> {
    pub fn new(store: Arc<Store<R>>) -> Self {
        Self { store }
    }

    fn save(&self) -> Result<(), StudyError> {
        self.store.save().map_err(|e| {
            warn!("Failed to save store: {}", e);
            StudyError::Store(e.to_string())
        })
    }
}

impl<R: Runtime> KeyValueStore for PluginStore<R> {
    fn get(&self, key: &str) -> Option<Value> {
        self.store.get(key)
    }

    fn set(&self, key: &str, value: Value) -> Result<(), StudyError> {
        self.store.set(key, value);
        self.save()
    }

    fn remove(&self, key: &str) -> Result<(), StudyError> {
        self.store.delete(key);
        self.save()
    }
}

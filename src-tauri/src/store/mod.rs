//! Persistent key-value slots.
//!
//! `KeyValueStore` is the raw durable map (JSON values keyed by string).
//! `PersistentSlots` layers typed reads with defaults, write-through and
//! change subscription on top of it.

pub mod memory;
pub mod plugin;

use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::StudyError;

pub use memory::MemoryStore;
pub use plugin::PluginStore;

/// File name of the app's store inside the Tauri app data directory.
pub const STORE_FILE: &str = "study.json";

pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<Value>;
    /// Write and flush to durable storage before returning.
    fn set(&self, key: &str, value: Value) -> Result<(), StudyError>;
    fn remove(&self, key: &str) -> Result<(), StudyError>;
}

/// The named slots the app persists. The credential lives in the keychain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Slot {
    #[serde(rename = "theme")]
    Theme,
    #[serde(rename = "generation-history")]
    History,
    #[serde(rename = "saved-words")]
    Vocabulary,
}

impl Slot {
    pub fn key(&self) -> &'static str {
        match self {
            Slot::Theme => "theme",
            Slot::History => "generation-history",
            Slot::Vocabulary => "saved-words",
        }
    }
}

type SlotListener = Box<dyn Fn(Slot) + Send + Sync>;

pub struct PersistentSlots {
    store: Arc<dyn KeyValueStore>,
    listeners: Mutex<Vec<SlotListener>>,
}

impl PersistentSlots {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            listeners: Mutex::new(Vec::new()),
        }
    }

    /// Read a slot, falling back to `default` when it is absent or unreadable.
    pub fn read<T: DeserializeOwned>(&self, slot: Slot, default: T) -> T {
        match self.store.get(slot.key()) {
            None => default,
            Some(value) => serde_json::from_value(value).unwrap_or_else(|e| {
                warn!("Slot '{}' holds unreadable data, using default: {}", slot.key(), e);
                default
            }),
        }
    }

    pub fn write<T: Serialize>(&self, slot: Slot, value: &T) -> Result<(), StudyError> {
        let json = serde_json::to_value(value)
            .map_err(|e| StudyError::Store(format!("Failed to serialize {}: {}", slot.key(), e)))?;
        self.store.set(slot.key(), json)?;
        debug!("Wrote slot '{}'", slot.key());
        self.notify(slot);
        Ok(())
    }

    pub fn clear(&self, slot: Slot) -> Result<(), StudyError> {
        self.store.remove(slot.key())?;
        self.notify(slot);
        Ok(())
    }

    /// Register a callback run after every successful write to any slot.
    pub fn subscribe(&self, listener: impl Fn(Slot) + Send + Sync + 'static) {
        match self.listeners.lock() {
            Ok(mut listeners) => listeners.push(Box::new(listener)),
            Err(e) => warn!("Slot listener registry poisoned: {}", e),
        }
    }

    fn notify(&self, slot: Slot) {
        if let Ok(listeners) = self.listeners.lock() {
            for listener in listeners.iter() {
                listener(slot);
            }
        }
    }
}

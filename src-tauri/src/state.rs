use std::sync::{Arc, Mutex, MutexGuard};

use crate::credential::CredentialStore;
use crate::error::StudyError;
use crate::generation::TextModel;
use crate::library::{HistoryManager, Preferences, VocabularyManager};
use crate::store::{KeyValueStore, PersistentSlots};

/// Everything the commands share. Built once at startup; the collections are
/// read from the store here and written through on every change.
pub struct StudyState {
    pub slots: Arc<PersistentSlots>,
    pub credentials: Arc<dyn CredentialStore>,
    pub model: Arc<dyn TextModel>,
    history: Mutex<HistoryManager>,
    vocabulary: Mutex<VocabularyManager>,
    preferences: Mutex<Preferences>,
}

impl StudyState {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        credentials: Arc<dyn CredentialStore>,
        model: Arc<dyn TextModel>,
    ) -> Self {
        let slots = Arc::new(PersistentSlots::new(store));
        Self {
            history: Mutex::new(HistoryManager::load(slots.clone())),
            vocabulary: Mutex::new(VocabularyManager::load(slots.clone())),
            preferences: Mutex::new(Preferences::load(slots.clone())),
            slots,
            credentials,
            model,
        }
    }

    pub fn history(&self) -> Result<MutexGuard<'_, HistoryManager>, StudyError> {
        self.history
            .lock()
            .map_err(|e| StudyError::Store(format!("history lock poisoned: {}", e)))
    }

    pub fn vocabulary(&self) -> Result<MutexGuard<'_, VocabularyManager>, StudyError> {
        self.vocabulary
            .lock()
            .map_err(|e| StudyError::Store(format!("vocabulary lock poisoned: {}", e)))
    }

    pub fn preferences(&self) -> Result<MutexGuard<'_, Preferences>, StudyError> {
        self.preferences
            .lock()
            .map_err(|e| StudyError::Store(format!("preferences lock poisoned: {}", e)))
    }
}

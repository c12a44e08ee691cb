use std::sync::Arc;

use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::display_date;
use crate::error::StudyError;
use crate::store::{PersistentSlots, Slot};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedWord {
    pub word: String,
    pub date: String,
}

/// Saved words in insertion order, unique by exact string match.
pub struct VocabularyManager {
    slots: Arc<PersistentSlots>,
    words: Vec<SavedWord>,
}

impl VocabularyManager {
    pub fn load(slots: Arc<PersistentSlots>) -> Self {
        let words: Vec<SavedWord> = slots.read(Slot::Vocabulary, Vec::new());
        info!("Loaded {} saved words", words.len());
        Self { slots, words }
    }

    pub fn list(&self) -> &[SavedWord] {
        &self.words
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w.word == word)
    }

    /// Save with today's date. Returns false (and writes nothing) when the
    /// trimmed word is empty or already saved.
    pub fn append(&mut self, word: &str) -> Result<bool, StudyError> {
        self.append_dated(word, &display_date(&Local::now()))
    }

    pub fn append_dated(&mut self, word: &str, date: &str) -> Result<bool, StudyError> {
        let word = word.trim();
        if word.is_empty() || self.contains(word) {
            return Ok(false);
        }

        let mut next = self.words.clone();
        next.push(SavedWord {
            word: word.to_string(),
            date: date.to_string(),
        });
        self.slots.write(Slot::Vocabulary, &next)?;
        self.words = next;

        info!("Saved word '{}'", word);
        Ok(true)
    }

    /// Remove by word. Absent words are a silent no-op.
    pub fn remove(&mut self, word: &str) -> Result<(), StudyError> {
        if !self.contains(word) {
            return Ok(());
        }
        let next: Vec<SavedWord> = self
            .words
            .iter()
            .filter(|w| w.word != word)
            .cloned()
            .collect();
        self.slots.write(Slot::Vocabulary, &next)?;
        self.words = next;
        info!("Deleted saved word '{}'", word);
        Ok(())
    }
}

use std::sync::Arc;

use chrono::{DateTime, Local, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::display_date;
use crate::error::StudyError;
use crate::generation::{Band, GeneratedContent, GenerationRequest, WordCount};
use crate::store::{PersistentSlots, Slot};

/// One successful generation together with the parameters that produced it.
/// Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    pub date: String,
    pub title: String,
    pub content: GeneratedContent,
    pub ielts_band: Band,
    pub word_count: WordCount,
    pub topic: String,
}

impl HistoryEntry {
    pub fn new(content: GeneratedContent, request: &GenerationRequest, at: DateTime<Local>) -> Self {
        Self {
            id: at
                .with_timezone(&Utc)
                .to_rfc3339_opts(SecondsFormat::Millis, true),
            date: display_date(&at),
            title: content.title.clone(),
            content,
            ielts_band: request.band,
            word_count: request.word_count,
            topic: request.topic.clone(),
        }
    }

    /// The parameters to restore when this entry is replayed.
    pub fn request(&self) -> GenerationRequest {
        GenerationRequest {
            band: self.ielts_band,
            word_count: self.word_count,
            topic: self.topic.clone(),
        }
    }
}

/// Generation history, newest first. Loaded once, written through on change.
pub struct HistoryManager {
    slots: Arc<PersistentSlots>,
    entries: Vec<HistoryEntry>,
}

impl HistoryManager {
    pub fn load(slots: Arc<PersistentSlots>) -> Self {
        let entries: Vec<HistoryEntry> = slots.read(Slot::History, Vec::new());
        info!("Loaded {} history entries", entries.len());
        Self { slots, entries }
    }

    pub fn list(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Record a successful generation as the newest entry.
    pub fn record(
        &mut self,
        content: GeneratedContent,
        request: &GenerationRequest,
    ) -> Result<HistoryEntry, StudyError> {
        let entry = HistoryEntry::new(content, request, Local::now());
        self.append(entry)
    }

    /// Prepend an entry. No dedup and no size limit. An id collision (two
    /// generations in the same millisecond) gets a numeric suffix.
    pub fn append(&mut self, mut entry: HistoryEntry) -> Result<HistoryEntry, StudyError> {
        if self.contains(&entry.id) {
            let base = entry.id.clone();
            let mut n = 1;
            while self.contains(&format!("{}-{}", base, n)) {
                n += 1;
            }
            entry.id = format!("{}-{}", base, n);
        }

        let mut next = Vec::with_capacity(self.entries.len() + 1);
        next.push(entry.clone());
        next.extend(self.entries.iter().cloned());
        self.slots.write(Slot::History, &next)?;
        self.entries = next;

        info!("Recorded history entry {} ('{}')", entry.id, entry.title);
        Ok(entry)
    }

    /// Remove by id. Absent ids are a silent no-op.
    pub fn remove(&mut self, id: &str) -> Result<(), StudyError> {
        if !self.contains(id) {
            return Ok(());
        }
        let next: Vec<HistoryEntry> = self
            .entries
            .iter()
            .filter(|e| e.id != id)
            .cloned()
            .collect();
        self.slots.write(Slot::History, &next)?;
        self.entries = next;
        info!("Deleted history entry {}", id);
        Ok(())
    }

    pub fn select(&self, id: &str) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }
}

//! The user's study library: generation history, saved vocabulary and
//! display preferences, each persisted in its own slot.

pub mod history;
pub mod preferences;
pub mod vocabulary;

pub use history::{HistoryEntry, HistoryManager};
pub use preferences::{Preferences, Theme};
pub use vocabulary::{SavedWord, VocabularyManager};

use chrono::{DateTime, Local};

/// Calendar date shown next to history entries and saved words.
pub fn display_date(at: &DateTime<Local>) -> String {
    at.format("%Y-%m-%d").to_string()
}

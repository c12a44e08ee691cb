use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::StudyError;

/// IELTS proficiency band the passage is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Band {
    #[serde(rename = "5.0 - 5.5")]
    Band5,
    #[serde(rename = "6.0 - 6.5")]
    Band6,
    #[default]
    #[serde(rename = "6.5 - 7.0")]
    Band6Half,
    #[serde(rename = "7.5 - 8.0")]
    Band7Half,
    #[serde(rename = "8.0+")]
    Band8Plus,
}

impl Band {
    pub const ALL: [Band; 5] = [
        Band::Band5,
        Band::Band6,
        Band::Band6Half,
        Band::Band7Half,
        Band::Band8Plus,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Band::Band5 => "5.0 - 5.5",
            Band::Band6 => "6.0 - 6.5",
            Band::Band6Half => "6.5 - 7.0",
            Band::Band7Half => "7.5 - 8.0",
            Band::Band8Plus => "8.0+",
        }
    }

    pub fn from_label(label: &str) -> Result<Self, StudyError> {
        Band::ALL
            .into_iter()
            .find(|b| b.label() == label.trim())
            .ok_or_else(|| StudyError::InvalidRequest(format!("unknown IELTS band '{}'", label)))
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Approximate passage length. Always in `[MIN, MAX]` on a `STEP` lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct WordCount(u16);

impl WordCount {
    pub const MIN: u16 = 50;
    pub const MAX: u16 = 300;
    pub const STEP: u16 = 25;

    pub fn new(words: u16) -> Result<Self, StudyError> {
        if !(Self::MIN..=Self::MAX).contains(&words) || (words - Self::MIN) % Self::STEP != 0 {
            return Err(StudyError::InvalidRequest(format!(
                "word count {} must be between {} and {} in steps of {}",
                words,
                Self::MIN,
                Self::MAX,
                Self::STEP
            )));
        }
        Ok(Self(words))
    }

    pub fn get(&self) -> u16 {
        self.0
    }
}

impl Default for WordCount {
    fn default() -> Self {
        Self(100)
    }
}

impl TryFrom<u16> for WordCount {
    type Error = String;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        WordCount::new(value).map_err(|e| e.to_string())
    }
}

impl From<WordCount> for u16 {
    fn from(value: WordCount) -> Self {
        value.0
    }
}

/// Parameters of one generation. Not persisted on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub band: Band,
    pub word_count: WordCount,
    pub topic: String,
}

/// A contiguous chunk of the English paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSegment {
    pub text: String,
    pub highlight: bool,
}

/// Validated output of one generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedContent {
    pub title: String,
    pub english_text_segments: Vec<TextSegment>,
    pub vietnamese_text: String,
}

impl GeneratedContent {
    /// The full English paragraph, segments joined in order.
    pub fn english_text(&self) -> String {
        self.english_text_segments
            .iter()
            .map(|s| s.text.as_str())
            .collect()
    }
}

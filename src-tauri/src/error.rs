use thiserror::Error;

use crate::generation::validation::ValidationError;

/// Message shown for every failed generation, whatever the cause.
pub const GENERATION_FAILED_MESSAGE: &str =
    "Failed to generate content. Please check your API key and network connection.";

#[derive(Debug, Error)]
pub enum StudyError {
    #[error("API Key is not set. Please set it first.")]
    MissingCredential,

    /// The cause is logged, never shown.
    #[error("{}", GENERATION_FAILED_MESSAGE)]
    GenerationFailed(#[source] GenerationFailure),

    #[error("Invalid generation request: {0}")]
    InvalidRequest(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Keychain error: {0}")]
    Keychain(String),
}

/// Why a generation call failed. Kept for logs only.
#[derive(Debug, Error)]
pub enum GenerationFailure {
    #[error("request to generative API failed: {0}")]
    Network(String),

    #[error("generative API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("unexpected API envelope: {0}")]
    Envelope(String),

    #[error("invalid generated content: {0}")]
    Validation(#[from] ValidationError),
}

impl StudyError {
    pub fn is_missing_credential(&self) -> bool {
        matches!(self, StudyError::MissingCredential)
    }
}

impl From<StudyError> for String {
    fn from(err: StudyError) -> Self {
        err.to_string()
    }
}

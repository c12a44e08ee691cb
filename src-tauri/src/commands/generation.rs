//! Tauri command for passage generation.
//!
//! Validates the parameters, runs one generation, and records the result in
//! history before returning it.

use serde::Deserialize;
use tauri::State;
use tracing::info;

use crate::error::StudyError;
use crate::generation::{self, Band, GenerationRequest, WordCount};
use crate::library::HistoryEntry;
use crate::state::StudyState;

/// Parameters as sent by the frontend controls.
#[derive(Debug, Deserialize)]
pub struct GeneratePassageArgs {
    /// Band label, e.g. "6.5 - 7.0"
    pub band: String,
    pub word_count: u16,
    pub topic: String,
}

impl GeneratePassageArgs {
    pub fn into_request(self) -> Result<GenerationRequest, StudyError> {
        Ok(GenerationRequest {
            band: Band::from_label(&self.band)?,
            word_count: WordCount::new(self.word_count)?,
            topic: self.topic,
        })
    }
}

/// Generate a passage and record it as the newest history entry.
///
/// Invalid parameters are rejected before the credential is read, so they
/// never invalidate it.
pub async fn generate_and_record(
    state: &StudyState,
    args: GeneratePassageArgs,
) -> Result<HistoryEntry, StudyError> {
    let request = args.into_request()?;

    let credentials = state.credentials.clone();
    let model = state.model.clone();
    let content = generation::generate(&request, credentials.as_ref(), model.as_ref()).await?;

    let entry = state.history()?.record(content, &request)?;
    info!("Generation complete, history entry {}", entry.id);
    Ok(entry)
}

/// # Returns
/// The new history entry; its `content` is what the frontend displays.
#[tauri::command]
pub async fn generate_passage(
    state: State<'_, StudyState>,
    request: GeneratePassageArgs,
) -> Result<HistoryEntry, String> {
    Ok(generate_and_record(&state, request).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;

    use crate::credential::{CredentialStore, MemoryCredentials};
    use crate::error::GenerationFailure;
    use crate::generation::{ModelRequest, TextModel};
    use crate::store::MemoryStore;

    const REPLY: &str = r#"{
        "title": "Cities at Night",
        "english_text_segments": [
            {"text": "Light pollution ", "highlight": true},
            {"text": "hides the stars.", "highlight": false}
        ],
        "vietnamese_text": "Ô nhiễm ánh sáng che khuất các vì sao."
    }"#;

    #[derive(Default)]
    struct CountingModel {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl TextModel for CountingModel {
        async fn generate_json(
            &self,
            _request: &ModelRequest,
            _api_key: &str,
        ) -> Result<String, GenerationFailure> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(REPLY.to_string())
        }
    }

    fn setup() -> (StudyState, Arc<MemoryCredentials>, Arc<CountingModel>) {
        let credentials = Arc::new(MemoryCredentials::with_key("AIza-valid"));
        let model = Arc::new(CountingModel::default());
        let state = StudyState::new(
            Arc::new(MemoryStore::default()),
            credentials.clone(),
            model.clone(),
        );
        (state, credentials, model)
    }

    fn args(band: &str, word_count: u16) -> GeneratePassageArgs {
        GeneratePassageArgs {
            band: band.to_string(),
            word_count,
            topic: "Urban life".to_string(),
        }
    }

    #[tokio::test]
    async fn test_off_lattice_word_count_keeps_credential() {
        let (state, credentials, model) = setup();

        let err = generate_and_record(&state, args("6.5 - 7.0", 110))
            .await
            .unwrap_err();
        assert!(matches!(err, StudyError::InvalidRequest(_)));
        assert_eq!(credentials.get().unwrap().as_deref(), Some("AIza-valid"));
        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
        assert!(state.history().unwrap().list().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_band_keeps_credential() {
        let (state, credentials, _model) = setup();

        let err = generate_and_record(&state, args("9.5", 100)).await.unwrap_err();
        assert!(matches!(err, StudyError::InvalidRequest(_)));
        assert_eq!(credentials.get().unwrap().as_deref(), Some("AIza-valid"));
    }

    #[tokio::test]
    async fn test_success_is_recorded_first() {
        let (state, _credentials, model) = setup();

        let first = generate_and_record(&state, args("6.5 - 7.0", 100)).await.unwrap();
        let second = generate_and_record(&state, args("8.0+", 250)).await.unwrap();

        assert_eq!(model.calls.load(Ordering::SeqCst), 2);
        assert_eq!(second.title, "Cities at Night");
        assert_eq!(second.ielts_band.label(), "8.0+");
        assert_eq!(second.word_count.get(), 250);

        let history = state.history().unwrap();
        assert_eq!(history.list().len(), 2);
        assert_eq!(history.list()[0].id, second.id);
        assert_eq!(history.list()[1].id, first.id);
    }
}

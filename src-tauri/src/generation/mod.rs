//! Bilingual IELTS passage generation.

pub mod gemini;
pub mod prompts;
pub mod types;
pub mod validation;

pub use gemini::{GeminiClient, ModelRequest, TextModel};
pub use types::*;

use tracing::{error, info, warn};

use crate::credential::CredentialStore;
use crate::error::{GenerationFailure, StudyError};
use prompts::{build_generation_prompt, generated_content_schema};
use validation::parse_generated_content;

/// Generate one passage.
///
/// Fails with `MissingCredential` before any network traffic when no key is
/// stored. Any other failure clears the stored key and surfaces a single
/// generic error; the cause only goes to the log. No retries.
pub async fn generate(
    request: &GenerationRequest,
    credentials: &dyn CredentialStore,
    model: &dyn TextModel,
) -> Result<GeneratedContent, StudyError> {
    let api_key = credentials
        .get()?
        .filter(|k| !k.trim().is_empty())
        .ok_or(StudyError::MissingCredential)?;

    info!(
        "Generating passage: band={}, words={}, topic='{}'",
        request.band,
        request.word_count.get(),
        request.topic
    );

    let model_request = ModelRequest {
        prompt: build_generation_prompt(request),
        schema: generated_content_schema(),
    };

    let outcome = match model.generate_json(&model_request, &api_key).await {
        Ok(raw) => parse_generated_content(&raw).map_err(GenerationFailure::from),
        Err(e) => Err(e),
    };

    match outcome {
        Ok(content) => {
            info!(
                "Generated '{}' with {} segments",
                content.title,
                content.english_text_segments.len()
            );
            Ok(content)
        }
        Err(cause) => {
            error!("Error calling generative API: {}", cause);
            if let Err(e) = credentials.clear() {
                warn!("Failed to clear API key after failed generation: {}", e);
            }
            Err(StudyError::GenerationFailed(cause))
        }
    }
}

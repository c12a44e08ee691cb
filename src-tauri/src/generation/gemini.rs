use async_trait::async_trait;
use tracing::{error, info};

use crate::config::GenerationConfig;
use crate::error::GenerationFailure;

/// One schema-constrained completion request.
#[derive(Debug, Clone)]
pub struct ModelRequest {
    pub prompt: String,
    pub schema: serde_json::Value,
}

/// A generative text backend returning the model's raw JSON text.
#[async_trait]
pub trait TextModel: Send + Sync {
    async fn generate_json(
        &self,
        request: &ModelRequest,
        api_key: &str,
    ) -> Result<String, GenerationFailure>;
}

/// Google Gemini `generateContent` client.
pub struct GeminiClient {
    client: reqwest::Client,
    config: GenerationConfig,
}

impl GeminiClient {
    /// No request timeout: a generation runs until it succeeds or fails.
    pub fn new(config: GenerationConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model
        )
    }

    fn request_body(&self, request: &ModelRequest) -> serde_json::Value {
        serde_json::json!({
            "contents": [
                {"role": "user", "parts": [{"text": request.prompt}]}
            ],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": request.schema,
                "temperature": self.config.temperature
            }
        })
    }
}

#[async_trait]
impl TextModel for GeminiClient {
    async fn generate_json(
        &self,
        request: &ModelRequest,
        api_key: &str,
    ) -> Result<String, GenerationFailure> {
        info!("Requesting generation from model '{}'", self.config.model);

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", api_key)
            .header("content-type", "application/json")
            .json(&self.request_body(request))
            .send()
            .await
            .map_err(|e| GenerationFailure::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read body>".to_string());
            let truncated: String = body.chars().take(1024).collect();
            error!("Gemini API error: {}", status);
            return Err(GenerationFailure::Api {
                status: status.as_u16(),
                body: truncated,
            });
        }

        let envelope: serde_json::Value = response
            .json()
            .await
            .map_err(|e| GenerationFailure::Envelope(format!("unreadable body: {}", e)))?;

        extract_candidate_text(&envelope)
    }
}

/// Pull the generated text out of a `generateContent` response:
/// `{ "candidates": [{ "content": { "parts": [{ "text": "..." }] } }] }`.
pub fn extract_candidate_text(envelope: &serde_json::Value) -> Result<String, GenerationFailure> {
    if let Some(reason) = envelope["promptFeedback"]["blockReason"].as_str() {
        return Err(GenerationFailure::Envelope(format!("prompt blocked: {}", reason)));
    }

    let parts = envelope["candidates"][0]["content"]["parts"]
        .as_array()
        .ok_or_else(|| {
            let finish = envelope["candidates"][0]["finishReason"]
                .as_str()
                .unwrap_or("unknown");
            GenerationFailure::Envelope(format!("no content parts (finish reason: {})", finish))
        })?;

    let text: String = parts.iter().filter_map(|p| p["text"].as_str()).collect();
    if text.trim().is_empty() {
        return Err(GenerationFailure::Envelope("empty text in response".to_string()));
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_config;

    #[test]
    fn test_url_uses_model_and_endpoint() {
        let mut config = default_config();
        config.endpoint = "http://localhost:8080/v1beta/".to_string();
        let client = GeminiClient::new(config);
        assert_eq!(
            client.url(),
            "http://localhost:8080/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let client = GeminiClient::new(default_config());
        let body = client.request_body(&ModelRequest {
            prompt: "Write a paragraph".to_string(),
            schema: serde_json::json!({"type": "OBJECT"}),
        });
        assert_eq!(body["contents"][0]["parts"][0]["text"], "Write a paragraph");
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(body["generationConfig"]["responseSchema"]["type"], "OBJECT");
        let temperature = body["generationConfig"]["temperature"].as_f64().unwrap();
        assert!((temperature - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_extract_joins_parts() {
        let envelope = serde_json::json!({
            "candidates": [{
                "content": {"parts": [{"text": "{\"title\":"}, {"text": " \"x\"}"}]},
                "finishReason": "STOP"
            }]
        });
        assert_eq!(extract_candidate_text(&envelope).unwrap(), "{\"title\": \"x\"}");
    }

    #[test]
    fn test_extract_blocked_prompt() {
        let envelope = serde_json::json!({"promptFeedback": {"blockReason": "SAFETY"}});
        let err = extract_candidate_text(&envelope).unwrap_err();
        assert!(err.to_string().contains("SAFETY"));
    }

    #[test]
    fn test_extract_missing_candidates() {
        let envelope = serde_json::json!({"candidates": [{"finishReason": "MAX_TOKENS"}]});
        let err = extract_candidate_text(&envelope).unwrap_err();
        assert!(err.to_string().contains("MAX_TOKENS"));
    }
}

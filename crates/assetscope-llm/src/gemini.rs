//! Gemini Provider Implementation
//!
//! Calls the Google Gemini `generateContent` REST API in structured-output
//! mode: the document travels as `inline_data`, and the response is
//! constrained with `responseMimeType = application/json` plus a
//! `responseSchema`.
//!
//! # Features
//!
//! - Async HTTP communication with the Gemini API
//! - Configurable base URL, model and timeout
//! - Retry logic with exponential backoff for 429/5xx and transport errors
//!
//! # Examples
//!
//! ```no_run
//! use assetscope_llm::GeminiProvider;
//! use std::time::Duration;
//!
//! let provider = GeminiProvider::new("my-api-key", "gemini-2.5-flash", Duration::from_secs(60))
//!     .expect("client");
//! ```

use crate::{InferenceError, InferenceProvider, InlineDocument, StructuredRequest};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Default Gemini API base URL
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Default timeout for inference requests (seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Default number of attempts
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Gemini API provider
pub struct GeminiProvider {
    base_url: String,
    model: String,
    api_key: String,
    client: reqwest::Client,
    max_retries: u32,
}

/// Request body for `models/{model}:generateContent`
#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig<'a>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part<'a> {
    InlineData { inline_data: &'a InlineDocument },
    Text { text: &'a str },
}

#[derive(Serialize)]
struct GenerationConfig<'a> {
    #[serde(rename = "responseMimeType")]
    response_mime_type: &'static str,
    #[serde(rename = "responseSchema")]
    response_schema: &'a serde_json::Value,
}

/// Response from `generateContent`
#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(rename = "promptFeedback")]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct PromptFeedback {
    #[serde(rename = "blockReason")]
    block_reason: Option<String>,
}

/// Google API error envelope
#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

impl GeminiProvider {
    /// Create a new Gemini provider
    ///
    /// # Parameters
    ///
    /// - `api_key`: Gemini API key
    /// - `model`: Model to use (e.g., "gemini-2.5-flash")
    /// - `timeout`: Per-request timeout
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, InferenceError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| InferenceError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: model.into(),
            api_key: api_key.into(),
            client,
            max_retries: DEFAULT_MAX_RETRIES,
        })
    }

    /// Point the provider at a different API base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the maximum number of attempts (at least one is always made)
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    /// Model name used for requests
    pub fn model(&self) -> &str {
        &self.model
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    /// Generate structured JSON for the given request
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The API key is rejected
    /// - The model is not available
    /// - Network communication fails after all retries
    /// - The response carries no text (e.g. the prompt was blocked)
    pub async fn generate(&self, request: &StructuredRequest) -> Result<String, InferenceError> {
        let body = build_request(request);
        let url = self.url();

        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_retries {
            match self
                .client
                .post(&url)
                .header("x-goog-api-key", &self.api_key)
                .json(&body)
                .send()
                .await
            {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        let parsed = response
                            .json::<GenerateContentResponse>()
                            .await
                            .map_err(|e| {
                                InferenceError::InvalidResponse(format!("Failed to parse response: {}", e))
                            })?;
                        return extract_text(parsed);
                    }

                    let error_text = response.text().await.unwrap_or_default();
                    let message = api_error_message(&error_text)
                        .unwrap_or_else(|| format!("HTTP {}: {}", status, error_text));

                    match status.as_u16() {
                        401 | 403 => return Err(InferenceError::Unauthorized(message)),
                        404 => return Err(InferenceError::ModelNotAvailable(self.model.clone())),
                        429 => last_error = Some(InferenceError::RateLimitExceeded),
                        code if code >= 500 => {
                            last_error = Some(InferenceError::Communication(message));
                        }
                        _ => return Err(InferenceError::Communication(message)),
                    }
                }
                Err(e) => {
                    last_error = Some(InferenceError::Communication(format!("Request failed: {}", e)));
                }
            }

            attempts += 1;
            if attempts < self.max_retries {
                // Exponential backoff: 1s, 2s, 4s, etc.
                let delay = Duration::from_secs(2u64.pow(attempts - 1));
                warn!(attempt = attempts, ?delay, "Gemini request failed, retrying");
                tokio::time::sleep(delay).await;
            }
        }

        Err(last_error.unwrap_or_else(|| InferenceError::Communication("Max retries exceeded".to_string())))
    }
}

#[async_trait]
impl InferenceProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate_structured(&self, request: &StructuredRequest) -> Result<String, InferenceError> {
        debug!(model = %self.model, bytes = request.document.data.len(), "Calling Gemini");
        self.generate(request).await
    }
}

fn build_request(request: &StructuredRequest) -> GenerateContentRequest<'_> {
    GenerateContentRequest {
        contents: vec![Content {
            parts: vec![
                Part::InlineData {
                    inline_data: &request.document,
                },
                Part::Text {
                    text: &request.instruction,
                },
            ],
        }],
        generation_config: GenerationConfig {
            response_mime_type: "application/json",
            response_schema: &request.schema,
        },
    }
}

/// Concatenate the text parts of the first candidate
fn extract_text(response: GenerateContentResponse) -> Result<String, InferenceError> {
    if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
        return Err(InferenceError::InvalidResponse(format!("Prompt blocked: {}", reason)));
    }

    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| InferenceError::InvalidResponse("Empty response".to_string()))?;

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.is_empty() {
        let reason = candidate.finish_reason.unwrap_or_else(|| "unknown".to_string());
        return Err(InferenceError::InvalidResponse(format!(
            "Model returned no text (finish reason: {})",
            reason
        )));
    }

    Ok(text)
}

fn api_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .map(|b| b.error.message)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> StructuredRequest {
        StructuredRequest {
            document: InlineDocument::new("application/pdf", "JVBERi0xLjQ="),
            instruction: "Extract every asset".to_string(),
            schema: serde_json::json!({ "type": "ARRAY", "items": { "type": "OBJECT" } }),
        }
    }

    #[test]
    fn test_gemini_provider_creation() {
        let provider = GeminiProvider::new("key", "gemini-2.5-flash", Duration::from_secs(5)).unwrap();
        assert_eq!(provider.model(), "gemini-2.5-flash");
        assert_eq!(provider.max_retries, DEFAULT_MAX_RETRIES);
        assert_eq!(
            provider.url(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_with_base_url_trims_slash() {
        let provider = GeminiProvider::new("key", "m", Duration::from_secs(5))
            .unwrap()
            .with_base_url("http://127.0.0.1:9000/");
        assert_eq!(provider.url(), "http://127.0.0.1:9000/models/m:generateContent");
    }

    #[test]
    fn test_with_max_retries_floor() {
        let provider = GeminiProvider::new("key", "m", Duration::from_secs(5))
            .unwrap()
            .with_max_retries(0);
        assert_eq!(provider.max_retries, 1);
    }

    #[test]
    fn test_request_body_shape() {
        let request = request();
        let body = serde_json::to_value(build_request(&request)).unwrap();

        let parts = &body["contents"][0]["parts"];
        assert_eq!(parts[0]["inline_data"]["mime_type"], "application/pdf");
        assert_eq!(parts[0]["inline_data"]["data"], "JVBERi0xLjQ=");
        assert_eq!(parts[1]["text"], "Extract every asset");
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(body["generationConfig"]["responseSchema"]["type"], "ARRAY");
    }

    #[test]
    fn test_extract_text_joins_parts() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates": [{"content": {"parts": [{"text": "[{\"a\""}, {"text": ": 1}]"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_text(response).unwrap(), r#"[{"a": 1}]"#);
    }

    #[test]
    fn test_extract_text_blocked_prompt() {
        let response: GenerateContentResponse =
            serde_json::from_str(r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#).unwrap();
        let err = extract_text(response).unwrap_err();
        assert!(err.to_string().contains("SAFETY"));
    }

    #[test]
    fn test_extract_text_no_candidates() {
        let response: GenerateContentResponse = serde_json::from_str(r#"{"candidates": []}"#).unwrap();
        assert!(matches!(extract_text(response), Err(InferenceError::InvalidResponse(_))));
    }

    #[test]
    fn test_api_error_message() {
        let body = r#"{"error": {"code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT"}}"#;
        assert_eq!(api_error_message(body).as_deref(), Some("API key not valid"));
        assert!(api_error_message("<html>").is_none());
    }

    #[tokio::test]
    async fn test_gemini_error_handling() {
        // Nothing listens on this port
        let provider = GeminiProvider::new("key", "m", Duration::from_secs(2))
            .unwrap()
            .with_base_url("http://127.0.0.1:9")
            .with_max_retries(1);

        let result = provider.generate(&request()).await;
        match result {
            Err(InferenceError::Communication(_)) => {} // Expected
            other => panic!("Expected Communication error, got {:?}", other.map(|_| ())),
        }
    }
}

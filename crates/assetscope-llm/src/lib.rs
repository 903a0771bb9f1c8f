//! AssetScope Inference Provider Layer
//!
//! Pluggable structured-output inference behind one narrow interface:
//! submit a document, an instruction and a JSON schema, receive JSON text.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `GeminiProvider`: Google Gemini `generateContent` API
//!
//! # Examples
//!
//! ```
//! use assetscope_llm::{InferenceProvider, InlineDocument, MockProvider, StructuredRequest};
//!
//! # async fn example() {
//! let provider = MockProvider::new("[]");
//! let request = StructuredRequest {
//!     document: InlineDocument::new("application/pdf", "JVBERi0="),
//!     instruction: "List the assets".to_string(),
//!     schema: serde_json::json!({ "type": "ARRAY" }),
//! };
//! let text = provider.generate_structured(&request).await.unwrap();
//! assert_eq!(text, "[]");
//! # }
//! ```

#![warn(missing_docs)]

pub mod gemini;

use async_trait::async_trait;
use serde::Serialize;
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use gemini::GeminiProvider;

/// Errors that can occur during inference
#[derive(Error, Debug)]
pub enum InferenceError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from the inference service
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Credential rejected by the service
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("Inference error: {0}")]
    Other(String),
}

/// A document passed inline to the model, already base64-encoded
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineDocument {
    /// MIME type of the original bytes
    pub mime_type: String,
    /// Base64 (standard alphabet, padded) file content
    pub data: String,
}

impl InlineDocument {
    /// Create an inline document
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }
}

/// A structured-output inference request
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredRequest {
    /// The document to analyze
    pub document: InlineDocument,
    /// Natural-language task description
    pub instruction: String,
    /// JSON schema the response must follow
    pub schema: serde_json::Value,
}

/// Trait for structured-output inference services
///
/// Implementations must be safe to share across concurrent requests.
#[async_trait]
pub trait InferenceProvider: Send + Sync {
    /// Short provider name for logs and health output
    fn name(&self) -> &str;

    /// Run the request and return the model's raw JSON text
    async fn generate_structured(&self, request: &StructuredRequest) -> Result<String, InferenceError>;
}

/// Mock provider for deterministic testing
///
/// Returns a pre-configured response without making any network calls and
/// records every request it receives.
///
/// # Examples
///
/// ```
/// use assetscope_llm::MockProvider;
///
/// let provider = MockProvider::new("[]").with_error("quota exhausted");
/// assert_eq!(provider.call_count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    response: String,
    error: Option<String>,
    call_count: Arc<Mutex<usize>>,
    requests: Arc<Mutex<Vec<StructuredRequest>>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all requests
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            error: None,
            call_count: Arc::new(Mutex::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Configure every call to fail with the given message
    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.error = Some(message.into());
        self
    }

    /// Get the number of times the provider was called
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Get the most recent request, if any
    pub fn last_request(&self) -> Option<StructuredRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .last()
            .cloned()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("[]")
    }
}

#[async_trait]
impl InferenceProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate_structured(&self, request: &StructuredRequest) -> Result<String, InferenceError> {
        *self.call_count.lock().unwrap_or_else(|e| e.into_inner()) += 1;
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request.clone());

        match &self.error {
            Some(message) => Err(InferenceError::Other(message.clone())),
            None => Ok(self.response.clone()),
        }
    }
}

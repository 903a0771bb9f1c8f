//! HTTP client for the forwarder's processing endpoint.

use crate::error::SdkError;
use assetscope_domain::{AssetFields, UploadFile};
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Multipart field name the forwarder reads the document from
pub const UPLOAD_FIELD: &str = "pdfFile";

/// Processing endpoint path, relative to the forwarder base URL
const PROCESS_PDF_PATH: &str = "/api/process-pdf";

/// Success body returned by the forwarder
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionResponse {
    /// Extracted assets; a missing or `null` key reads as empty
    #[serde(default)]
    pub assets: Option<Vec<AssetFields>>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Client for extracting assets from one PDF at a time
#[derive(Debug, Clone)]
pub struct ExtractionClient {
    endpoint: String,
    http_client: reqwest::Client,
}

impl ExtractionClient {
    /// Create a client for the forwarder at `endpoint`
    ///
    /// `timeout` bounds each whole request, upload included.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, SdkError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SdkError::InvalidRequest(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            http_client,
        })
    }

    /// Forwarder base URL
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Upload one file and return the extracted field-sets
    ///
    /// Every failure is wrapped in [`SdkError::FileFailed`] naming the file.
    pub async fn extract_assets(&self, file: &UploadFile) -> Result<Vec<AssetFields>, SdkError> {
        self.send(file).await.map_err(|e| e.for_file(&file.name))
    }

    async fn send(&self, file: &UploadFile) -> Result<Vec<AssetFields>, SdkError> {
        let url = format!("{}{}", self.endpoint, PROCESS_PDF_PATH);
        debug!("Uploading {} ({} bytes) to {}", file.name, file.bytes.len(), url);

        let part = Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(&file.content_type)?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        let response = self.http_client.post(&url).multipart(form).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SdkError::ServerError(error_message(status, &body)));
        }

        let body = response.bytes().await?;
        let parsed: ExtractionResponse = serde_json::from_slice(&body)?;
        Ok(parsed.assets.unwrap_or_default())
    }
}

/// Pick the message to show for a non-success response
///
/// Prefers the server's `{"error": "..."}` text and falls back to the
/// status line when the body is not in that shape or the text is empty.
fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| match status.canonical_reason() {
            Some(reason) => format!("Server error: {} {}", status.as_u16(), reason),
            None => format!("Server error: {}", status.as_u16()),
        })
}

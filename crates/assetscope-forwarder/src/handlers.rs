//! HTTP request handlers for the Forwarder service.
//!
//! Implements the PDF processing endpoint and a health check using axum.

use crate::parser::parse_model_output;
use crate::prompt::{asset_schema, EXTRACTION_INSTRUCTION};
use crate::upload::{receive_upload, UploadError};
use assetscope_domain::AssetFields;
use assetscope_llm::{InferenceError, InferenceProvider, InlineDocument, StructuredRequest};
use axum::{
    extract::{multipart::MultipartRejection, DefaultBodyLimit, FromRequest, Multipart, Request, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router as AxumRouter,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

/// Path of the processing endpoint
pub const PROCESS_PDF_PATH: &str = "/api/process-pdf";

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Inference backend; `None` when no credential is provisioned
    pub inference: Option<Arc<dyn InferenceProvider>>,
    /// Directory for spooled uploads (system temp dir when `None`)
    pub upload_dir: Option<PathBuf>,
    /// Maximum accepted request body, in bytes
    pub max_upload_bytes: usize,
}

impl AppState {
    /// Create state around an optional inference provider
    pub fn new(inference: Option<Arc<dyn InferenceProvider>>) -> Self {
        Self {
            inference,
            upload_dir: None,
            max_upload_bytes: 25 * 1024 * 1024,
        }
    }

    /// Spool uploads into the given directory
    pub fn with_upload_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.upload_dir = dir;
        self
    }

    /// Set the request body limit
    pub fn with_max_upload_bytes(mut self, limit: usize) -> Self {
        self.max_upload_bytes = limit;
        self
    }
}

/// Successful processing response
#[derive(Debug, Serialize, Deserialize)]
pub struct ProcessResponse {
    /// Extracted assets, in model order
    pub assets: Vec<AssetFields>,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Always "ok" while the process is serving
    pub status: String,
    /// Whether an inference credential is provisioned
    pub credential_configured: bool,
    /// Name of the inference provider, if any
    pub provider: Option<String>,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// Anything other than POST on the processing endpoint
    MethodNotAllowed,
    /// No inference credential provisioned
    MissingCredential,
    /// Request carried no `pdfFile` part
    NoFile,
    /// Any failure after the upload was accepted
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::MethodNotAllowed => {
                let body = Json(ErrorResponse {
                    error: "Method Not Allowed".to_string(),
                });
                return (
                    StatusCode::METHOD_NOT_ALLOWED,
                    [(header::ALLOW, "POST")],
                    body,
                )
                    .into_response();
            }
            AppError::MissingCredential => {
                error!("Inference credential is not configured");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "API key not configured on the server.".to_string(),
                )
            }
            AppError::NoFile => (StatusCode::BAD_REQUEST, "No PDF file uploaded.".to_string()),
            AppError::Internal(msg) => {
                error!("Error processing PDF: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("An internal server error occurred: {}", msg),
                )
            }
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

impl From<InferenceError> for AppError {
    fn from(e: InferenceError) -> Self {
        AppError::Internal(e.to_string())
    }
}

impl From<UploadError> for AppError {
    fn from(e: UploadError) -> Self {
        AppError::Internal(e.to_string())
    }
}

impl From<MultipartRejection> for AppError {
    fn from(e: MultipartRejection) -> Self {
        AppError::Internal(e.body_text())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Internal(format!("model returned invalid JSON: {}", e))
    }
}

/// POST /api/process-pdf - Extract assets from one uploaded PDF
///
/// The credential check runs before the body is read, so an unconfigured
/// server never parses uploads.
async fn process_pdf(
    State(state): State<AppState>,
    request: Request,
) -> Result<Json<ProcessResponse>, AppError> {
    let provider = state.inference.clone().ok_or(AppError::MissingCredential)?;

    let mut multipart = Multipart::from_request(request, &state).await?;
    let upload = receive_upload(&mut multipart, state.upload_dir.as_deref())
        .await?
        .ok_or(AppError::NoFile)?;

    info!(
        "Processing {} ({} bytes) with {}",
        upload.file_name(),
        upload.len(),
        provider.name()
    );

    let request = StructuredRequest {
        document: InlineDocument::new(upload.content_type(), upload.read_base64().await?),
        instruction: EXTRACTION_INSTRUCTION.to_string(),
        schema: asset_schema(),
    };

    let text = provider.generate_structured(&request).await?;
    let assets = parse_model_output(&text)?;

    info!("Extracted {} assets from {}", assets.len(), upload.file_name());

    Ok(Json(ProcessResponse { assets }))
}

/// Fallback for every non-POST method on the processing endpoint
async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

/// GET /health - Liveness and credential status
async fn health_check(State(state): State<AppState>) -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "ok".to_string(),
        credential_configured: state.inference.is_some(),
        provider: state.inference.as_ref().map(|p| p.name().to_string()),
    })
}

/// Create the axum router with all routes
pub fn create_router(state: AppState) -> AxumRouter {
    let body_limit = state.max_upload_bytes;

    AxumRouter::new()
        .route(
            PROCESS_PDF_PATH,
            post(process_pdf).fallback(method_not_allowed),
        )
        .route("/health", get(health_check))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

//! Client tests against a local stub forwarder

use assetscope_domain::UploadFile;
use assetscope_sdk::{ExtractionClient, SdkError};
use axum::{
    extract::Multipart,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use serde_json::json;
use std::time::Duration;
use tokio::net::TcpListener;

/// Serve `app` on an ephemeral port and return its base URL
async fn spawn_stub(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn client(endpoint: &str) -> ExtractionClient {
    ExtractionClient::new(endpoint, Duration::from_secs(10)).unwrap()
}

fn sample_pdf() -> UploadFile {
    UploadFile::pdf("inventory.pdf", b"%PDF-1.4 sample".to_vec())
}

/// Echoes what it received back as one asset
async fn echo_upload(mut multipart: Multipart) -> impl IntoResponse {
    while let Some(field) = multipart.next_field().await.unwrap() {
        if field.name() == Some("pdfFile") {
            let file_name = field.file_name().map(str::to_string);
            let content_type = field.content_type().map(str::to_string);
            let bytes = field.bytes().await.unwrap();
            return Json(json!({
                "assets": [{
                    "assetId": file_name,
                    "type": content_type,
                    "model": String::from_utf8_lossy(&bytes),
                    "serialNumber": null,
                    "location": null
                }]
            }));
        }
    }
    Json(json!({ "assets": [] }))
}

#[tokio::test]
async fn test_upload_carries_field_name_file_name_and_type() {
    let endpoint = spawn_stub(Router::new().route("/api/process-pdf", post(echo_upload))).await;

    let assets = client(&endpoint).extract_assets(&sample_pdf()).await.unwrap();

    assert_eq!(assets.len(), 1);
    assert_eq!(assets[0].asset_id.as_deref(), Some("inventory.pdf"));
    assert_eq!(assets[0].asset_type.as_deref(), Some("application/pdf"));
    assert_eq!(assets[0].model.as_deref(), Some("%PDF-1.4 sample"));
    assert!(assets[0].serial_number.is_none());
}

#[tokio::test]
async fn test_null_assets_is_empty() {
    let app = Router::new().route(
        "/api/process-pdf",
        post(|| async { Json(json!({ "assets": null })) }),
    );
    let endpoint = spawn_stub(app).await;

    let assets = client(&endpoint).extract_assets(&sample_pdf()).await.unwrap();
    assert!(assets.is_empty());
}

#[tokio::test]
async fn test_server_error_message_is_surfaced() {
    let app = Router::new().route(
        "/api/process-pdf",
        post(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "API key not configured on the server." })),
            )
        }),
    );
    let endpoint = spawn_stub(app).await;

    let err = client(&endpoint).extract_assets(&sample_pdf()).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Failed to process inventory.pdf. Reason: API key not configured on the server."
    );
}

#[tokio::test]
async fn test_non_json_error_falls_back_to_status_line() {
    let app = Router::new().route(
        "/api/process-pdf",
        post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "upstream unavailable") }),
    );
    let endpoint = spawn_stub(app).await;

    let err = client(&endpoint).extract_assets(&sample_pdf()).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Failed to process inventory.pdf. Reason: Server error: 503 Service Unavailable"
    );
}

#[tokio::test]
async fn test_malformed_success_body() {
    let app = Router::new().route("/api/process-pdf", post(|| async { "not json" }));
    let endpoint = spawn_stub(app).await;

    let err = client(&endpoint).extract_assets(&sample_pdf()).await.unwrap_err();
    match err {
        SdkError::FileFailed { file, source } => {
            assert_eq!(file, "inventory.pdf");
            assert!(matches!(*source, SdkError::InvalidResponse(_)));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_connection_refused() {
    // Reserve a port, then free it so nothing is listening
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(&format!("http://{}", addr))
        .extract_assets(&sample_pdf())
        .await
        .unwrap_err();

    match err {
        SdkError::FileFailed { source, .. } => {
            assert!(matches!(*source, SdkError::ConnectionError(_)));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

//! Upload spooling
//!
//! The uploaded PDF is streamed to a temporary file rather than buffered in
//! memory. The file is removed when the [`SpooledUpload`] is dropped, so
//! every exit path of a request (success, model error, parse error) cleans
//! up after itself.

use assetscope_domain::PDF_MIME_TYPE;
use axum::extract::multipart::{Multipart, MultipartError};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::path::Path;
use tempfile::NamedTempFile;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Multipart field carrying the document
pub const UPLOAD_FIELD: &str = "pdfFile";

/// Errors while receiving an upload
#[derive(Debug, Error)]
pub enum UploadError {
    /// Malformed or truncated multipart body
    #[error("{0}")]
    Multipart(#[from] MultipartError),

    /// Temporary file could not be written or read
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

/// A document received from a client and spooled to disk
#[derive(Debug)]
pub struct SpooledUpload {
    file_name: String,
    content_type: String,
    len: u64,
    file: NamedTempFile,
}

impl SpooledUpload {
    /// Client-supplied file name
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Declared content type (defaults to `application/pdf`)
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Number of bytes received
    pub fn len(&self) -> u64 {
        self.len
    }

    /// Whether the upload was empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Location of the spooled bytes
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Read the spooled file back as standard padded base64
    pub async fn read_base64(&self) -> Result<String, UploadError> {
        let bytes = tokio::fs::read(self.file.path()).await?;
        Ok(STANDARD.encode(bytes))
    }
}

/// Receive the `pdfFile` part of a multipart body
///
/// Other fields are skipped. Returns `Ok(None)` when no file part named
/// `pdfFile` is present; a text field with that name does not count.
pub async fn receive_upload(
    multipart: &mut Multipart,
    dir: Option<&Path>,
) -> Result<Option<SpooledUpload>, UploadError> {
    while let Some(mut field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let Some(file_name) = field.file_name().map(str::to_string) else {
            debug!("Ignoring '{}' field without a file name", UPLOAD_FIELD);
            continue;
        };
        let content_type = field
            .content_type()
            .map(str::to_string)
            .unwrap_or_else(|| PDF_MIME_TYPE.to_string());

        let file = match dir {
            Some(dir) => NamedTempFile::new_in(dir)?,
            None => NamedTempFile::new()?,
        };
        let mut out = tokio::fs::File::from_std(file.reopen()?);

        let mut len = 0u64;
        while let Some(chunk) = field.chunk().await? {
            out.write_all(&chunk).await?;
            len += chunk.len() as u64;
        }
        out.flush().await?;

        debug!("Spooled {} ({} bytes) to {}", file_name, len, file.path().display());

        return Ok(Some(SpooledUpload {
            file_name,
            content_type,
            len,
            file,
        }));
    }

    Ok(None)
}

//! Upload module - user-selected documents and PDF validation

use serde::{Deserialize, Serialize};

/// MIME type accepted for submission
pub const PDF_MIME_TYPE: &str = "application/pdf";

/// Leading bytes of every PDF file
const PDF_SIGNATURE: &[u8] = b"%PDF-";

/// A document selected for processing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    /// File name as shown to the user (also the record's `sourceFile`)
    pub name: String,
    /// Declared content type
    pub content_type: String,
    /// Raw file bytes
    pub bytes: Vec<u8>,
}

/// A file excluded from a batch, with the reason shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedFile {
    /// File name
    pub name: String,
    /// Why the file was not submitted
    pub reason: String,
}

impl UploadFile {
    /// Create an upload file
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Create an upload file declared as `application/pdf`
    pub fn pdf(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self::new(name, PDF_MIME_TYPE, bytes)
    }

    /// Check that the file is a PDF, both by declared type and by signature
    ///
    /// Parameters on the content type (`application/pdf; charset=...`) are
    /// ignored.
    pub fn validate_pdf(&self) -> Result<(), RejectedFile> {
        let essence = self
            .content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        if essence != PDF_MIME_TYPE {
            return Err(self.reject(format!(
                "Only PDF files are supported (got '{}')",
                self.content_type
            )));
        }

        if !self.bytes.starts_with(PDF_SIGNATURE) {
            return Err(self.reject("File content is not a PDF document".to_string()));
        }

        Ok(())
    }

    fn reject(&self, reason: String) -> RejectedFile {
        RejectedFile {
            name: self.name.clone(),
            reason,
        }
    }
}

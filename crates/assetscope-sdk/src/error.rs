//! Error types for the AssetScope SDK.

use thiserror::Error;

/// SDK operation errors
#[derive(Debug, Error)]
pub enum SdkError {
    /// Connection error (network, DNS, timeout, etc.)
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Request could not be built
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Non-success response; carries the server's message or a status line
    #[error("{0}")]
    ServerError(String),

    /// Success response with an unreadable body
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Any of the above, attributed to the file being processed
    #[error("Failed to process {file}. Reason: {source}")]
    FileFailed {
        /// Name of the file
        file: String,
        /// Underlying failure
        source: Box<SdkError>,
    },
}

impl SdkError {
    /// Attribute this error to a file
    pub fn for_file(self, file: impl Into<String>) -> Self {
        SdkError::FileFailed {
            file: file.into(),
            source: Box::new(self),
        }
    }
}

impl From<reqwest::Error> for SdkError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() {
            SdkError::ConnectionError(e.to_string())
        } else if e.is_timeout() {
            SdkError::ConnectionError("Request timed out".to_string())
        } else if e.is_builder() {
            SdkError::InvalidRequest(e.to_string())
        } else if e.is_decode() {
            SdkError::InvalidResponse(e.to_string())
        } else {
            SdkError::ConnectionError(e.to_string())
        }
    }
}

impl From<serde_json::Error> for SdkError {
    fn from(e: serde_json::Error) -> Self {
        SdkError::InvalidResponse(format!("JSON parsing error: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_file_failed_display() {
        let err = SdkError::ServerError("No PDF file uploaded.".to_string()).for_file("a.pdf");
        assert_eq!(err.to_string(), "Failed to process a.pdf. Reason: No PDF file uploaded.");
    }

    #[test]
    fn test_file_failed_source_chain() {
        let err = SdkError::ConnectionError("refused".to_string()).for_file("b.pdf");
        let source = err.source().unwrap();
        assert_eq!(source.to_string(), "Connection error: refused");
    }
}

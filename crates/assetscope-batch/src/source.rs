//! Per-file extraction seam

use assetscope_domain::{AssetFields, UploadFile};
use assetscope_sdk::{ExtractionClient, SdkError};
use async_trait::async_trait;
use std::fmt::Display;

/// Anything that can turn one PDF into raw asset field-sets
///
/// The orchestrator only needs the error's display text; it records it as
/// the file's failure reason.
#[async_trait]
pub trait AssetSource: Send + Sync + 'static {
    /// Error type for a failed extraction
    type Error: Display + Send;

    /// Extract assets from a single file
    async fn extract(&self, file: &UploadFile) -> Result<Vec<AssetFields>, Self::Error>;
}

#[async_trait]
impl AssetSource for ExtractionClient {
    type Error = SdkError;

    async fn extract(&self, file: &UploadFile) -> Result<Vec<AssetFields>, SdkError> {
        self.extract_assets(file).await
    }
}

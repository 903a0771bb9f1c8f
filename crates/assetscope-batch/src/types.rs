//! Result types for batch processing

use assetscope_domain::{Asset, RejectedFile};
use serde::{Deserialize, Serialize};

/// A file that was submitted but contributed no records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFailure {
    /// File name
    pub file: String,
    /// Human-readable failure reason
    pub reason: String,
}

/// Result of a batch that produced at least one asset
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchOutcome {
    /// Merged assets, in file-submission order then model order
    pub assets: Vec<Asset>,

    /// Files that failed or timed out
    pub failures: Vec<FileFailure>,

    /// Files excluded before submission
    pub rejected: Vec<RejectedFile>,
}

impl BatchOutcome {
    /// Whether every selected file contributed without error
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty() && self.rejected.is_empty()
    }
}

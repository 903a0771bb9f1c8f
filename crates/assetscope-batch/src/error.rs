//! Error types for batch processing

use crate::types::FileFailure;
use assetscope_domain::RejectedFile;
use thiserror::Error;

/// Errors that block a batch as a whole
///
/// Individual file failures never surface here on their own; they are
/// collected in the outcome. Only an empty selection, a selection with no
/// PDFs, an empty merged result, unusable settings or a fault in the task
/// machinery stop the batch.
#[derive(Error, Debug)]
pub enum BatchError {
    /// Nothing was selected
    #[error("No files selected")]
    NoFilesSelected,

    /// Every selected file failed PDF validation
    #[error("None of the selected files is a PDF ({} rejected)", .rejected.len())]
    NoPdfFiles {
        /// The rejected files with reasons
        rejected: Vec<RejectedFile>,
    },

    /// All files were processed but none yielded an asset
    #[error("No assets were found in the uploaded files, or the files could not be read")]
    NoAssetsFound {
        /// Per-file failures, for display
        failures: Vec<FileFailure>,
    },

    /// Orchestrator settings that cannot run a batch
    #[error("Invalid batch configuration: {0}")]
    InvalidConfig(String),

    /// Task scheduling fault (cancelled task)
    #[error("Batch processing failed: {0}")]
    Orchestration(String),
}

//! Core batch orchestrator implementation

use crate::config::BatchConfig;
use crate::error::BatchError;
use crate::source::AssetSource;
use crate::types::{BatchOutcome, FileFailure};
use assetscope_domain::{Asset, AssetFields, RejectedFile, UploadFile};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::timeout;
use tracing::{debug, info, warn};

type FileResult = (String, Result<Vec<AssetFields>, String>);

/// Runs one extraction per file concurrently and merges the results
pub struct BatchOrchestrator<S: AssetSource> {
    source: Arc<S>,
    config: BatchConfig,
}

impl<S: AssetSource> BatchOrchestrator<S> {
    /// Create a new orchestrator
    pub fn new(source: S, config: BatchConfig) -> Self {
        Self {
            source: Arc::new(source),
            config,
        }
    }

    /// Get the active configuration
    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Process a batch of files
    ///
    /// Non-PDF files are rejected up front. Each remaining file is
    /// extracted independently; a failure or timeout on one file is
    /// recorded and the others continue. The merged list keeps
    /// file-submission order regardless of completion order.
    pub async fn process(&self, files: Vec<UploadFile>) -> Result<BatchOutcome, BatchError> {
        self.config.validate().map_err(BatchError::InvalidConfig)?;

        if files.is_empty() {
            return Err(BatchError::NoFilesSelected);
        }

        let (accepted, rejected) = partition_pdfs(files);
        if accepted.is_empty() {
            return Err(BatchError::NoPdfFiles { rejected });
        }

        info!(
            "Processing {} files ({} rejected, up to {} concurrent)",
            accepted.len(),
            rejected.len(),
            self.config.max_concurrent_files
        );

        let results = self.run_all(accepted).await?;

        let mut assets = Vec::new();
        let mut failures = Vec::new();
        for (name, result) in results {
            match result {
                Ok(fields) => {
                    debug!("{} yielded {} assets", name, fields.len());
                    assets.extend(fields.into_iter().map(|f| Asset::from_fields(f, &name)));
                }
                Err(reason) => {
                    warn!("Error in file {}: {}", name, reason);
                    failures.push(FileFailure { file: name, reason });
                }
            }
        }

        if assets.is_empty() {
            return Err(BatchError::NoAssetsFound { failures });
        }

        info!(
            "Batch complete: {} assets, {} failed files",
            assets.len(),
            failures.len()
        );

        Ok(BatchOutcome {
            assets,
            failures,
            rejected,
        })
    }

    /// Fan out over a JoinSet, gather results by submission index
    async fn run_all(&self, files: Vec<UploadFile>) -> Result<Vec<FileResult>, BatchError> {
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_files));
        let per_file_timeout = self.config.per_file_timeout();
        let count = files.len();

        let mut tasks = JoinSet::new();
        let mut spawned = HashMap::with_capacity(count);
        for (index, file) in files.into_iter().enumerate() {
            let source = Arc::clone(&self.source);
            let semaphore = Arc::clone(&semaphore);
            let name = file.name.clone();

            let handle = tasks.spawn(async move {
                let _permit = semaphore.acquire_owned().await.ok();

                match timeout(per_file_timeout, source.extract(&file)).await {
                    Ok(Ok(fields)) => Ok(fields),
                    Ok(Err(e)) => Err(e.to_string()),
                    Err(_) => Err(format!(
                        "Failed to process {}. Reason: timed out after {}s",
                        file.name,
                        per_file_timeout.as_secs()
                    )),
                }
            });
            spawned.insert(handle.id(), (index, name));
        }

        let mut slots: Vec<Option<FileResult>> = (0..count).map(|_| None).collect();
        while let Some(joined) = tasks.join_next_with_id().await {
            let (id, result) = match joined {
                Ok((id, result)) => (id, result),
                Err(e) if e.is_panic() => {
                    let id = e.id();
                    let name = spawned.get(&id).map(|(_, n)| n.as_str()).unwrap_or("?");
                    warn!("Extraction task for {} panicked", name);
                    (id, Err(format!("Failed to process {}. Reason: {}", name, e)))
                }
                Err(e) => return Err(BatchError::Orchestration(e.to_string())),
            };
            let (index, name) = spawned
                .remove(&id)
                .ok_or_else(|| BatchError::Orchestration(format!("unknown task {}", id)))?;
            slots[index] = Some((name, result));
        }

        Ok(slots.into_iter().flatten().collect())
    }
}

/// Split a selection into valid PDFs and rejection notices, keeping order
fn partition_pdfs(files: Vec<UploadFile>) -> (Vec<UploadFile>, Vec<RejectedFile>) {
    let mut accepted = Vec::with_capacity(files.len());
    let mut rejected = Vec::new();

    for file in files {
        match file.validate_pdf() {
            Ok(()) => accepted.push(file),
            Err(rejection) => {
                warn!("Skipping {}: {}", rejection.name, rejection.reason);
                rejected.push(rejection);
            }
        }
    }

    (accepted, rejected)
}

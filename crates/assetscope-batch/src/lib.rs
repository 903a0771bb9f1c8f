//! AssetScope Batch Orchestrator
//!
//! Turns a user's file selection into one merged, ordered asset list.
//!
//! # Architecture
//!
//! ```text
//! Files → validate PDF → JoinSet (one task per file) → AssetSource → merge by index
//! ```
//!
//! # Key Features
//!
//! - **Isolation**: a failing or slow file never aborts its siblings
//! - **Deterministic order**: results merge in submission order, whichever task finishes first
//! - **Bounded fan-out**: a semaphore caps files in flight
//! - **Per-file deadline**: each extraction runs under a timeout
//!
//! # Example Usage
//!
//! ```no_run
//! use assetscope_batch::{BatchConfig, BatchOrchestrator};
//! use assetscope_domain::UploadFile;
//! use assetscope_sdk::ExtractionClient;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ExtractionClient::new("http://localhost:3000", Duration::from_secs(120))?;
//! let orchestrator = BatchOrchestrator::new(client, BatchConfig::default());
//!
//! let files = vec![UploadFile::pdf("a.pdf", std::fs::read("a.pdf")?)];
//! let outcome = orchestrator.process(files).await?;
//!
//! println!("Assets: {}", outcome.assets.len());
//! println!("Failed files: {}", outcome.failures.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod orchestrator;
mod source;
mod types;


pub use config::BatchConfig;
pub use error::BatchError;
pub use orchestrator::BatchOrchestrator;
pub use source::AssetSource;
pub use types::{BatchOutcome, FileFailure};

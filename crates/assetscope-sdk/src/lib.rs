//! AssetScope Rust SDK
//!
//! Client library for the AssetScope forwarder: uploads one PDF per call and
//! returns the raw asset field-sets the forwarder extracted.
//!
//! # Example
//!
//! ```no_run
//! use assetscope_domain::UploadFile;
//! use assetscope_sdk::ExtractionClient;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), assetscope_sdk::SdkError> {
//! let client = ExtractionClient::new("http://localhost:3000", Duration::from_secs(120))?;
//! let file = UploadFile::pdf("inventory.pdf", std::fs::read("inventory.pdf").unwrap());
//!
//! let assets = client.extract_assets(&file).await?;
//! println!("{} assets", assets.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod client;
mod error;

pub use client::{ExtractionClient, ExtractionResponse, UPLOAD_FIELD};
pub use error::SdkError;

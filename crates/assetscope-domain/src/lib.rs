//! AssetScope Domain Layer
//!
//! Core data model shared by every other AssetScope crate. It defines the
//! asset record extracted from inventory PDFs, the table sort configuration
//! and the pure view-model transformations used for presentation.
//!
//! ## Key Concepts
//!
//! - **Asset**: one physical inventory item (PC, monitor, printer) found in a document
//! - **AssetFields**: the five raw fields the extraction model returns for an asset
//! - **SortConfig**: the active (field, direction) pair governing table order
//! - **TypeCount**: one bucket of the type → count summary used for the chart
//! - **UploadFile**: a user-selected document, validated as PDF before submission
//!
//! ## Architecture
//!
//! - No I/O, no async, no network
//! - Only `serde` (wire shape) and `uuid` (id fallback) as dependencies
//! - Infrastructure implementations live in other crates

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod asset;
pub mod sort;
pub mod upload;
pub mod view;

// Re-exports for convenience
pub use asset::{Asset, AssetFields};
pub use sort::{SortConfig, SortDirection, SortKey};
pub use upload::{RejectedFile, UploadFile, PDF_MIME_TYPE};
pub use view::{aggregate_by_type, sort_assets, TypeCount, UNSPECIFIED_TYPE};

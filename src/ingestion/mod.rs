//! Ingestion entrypoints and implementations.
//!
//! Most callers should use [`ingest`] or [`ingest_from_path`] (from [`unified`]) which:
//!
//! - fail with [`crate::IngestionError::NotFound`] if the path does not exist
//! - pick the format by file extension (or you can override via [`IngestionOptions`])
//! - parse into an in-memory [`crate::types::Table`] and infer its [`crate::types::Schema`]
//! - optionally report success/failure/alerts to an [`IngestionObserver`]
//!
//! Format-specific functions are also available under:
//! - [`csv`]
//! - [`json`]
//! - [`xml`]

pub mod csv;
pub mod json;
pub mod observability;
pub mod records;
pub mod unified;
pub mod xml;

pub use observability::{
    FileObserver, IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats, TracingObserver,
};
pub use unified::{IngestionFormat, IngestionOptions, IngestionRequest, ingest, ingest_from_path};

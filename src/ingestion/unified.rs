//! Unified ingestion entrypoint.
//!
//! Most callers should use [`ingest`] or [`ingest_from_path`], which load a file into an
//! in-memory [`crate::types::Table`] and infer its [`crate::types::Schema`].
//!
//! - The path must exist; this is checked before anything else.
//! - If [`IngestionOptions::format`] is `None`, the ingestion format is chosen from the file
//!   extension (case-insensitive). Content is never sniffed.
//! - If an [`super::observability::IngestionObserver`] is provided, success/failure/alerts are
//!   reported to it. Without one, ingestion emits nothing.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{ErrorKind, IngestionError, IngestionResult};
use crate::types::{Ingested, Table};

use super::observability::{IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats};
use super::{csv, json, xml};

/// Supported ingestion formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IngestionFormat {
    /// Comma-separated values with a header row.
    Csv,
    /// A JSON array of objects, or a single object.
    Json,
    /// An XML document whose root children are records.
    Xml,
}

impl IngestionFormat {
    /// Parse an ingestion format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            "xml" => Some(Self::Xml),
            _ => None,
        }
    }

    /// Lowercase name, matching the file extension.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Xml => "xml",
        }
    }
}

impl fmt::Display for IngestionFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options controlling unified ingestion behavior.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct IngestionOptions {
    /// If `None`, choose the format from the file extension.
    pub format: Option<IngestionFormat>,
    /// Separator joining nested JSON keys into column names.
    pub separator: String,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn IngestionObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: IngestionSeverity,
}

impl fmt::Debug for IngestionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestionOptions")
            .field("format", &self.format)
            .field("separator", &self.separator)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for IngestionOptions {
    fn default() -> Self {
        Self {
            format: None,
            separator: json::DEFAULT_SEPARATOR.to_string(),
            observer: None,
            alert_at_or_above: IngestionSeverity::Critical,
        }
    }
}

/// Ingest a file with default options.
///
/// ```no_run
/// use tabular_ingest::ingestion::ingest;
///
/// # fn main() -> Result<(), tabular_ingest::IngestionError> {
/// let out = ingest("people.csv")?;
/// for field in &out.schema.fields {
///     println!("{}: {}", field.name, field.data_type);
/// }
/// # Ok(())
/// # }
/// ```
pub fn ingest(path: impl AsRef<Path>) -> IngestionResult<Ingested> {
    ingest_from_path(path, &IngestionOptions::default())
}

/// Unified ingestion entry point for path-based sources.
///
/// Steps: existence check, format selection, format-specific parse, schema inference. Any
/// failure aborts the whole call; no partial table is returned.
///
/// When an observer is configured, this function reports:
///
/// - `on_success` on success, with row/column counts
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
///
/// # Examples
///
/// ## Force a format explicitly (override extension inference)
///
/// ```no_run
/// use tabular_ingest::ingestion::{ingest_from_path, IngestionFormat, IngestionOptions};
///
/// # fn main() -> Result<(), tabular_ingest::IngestionError> {
/// let opts = IngestionOptions {
///     format: Some(IngestionFormat::Csv),
///     ..Default::default()
/// };
///
/// // Useful when a file has no extension.
/// let out = ingest_from_path("input_without_extension", &opts)?;
/// println!("rows={}", out.table.row_count());
/// # Ok(())
/// # }
/// ```
///
/// ## Observability (tracing + alert threshold)
///
/// ```no_run
/// use std::sync::Arc;
///
/// use tabular_ingest::ingestion::{
///     ingest_from_path, IngestionOptions, IngestionSeverity, TracingObserver,
/// };
///
/// let opts = IngestionOptions {
///     observer: Some(Arc::new(TracingObserver)),
///     alert_at_or_above: IngestionSeverity::Critical,
///     ..Default::default()
/// };
///
/// // Missing files are Critical and trigger `on_alert` at this threshold.
/// let _err = ingest_from_path("does_not_exist.csv", &opts).unwrap_err();
/// ```
pub fn ingest_from_path(path: impl AsRef<Path>, options: &IngestionOptions) -> IngestionResult<Ingested> {
    let path = path.as_ref();
    let mut ctx = IngestionContext {
        path: path.to_path_buf(),
        format: options.format,
    };

    let result = check_exists(path)
        .and_then(|()| match options.format {
            Some(f) => Ok(f),
            None => infer_format_from_path(path),
        })
        .and_then(|fmt| {
            ctx.format = Some(fmt);
            parse_table(path, fmt, options)
        })
        .map(Ingested::from_table);

    if let Some(obs) = options.observer.as_ref() {
        match &result {
            Ok(out) => obs.on_success(
                &ctx,
                IngestionStats {
                    rows: out.table.row_count(),
                    columns: out.table.column_count(),
                },
            ),
            Err(e) => {
                let sev = severity_for_error(e);
                obs.on_failure(&ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                }
            }
        }
    }

    result
}

fn parse_table(path: &Path, fmt: IngestionFormat, options: &IngestionOptions) -> IngestionResult<Table> {
    match fmt {
        IngestionFormat::Csv => csv::ingest_csv_from_path(path),
        IngestionFormat::Json => json::ingest_json_from_path(path, &options.separator),
        IngestionFormat::Xml => xml::ingest_xml_from_path(path),
    }
}

fn check_exists(path: &Path) -> IngestionResult<()> {
    match path.try_exists() {
        Ok(true) => Ok(()),
        Ok(false) => Err(IngestionError::NotFound {
            path: path.to_path_buf(),
        }),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(IngestionError::NotFound {
            path: path.to_path_buf(),
        }),
        Err(e) => Err(IngestionError::Io(e)),
    }
}

fn severity_for_error(e: &IngestionError) -> IngestionSeverity {
    match e.kind() {
        ErrorKind::NotFound | ErrorKind::Io => IngestionSeverity::Critical,
        ErrorKind::UnsupportedFormat | ErrorKind::Parse => IngestionSeverity::Error,
    }
}

fn infer_format_from_path(path: &Path) -> IngestionResult<IngestionFormat> {
    let ext = path.extension().map(|s| s.to_string_lossy().into_owned());
    ext.as_deref()
        .and_then(IngestionFormat::from_extension)
        .ok_or_else(|| IngestionError::UnsupportedFormat {
            path: path.to_path_buf(),
            extension: ext.clone(),
        })
}

/// Convenience helper for callers that want an owned request object.
///
/// This can be useful if you want to enqueue ingestion work in a job system.
#[derive(Clone)]
pub struct IngestionRequest {
    /// Path to the input file.
    pub path: PathBuf,
    /// Options controlling ingestion.
    pub options: IngestionOptions,
}

impl fmt::Debug for IngestionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestionRequest")
            .field("path", &self.path)
            .field("options", &self.options)
            .finish()
    }
}

impl IngestionRequest {
    /// Request ingestion of `path` with default options.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            options: IngestionOptions::default(),
        }
    }

    /// Execute the request by calling [`ingest_from_path`].
    pub fn run(&self) -> IngestionResult<Ingested> {
        ingest_from_path(&self.path, &self.options)
    }
}

use std::path::PathBuf;

use thiserror::Error;

use crate::ingestion::IngestionFormat;

/// Convenience result type for ingestion operations.
pub type IngestionResult<T> = Result<T, IngestionError>;

/// Error type returned by ingestion functions.
///
/// This is a single error enum shared across CSV/JSON/XML ingestion. Use [`IngestionError::kind`]
/// when you only care about the coarse category (not found / unsupported / parse / io).
#[derive(Debug, Error)]
pub enum IngestionError {
    /// The input path does not exist. Checked before anything else.
    #[error("input not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The file extension is not one of `csv`, `json`, `xml`.
    #[error("unsupported file format '{}' for path ({})", extension.as_deref().unwrap_or("<none>"), path.display())]
    UnsupportedFormat {
        path: PathBuf,
        extension: Option<String>,
    },

    /// Underlying I/O error other than a missing file (e.g. permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parse error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON syntax error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// XML syntax error.
    #[error("xml error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The content is syntactically valid but does not have a tabular shape
    /// (e.g. a JSON scalar at the top level, or an XML document with two roots).
    #[error("malformed {format} input: {message}")]
    Malformed {
        format: IngestionFormat,
        message: String,
    },
}

/// Coarse error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    UnsupportedFormat,
    /// Content is malformed for the claimed format.
    Parse,
    /// Any other failure reading the file.
    Io,
}

impl IngestionError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::UnsupportedFormat { .. } => ErrorKind::UnsupportedFormat,
            Self::Io(_) => ErrorKind::Io,
            Self::Csv(err) => match err.kind() {
                csv::ErrorKind::Io(_) => ErrorKind::Io,
                _ => ErrorKind::Parse,
            },
            Self::Json(err) if err.is_io() => ErrorKind::Io,
            Self::Xml(quick_xml::Error::Io(_)) => ErrorKind::Io,
            Self::Json(_) | Self::Xml(_) | Self::Malformed { .. } => ErrorKind::Parse,
        }
    }

    pub(crate) fn malformed(format: IngestionFormat, message: impl Into<String>) -> Self {
        Self::Malformed {
            format,
            message: message.into(),
        }
    }
}

//! Custom error types for pubreport.
//!
//! Every stage of the pipeline returns `Result<T, ReportError>`. Nothing is
//! caught or retried; errors travel up to `main` and end the run.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for pubreport operations.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Input file could not be read
    #[error("cannot read input {}: {source}", path.display())]
    InputRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input file is not valid JSON
    #[error("input {} is not valid JSON: {source}", path.display())]
    InputJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A record or authorship is missing a field or has the wrong shape
    #[error("schema error at {location}: {message}")]
    Schema {
        /// Where in the document, e.g. `record 3, author 1`
        location: String,
        /// What went wrong, naming the offending field
        message: String,
    },

    /// Report could not be persisted
    #[error("cannot write report {}: {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Workbook construction error
    #[error("spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

/// Result type alias using `ReportError`
pub type Result<T> = std::result::Result<T, ReportError>;

impl ReportError {
    /// Build a schema error from a serde failure at `location`.
    pub(crate) fn schema(location: impl Into<String>, err: impl std::fmt::Display) -> Self {
        ReportError::Schema {
            location: location.into(),
            message: err.to_string(),
        }
    }
}

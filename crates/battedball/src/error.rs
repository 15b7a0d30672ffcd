//! Error types for dataset operations.
//!
//! Errors fall into two groups, using a 4xx/5xx style categorization:
//!
//! - **Input problems** (caller's fault): a malformed filter parameter.
//! - **Internal problems** (our fault): a missing source file, a failed
//!   bootstrap, a failed query, I/O while writing artifacts.
//!
//! Startup errors (`MissingSource`, `Bootstrap`) are fatal: entry points must
//! not begin serving with a missing or broken dataset store.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for dataset operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for dataset operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The source spreadsheet is absent and the table has to be created.
    #[error("source dataset not found: {}", path.display())]
    MissingSource {
        /// Path that was checked.
        path: PathBuf,
    },

    /// The store could not be created, loaded or indexed.
    #[error("failed to bootstrap dataset store at {}: {source}", path.display())]
    Bootstrap {
        /// Path of the store file.
        path: PathBuf,
        /// What went wrong underneath.
        #[source]
        source: BootstrapCause,
    },

    /// A numeric filter parameter could not be parsed.
    #[error("invalid {field}: '{value}' is not a number")]
    InvalidFilter {
        /// Name of the request parameter, e.g. `minExitSpeed`.
        field: &'static str,
        /// The raw value that was supplied.
        value: String,
    },

    /// Executing a query against the store failed.
    #[error("query execution failed")]
    QueryExecution(#[source] rusqlite::Error),

    /// File system operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration or arguments
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Returns `true` if this is an input problem (4xx-style).
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidFilter { .. })
    }

    /// Returns `true` if this is an internal problem (5xx-style).
    #[must_use]
    pub fn is_internal_error(&self) -> bool {
        !self.is_client_error()
    }
}

/// Underlying failure behind [`Error::Bootstrap`].
#[derive(Debug, Error)]
pub enum BootstrapCause {
    /// `SQLite` rejected a statement or the file could not be opened.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Creating the store's parent directory failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The source spreadsheet could not be decoded.
    #[error("source error: {0}")]
    Source(#[from] SourceError),
}

/// Errors raised while decoding the source spreadsheet.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The file extension is not a known tabular format.
    #[error("unsupported source format: {0}")]
    UnsupportedFormat(String),

    /// CSV decoding failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Workbook decoding failed.
    #[error("workbook error: {0}")]
    Workbook(#[from] calamine::Error),

    /// The workbook has no worksheets.
    #[error("workbook contains no worksheets")]
    NoWorksheet,

    /// A required column is missing from the header row.
    #[error("missing required column: {0}")]
    MissingColumn(&'static str),
}

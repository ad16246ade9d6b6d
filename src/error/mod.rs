//! Error handling for the roster reader.
//!
//! Load-aborting failures (unreadable files, unsupported formats, schema
//! mismatches) are reported through [`RosterError`]. Row-level date coercion
//! failures are deliberately not errors; they become null fields plus an
//! aggregated [`crate::loader::LoadWarning`].

use std::path::PathBuf;

/// Specialized error type for roster loading and aggregation
#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    /// Error opening or reading an input file
    #[error("cannot read {path}: {reason}")]
    Unreadable {
        /// Path of the offending file
        path: PathBuf,
        /// Human-readable explanation
        reason: String,
    },

    /// File extension is not one of the supported input formats
    #[error("unsupported file format `{0}` (expected .csv or .xlsx)")]
    UnsupportedFormat(String),

    /// A raw row does not match the declared positional schema
    #[error("schema mismatch for {schema}: expected {expected} columns, found {found} at row {row}")]
    SchemaMismatch {
        /// Name of the schema variant being bound
        schema: &'static str,
        /// Declared column count
        expected: usize,
        /// Column count observed in the raw row
        found: usize,
        /// Zero-based row index in the raw table
        row: usize,
    },

    /// A column name was requested that the schema does not declare
    #[error("schema {schema} has no column named `{column}`")]
    UnknownColumn {
        /// Name of the schema variant
        schema: &'static str,
        /// The requested column name
        column: String,
    },

    /// The requested analysis view name is not in the supported set
    #[error("unknown analysis view `{0}`")]
    UnknownView(String),

    /// Error from the delimited-text parser
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Error from the spreadsheet parser
    #[error("spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::XlsxError),

    /// Any other load error with a descriptive message
    #[error("{0}")]
    Other(String),
}

impl RosterError {
    /// Create an `Unreadable` error for a path with a reason
    pub fn unreadable(path: &std::path::Path, reason: impl Into<String>) -> Self {
        Self::Unreadable {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }
}

/// Result type for roster operations
pub type Result<T> = std::result::Result<T, RosterError>;

//! Error types for the csvrel composition layer.
//!
//! All public APIs return `CsvRelResult<T>` — no panics in library code.

use thiserror::Error;

/// Unified error type for all csvrel operations.
///
/// Variants group into the taxonomy the crate promises: schema errors
/// (unparsable structure), validation errors (missing columns, union
/// incompatibility, decode failures), plan errors (malformed join/union
/// requests), and backend/connection errors. Offending identifiers are
/// embedded in the message so callers never have to re-derive context.
#[derive(Debug, Error)]
pub enum CsvRelError {
    /// Source has no usable structure (e.g. zero header columns)
    #[error("schema error: {0}")]
    Schema(String),

    /// A required column is absent from the source headers
    #[error("missing required column '{column}'")]
    MissingColumn { column: String },

    /// A row could not be decoded into the requested type
    #[error("failed to decode row into {target}: {message}")]
    RowDecode { target: String, message: String },

    /// Union requested over relations with differing column counts
    #[error("union arity mismatch: left has {left} columns, right has {right}")]
    UnionArity { left: usize, right: usize },

    /// Union column names disagree at a position (compared case-insensitively)
    #[error("union column mismatch at position {position}: '{left}' vs '{right}'")]
    UnionColumnMismatch {
        position: usize,
        left: String,
        right: String,
    },

    /// Join kind needs an ON condition but none was given
    #[error("{kind} join requires a join condition")]
    ConditionRequired { kind: String },

    /// Invalid join or set-operation request shape
    #[error("plan error: {0}")]
    Plan(String),

    /// Statement execution failure reported by the backend
    #[error("backend error: {message}")]
    Backend { message: String },

    /// Backend could not be reached or refused a connection
    #[error("connection error ({backend}): {message}")]
    Connection { backend: String, message: String },

    /// Tabular file parse error
    #[error("csv error: {source}")]
    Csv {
        #[from]
        source: csv::Error,
    },

    /// Standard I/O error
    #[error("io error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// Embedded backend mutex poisoned by a panicking holder
    #[error("lock poisoned")]
    LockPoisoned,
}

/// Result type alias for all csvrel operations.
pub type CsvRelResult<T> = Result<T, CsvRelError>;

impl From<serde_json::Error> for CsvRelError {
    fn from(err: serde_json::Error) -> Self {
        CsvRelError::RowDecode {
            target: "json".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<rusqlite::Error> for CsvRelError {
    fn from(err: rusqlite::Error) -> Self {
        CsvRelError::Backend {
            message: err.to_string(),
        }
    }
}

#[cfg(feature = "postgres")]
impl From<postgres::Error> for CsvRelError {
    fn from(err: postgres::Error) -> Self {
        CsvRelError::Backend {
            message: err.to_string(),
        }
    }
}

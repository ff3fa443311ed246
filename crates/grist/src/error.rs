//! Error types for the Grist engine.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for engine operations.
///
/// Every variant is caught at the façade and rendered as an `Error: <message>`
/// string; none escape the engine boundary.
#[derive(Debug, Error)]
pub enum EngineError {
    /// File absent or unreadable.
    #[error("file not found or unreadable: '{path}': {source}")]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Structurally invalid input (bad quoting, duplicate headers, no header).
    #[error("parse error: {0}")]
    Parse(String),

    /// Requested column does not exist in the dataset.
    #[error("column not found: '{0}'")]
    ColumnNotFound(String),

    /// Column holds no numeric values where numbers are required.
    #[error("column '{0}' has no numeric values")]
    NonNumericColumn(String),

    /// Filter operator outside the supported set.
    #[error("unsupported operator: '{0}'")]
    UnsupportedOperator(String),

    /// Aggregate function outside the supported set.
    #[error("unsupported aggregate function: '{0}'")]
    UnsupportedAggregate(String),

    /// Transform type outside the supported set.
    #[error("unknown transform: '{0}'")]
    UnknownTransform(String),

    /// Derived column name collides with an existing column.
    #[error("column '{0}' already exists")]
    DuplicateColumn(String),

    /// Request is malformed (missing/invalid parameters).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Requested path escapes the workspace root.
    #[error("path escapes workspace root: '{0}'")]
    PathTraversal(PathBuf),

    /// Unexpected internal fault (e.g. a panic in compute).
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<csv::Error> for EngineError {
    fn from(err: csv::Error) -> Self {
        EngineError::Parse(err.to_string())
    }
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

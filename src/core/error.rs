//! Error types for the ORM runtime
//!
//! Every fallible operation returns [`Result`]. Errors carry descriptive text
//! meant for developers; the variants separate "the engine rejected this" from
//! "the generated code and the schema disagree".

use std::path::{Path, PathBuf};

/// Result type alias for runtime operations
pub type Result<T> = std::result::Result<T, DatabaseError>;

/// Error types for runtime operations
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// The engine could not open or create the store
    #[error("Failed to open database {}: {message}", .path.display())]
    Open { path: PathBuf, message: String },

    /// The store opened, but only for reading
    #[error("Insufficient permissions, database {} is read-only", .path.display())]
    ReadOnly { path: PathBuf },

    /// Statement text did not compile
    #[error("Failed to prepare statement: {0}")]
    Prepare(String),

    /// A value could not be bound at a position
    #[error("Failed to bind value at position {position}: {message}")]
    Bind { position: usize, message: String },

    /// The scan ended neither cleanly nor by an early stop
    #[error("Statement execution failed: {0}")]
    Execution(String),

    /// The result row does not have as many columns as shapes were supplied
    #[error("Query returned a different number of columns than expected: expected {expected}, got {actual}")]
    ColumnCountMismatch { expected: usize, actual: usize },

    /// A column's storage class does not fit the requested shape
    #[error("Type mismatch in column {column}: expected {expected}, got {actual}")]
    TypeMismatch {
        column: usize,
        expected: &'static str,
        actual: String,
    },

    /// An integer column does not fit into a 32-bit shape
    #[error("Value {value} in column {column} is out of range for int32")]
    OutOfRange { column: usize, value: i64 },

    /// A null shape reached column materialization
    #[error("Column {column} was described with a null shape; generated code is broken")]
    InvalidShape { column: usize },

    /// Closing the handle failed
    #[error("Failed to close database: {0}")]
    Close(String),

    /// SQLite error outside the categories above
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

impl DatabaseError {
    /// Create an open error from the engine's diagnostic
    pub fn open(path: &Path, source: impl std::fmt::Display) -> Self {
        DatabaseError::Open {
            path: path.to_path_buf(),
            message: source.to_string(),
        }
    }

    /// Create a read-only rejection
    pub fn read_only(path: &Path) -> Self {
        DatabaseError::ReadOnly {
            path: path.to_path_buf(),
        }
    }

    /// Create a compile error
    pub fn prepare(source: impl std::fmt::Display) -> Self {
        DatabaseError::Prepare(source.to_string())
    }

    /// Create a bind error for a 1-based position
    pub fn bind(position: usize, source: impl std::fmt::Display) -> Self {
        DatabaseError::Bind {
            position,
            message: source.to_string(),
        }
    }

    /// Create an abnormal execution error
    pub fn execution(source: impl std::fmt::Display) -> Self {
        DatabaseError::Execution(source.to_string())
    }

    /// Create a column count mismatch error
    pub fn column_count_mismatch(expected: usize, actual: usize) -> Self {
        DatabaseError::ColumnCountMismatch { expected, actual }
    }

    /// Create a type mismatch error
    pub fn type_mismatch(column: usize, expected: &'static str, actual: impl ToString) -> Self {
        DatabaseError::TypeMismatch {
            column,
            expected,
            actual: actual.to_string(),
        }
    }

    /// True when the error means the caller's column shapes disagree with the
    /// statement's result, rather than the engine rejecting the query.
    pub fn is_shape_mismatch(&self) -> bool {
        matches!(
            self,
            DatabaseError::ColumnCountMismatch { .. }
                | DatabaseError::TypeMismatch { .. }
                | DatabaseError::OutOfRange { .. }
                | DatabaseError::InvalidShape { .. }
        )
    }
}

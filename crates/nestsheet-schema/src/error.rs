//! Schema error types

use nestsheet_core::ValueKind;
use thiserror::Error;

/// Result type for schema operations
pub type SchemaResult<T> = std::result::Result<T, SchemaError>;

/// Errors raised while analyzing records or laying them out
#[derive(Debug, Error)]
pub enum SchemaError {
    /// A value disagrees with the shape chosen for its column
    #[error("Column '{column}' in record {record}: expected {expected}, found {found}")]
    ShapeConflict {
        column: String,
        record: usize,
        expected: &'static str,
        found: ValueKind,
    },

    /// The sheet rejected a write (too many rows or columns, bad merge)
    #[error("Core error: {0}")]
    Core(#[from] nestsheet_core::Error),
}

//! JSON error types

use thiserror::Error;

/// Result type for JSON operations
pub type JsonResult<T> = std::result::Result<T, JsonError>;

/// Errors that can occur during JSON operations
#[derive(Debug, Error)]
pub enum JsonError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON
    #[error("JSON error: {0}")]
    Serde(#[from] serde_json::Error),

    /// The document is not an array of records
    #[error("Expected a top-level array of objects, found {found}")]
    NotAnArray { found: &'static str },

    /// An array element is not an object
    #[error("Element {index} of the top-level array is not an object")]
    NotAnObject { index: usize },
}

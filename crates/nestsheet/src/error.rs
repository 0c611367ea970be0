//! Conversion error types

use std::path::PathBuf;

use thiserror::Error;

/// Result type for conversions
pub type ConvertResult<T> = std::result::Result<T, ConvertError>;

/// Errors that can occur while converting between formats
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Source is neither `.xlsx` nor `.json`
    #[error("Unsupported file type. Expected .xlsx or .json, got: {}", .0.display())]
    UnsupportedInput(PathBuf),

    /// Source path has no file stem to name the output after
    #[error("Path has no file name: {}", .0.display())]
    MissingFileName(PathBuf),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// XLSX error
    #[error("XLSX error: {0}")]
    Xlsx(#[from] nestsheet_xlsx::XlsxError),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] nestsheet_json::JsonError),

    /// Schema error
    #[error("Schema error: {0}")]
    Schema(#[from] nestsheet_schema::SchemaError),

    /// Core error
    #[error("Core error: {0}")]
    Core(#[from] nestsheet_core::Error),

    /// The workbook has no sheet to read
    #[error("Workbook has no active sheet")]
    NoActiveSheet,
}

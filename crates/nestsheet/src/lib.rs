//! # nestsheet
//!
//! Convert between JSON files holding an array of records and single-sheet
//! spreadsheets whose merged two-row headers describe nested fields.
//!
//! ## Features
//!
//! - Infer a nested schema from a sheet's header rows and read its records
//! - Infer a schema from record shapes and lay it out as merged headers
//! - Merge new records into a spreadsheet written by an earlier run
//!
//! ## Example
//!
//! ```rust,no_run
//! use nestsheet::prelude::*;
//!
//! // Writes out/orders.xlsx, merging with it if it already exists
//! let conversion = convert_file("orders.json", "out", &ConvertOptions::default()).unwrap();
//! assert_eq!(conversion.direction, Direction::RecordsToTabular);
//!
//! // And back again to out/json/orders.json
//! let json = convert_tabular_to_records_and_write_json(&conversion.output, "out/json").unwrap();
//! println!("{} records written to {}", conversion.records, json.display());
//! ```

pub mod convert;
pub mod error;
pub mod options;
pub mod prelude;

pub use convert::{
    convert_file, convert_records_to_tabular, convert_records_to_tabular_with_options,
    convert_tabular_to_records, convert_tabular_to_records_and_write_json, write_records_to_json,
    write_records_to_json_with_options, write_records_to_tabular, Conversion, Direction,
};
pub use error::{ConvertError, ConvertResult};
pub use options::{ConvertOptions, ExistingPolicy};

// Re-export core types
pub use nestsheet_core::{
    CellAddress, CellError, CellRange, CellValue, FieldValue, Record, Scalar, ValueKind, Workbook,
    Worksheet, MAX_COLS, MAX_ROWS,
};

// Re-export I/O and schema types
pub use nestsheet_json::{JsonError, JsonReadOptions, JsonReader, JsonWriteOptions, JsonWriter};
pub use nestsheet_schema::{
    analyze, analyze_with, classify, materialize, read_records, reconcile, reconcile_on, resolve,
    write_records, AnalyzeOptions, MergeMode, RecordSchema, SchemaError, SheetLayout, SheetSchema,
};
pub use nestsheet_xlsx::{XlsxError, XlsxReader, XlsxWriter};

use std::path::Path;

/// Extension trait for Workbook to add file I/O
pub trait WorkbookExt {
    /// Open a workbook from a file
    fn open<P: AsRef<Path>>(path: P) -> ConvertResult<Workbook>;

    /// Save the workbook to a file
    fn save<P: AsRef<Path>>(&self, path: P) -> ConvertResult<()>;
}

fn lowercase_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}

impl WorkbookExt for Workbook {
    fn open<P: AsRef<Path>>(path: P) -> ConvertResult<Workbook> {
        let path = path.as_ref();
        match lowercase_extension(path).as_deref() {
            Some("xlsx") | Some("xlsm") => Ok(XlsxReader::read_file(path)?),
            _ => Err(ConvertError::UnsupportedInput(path.to_path_buf())),
        }
    }

    fn save<P: AsRef<Path>>(&self, path: P) -> ConvertResult<()> {
        let path = path.as_ref();
        match lowercase_extension(path).as_deref() {
            Some("xlsx") => Ok(XlsxWriter::write_file(self, path)?),
            _ => Err(ConvertError::UnsupportedInput(path.to_path_buf())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_rejects_unknown_extension() {
        let err = Workbook::open("data.csv").unwrap_err();
        assert!(matches!(err, ConvertError::UnsupportedInput(_)));
        assert_eq!(
            err.to_string(),
            "Unsupported file type. Expected .xlsx or .json, got: data.csv"
        );
    }

    #[test]
    fn test_save_rejects_unknown_extension() {
        let workbook = Workbook::new();
        assert!(matches!(
            workbook.save("out.ods"),
            Err(ConvertError::UnsupportedInput(_))
        ));
    }

    #[test]
    fn test_extension_case_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Book.XLSX");
        Workbook::new().save(&path).unwrap();
        let workbook = Workbook::open(&path).unwrap();
        assert_eq!(workbook.sheet_count(), 1);
    }
}

//! # nestsheet-core
//!
//! Core data structures shared by the nestsheet crates.
//!
//! This crate provides:
//! - [`CellValue`] - Scalar values stored in worksheet cells
//! - [`CellAddress`] and [`CellRange`] - Cell addressing and ranges
//! - [`Workbook`], [`Worksheet`] - A sparse sheet model with merged regions
//! - [`Record`] and [`FieldValue`] - The tagged value model for nested records
//!
//! ## Example
//!
//! ```rust
//! use nestsheet_core::{CellRange, CellValue, Workbook};
//!
//! let mut workbook = Workbook::new();
//! let sheet = workbook.worksheet_mut(0).unwrap();
//!
//! // Row/column indices are 0-based
//! sheet.set_cell_value_at(0, 0, "addr").unwrap();
//! sheet.set_cell_value_at(1, 0, "city").unwrap();
//! sheet.set_cell_value_at(1, 1, "zip").unwrap();
//! sheet.merge_cells(&CellRange::parse("A1:B1").unwrap()).unwrap();
//!
//! assert_eq!(sheet.get_value_at(1, 1), CellValue::string("zip"));
//! assert_eq!(sheet.max_row(), Some(1));
//! ```

pub mod cell;
pub mod error;
pub mod record;
pub mod workbook;
pub mod worksheet;

// Re-exports for convenience
pub use cell::{CellAddress, CellError, CellRange, CellValue};
pub use error::{Error, Result};
pub use record::{FieldValue, Record, Scalar, ValueKind};
pub use workbook::Workbook;
pub use worksheet::Worksheet;

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u16 = 16_384;

/// Maximum length of a sheet name
pub const MAX_SHEET_NAME_LEN: usize = 31;

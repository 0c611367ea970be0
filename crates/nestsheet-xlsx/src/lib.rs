//! # nestsheet-xlsx
//!
//! XLSX (Office Open XML) reader and writer for nestsheet.
//!
//! Only what the record layout needs survives a round trip: cell values,
//! merged regions, the sheet dimension and the active sheet. Styles,
//! formulas and drawings are not modelled.

pub mod error;
pub mod reader;
pub mod writer;

pub use error::{XlsxError, XlsxResult};
pub use reader::XlsxReader;
pub use writer::XlsxWriter;

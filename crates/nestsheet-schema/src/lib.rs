//! # nestsheet-schema
//!
//! Nested-schema inference between sheets and record sets.
//!
//! - [`classify`] and [`materialize`] read a sheet whose merged headers
//!   describe nested fields back into records.
//! - [`analyze`] infers a [`RecordSchema`] from value shapes and
//!   [`SheetLayout`] places it on a sheet.
//! - [`reconcile`] unions a new record set with previously written records.
//!
//! ## Example
//!
//! ```rust
//! use nestsheet_core::{FieldValue, Record, Worksheet};
//! use nestsheet_schema::{read_records, write_records, AnalyzeOptions};
//!
//! let mut addr = Record::new();
//! addr.insert("city".into(), FieldValue::string("Oslo"));
//! addr.insert("zip".into(), FieldValue::string("0150"));
//! let mut record = Record::new();
//! record.insert("id".into(), FieldValue::number(1.0));
//! record.insert("addr".into(), FieldValue::Mapping(addr));
//!
//! let mut sheet = Worksheet::new("Sheet1");
//! write_records(&[record.clone()], &mut sheet, &AnalyzeOptions::default()).unwrap();
//!
//! // "addr" spans two columns of row 1; its fields label row 2
//! assert_eq!(sheet.merged_regions().len(), 2);
//! assert_eq!(read_records(&sheet), vec![record]);
//! ```

pub mod analyzer;
pub mod classifier;
pub mod error;
pub mod layout;
pub mod materializer;
pub mod reconcile;
pub mod schema;

pub use analyzer::{analyze, analyze_with, AnalyzeOptions};
pub use classifier::{classify, split_suffix};
pub use error::{SchemaError, SchemaResult};
pub use layout::{ColumnLayout, SheetLayout};
pub use materializer::materialize;
pub use reconcile::{merge_key, reconcile, reconcile_on, resolve, MergeMode};
pub use schema::{Column, FlatMember, RecordSchema, SheetSchema, StructArray, StructElement};

use nestsheet_core::{Record, Worksheet};

/// Classify a sheet and read its data rows as records
pub fn read_records(sheet: &Worksheet) -> Vec<Record> {
    let schema = classify(sheet);
    materialize(sheet, &schema)
}

/// Analyze a record set and lay it out on an empty sheet
///
/// Returns the schema the layout was derived from.
pub fn write_records(
    records: &[Record],
    sheet: &mut Worksheet,
    options: &AnalyzeOptions,
) -> SchemaResult<RecordSchema> {
    let schema = analyze_with(records, options)?;
    let layout = SheetLayout::synthesize(&schema)?;
    layout.write_sheet(sheet, records)?;
    Ok(schema)
}

//! Lays a record set out on a sheet: headers, merges and data rows
//!
//! Column groups are placed left to right in a fixed order: simple, flat
//! arrays, single structs, struct arrays. When any struct is present the
//! header spans two rows and scalar headers are merged vertically.

use nestsheet_core::{CellRange, CellValue, Error, FieldValue, Record, Worksheet, MAX_COLS};

use crate::error::SchemaResult;
use crate::schema::RecordSchema;

/// Placement of one record field on the sheet (0-based columns)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnLayout {
    /// One scalar column
    Simple { name: String, column: u16 },
    /// `len` consecutive columns, one per list slot
    Flat { name: String, start: u16, len: usize },
    /// One column per sub-field
    SingleStruct {
        name: String,
        start: u16,
        sub_fields: Vec<String>,
    },
    /// One block of sub-field columns per list slot
    StructArray {
        name: String,
        starts: Vec<u16>,
        sub_fields: Vec<String>,
    },
}

/// Header cells and merges for a [`RecordSchema`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetLayout {
    columns: Vec<ColumnLayout>,
    headers: Vec<(u32, u16, String)>,
    merges: Vec<CellRange>,
    has_struct: bool,
}

/// Allocates consecutive columns
struct ColumnCursor {
    next: usize,
}

impl ColumnCursor {
    fn take(&mut self, width: usize) -> SchemaResult<u16> {
        let start = self.next;
        self.next += width;
        if self.next > usize::from(MAX_COLS) {
            return Err(Error::ColumnOutOfBounds(
                u16::try_from(self.next - 1).unwrap_or(u16::MAX),
                MAX_COLS - 1,
            )
            .into());
        }
        // Bounded by MAX_COLS above
        Ok(start as u16)
    }
}

impl SheetLayout {
    /// Assign columns, header labels and merges for a schema
    pub fn synthesize(schema: &RecordSchema) -> SchemaResult<Self> {
        let has_struct = schema.has_struct();
        let mut layout = SheetLayout {
            columns: Vec::with_capacity(schema.column_count()),
            headers: Vec::new(),
            merges: Vec::new(),
            has_struct,
        };
        let mut cursor = ColumnCursor { next: 0 };

        for name in &schema.simple {
            let column = cursor.take(1)?;
            layout.scalar_header(column, name.clone());
            layout.columns.push(ColumnLayout::Simple {
                name: name.clone(),
                column,
            });
        }

        for (name, &len) in &schema.flat_arrays {
            let start = cursor.take(len)?;
            for i in 0..len {
                layout.scalar_header(start + i as u16, format!("{}_{}", name, i));
            }
            layout.columns.push(ColumnLayout::Flat {
                name: name.clone(),
                start,
                len,
            });
        }

        for (name, sub_fields) in &schema.single_structs {
            let start = cursor.take(sub_fields.len())?;
            layout.struct_header(start, name.clone(), sub_fields);
            layout.columns.push(ColumnLayout::SingleStruct {
                name: name.clone(),
                start,
                sub_fields: sub_fields.clone(),
            });
        }

        for (name, array) in &schema.struct_arrays {
            let mut starts = Vec::with_capacity(array.max_length);
            for i in 0..array.max_length {
                let start = cursor.take(array.sub_fields.len())?;
                layout.struct_header(start, format!("{}_{}", name, i), &array.sub_fields);
                starts.push(start);
            }
            layout.columns.push(ColumnLayout::StructArray {
                name: name.clone(),
                starts,
                sub_fields: array.sub_fields.clone(),
            });
        }

        tracing::debug!(
            columns = cursor.next,
            merges = layout.merges.len(),
            has_struct,
            "synthesized layout"
        );
        Ok(layout)
    }

    fn scalar_header(&mut self, column: u16, label: String) {
        self.headers.push((0, column, label));
        if self.has_struct {
            self.merges
                .push(CellRange::from_indices(0, column, 1, column));
        }
    }

    fn struct_header(&mut self, start: u16, label: String, sub_fields: &[String]) {
        // A struct without sub-fields has no columns to label
        if sub_fields.is_empty() {
            return;
        }
        self.headers.push((0, start, label));
        if sub_fields.len() > 1 {
            let end = start + (sub_fields.len() - 1) as u16;
            self.merges.push(CellRange::from_indices(0, start, 0, end));
        }
        for (i, sub_field) in sub_fields.iter().enumerate() {
            self.headers.push((1, start + i as u16, sub_field.clone()));
        }
    }

    /// Column placements in left-to-right order
    pub fn columns(&self) -> &[ColumnLayout] {
        &self.columns
    }

    /// Merged header regions
    pub fn merges(&self) -> &[CellRange] {
        &self.merges
    }

    /// Whether headers span two rows
    pub fn has_struct(&self) -> bool {
        self.has_struct
    }

    /// 0-based row index of the first data row
    pub fn data_start_row(&self) -> u32 {
        if self.has_struct {
            2
        } else {
            1
        }
    }

    /// Write header labels and merges
    pub fn write_headers(&self, sheet: &mut Worksheet) -> SchemaResult<()> {
        for (row, col, label) in &self.headers {
            sheet.set_cell_value_at(*row, *col, label.as_str())?;
        }
        for range in &self.merges {
            sheet.merge_cells(range)?;
        }
        Ok(())
    }

    /// Write one record into a data row
    ///
    /// Every cell of the row is written, nulls included, so the row counts
    /// toward the sheet's dimension.
    pub fn write_record(&self, sheet: &mut Worksheet, row: u32, record: &Record) -> SchemaResult<()> {
        static NULL: FieldValue = FieldValue::Null;

        for column in &self.columns {
            match column {
                ColumnLayout::Simple { name, column } => {
                    let value = record.get(name).unwrap_or(&NULL);
                    sheet.set_cell_value_at(row, *column, value.to_cell())?;
                }
                ColumnLayout::Flat { name, start, len } => {
                    let items = record
                        .get(name)
                        .and_then(FieldValue::as_sequence)
                        .unwrap_or_default();
                    for i in 0..*len {
                        let cell = items.get(i).map_or(CellValue::Empty, FieldValue::to_cell);
                        sheet.set_cell_value_at(row, start + i as u16, cell)?;
                    }
                }
                ColumnLayout::SingleStruct {
                    name,
                    start,
                    sub_fields,
                } => {
                    let object = record.get(name).and_then(FieldValue::as_mapping);
                    write_object(sheet, row, *start, sub_fields, object)?;
                }
                ColumnLayout::StructArray {
                    name,
                    starts,
                    sub_fields,
                } => {
                    let items = record
                        .get(name)
                        .and_then(FieldValue::as_sequence)
                        .unwrap_or_default();
                    for (i, start) in starts.iter().enumerate() {
                        let object = items.get(i).and_then(FieldValue::as_mapping);
                        write_object(sheet, row, *start, sub_fields, object)?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Write headers and one data row per record into an empty sheet
    pub fn write_sheet(&self, sheet: &mut Worksheet, records: &[Record]) -> SchemaResult<()> {
        self.write_headers(sheet)?;
        let data_start = self.data_start_row();
        for (i, record) in records.iter().enumerate() {
            let row = u32::try_from(i)
                .ok()
                .and_then(|i| i.checked_add(data_start))
                .ok_or(Error::RowOutOfBounds(u32::MAX, nestsheet_core::MAX_ROWS - 1))?;
            self.write_record(sheet, row, record)?;
        }
        tracing::debug!(rows = records.len(), "wrote data rows");
        Ok(())
    }
}

/// Missing objects and missing keys both write nulls
fn write_object(
    sheet: &mut Worksheet,
    row: u32,
    start: u16,
    sub_fields: &[String],
    object: Option<&Record>,
) -> SchemaResult<()> {
    for (i, sub_field) in sub_fields.iter().enumerate() {
        let cell = object
            .and_then(|fields| fields.get(sub_field))
            .map_or(CellValue::Empty, FieldValue::to_cell);
        sheet.set_cell_value_at(row, start + i as u16, cell)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::StructArray;
    use pretty_assertions::assert_eq;

    fn labels(sheet: &Worksheet, row: u32) -> Vec<String> {
        sheet
            .iter_row(row)
            .filter_map(|(_, value)| value.label())
            .collect()
    }

    #[test]
    fn test_simple_only_has_single_header_row() {
        let schema = RecordSchema {
            simple: vec!["id".into(), "name".into()],
            ..Default::default()
        };
        let layout = SheetLayout::synthesize(&schema).unwrap();
        assert!(!layout.has_struct());
        assert_eq!(layout.data_start_row(), 1);
        assert!(layout.merges().is_empty());

        let mut ws = Worksheet::new("Sheet1");
        layout.write_headers(&mut ws).unwrap();
        assert_eq!(labels(&ws, 0), vec!["id", "name"]);
    }

    #[test]
    fn test_category_order_and_merges() {
        let mut schema = RecordSchema {
            simple: vec!["id".into()],
            ..Default::default()
        };
        schema.flat_arrays.insert("tags".into(), 2);
        schema.struct_arrays.insert(
            "items".into(),
            StructArray {
                sub_fields: vec!["n".into(), "q".into()],
                max_length: 2,
            },
        );
        schema
            .single_structs
            .insert("addr".into(), vec!["city".into(), "zip".into()]);

        let layout = SheetLayout::synthesize(&schema).unwrap();
        let mut ws = Worksheet::new("Sheet1");
        layout.write_headers(&mut ws).unwrap();

        // id | tags_0 | tags_1 | addr (2) | items_0 (2) | items_1 (2)
        assert_eq!(
            labels(&ws, 0),
            vec!["id", "tags_0", "tags_1", "addr", "items_0", "items_1"]
        );
        assert_eq!(labels(&ws, 1), vec!["city", "zip", "n", "q", "n", "q"]);
        let merges: Vec<String> = layout.merges().iter().map(|r| r.to_string()).collect();
        assert_eq!(
            merges,
            vec!["A1:A2", "B1:B2", "C1:C2", "D1:E1", "F1:G1", "H1:I1"]
        );
        assert_eq!(layout.data_start_row(), 2);
    }

    #[test]
    fn test_narrow_structs_skip_merges_and_empty_groups_take_no_columns() {
        let mut schema = RecordSchema::default();
        schema.flat_arrays.insert("none".into(), 0);
        schema.single_structs.insert("empty".into(), Vec::new());
        schema.single_structs.insert("one".into(), vec!["k".into()]);

        let layout = SheetLayout::synthesize(&schema).unwrap();
        assert!(layout.merges().is_empty());
        assert_eq!(
            layout.columns()[2],
            ColumnLayout::SingleStruct {
                name: "one".into(),
                start: 0,
                sub_fields: vec!["k".into()]
            }
        );

        let mut ws = Worksheet::new("Sheet1");
        layout.write_headers(&mut ws).unwrap();
        assert_eq!(labels(&ws, 0), vec!["one"]);
        assert_eq!(labels(&ws, 1), vec!["k"]);
    }

    #[test]
    fn test_write_record_pads_and_nulls() {
        let mut schema = RecordSchema {
            simple: vec!["id".into()],
            ..Default::default()
        };
        schema.flat_arrays.insert("tags".into(), 3);
        schema.struct_arrays.insert(
            "items".into(),
            StructArray {
                sub_fields: vec!["n".into()],
                max_length: 2,
            },
        );
        let layout = SheetLayout::synthesize(&schema).unwrap();

        let mut record = Record::new();
        record.insert(
            "tags".into(),
            FieldValue::Sequence(vec![FieldValue::string("a"), FieldValue::Sequence(vec![])]),
        );
        let element: Record = [("n".to_string(), FieldValue::bool(true))]
            .into_iter()
            .collect();
        record.insert(
            "items".into(),
            FieldValue::Sequence(vec![FieldValue::number(1.0), FieldValue::Mapping(element)]),
        );

        let mut ws = Worksheet::new("Sheet1");
        layout.write_sheet(&mut ws, &[record]).unwrap();

        assert_eq!(ws.get_value_at(2, 0), CellValue::Empty);
        assert_eq!(ws.get_value_at(2, 1), CellValue::string("a"));
        assert_eq!(ws.get_value_at(2, 2), CellValue::string("[]"));
        assert_eq!(ws.get_value_at(2, 3), CellValue::Empty);
        // Non-object element writes nulls
        assert_eq!(ws.get_value_at(2, 4), CellValue::Empty);
        assert_eq!(ws.get_value_at(2, 5), CellValue::Boolean(true));
        assert_eq!(ws.max_row(), Some(2));
        assert_eq!(ws.max_column(), Some(5));
    }

    #[test]
    fn test_all_null_rows_extend_dimension() {
        let schema = RecordSchema {
            simple: vec!["a".into()],
            ..Default::default()
        };
        let layout = SheetLayout::synthesize(&schema).unwrap();
        let mut ws = Worksheet::new("Sheet1");
        layout
            .write_sheet(&mut ws, &[Record::new(), Record::new()])
            .unwrap();
        assert_eq!(ws.max_row(), Some(2));
    }

    #[test]
    fn test_too_many_columns() {
        let mut schema = RecordSchema::default();
        schema
            .flat_arrays
            .insert("wide".into(), usize::from(MAX_COLS) + 1);
        assert!(SheetLayout::synthesize(&schema).is_err());
    }
}

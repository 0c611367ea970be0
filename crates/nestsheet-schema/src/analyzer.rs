//! Infers a [`RecordSchema`] from the value shapes in a record set

use indexmap::IndexSet;
use nestsheet_core::{FieldValue, Record, ValueKind};

use crate::error::{SchemaError, SchemaResult};
use crate::schema::{RecordSchema, StructArray};

static NULL: FieldValue = FieldValue::Null;

/// Options for shape analysis
#[derive(Debug, Clone, Default)]
pub struct AnalyzeOptions {
    /// Reject values that disagree with their column's classification
    /// instead of silently dropping them at layout time
    pub strict: bool,
}

/// How a column was classified
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Simple,
    Flat,
    StructArray,
    SingleStruct,
}

/// Union of record keys in first-appearance order
pub fn columns(records: &[Record]) -> Vec<&str> {
    let mut seen: IndexSet<&str> = IndexSet::new();
    for record in records {
        for key in record.keys() {
            seen.insert(key.as_str());
        }
    }
    seen.into_iter().collect()
}

/// Analyze with first-sample classification; never fails
pub fn analyze(records: &[Record]) -> RecordSchema {
    let mut schema = RecordSchema::default();
    for column in columns(records) {
        classify_column(records, column, &mut schema);
    }
    schema
}

/// Analyze with options; strict mode checks every value
pub fn analyze_with(records: &[Record], options: &AnalyzeOptions) -> SchemaResult<RecordSchema> {
    let mut schema = RecordSchema::default();
    for column in columns(records) {
        let shape = classify_column(records, column, &mut schema);
        if options.strict {
            check_column(records, column, shape)?;
        }
    }

    tracing::debug!(
        simple = schema.simple.len(),
        flat_arrays = schema.flat_arrays.len(),
        struct_arrays = schema.struct_arrays.len(),
        single_structs = schema.single_structs.len(),
        strict = options.strict,
        "analyzed record shapes"
    );
    Ok(schema)
}

fn column_values<'a>(
    records: &'a [Record],
    column: &'a str,
) -> impl Iterator<Item = &'a FieldValue> + 'a {
    records
        .iter()
        .map(move |record| record.get(column).unwrap_or(&NULL))
}

fn union_keys<'a>(mappings: impl Iterator<Item = &'a Record>) -> Vec<String> {
    let mut keys: IndexSet<&str> = IndexSet::new();
    for mapping in mappings {
        keys.extend(mapping.keys().map(String::as_str));
    }
    keys.into_iter().map(str::to_string).collect()
}

fn classify_column(records: &[Record], column: &str, schema: &mut RecordSchema) -> Shape {
    let values = || column_values(records, column);

    if values().any(|v| v.as_mapping().is_some()) {
        let sub_fields = union_keys(values().filter_map(FieldValue::as_mapping));
        schema.single_structs.insert(column.to_string(), sub_fields);
        return Shape::SingleStruct;
    }

    if !values().any(|v| v.as_sequence().is_some()) {
        schema.simple.push(column.to_string());
        return Shape::Simple;
    }

    // First sample decides: the first element of the first non-empty list
    let is_struct = values()
        .filter_map(FieldValue::as_sequence)
        .find(|items| !items.is_empty())
        .map_or(false, |items| items[0].as_mapping().is_some());

    let max_length = values()
        .map(|v| v.as_sequence().map_or(0, <[FieldValue]>::len))
        .max()
        .unwrap_or(0);

    if is_struct {
        let sub_fields = union_keys(
            values()
                .filter_map(FieldValue::as_sequence)
                .flatten()
                .filter_map(FieldValue::as_mapping),
        );
        schema.struct_arrays.insert(
            column.to_string(),
            StructArray {
                sub_fields,
                max_length,
            },
        );
        Shape::StructArray
    } else {
        schema.flat_arrays.insert(column.to_string(), max_length);
        Shape::Flat
    }
}

fn check_column(records: &[Record], column: &str, shape: Shape) -> SchemaResult<()> {
    let conflict = |record: usize, expected: &'static str, found: ValueKind| {
        tracing::debug!(column, record, expected, %found, "shape conflict");
        SchemaError::ShapeConflict {
            column: column.to_string(),
            record,
            expected,
            found,
        }
    };

    for (index, value) in column_values(records, column).enumerate() {
        match (shape, value) {
            (_, FieldValue::Null) => {}
            (Shape::Simple, FieldValue::Scalar(_)) => {}
            (Shape::SingleStruct, FieldValue::Mapping(_)) => {}
            (Shape::Flat, FieldValue::Sequence(items)) => {
                if let Some(bad) = items.iter().find(|item| item.as_mapping().is_some()) {
                    return Err(conflict(index, "a list of scalars", bad.kind()));
                }
            }
            (Shape::StructArray, FieldValue::Sequence(items)) => {
                if let Some(bad) = items
                    .iter()
                    .find(|item| !item.is_null() && item.as_mapping().is_none())
                {
                    return Err(conflict(index, "a list of objects", bad.kind()));
                }
            }
            (Shape::Simple, other) => return Err(conflict(index, "a scalar", other.kind())),
            (Shape::SingleStruct, other) => {
                return Err(conflict(index, "an object", other.kind()))
            }
            (Shape::Flat | Shape::StructArray, other) => {
                return Err(conflict(index, "a list", other.kind()))
            }
        }
    }
    Ok(())
}

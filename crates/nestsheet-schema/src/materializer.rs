//! Builds nested records from the data rows of a classified sheet

use nestsheet_core::{FieldValue, Record, Worksheet};

use crate::schema::SheetSchema;

fn cell_field(sheet: &Worksheet, row: u32, position: u32) -> FieldValue {
    // Positions are 1-based; anything outside u16 has no cell
    u16::try_from(position.saturating_sub(1))
        .ok()
        .and_then(|col| sheet.value_at(row, col))
        .map(FieldValue::from_cell)
        .unwrap_or_default()
}

/// Materialize one record per data row, from the first data row through the
/// sheet's last row
pub fn materialize(sheet: &Worksheet, schema: &SheetSchema) -> Vec<Record> {
    let data_start = schema.data_start_row();
    let Some(max_row) = sheet.max_row() else {
        return Vec::new();
    };
    if max_row < data_start {
        return Vec::new();
    }

    let records: Vec<Record> = (data_start..=max_row)
        .map(|row| materialize_row(sheet, schema, row))
        .collect();

    tracing::debug!(
        rows = records.len(),
        first_row = data_start + 1,
        "materialized records"
    );
    records
}

fn materialize_row(sheet: &Worksheet, schema: &SheetSchema, row: u32) -> Record {
    let mut record = Record::new();

    for column in &schema.simple {
        record.insert(column.name.clone(), cell_field(sheet, row, column.position));
    }

    for (base, members) in &schema.flat_groups {
        let values = members
            .iter()
            .map(|member| cell_field(sheet, row, member.position))
            .filter(|value| !value.is_null())
            .collect();
        record.insert(base.clone(), FieldValue::Sequence(values));
    }

    for (base, elements) in &schema.struct_groups {
        let mut objects: Vec<FieldValue> = Vec::new();
        for element in elements {
            let object: Record = element
                .sub_fields
                .iter()
                .zip(&element.positions)
                .map(|(name, &position)| (name.clone(), cell_field(sheet, row, position)))
                .collect();
            // Sparse slots: an element with no values is absent
            if object.values().any(|value| !value.is_null()) {
                objects.push(FieldValue::Mapping(object));
            }
        }

        let value = if schema.is_single_struct(base) {
            objects
                .into_iter()
                .next()
                .unwrap_or_else(|| FieldValue::Mapping(Record::new()))
        } else {
            FieldValue::Sequence(objects)
        };
        record.insert(base.clone(), value);
    }

    record
}

//! Merging incoming records into an existing record set
//!
//! Records are matched on the values of their scalar columns, taken from the
//! first incoming record. A match replaces the earlier record in place; new
//! keys append.

use indexmap::IndexMap;
use nestsheet_core::{FieldValue, Record};
use serde_json::{Map, Value};

use crate::analyzer::columns;

/// What to do with records already present at the target
#[derive(Debug, Clone, Default, PartialEq)]
pub enum MergeMode {
    /// Write the incoming records only
    #[default]
    Replace,
    /// Union with these previously written records
    Merge(Vec<Record>),
}

/// Columns whose value in the first incoming record is not a list or object
///
/// A column missing from that record counts as null and is part of the key.
pub fn merge_key(incoming: &[Record]) -> Vec<String> {
    let Some(first) = incoming.first() else {
        return Vec::new();
    };
    columns(incoming)
        .into_iter()
        .filter(|column| {
            !matches!(
                first.get(*column),
                Some(FieldValue::Sequence(_)) | Some(FieldValue::Mapping(_))
            )
        })
        .map(str::to_string)
        .collect()
}

/// Canonical text of a record's projection onto the key columns
///
/// Keys are emitted sorted, missing values as null.
fn key_text(record: &Record, key: &[String]) -> String {
    let mut sorted: Vec<&String> = key.iter().collect();
    sorted.sort();
    let projection: Map<String, Value> = sorted
        .into_iter()
        .map(|column| {
            let value = record.get(column).map_or(Value::Null, FieldValue::to_json);
            (column.clone(), value)
        })
        .collect();
    Value::Object(projection).to_string()
}

/// Union existing and incoming records, later records winning per key
///
/// The key is derived from the incoming records with [`merge_key`]. An
/// empty key collapses everything into the last record.
pub fn reconcile(existing: Vec<Record>, incoming: Vec<Record>) -> Vec<Record> {
    let key = merge_key(&incoming);
    reconcile_on(existing, incoming, &key)
}

/// Union existing and incoming records on explicit key columns
pub fn reconcile_on(existing: Vec<Record>, incoming: Vec<Record>, key: &[String]) -> Vec<Record> {
    let existing_count = existing.len();
    let incoming_count = incoming.len();

    let mut seen: IndexMap<String, Record> = IndexMap::new();
    for record in existing.into_iter().chain(incoming) {
        seen.insert(key_text(&record, key), record);
    }

    tracing::debug!(
        ?key,
        existing = existing_count,
        incoming = incoming_count,
        merged = seen.len(),
        "reconciled records"
    );
    seen.into_values().collect()
}

/// Apply a merge mode to an incoming record set
///
/// `key` overrides the derived merge key when given.
pub fn resolve(mode: MergeMode, incoming: Vec<Record>, key: Option<&[String]>) -> Vec<Record> {
    match (mode, key) {
        (MergeMode::Replace, _) => incoming,
        (MergeMode::Merge(existing), Some(key)) => reconcile_on(existing, incoming, key),
        (MergeMode::Merge(existing), None) => reconcile(existing, incoming),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(fields: Vec<(&str, FieldValue)>) -> Record {
        fields.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
    }

    fn keyed(id: f64, value: &str) -> Record {
        record(vec![
            ("id", FieldValue::number(id)),
            ("value", FieldValue::string(value)),
            ("tags", FieldValue::Sequence(vec![])),
        ])
    }

    #[test]
    fn test_merge_key_skips_nested_columns() {
        let incoming = vec![
            keyed(1.0, "a"),
            record(vec![("extra", FieldValue::Mapping(Record::new()))]),
        ];
        assert_eq!(merge_key(&incoming), vec!["id", "value", "extra"]);
        assert!(merge_key(&[]).is_empty());
    }

    #[test]
    fn test_key_text_is_sorted_and_fills_nulls() {
        let key = vec!["b".to_string(), "a".to_string()];
        let rec = record(vec![("b", FieldValue::number(2.0))]);
        assert_eq!(key_text(&rec, &key), r#"{"a":null,"b":2}"#);
    }

    #[test]
    fn test_derived_key_includes_every_scalar() {
        let existing = vec![keyed(1.0, "old")];
        let merged = reconcile(existing, vec![keyed(1.0, "old"), keyed(2.0, "x")]);
        assert_eq!(merged, vec![keyed(1.0, "old"), keyed(2.0, "x")]);

        // "value" is part of the derived key, so a changed value is a new row
        let merged = reconcile(merged, vec![keyed(1.0, "new")]);
        assert_eq!(merged.len(), 3);
    }

    #[test]
    fn test_update_by_explicit_key() {
        let key = vec!["id".to_string()];
        let merged = reconcile_on(vec![keyed(1.0, "old")], vec![keyed(1.0, "new")], &key);
        assert_eq!(merged, vec![keyed(1.0, "new")]);

        let merged = reconcile_on(merged, vec![keyed(2.0, "x")], &key);
        assert_eq!(merged, vec![keyed(1.0, "new"), keyed(2.0, "x")]);
    }

    #[test]
    fn test_later_record_replaces_in_place() {
        let first = record(vec![
            ("id", FieldValue::number(1.0)),
            ("tags", FieldValue::Sequence(vec![FieldValue::string("old")])),
        ]);
        let second = record(vec![("id", FieldValue::number(2.0))]);
        let updated = record(vec![
            ("id", FieldValue::number(1.0)),
            ("tags", FieldValue::Sequence(vec![FieldValue::string("new")])),
        ]);

        let merged = reconcile(vec![first, second.clone()], vec![updated.clone()]);
        assert_eq!(merged, vec![updated, second]);
    }

    #[test]
    fn test_empty_key_keeps_last_record() {
        let incoming = vec![record(vec![(
            "tags",
            FieldValue::Sequence(vec![FieldValue::string("z")]),
        )])];
        let merged = reconcile(vec![keyed(1.0, "a"), keyed(2.0, "b")], incoming.clone());
        assert_eq!(merged, incoming);
    }

    #[test]
    fn test_resolve_modes() {
        let incoming = vec![keyed(1.0, "a")];
        assert_eq!(resolve(MergeMode::Replace, incoming.clone(), None), incoming);
        assert_eq!(
            resolve(MergeMode::Merge(incoming.clone()), incoming.clone(), None),
            incoming
        );

        let key = vec!["id".to_string()];
        let merged = resolve(
            MergeMode::Merge(vec![keyed(1.0, "old")]),
            vec![keyed(1.0, "new")],
            Some(key.as_slice()),
        );
        assert_eq!(merged, vec![keyed(1.0, "new")]);
    }
}

//! File-level reads and writes

use nestsheet_core::{FieldValue, Record};
use nestsheet_json::{JsonReadOptions, JsonReader, JsonWriteOptions, JsonWriter};
use pretty_assertions::assert_eq;

#[test]
fn test_write_then_read_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("people.json");

    let mut addr = Record::new();
    addr.insert("city".into(), FieldValue::string("Köln"));
    let mut record = Record::new();
    record.insert("id".into(), FieldValue::number(7.0));
    record.insert("score".into(), FieldValue::number(0.5));
    record.insert("addr".into(), FieldValue::Mapping(addr));
    record.insert("note".into(), FieldValue::Null);

    JsonWriter::write_file(&[record.clone()], &path, &JsonWriteOptions::default()).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("\"city\": \"Köln\""));
    assert!(text.contains("\"id\": 7,"));
    assert!(!text.ends_with('\n'));

    let back = JsonReader::read_file(&path, &JsonReadOptions::default()).unwrap();
    assert_eq!(back, vec![record]);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = JsonReader::read_file(dir.path().join("nope.json"), &JsonReadOptions::default())
        .unwrap_err();
    assert!(matches!(err, nestsheet_json::JsonError::Io(_)));
}

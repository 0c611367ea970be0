//! JSON writer

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::Value;

use crate::error::JsonResult;
use crate::options::JsonWriteOptions;
use nestsheet_core::record::record_to_json_map;
use nestsheet_core::Record;

/// JSON file writer
pub struct JsonWriter;

impl JsonWriter {
    /// Write a record set to a JSON file
    pub fn write_file<P: AsRef<Path>>(
        records: &[Record],
        path: P,
        options: &JsonWriteOptions,
    ) -> JsonResult<()> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), records = records.len(), "writing json");
        let mut writer = BufWriter::new(File::create(path)?);
        Self::write(records, &mut writer, options)?;
        writer.flush()?;
        Ok(())
    }

    /// Write a record set to a writer as a top-level array
    pub fn write<W: Write>(
        records: &[Record],
        mut writer: W,
        options: &JsonWriteOptions,
    ) -> JsonResult<()> {
        let document = Value::Array(
            records
                .iter()
                .map(|record| Value::Object(record_to_json_map(record)))
                .collect(),
        );

        if options.pretty {
            let indent = " ".repeat(options.indent);
            let formatter = PrettyFormatter::with_indent(indent.as_bytes());
            let mut serializer = Serializer::with_formatter(&mut writer, formatter);
            document.serialize(&mut serializer)?;
        } else {
            serde_json::to_writer(&mut writer, &document)?;
        }

        if options.trailing_newline {
            writer.write_all(b"\n")?;
        }
        Ok(())
    }

    /// Render a record set to a string
    pub fn to_string(records: &[Record], options: &JsonWriteOptions) -> JsonResult<String> {
        let mut buf = Vec::new();
        Self::write(records, &mut buf, options)?;
        // serde_json only emits UTF-8
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nestsheet_core::FieldValue;
    use pretty_assertions::assert_eq;

    fn sample() -> Vec<Record> {
        let mut record = Record::new();
        record.insert("name".into(), FieldValue::string("Zoë"));
        record.insert("n".into(), FieldValue::number(2.0));
        record.insert(
            "tags".into(),
            FieldValue::Sequence(vec![FieldValue::string("a")]),
        );
        vec![record]
    }

    #[test]
    fn test_pretty_two_space_literal_utf8() {
        let out = JsonWriter::to_string(&sample(), &JsonWriteOptions::default()).unwrap();
        assert_eq!(
            out,
            "[\n  {\n    \"name\": \"Zoë\",\n    \"n\": 2,\n    \"tags\": [\n      \"a\"\n    ]\n  }\n]"
        );
    }

    #[test]
    fn test_compact_with_newline() {
        let options = JsonWriteOptions {
            pretty: false,
            trailing_newline: true,
            ..Default::default()
        };
        let out = JsonWriter::to_string(&sample(), &options).unwrap();
        assert_eq!(out, "[{\"name\":\"Zoë\",\"n\":2,\"tags\":[\"a\"]}]\n");
    }

    #[test]
    fn test_empty_set() {
        let out = JsonWriter::to_string(&[], &JsonWriteOptions::default()).unwrap();
        assert_eq!(out, "[]");
    }
}

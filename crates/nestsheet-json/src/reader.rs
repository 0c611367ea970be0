//! JSON reader

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde_json::Value;

use crate::error::{JsonError, JsonResult};
use crate::options::JsonReadOptions;
use nestsheet_core::record::record_from_json_map;
use nestsheet_core::Record;

/// JSON file reader
pub struct JsonReader;

impl JsonReader {
    /// Read a JSON file into a record set
    pub fn read_file<P: AsRef<Path>>(path: P, options: &JsonReadOptions) -> JsonResult<Vec<Record>> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "reading json");
        let file = File::open(path)?;
        Self::read(BufReader::new(file), options)
    }

    /// Read JSON from a reader into a record set
    pub fn read<R: Read>(reader: R, options: &JsonReadOptions) -> JsonResult<Vec<Record>> {
        let document: Value = serde_json::from_reader(reader)?;
        Self::from_value(document, options)
    }

    /// Convert an already-parsed document into a record set
    pub fn from_value(document: Value, options: &JsonReadOptions) -> JsonResult<Vec<Record>> {
        let records = match document {
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(index, item)| match item {
                    Value::Object(fields) => Ok(record_from_json_map(fields)),
                    _ => Err(JsonError::NotAnObject { index }),
                })
                .collect::<JsonResult<Vec<_>>>()?,
            Value::Object(fields) if options.allow_single_object => {
                vec![record_from_json_map(fields)]
            }
            other => {
                return Err(JsonError::NotAnArray {
                    found: kind_name(&other),
                })
            }
        };

        tracing::debug!(records = records.len(), "parsed record set");
        Ok(records)
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

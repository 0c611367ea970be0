//! Nested record values
//!
//! A [`Record`] is an insertion-ordered map from field name to a
//! [`FieldValue`]. Every value is one of four shapes: null, a scalar, a
//! sequence, or a mapping. The schema engine matches on these shapes
//! exhaustively instead of probing runtime types.

use std::fmt;

use indexmap::IndexMap;
use serde_json::{Map, Number, Value};

use crate::cell::CellValue;

/// A single row of nested data, keyed by field name in insertion order
pub type Record = IndexMap<String, FieldValue>;

/// Largest integer magnitude an f64 represents exactly (2^53)
const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0;

/// A scalar leaf value
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// true / false
    Bool(bool),
    /// Any number; spreadsheets only know f64
    Number(f64),
    /// Text
    String(String),
}

/// The shape-tagged value of one record field
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FieldValue {
    /// Missing or empty
    #[default]
    Null,
    /// A scalar leaf
    Scalar(Scalar),
    /// An ordered list of values
    Sequence(Vec<FieldValue>),
    /// A nested object
    Mapping(Record),
}

/// Shape category of a [`FieldValue`], used in diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Scalar,
    Sequence,
    Mapping,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueKind::Null => "null",
            ValueKind::Scalar => "scalar",
            ValueKind::Sequence => "sequence",
            ValueKind::Mapping => "mapping",
        })
    }
}

impl FieldValue {
    /// Build a string value
    pub fn string<S: Into<String>>(s: S) -> Self {
        FieldValue::Scalar(Scalar::String(s.into()))
    }

    /// Build a numeric value
    pub fn number(n: f64) -> Self {
        FieldValue::Scalar(Scalar::Number(n))
    }

    /// Build a boolean value
    pub fn bool(b: bool) -> Self {
        FieldValue::Scalar(Scalar::Bool(b))
    }

    /// The shape of this value
    pub fn kind(&self) -> ValueKind {
        match self {
            FieldValue::Null => ValueKind::Null,
            FieldValue::Scalar(_) => ValueKind::Scalar,
            FieldValue::Sequence(_) => ValueKind::Sequence,
            FieldValue::Mapping(_) => ValueKind::Mapping,
        }
    }

    /// Check for null
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Borrow the elements of a sequence
    pub fn as_sequence(&self) -> Option<&[FieldValue]> {
        match self {
            FieldValue::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Borrow the fields of a mapping
    pub fn as_mapping(&self) -> Option<&Record> {
        match self {
            FieldValue::Mapping(fields) => Some(fields),
            _ => None,
        }
    }

    /// Read a cell as a field value
    ///
    /// Error cells become their display text.
    pub fn from_cell(cell: &CellValue) -> Self {
        match cell {
            CellValue::Empty => FieldValue::Null,
            CellValue::Boolean(b) => FieldValue::bool(*b),
            CellValue::Number(n) => FieldValue::number(*n),
            CellValue::String(s) => FieldValue::string(s.clone()),
            CellValue::Error(e) => FieldValue::string(e.as_str()),
        }
    }

    /// Render this value into a single cell
    ///
    /// Sequences and mappings cannot span cells at this depth, so they are
    /// stored as their compact JSON text.
    pub fn to_cell(&self) -> CellValue {
        match self {
            FieldValue::Null => CellValue::Empty,
            FieldValue::Scalar(Scalar::Bool(b)) => CellValue::Boolean(*b),
            FieldValue::Scalar(Scalar::Number(n)) => CellValue::Number(*n),
            FieldValue::Scalar(Scalar::String(s)) => CellValue::String(s.clone()),
            FieldValue::Sequence(_) | FieldValue::Mapping(_) => {
                CellValue::String(self.to_json().to_string())
            }
        }
    }

    /// Convert into a `serde_json` value
    ///
    /// Integral numbers within f64's exact range render as JSON integers;
    /// non-finite numbers render as null.
    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Null => Value::Null,
            FieldValue::Scalar(Scalar::Bool(b)) => Value::Bool(*b),
            FieldValue::Scalar(Scalar::Number(n)) => number_to_json(*n),
            FieldValue::Scalar(Scalar::String(s)) => Value::String(s.clone()),
            FieldValue::Sequence(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            FieldValue::Mapping(fields) => Value::Object(record_to_json_map(fields)),
        }
    }

    /// Convert from a `serde_json` value
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::bool(b),
            // Every serde_json number has an f64 approximation
            Value::Number(n) => FieldValue::number(n.as_f64().unwrap_or(f64::NAN)),
            Value::String(s) => FieldValue::string(s),
            Value::Array(items) => {
                FieldValue::Sequence(items.into_iter().map(Self::from_json).collect())
            }
            Value::Object(fields) => FieldValue::Mapping(record_from_json_map(fields)),
        }
    }
}

impl From<Scalar> for FieldValue {
    fn from(s: Scalar) -> Self {
        FieldValue::Scalar(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::string(s)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::number(n)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::number(n as f64)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::bool(b)
    }
}

impl From<Vec<FieldValue>> for FieldValue {
    fn from(items: Vec<FieldValue>) -> Self {
        FieldValue::Sequence(items)
    }
}

impl From<Record> for FieldValue {
    fn from(fields: Record) -> Self {
        FieldValue::Mapping(fields)
    }
}

fn number_to_json(n: f64) -> Value {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < MAX_EXACT_INT {
        Value::Number(Number::from(n as i64))
    } else {
        Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null)
    }
}

/// Convert a record into a JSON object map, keeping field order
pub fn record_to_json_map(record: &Record) -> Map<String, Value> {
    record
        .iter()
        .map(|(k, v)| (k.clone(), v.to_json()))
        .collect()
}

/// Convert a JSON object map into a record, keeping field order
pub fn record_from_json_map(map: Map<String, Value>) -> Record {
    map.into_iter()
        .map(|(k, v)| (k, FieldValue::from_json(v)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_json_conversion_keeps_shape_and_order() {
        let value = json!({"z": 1, "a": [1.5, null, "x"], "m": {"k": true}});
        let field = FieldValue::from_json(value.clone());

        let fields = field.as_mapping().unwrap();
        assert_eq!(fields.keys().collect::<Vec<_>>(), vec!["z", "a", "m"]);
        assert_eq!(fields["a"].kind(), ValueKind::Sequence);
        assert_eq!(fields["m"].kind(), ValueKind::Mapping);

        assert_eq!(field.to_json(), value);
    }

    #[test]
    fn test_integral_numbers_render_as_integers() {
        assert_eq!(FieldValue::number(3.0).to_json(), json!(3));
        assert_eq!(FieldValue::number(-0.0).to_json(), json!(0));
        assert_eq!(FieldValue::number(2.25).to_json(), json!(2.25));
        assert_eq!(FieldValue::number(1e300).to_json(), json!(1e300));
        assert_eq!(FieldValue::number(f64::NAN).to_json(), Value::Null);
    }

    #[test]
    fn test_cell_conversion() {
        use crate::CellError;

        assert_eq!(FieldValue::from_cell(&CellValue::Empty), FieldValue::Null);
        assert_eq!(
            FieldValue::from_cell(&CellValue::Number(4.0)),
            FieldValue::number(4.0)
        );
        assert_eq!(
            FieldValue::from_cell(&CellValue::Error(CellError::Na)),
            FieldValue::string("#N/A")
        );

        assert_eq!(FieldValue::Null.to_cell(), CellValue::Empty);
        assert_eq!(FieldValue::bool(true).to_cell(), CellValue::Boolean(true));
        assert_eq!(
            FieldValue::Sequence(vec![FieldValue::number(1.0), FieldValue::string("a")]).to_cell(),
            CellValue::string(r#"[1,"a"]"#)
        );
    }
}

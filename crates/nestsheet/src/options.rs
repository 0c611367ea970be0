//! Conversion options

use nestsheet_json::{JsonReadOptions, JsonWriteOptions};

/// What to do when the target spreadsheet already exists
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExistingPolicy {
    /// Read the existing rows back and merge the new records into them
    #[default]
    MergeIfExists,
    /// Replace the file with the new records only
    Overwrite,
}

/// Options for a conversion
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Handling of an existing spreadsheet target
    pub existing: ExistingPolicy,
    /// Fail on values that disagree with their column's inferred shape
    pub strict_shapes: bool,
    /// Columns identifying a record when merging; derived from the
    /// incoming records when `None`
    pub merge_key: Option<Vec<String>>,
    /// How JSON sources are parsed
    pub json_read: JsonReadOptions,
    /// How JSON output is formatted
    pub json: JsonWriteOptions,
}

//! Prelude module - common imports for nestsheet users
//!
//! ```rust
//! use nestsheet::prelude::*;
//! ```

pub use crate::{
    // Entry points
    convert_file,
    convert_records_to_tabular,
    convert_records_to_tabular_with_options,
    convert_tabular_to_records,
    convert_tabular_to_records_and_write_json,
    write_records_to_json,
    write_records_to_tabular,

    // Conversion types
    Conversion,
    ConvertError,
    ConvertOptions,
    ConvertResult,
    Direction,
    ExistingPolicy,
    MergeMode,

    // Value model
    FieldValue,
    Record,
    Scalar,

    // Main types
    Workbook,
    // Extension traits
    WorkbookExt,
    Worksheet,
};

//! # nestsheet-json
//!
//! Reader and writer for JSON files holding an array of records.

mod error;
mod options;
mod reader;
mod writer;

pub use error::{JsonError, JsonResult};
pub use options::{JsonReadOptions, JsonWriteOptions};
pub use reader::JsonReader;
pub use writer::JsonWriter;

//! JSON options

/// Options for reading JSON files
#[derive(Debug, Clone, Default)]
pub struct JsonReadOptions {
    /// Accept a lone top-level object as a one-record set
    pub allow_single_object: bool,
}

/// Options for writing JSON files
#[derive(Debug, Clone)]
pub struct JsonWriteOptions {
    /// Pretty-print (default: true)
    pub pretty: bool,
    /// Spaces per indent level when pretty-printing
    pub indent: usize,
    /// End the file with a newline
    pub trailing_newline: bool,
}

impl Default for JsonWriteOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: 2,
            trailing_newline: false,
        }
    }
}

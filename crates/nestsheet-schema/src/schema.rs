//! Schema types produced by the two analysis directions
//!
//! [`SheetSchema`] describes an existing sheet's columns and is built by the
//! classifier. [`RecordSchema`] describes a record set and drives layout.
//! Column positions in a [`SheetSchema`] are 1-based, like the column
//! numbers a spreadsheet user sees.

use indexmap::{IndexMap, IndexSet};

/// A single spreadsheet column holding a scalar field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Header text
    pub name: String,
    /// 1-based column number
    pub position: u32,
}

/// One column of a flat group (`tags_0`, `tags_1`, ...)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatMember {
    /// Full header text, suffix included
    pub header: String,
    /// Numeric suffix, the list index
    pub suffix: u64,
    /// 1-based column number
    pub position: u32,
}

/// One element of a struct group: a merged header over its sub-field columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructElement {
    /// List index parsed from the header suffix (0 for single structs)
    pub index: u64,
    /// Sub-field names read from header row 2
    pub sub_fields: Vec<String>,
    /// 1-based column numbers, parallel to `sub_fields`
    pub positions: Vec<u32>,
}

/// Column classification of an existing sheet
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetSchema {
    /// Scalar columns in column order
    pub simple: Vec<Column>,
    /// Homogeneous list columns keyed by base name, members sorted by suffix
    pub flat_groups: IndexMap<String, Vec<FlatMember>>,
    /// List-of-object (or single object) columns keyed by base name,
    /// elements sorted by index
    pub struct_groups: IndexMap<String, Vec<StructElement>>,
    /// Struct bases whose header carried no suffix
    pub single_structs: IndexSet<String>,
    /// Row 2 belongs to the header, signalled by merges in row 1
    pub two_row_header: bool,
}

impl SheetSchema {
    /// Whether the sheet uses a second header row
    pub fn has_struct(&self) -> bool {
        self.two_row_header || !self.struct_groups.is_empty()
    }

    /// 0-based row index of the first data row
    pub fn data_start_row(&self) -> u32 {
        if self.has_struct() {
            2
        } else {
            1
        }
    }

    /// Check whether a struct base unwraps to a single object
    pub fn is_single_struct(&self, base: &str) -> bool {
        self.single_structs.contains(base)
    }
}

/// Shape of a list-of-object column
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructArray {
    /// Stable union of element keys
    pub sub_fields: Vec<String>,
    /// Longest list across the record set
    pub max_length: usize,
}

/// Column classification of a record set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordSchema {
    /// Scalar columns
    pub simple: Vec<String>,
    /// List-of-scalar columns and their longest length
    pub flat_arrays: IndexMap<String, usize>,
    /// List-of-object columns
    pub struct_arrays: IndexMap<String, StructArray>,
    /// Embedded-object columns and their sub-fields
    pub single_structs: IndexMap<String, Vec<String>>,
}

impl RecordSchema {
    /// Whether the laid-out sheet needs a second header row
    pub fn has_struct(&self) -> bool {
        !self.struct_arrays.is_empty() || !self.single_structs.is_empty()
    }

    /// Number of columns analyzed
    pub fn column_count(&self) -> usize {
        self.simple.len()
            + self.flat_arrays.len()
            + self.struct_arrays.len()
            + self.single_structs.len()
    }
}

//! Cell storage implementation
//!
//! Sparse, row-based storage for worksheet cells. Only non-empty values are
//! kept, but every write (including writes of [`CellValue::Empty`]) extends
//! the sheet's dimension so trailing blank rows survive a save/load cycle.

use std::collections::BTreeMap;

use super::{CellAddress, CellRange, CellValue};

/// Sparse row-based storage for worksheet cells
///
/// Structure: `BTreeMap<row_index, BTreeMap<col_index, CellValue>>`
#[derive(Debug, Default)]
pub struct CellStorage {
    /// Row index → column map
    rows: BTreeMap<u32, BTreeMap<u16, CellValue>>,

    /// Merged cell regions, in insertion order
    merged_regions: Vec<CellRange>,

    /// Furthest (row, col) ever written, whether or not a value was kept
    extent: Option<(u32, u16)>,
}

impl CellStorage {
    /// Create a new empty cell storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a cell value
    pub fn get(&self, row: u32, col: u16) -> Option<&CellValue> {
        self.rows.get(&row).and_then(|r| r.get(&col))
    }

    /// Set a cell value
    ///
    /// Empty values remove the cell but still count towards the extent.
    pub fn set(&mut self, row: u32, col: u16, value: CellValue) {
        self.touch(row, col);

        if value.is_empty() {
            self.remove(row, col);
        } else {
            self.rows.entry(row).or_default().insert(col, value);
        }
    }

    /// Remove a cell
    pub fn remove(&mut self, row: u32, col: u16) -> Option<CellValue> {
        let row_map = self.rows.get_mut(&row)?;
        let removed = row_map.remove(&col);
        if row_map.is_empty() {
            self.rows.remove(&row);
        }
        removed
    }

    /// Extend the extent to cover a position without storing anything
    pub fn touch(&mut self, row: u32, col: u16) {
        self.extent = Some(match self.extent {
            Some((r, c)) => (r.max(row), c.max(col)),
            None => (row, col),
        });
    }

    /// Get the number of non-empty cells
    pub fn cell_count(&self) -> usize {
        self.rows.values().map(|r| r.len()).sum()
    }

    /// Check if storage holds no values
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get the bounds of cells holding a value
    ///
    /// Returns (min_row, min_col, max_row, max_col) or None if empty
    pub fn used_bounds(&self) -> Option<(u32, u16, u32, u16)> {
        let min_row = *self.rows.keys().next()?;
        let max_row = *self.rows.keys().next_back()?;

        let mut min_col = u16::MAX;
        let mut max_col = 0u16;
        for cols in self.rows.values() {
            if let Some(&col) = cols.keys().next() {
                min_col = min_col.min(col);
            }
            if let Some(&col) = cols.keys().next_back() {
                max_col = max_col.max(col);
            }
        }

        Some((min_row, min_col, max_row, max_col))
    }

    /// Bottom-right corner of everything written or merged
    pub fn extent(&self) -> Option<(u32, u16)> {
        let merged = self
            .merged_regions
            .iter()
            .map(|r| (r.end.row, r.end.col))
            .reduce(|(r1, c1), (r2, c2)| (r1.max(r2), c1.max(c2)));

        [self.extent, merged]
            .into_iter()
            .flatten()
            .reduce(|(r1, c1), (r2, c2)| (r1.max(r2), c1.max(c2)))
    }

    /// Iterate over cells in a specific row
    pub fn iter_row(&self, row: u32) -> impl Iterator<Item = (u16, &CellValue)> {
        self.rows
            .get(&row)
            .into_iter()
            .flat_map(|cols| cols.iter().map(|(&col, value)| (col, value)))
    }

    /// Get merged regions
    pub fn merged_regions(&self) -> &[CellRange] {
        &self.merged_regions
    }

    /// Add a merged region (no overlap check)
    pub fn add_merged_region(&mut self, range: CellRange) {
        self.merged_regions.push(range);
    }

    /// Check if a cell is part of a merged region
    pub fn is_merged(&self, row: u32, col: u16) -> bool {
        let addr = CellAddress::new(row, col);
        self.merged_regions.iter().any(|r| r.contains(&addr))
    }
}

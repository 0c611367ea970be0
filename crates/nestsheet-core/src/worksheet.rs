//! Worksheet type

use crate::cell::{CellAddress, CellRange, CellStorage, CellValue};
use crate::error::{Error, Result};
use crate::{MAX_COLS, MAX_ROWS};

/// A worksheet (single sheet in a workbook)
#[derive(Debug)]
pub struct Worksheet {
    /// Sheet name
    name: String,
    /// Cell storage
    cells: CellStorage,
}

impl Worksheet {
    /// Create a new worksheet with the given name
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            cells: CellStorage::new(),
        }
    }

    /// Get the sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    // === Cell Access ===

    /// Borrow a cell value by indices, `None` for empty cells
    pub fn value_at(&self, row: u32, col: u16) -> Option<&CellValue> {
        self.cells.get(row, col)
    }

    /// Get cell value by indices
    pub fn get_value_at(&self, row: u32, col: u16) -> CellValue {
        self.cells.get(row, col).cloned().unwrap_or_default()
    }

    /// Get cell value by address string (e.g., "B2")
    pub fn get_value(&self, address: &str) -> Result<CellValue> {
        let addr = CellAddress::parse(address)?;
        Ok(self.get_value_at(addr.row, addr.col))
    }

    // === Cell Modification ===

    /// Set a cell value by address string
    pub fn set_cell_value<V: Into<CellValue>>(&mut self, address: &str, value: V) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.set_cell_value_at(addr.row, addr.col, value)
    }

    /// Set a cell value by row and column indices
    ///
    /// Writing [`CellValue::Empty`] clears the cell but still extends the
    /// sheet's dimension.
    pub fn set_cell_value_at<V: Into<CellValue>>(
        &mut self,
        row: u32,
        col: u16,
        value: V,
    ) -> Result<()> {
        self.validate_cell_position(row, col)?;
        self.cells.set(row, col, value.into());
        Ok(())
    }

    /// Extend the sheet's dimension to include a position
    pub fn extend_dimension(&mut self, row: u32, col: u16) -> Result<()> {
        self.validate_cell_position(row, col)?;
        self.cells.touch(row, col);
        Ok(())
    }

    // === Bounds ===

    /// Get the used range (bounds of all non-empty cells)
    pub fn used_range(&self) -> Option<CellRange> {
        self.cells
            .used_bounds()
            .map(|(min_row, min_col, max_row, max_col)| {
                CellRange::from_indices(min_row, min_col, max_row, max_col)
            })
    }

    /// Range from A1 to the furthest written or merged cell
    pub fn dimension(&self) -> Option<CellRange> {
        self.cells
            .extent()
            .map(|(row, col)| CellRange::from_indices(0, 0, row, col))
    }

    /// Last row index (0-based) inside the dimension
    pub fn max_row(&self) -> Option<u32> {
        self.cells.extent().map(|(row, _)| row)
    }

    /// Last column index (0-based) inside the dimension
    pub fn max_column(&self) -> Option<u16> {
        self.cells.extent().map(|(_, col)| col)
    }

    // === Merged Cells ===

    /// Get merged regions
    pub fn merged_regions(&self) -> &[CellRange] {
        self.cells.merged_regions()
    }

    /// Merge cells
    ///
    /// Fails when the range overlaps an existing merged region.
    pub fn merge_cells(&mut self, range: &CellRange) -> Result<()> {
        self.validate_cell_position(range.end.row, range.end.col)?;
        if let Some(existing) = self
            .cells
            .merged_regions()
            .iter()
            .find(|existing| range.overlaps(existing))
        {
            return Err(Error::MergedCellConflict(format!(
                "{} (conflicts with {})",
                range, existing
            )));
        }
        self.cells.add_merged_region(*range);
        Ok(())
    }

    /// Check if a cell lies inside a merged region
    pub fn is_merged(&self, row: u32, col: u16) -> bool {
        self.cells.is_merged(row, col)
    }

    // === Iteration ===

    /// Get the number of non-empty cells
    pub fn cell_count(&self) -> usize {
        self.cells.cell_count()
    }

    /// Check if the worksheet holds no values
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate over the non-empty cells of one row
    pub fn iter_row(&self, row: u32) -> impl Iterator<Item = (u16, &CellValue)> {
        self.cells.iter_row(row)
    }

    fn validate_cell_position(&self, row: u32, col: u16) -> Result<()> {
        if row >= MAX_ROWS {
            return Err(Error::RowOutOfBounds(row, MAX_ROWS - 1));
        }
        if col >= MAX_COLS {
            return Err(Error::ColumnOutOfBounds(col, MAX_COLS - 1));
        }
        Ok(())
    }
}

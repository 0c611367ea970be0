//! Workbook type - the document holding one or more worksheets

use crate::error::{Error, Result};
use crate::worksheet::Worksheet;
use crate::MAX_SHEET_NAME_LEN;

/// A workbook (spreadsheet document)
///
/// Conversions only ever look at the active sheet, but files with several
/// sheets load and save intact.
#[derive(Debug)]
pub struct Workbook {
    /// Worksheets in the workbook
    worksheets: Vec<Worksheet>,
    /// Active sheet index
    active_sheet: usize,
}

impl Workbook {
    /// Create a new workbook with one empty worksheet named "Sheet1"
    pub fn new() -> Self {
        Self {
            worksheets: vec![Worksheet::new("Sheet1")],
            active_sheet: 0,
        }
    }

    /// Create an empty workbook with no worksheets
    pub fn empty() -> Self {
        Self {
            worksheets: Vec::new(),
            active_sheet: 0,
        }
    }

    /// Get the number of worksheets
    pub fn sheet_count(&self) -> usize {
        self.worksheets.len()
    }

    /// Check if the workbook has no worksheets
    pub fn is_empty(&self) -> bool {
        self.worksheets.is_empty()
    }

    /// Get a worksheet by index
    pub fn worksheet(&self, index: usize) -> Option<&Worksheet> {
        self.worksheets.get(index)
    }

    /// Get a mutable worksheet by index
    pub fn worksheet_mut(&mut self, index: usize) -> Option<&mut Worksheet> {
        self.worksheets.get_mut(index)
    }

    /// Get a worksheet by name
    pub fn worksheet_by_name(&self, name: &str) -> Option<&Worksheet> {
        self.worksheets.iter().find(|ws| ws.name() == name)
    }

    /// Iterate over all worksheets
    pub fn worksheets(&self) -> impl Iterator<Item = &Worksheet> {
        self.worksheets.iter()
    }

    /// Add a new worksheet with specified name, returning its index
    pub fn add_worksheet_with_name(&mut self, name: &str) -> Result<usize> {
        self.validate_sheet_name(name)?;
        self.worksheets.push(Worksheet::new(name));
        Ok(self.worksheets.len() - 1)
    }

    /// Get the active sheet index
    pub fn active_sheet(&self) -> usize {
        self.active_sheet
    }

    /// Set the active sheet index
    pub fn set_active_sheet(&mut self, index: usize) -> Result<()> {
        if index >= self.worksheets.len() {
            return Err(Error::SheetOutOfBounds(index, self.worksheets.len()));
        }
        self.active_sheet = index;
        Ok(())
    }

    /// The sheet that opens in front, if the workbook has any sheets
    pub fn active_worksheet(&self) -> Option<&Worksheet> {
        self.worksheets.get(self.active_sheet)
    }

    /// Mutable access to the active sheet
    pub fn active_worksheet_mut(&mut self) -> Option<&mut Worksheet> {
        self.worksheets.get_mut(self.active_sheet)
    }

    fn validate_sheet_name(&self, name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(Error::InvalidSheetName("Sheet name cannot be empty".into()));
        }
        if name.chars().count() > MAX_SHEET_NAME_LEN {
            return Err(Error::InvalidSheetName(format!(
                "Sheet name too long (max {} characters)",
                MAX_SHEET_NAME_LEN
            )));
        }

        const INVALID_CHARS: &[char] = &[':', '\\', '/', '?', '*', '[', ']'];
        if let Some(c) = name.chars().find(|c| INVALID_CHARS.contains(c)) {
            return Err(Error::InvalidSheetName(format!(
                "Sheet name cannot contain '{}'",
                c
            )));
        }

        // Sheet names are unique case-insensitively
        let lower = name.to_lowercase();
        if self
            .worksheets
            .iter()
            .any(|ws| ws.name().to_lowercase() == lower)
        {
            return Err(Error::DuplicateSheetName(name.into()));
        }

        Ok(())
    }
}

impl Default for Workbook {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_workbook() {
        let wb = Workbook::new();
        assert_eq!(wb.sheet_count(), 1);
        assert_eq!(wb.active_sheet(), 0);
        assert_eq!(wb.active_worksheet().unwrap().name(), "Sheet1");
        assert!(Workbook::empty().active_worksheet().is_none());
    }

    #[test]
    fn test_add_and_activate() {
        let mut wb = Workbook::new();

        let idx = wb.add_worksheet_with_name("Data").unwrap();
        assert_eq!(idx, 1);
        wb.set_active_sheet(idx).unwrap();
        assert_eq!(wb.active_worksheet().unwrap().name(), "Data");
        assert!(wb.worksheet_by_name("Data").is_some());

        assert!(matches!(
            wb.set_active_sheet(7),
            Err(Error::SheetOutOfBounds(7, 2))
        ));
    }

    #[test]
    fn test_invalid_sheet_names() {
        let mut wb = Workbook::new();

        assert!(wb.add_worksheet_with_name("").is_err());
        assert!(wb.add_worksheet_with_name("a/b").is_err());
        assert!(wb.add_worksheet_with_name("[x]").is_err());
        assert!(wb.add_worksheet_with_name("SHEET1").is_err());
        assert!(wb
            .add_worksheet_with_name(&"A".repeat(MAX_SHEET_NAME_LEN + 1))
            .is_err());
    }
}

//! Write a workbook and read it back

use std::io::Cursor;

use nestsheet_core::{CellRange, CellValue, Workbook};
use nestsheet_xlsx::{XlsxReader, XlsxWriter};
use pretty_assertions::assert_eq;

fn roundtrip(workbook: &Workbook) -> Workbook {
    let mut buf = Cursor::new(Vec::new());
    XlsxWriter::write(workbook, &mut buf).unwrap();
    buf.set_position(0);
    XlsxReader::read(buf).unwrap()
}

#[test]
fn test_values_survive() {
    let mut workbook = Workbook::new();
    let ws = workbook.worksheet_mut(0).unwrap();
    ws.set_cell_value_at(0, 0, "name").unwrap();
    ws.set_cell_value_at(0, 1, "score").unwrap();
    ws.set_cell_value_at(0, 2, "active").unwrap();
    ws.set_cell_value_at(1, 0, "  Ada & <Bob>  ").unwrap();
    ws.set_cell_value_at(1, 1, 97.25).unwrap();
    ws.set_cell_value_at(1, 2, false).unwrap();
    ws.set_cell_value_at(2, 0, "").unwrap();
    ws.set_cell_value_at(2, 1, -3.0).unwrap();
    ws.set_cell_value_at(2, 2, "line\nbreak_x000d_").unwrap();

    let back = roundtrip(&workbook);
    let ws = back.active_worksheet().unwrap();

    assert_eq!(ws.get_value_at(0, 1), CellValue::string("score"));
    assert_eq!(ws.get_value_at(1, 0), CellValue::string("  Ada & <Bob>  "));
    assert_eq!(ws.get_value_at(1, 1), CellValue::Number(97.25));
    assert_eq!(ws.get_value_at(1, 2), CellValue::Boolean(false));
    assert_eq!(ws.get_value_at(2, 0), CellValue::string(""));
    assert_eq!(ws.get_value_at(2, 1), CellValue::Number(-3.0));
    assert_eq!(ws.get_value_at(2, 2), CellValue::string("line\nbreak_x000d_"));
}

#[test]
fn test_merges_and_blank_rows_survive() {
    let mut workbook = Workbook::new();
    let ws = workbook.worksheet_mut(0).unwrap();
    ws.set_cell_value_at(0, 0, "id").unwrap();
    ws.set_cell_value_at(0, 1, "addr").unwrap();
    ws.set_cell_value_at(1, 1, "city").unwrap();
    ws.set_cell_value_at(1, 2, "zip").unwrap();
    ws.merge_cells(&CellRange::parse("A1:A2").unwrap()).unwrap();
    ws.merge_cells(&CellRange::parse("B1:C1").unwrap()).unwrap();
    // A record whose fields are all null
    ws.set_cell_value_at(3, 0, CellValue::Empty).unwrap();
    ws.set_cell_value_at(3, 2, CellValue::Empty).unwrap();

    let back = roundtrip(&workbook);
    let ws = back.active_worksheet().unwrap();

    assert_eq!(
        ws.merged_regions(),
        &[
            CellRange::parse("A1:A2").unwrap(),
            CellRange::parse("B1:C1").unwrap()
        ]
    );
    assert_eq!(ws.max_row(), Some(3));
    assert_eq!(ws.max_column(), Some(2));
    assert_eq!(ws.get_value_at(3, 0), CellValue::Empty);
}

#[test]
fn test_active_sheet_survives() {
    let mut workbook = Workbook::new();
    let idx = workbook.add_worksheet_with_name("Records").unwrap();
    workbook
        .worksheet_mut(idx)
        .unwrap()
        .set_cell_value_at(0, 0, "x")
        .unwrap();
    workbook.set_active_sheet(idx).unwrap();

    let back = roundtrip(&workbook);

    assert_eq!(back.sheet_count(), 2);
    assert_eq!(back.active_sheet(), 1);
    assert_eq!(back.active_worksheet().unwrap().name(), "Records");
}

#[test]
fn test_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.xlsx");

    let mut workbook = Workbook::new();
    workbook
        .worksheet_mut(0)
        .unwrap()
        .set_cell_value_at(4, 3, 12.0)
        .unwrap();
    XlsxWriter::write_file(&workbook, &path).unwrap();

    let back = XlsxReader::read_file(&path).unwrap();
    let ws = back.worksheet(0).unwrap();
    assert_eq!(ws.get_value_at(4, 3), CellValue::Number(12.0));
    assert_eq!(ws.max_row(), Some(4));
}

#[test]
fn test_control_characters_are_written_as_escapes() {
    use std::io::Read;

    let mut workbook = Workbook::new();
    let ws = workbook.worksheet_mut(0).unwrap();
    ws.set_cell_value_at(0, 0, "bell\u{7}here").unwrap();
    ws.set_cell_value_at(0, 1, "nul\u{0}\u{1B}").unwrap();

    let mut buf = Cursor::new(Vec::new());
    XlsxWriter::write(&workbook, &mut buf).unwrap();

    let mut xml = String::new();
    {
        buf.set_position(0);
        let mut archive = zip::ZipArchive::new(&mut buf).unwrap();
        archive
            .by_name("xl/worksheets/sheet1.xml")
            .unwrap()
            .read_to_string(&mut xml)
            .unwrap();
    }
    assert!(!xml.contains('\u{7}'));
    assert!(!xml.contains('\u{0}'));
    assert!(xml.contains("bell_x0007_here"));

    buf.set_position(0);
    let back = XlsxReader::read(buf).unwrap();
    let ws = back.active_worksheet().unwrap();
    assert_eq!(ws.get_value_at(0, 0), CellValue::string("bell\u{7}here"));
    assert_eq!(ws.get_value_at(0, 1), CellValue::string("nul\u{0}\u{1B}"));
}

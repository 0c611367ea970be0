//! XLSX reader

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::{XlsxError, XlsxResult};
use nestsheet_core::{CellAddress, CellError, CellRange, CellValue, Workbook, Worksheet};

/// Decode Excel's `_xHHHH_` escape sequences in strings.
///
/// Excel uses this format to encode special characters in XML:
/// - `_x000d_` = CR (carriage return)
/// - `_x000a_` = LF (line feed)
/// - `_x0009_` = Tab
/// - `_x005f_` = Underscore (escaped underscore)
fn decode_excel_escapes(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '_' {
            result.push(c);
            continue;
        }

        let mut hex_chars = String::new();
        let mut consumed_x = false;
        let mut decoded = None;

        if chars.peek() == Some(&'x') {
            chars.next();
            consumed_x = true;

            while hex_chars.len() < 4 {
                match chars.peek() {
                    Some(&ch) if ch.is_ascii_hexdigit() => {
                        hex_chars.push(ch);
                        chars.next();
                    }
                    _ => break,
                }
            }

            if hex_chars.len() == 4 && chars.peek() == Some(&'_') {
                decoded = u32::from_str_radix(&hex_chars, 16)
                    .ok()
                    .and_then(char::from_u32);
                if decoded.is_some() {
                    chars.next();
                }
            }
        }

        match decoded {
            Some(ch) => result.push(ch),
            None => {
                // Not an escape: emit what was consumed
                result.push('_');
                if consumed_x {
                    result.push('x');
                    result.push_str(&hex_chars);
                }
            }
        }
    }

    result
}

/// Read one attribute of an element as an owned string
fn attr_value(e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .and_then(|attr| attr.unescape_value().ok().map(|s| s.to_string()))
}

/// Position of the next cell when `r` attributes are omitted
///
/// A row without `r` follows the previous row; a cell without `r` follows
/// the previous cell of its row.
#[derive(Debug, Default)]
struct CellCursor {
    row: Option<u32>,
    next_col: u16,
}

impl CellCursor {
    /// Enter a row, returning its 0-based index
    fn start_row(&mut self, row_num: Option<u32>) -> u32 {
        let row = match (row_num, self.row) {
            (Some(n), _) if n > 0 => n - 1,
            (_, Some(prev)) => prev.saturating_add(1),
            (_, None) => 0,
        };
        self.row = Some(row);
        self.next_col = 0;
        row
    }

    /// Resolve a cell's address from its `r` attribute or its position
    fn place(&mut self, cell_ref: Option<&str>) -> XlsxResult<CellAddress> {
        let addr = match cell_ref {
            Some(cell_ref) => CellAddress::parse(cell_ref).map_err(|e| {
                XlsxError::Parse(format!("Invalid cell reference '{}': {}", cell_ref, e))
            })?,
            None => CellAddress::new(self.row.unwrap_or(0), self.next_col),
        };
        self.row = Some(addr.row);
        self.next_col = addr.col.saturating_add(1);
        Ok(addr)
    }
}

/// XLSX file reader
pub struct XlsxReader;

impl XlsxReader {
    /// Read a workbook from a file path
    pub fn read_file<P: AsRef<Path>>(path: P) -> XlsxResult<Workbook> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "reading xlsx");
        let file = File::open(path)?;
        Self::read(file)
    }

    /// Read a workbook from a reader
    pub fn read<R: Read + Seek>(reader: R) -> XlsxResult<Workbook> {
        let mut archive = zip::ZipArchive::new(reader)?;

        // Verify this is an XLSX file
        if archive.by_name("[Content_Types].xml").is_err() {
            return Err(XlsxError::InvalidFormat(
                "Missing [Content_Types].xml".into(),
            ));
        }

        let shared_strings = Self::read_shared_strings(&mut archive)?;
        let (sheet_info, active_tab) = Self::read_workbook_xml(&mut archive)?;
        let sheet_paths = Self::read_workbook_rels(&mut archive)?;

        let mut workbook = Workbook::empty();

        for (name, r_id) in &sheet_info {
            let Some(path) = sheet_paths.get(r_id) else {
                tracing::warn!(sheet = %name, r_id = %r_id, "sheet has no worksheet relationship");
                continue;
            };
            let sheet_idx = workbook.add_worksheet_with_name(name)?;
            let worksheet = workbook
                .worksheet_mut(sheet_idx)
                .ok_or_else(|| XlsxError::InvalidFormat(format!("Sheet '{}' vanished", name)))?;
            Self::read_worksheet(&mut archive, path, worksheet, &shared_strings)?;
        }

        // Ensure at least one sheet exists
        if workbook.is_empty() {
            workbook.add_worksheet_with_name("Sheet1")?;
        }

        if active_tab < workbook.sheet_count() {
            workbook.set_active_sheet(active_tab)?;
        } else {
            tracing::warn!(
                active_tab,
                sheets = workbook.sheet_count(),
                "activeTab out of range, using first sheet"
            );
        }

        Ok(workbook)
    }

    /// Read the shared strings table
    fn read_shared_strings<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<Vec<String>> {
        let mut strings = Vec::new();

        let file = match archive.by_name("xl/sharedStrings.xml") {
            Ok(f) => f,
            Err(_) => return Ok(strings), // No shared strings is valid
        };

        let reader = BufReader::new(file);
        let mut xml_reader = Reader::from_reader(reader);
        // Leading and trailing spaces inside <t> are data
        xml_reader.trim_text(false);

        let mut buf = Vec::new();
        let mut current_string = String::new();
        let mut in_si = false;
        let mut in_t = false;
        let mut in_phonetic = false;

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => match e.local_name().as_ref() {
                    b"si" => {
                        in_si = true;
                        current_string.clear();
                    }
                    b"rPh" => in_phonetic = true,
                    b"t" if in_si && !in_phonetic => in_t = true,
                    _ => {}
                },
                Ok(Event::Empty(e)) if e.local_name().as_ref() == b"si" => {
                    strings.push(String::new());
                }
                Ok(Event::End(e)) => match e.local_name().as_ref() {
                    b"si" => {
                        strings.push(decode_excel_escapes(&current_string));
                        current_string.clear();
                        in_si = false;
                    }
                    b"rPh" => in_phonetic = false,
                    b"t" => in_t = false,
                    _ => {}
                },
                Ok(Event::Text(e)) if in_t => {
                    if let Ok(text) = e.unescape() {
                        current_string.push_str(&text);
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(strings)
    }

    /// Read workbook.xml to get sheet names, rIds and the active tab
    fn read_workbook_xml<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<(Vec<(String, String)>, usize)> {
        let file = archive
            .by_name("xl/workbook.xml")
            .map_err(|_| XlsxError::MissingPart("xl/workbook.xml".into()))?;

        let reader = BufReader::new(file);
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut sheets = Vec::new();
        let mut active_tab = 0;

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e)) => match e.local_name().as_ref() {
                    b"sheet" => {
                        if let (Some(name), Some(r_id)) =
                            (attr_value(&e, b"name"), attr_value(&e, b"r:id"))
                        {
                            sheets.push((name, r_id));
                        }
                    }
                    b"workbookView" => {
                        if let Some(tab) =
                            attr_value(&e, b"activeTab").and_then(|s| s.parse::<usize>().ok())
                        {
                            active_tab = tab;
                        }
                    }
                    _ => {}
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok((sheets, active_tab))
    }

    /// Read workbook.xml.rels to get sheet file paths
    fn read_workbook_rels<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<HashMap<String, String>> {
        let file = archive
            .by_name("xl/_rels/workbook.xml.rels")
            .map_err(|_| XlsxError::MissingPart("xl/_rels/workbook.xml.rels".into()))?;

        let reader = BufReader::new(file);
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut rels = HashMap::new();

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e))
                    if e.local_name().as_ref() == b"Relationship" =>
                {
                    let id = attr_value(&e, b"Id");
                    let target = attr_value(&e, b"Target");
                    let rel_type = attr_value(&e, b"Type");

                    // Only include worksheet relationships
                    if let (Some(id), Some(target), Some(rel_type)) = (id, target, rel_type) {
                        if rel_type.ends_with("/worksheet") {
                            // Target is relative to xl/ folder
                            let full_path = match target.strip_prefix('/') {
                                Some(absolute) => absolute.to_string(),
                                None => format!("xl/{}", target),
                            };
                            rels.insert(id, full_path);
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(rels)
    }

    /// Read a worksheet from the archive
    fn read_worksheet<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
        path: &str,
        worksheet: &mut Worksheet,
        shared_strings: &[String],
    ) -> XlsxResult<()> {
        let file = archive
            .by_name(path)
            .map_err(|_| XlsxError::MissingPart(path.to_string()))?;

        let reader = BufReader::new(file);
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.trim_text(false);

        let mut buf = Vec::new();

        // Current cell state
        let mut cursor = CellCursor::default();
        let mut current_addr: Option<CellAddress> = None;
        let mut current_cell_type: Option<String> = None;
        let mut current_value: Option<String> = None;
        let mut in_cell = false;
        let mut in_value = false;
        let mut in_inline_str = false;
        let mut in_inline_text = false;
        let mut in_phonetic = false;

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => match e.local_name().as_ref() {
                    b"row" => Self::process_row(worksheet, &e, &mut cursor)?,
                    b"c" => {
                        in_cell = true;
                        current_addr = Some(cursor.place(attr_value(&e, b"r").as_deref())?);
                        current_cell_type = attr_value(&e, b"t");
                        current_value = None;
                    }
                    b"v" if in_cell => {
                        in_value = true;
                        current_value = Some(String::new());
                    }
                    b"is" if in_cell => {
                        // An inline string with no text runs is still ""
                        in_inline_str = true;
                        current_value = Some(String::new());
                        current_cell_type = Some("inlineStr".to_string());
                    }
                    b"rPh" if in_inline_str => in_phonetic = true,
                    b"t" if in_inline_str && !in_phonetic => in_inline_text = true,
                    _ => {}
                },
                Ok(Event::End(e)) => match e.local_name().as_ref() {
                    b"c" => {
                        if let Some(addr) = current_addr.take() {
                            Self::process_cell(
                                worksheet,
                                addr,
                                current_cell_type.as_deref(),
                                current_value.as_deref(),
                                shared_strings,
                            )?;
                        }
                        in_cell = false;
                    }
                    b"v" => in_value = false,
                    b"is" => in_inline_str = false,
                    b"rPh" => in_phonetic = false,
                    b"t" if in_inline_str => in_inline_text = false,
                    _ => {}
                },
                Ok(Event::Text(e)) if in_value || in_inline_text => {
                    if let Ok(text) = e.unescape() {
                        current_value.get_or_insert_with(String::new).push_str(&text);
                    }
                }
                Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                    b"dimension" => Self::process_dimension(worksheet, &e)?,
                    b"row" => Self::process_row(worksheet, &e, &mut cursor)?,
                    b"c" => {
                        // A valueless cell still occupies its position
                        let addr = cursor.place(attr_value(&e, b"r").as_deref())?;
                        worksheet.extend_dimension(addr.row, addr.col)?;
                    }
                    b"is" if in_cell => {
                        current_value = Some(String::new());
                        current_cell_type = Some("inlineStr".to_string());
                    }
                    b"mergeCell" => {
                        if let Some(ref_str) = attr_value(&e, b"ref") {
                            match CellRange::parse(&ref_str) {
                                Ok(range) => {
                                    if let Err(err) = worksheet.merge_cells(&range) {
                                        tracing::warn!(range = %ref_str, error = %err, "skipping merged region");
                                    }
                                }
                                Err(err) => {
                                    tracing::warn!(range = %ref_str, error = %err, "invalid merged region");
                                }
                            }
                        }
                    }
                    _ => {}
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        tracing::debug!(
            sheet = worksheet.name(),
            cells = worksheet.cell_count(),
            merges = worksheet.merged_regions().len(),
            "read worksheet"
        );

        Ok(())
    }

    /// `<dimension ref="A1:C5"/>` declares the sheet extent
    fn process_dimension(worksheet: &mut Worksheet, e: &BytesStart<'_>) -> XlsxResult<()> {
        if let Some(ref_str) = attr_value(e, b"ref") {
            match CellRange::parse(&ref_str) {
                Ok(range) => worksheet.extend_dimension(range.end.row, range.end.col)?,
                Err(err) => {
                    tracing::warn!(dimension = %ref_str, error = %err, "ignoring invalid dimension");
                }
            }
        }
        Ok(())
    }

    /// A `<row r="N">` element makes row N part of the sheet even when empty
    ///
    /// Rows without `r` follow the previous row.
    fn process_row(
        worksheet: &mut Worksheet,
        e: &BytesStart<'_>,
        cursor: &mut CellCursor,
    ) -> XlsxResult<()> {
        let row_num = attr_value(e, b"r").and_then(|s| s.parse::<u32>().ok());
        let row = cursor.start_row(row_num);
        worksheet.extend_dimension(row, 0)?;
        Ok(())
    }

    /// Process a cell and add it to the worksheet
    fn process_cell(
        worksheet: &mut Worksheet,
        addr: CellAddress,
        cell_type: Option<&str>,
        value: Option<&str>,
        shared_strings: &[String],
    ) -> XlsxResult<()> {
        let Some(value) = value else {
            worksheet.extend_dimension(addr.row, addr.col)?;
            return Ok(());
        };

        let cell_value = match cell_type {
            // Shared string
            Some("s") => {
                let idx: usize = value.trim().parse().map_err(|_| {
                    XlsxError::Parse(format!("Invalid shared string index: {}", value))
                })?;
                let s = shared_strings.get(idx).ok_or_else(|| {
                    XlsxError::Parse(format!("Shared string index {} out of bounds", idx))
                })?;
                CellValue::String(s.clone())
            }

            // Boolean
            Some("b") => {
                let v = value.trim();
                CellValue::Boolean(v == "1" || v.eq_ignore_ascii_case("true"))
            }

            // Error
            Some("e") => CellError::parse(value.trim())
                .map(CellValue::Error)
                .unwrap_or_else(|| CellValue::String(value.to_string())),

            // Inline string, or a formula's cached string result
            Some("inlineStr") | Some("str") => CellValue::String(decode_excel_escapes(value)),

            // Number (default type or explicit "n")
            None | Some("n") => match value.trim().parse::<f64>() {
                Ok(n) => CellValue::Number(n),
                Err(_) => CellValue::String(value.to_string()),
            },

            // Unknown type - treat as string
            Some(other) => {
                tracing::trace!(cell = %addr, cell_type = other, "unknown cell type");
                CellValue::String(value.to_string())
            }
        };

        worksheet.set_cell_value_at(addr.row, addr.col, cell_value)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::{Cursor, Write};

    #[test]
    fn test_decode_excel_escapes_carriage_return() {
        assert_eq!(decode_excel_escapes("hello_x000d_world"), "hello\rworld");
    }

    #[test]
    fn test_decode_excel_escapes_multiple() {
        assert_eq!(
            decode_excel_escapes("line1_x000d__x000a_line2"),
            "line1\r\nline2"
        );
    }

    #[test]
    fn test_decode_excel_escapes_underscore() {
        // _x005f_ is an escaped underscore
        assert_eq!(decode_excel_escapes("tags_x005f_1"), "tags_1");
    }

    #[test]
    fn test_decode_excel_escapes_leaves_suffixed_headers() {
        assert_eq!(decode_excel_escapes("tags_1"), "tags_1");
        assert_eq!(decode_excel_escapes("a_b_c"), "a_b_c");
        assert_eq!(decode_excel_escapes("_x00"), "_x00");
        assert_eq!(decode_excel_escapes("_x000d"), "_x000d"); // missing trailing _
    }

    #[test]
    fn test_decode_excel_escapes_uppercase() {
        assert_eq!(decode_excel_escapes("_x000D_"), "\r");
        assert_eq!(decode_excel_escapes("_x000A_"), "\n");
    }

    /// Build a single-sheet package around raw worksheet XML
    fn package(workbook_xml: &str, sheet_xml: &str, shared_strings: Option<&str>) -> Vec<u8> {
        let mut buf = Vec::new();
        {
            let cursor = Cursor::new(&mut buf);
            let mut zip = zip::ZipWriter::new(cursor);
            let options = zip::write::SimpleFileOptions::default();

            zip.start_file("[Content_Types].xml", options).unwrap();
            zip.write_all(br#"<?xml version="1.0"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="xml" ContentType="application/xml"/></Types>"#).unwrap();

            zip.start_file("xl/workbook.xml", options).unwrap();
            zip.write_all(workbook_xml.as_bytes()).unwrap();

            zip.start_file("xl/_rels/workbook.xml.rels", options)
                .unwrap();
            zip.write_all(br#"<?xml version="1.0"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="/xl/worksheets/sheet2.xml"/></Relationships>"#).unwrap();

            zip.start_file("xl/worksheets/sheet1.xml", options).unwrap();
            zip.write_all(sheet_xml.as_bytes()).unwrap();

            zip.start_file("xl/worksheets/sheet2.xml", options).unwrap();
            zip.write_all(br#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData/></worksheet>"#).unwrap();

            if let Some(sst) = shared_strings {
                zip.start_file("xl/sharedStrings.xml", options).unwrap();
                zip.write_all(sst.as_bytes()).unwrap();
            }

            zip.finish().unwrap();
        }
        buf
    }

    const ONE_SHEET: &str = r#"<?xml version="1.0"?><workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="Sheet1" sheetId="1" r:id="rId1"/></sheets></workbook>"#;

    #[test]
    fn test_read_empty_xlsx() {
        let bytes = package(
            ONE_SHEET,
            r#"<?xml version="1.0"?><worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData></sheetData></worksheet>"#,
            None,
        );
        let workbook = XlsxReader::read(Cursor::new(bytes)).unwrap();

        assert_eq!(workbook.sheet_count(), 1);
        assert_eq!(workbook.worksheet(0).unwrap().name(), "Sheet1");
        assert_eq!(workbook.worksheet(0).unwrap().max_row(), None);
    }

    #[test]
    fn test_read_cell_types() {
        let sheet = r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>
<row r="1"><c r="A1" t="s"><v>0</v></c><c r="B1" t="inlineStr"><is><t xml:space="preserve"> padded </t></is></c><c r="C1" t="b"><v>1</v></c><c r="D1"><v>2.5</v></c><c r="E1" t="e"><v>#N/A</v></c><c r="F1" t="inlineStr"><is><t></t></is></c></row>
</sheetData></worksheet>"#;
        let sst = r#"<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><si><r><t>rich </t></r><r><t>text</t></r></si></sst>"#;
        let workbook = XlsxReader::read(Cursor::new(package(ONE_SHEET, sheet, Some(sst)))).unwrap();
        let ws = workbook.active_worksheet().unwrap();

        assert_eq!(ws.get_value_at(0, 0), CellValue::string("rich text"));
        assert_eq!(ws.get_value_at(0, 1), CellValue::string(" padded "));
        assert_eq!(ws.get_value_at(0, 2), CellValue::Boolean(true));
        assert_eq!(ws.get_value_at(0, 3), CellValue::Number(2.5));
        assert_eq!(ws.get_value_at(0, 4), CellValue::Error(CellError::Na));
        assert_eq!(ws.get_value_at(0, 5), CellValue::string(""));
    }

    #[test]
    fn test_read_dimension_rows_and_merges() {
        let sheet = r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><dimension ref="A1:C4"/><sheetData><row r="1"><c r="A1" t="inlineStr"><is><t>id</t></is></c></row><row r="6"/></sheetData><mergeCells count="1"><mergeCell ref="A1:A2"/></mergeCells></worksheet>"#;
        let workbook = XlsxReader::read(Cursor::new(package(ONE_SHEET, sheet, None))).unwrap();
        let ws = workbook.active_worksheet().unwrap();

        assert_eq!(ws.max_row(), Some(5));
        assert_eq!(ws.max_column(), Some(2));
        assert_eq!(ws.merged_regions(), &[CellRange::parse("A1:A2").unwrap()]);
    }

    #[test]
    fn test_cells_without_references_follow_position() {
        let sheet = r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData><row><c t="inlineStr"><is><t>id</t></is></c><c/><c t="inlineStr"><is><t>name</t></is></c></row><row r="3"><c r="B3"><v>7</v></c><c><v>8</v></c></row><row><c><v>9</v></c></row></sheetData></worksheet>"#;
        let workbook = XlsxReader::read(Cursor::new(package(ONE_SHEET, sheet, None))).unwrap();
        let ws = workbook.active_worksheet().unwrap();

        assert_eq!(ws.get_value_at(0, 0), CellValue::string("id"));
        assert_eq!(ws.get_value_at(0, 1), CellValue::Empty);
        assert_eq!(ws.get_value_at(0, 2), CellValue::string("name"));
        assert_eq!(ws.get_value_at(2, 1), CellValue::Number(7.0));
        assert_eq!(ws.get_value_at(2, 2), CellValue::Number(8.0));
        assert_eq!(ws.get_value_at(3, 0), CellValue::Number(9.0));
    }

    #[test]
    fn test_cell_cursor() {
        let mut cursor = CellCursor::default();
        assert_eq!(cursor.start_row(None), 0);
        assert_eq!(cursor.place(None).unwrap(), CellAddress::new(0, 0));
        assert_eq!(cursor.place(Some("D1")).unwrap(), CellAddress::new(0, 3));
        assert_eq!(cursor.place(None).unwrap(), CellAddress::new(0, 4));
        assert_eq!(cursor.start_row(Some(10)), 9);
        assert_eq!(cursor.start_row(None), 10);
        assert!(cursor.place(Some("??")).is_err());
    }

    #[test]
    fn test_read_active_tab() {
        let workbook_xml = r#"<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><bookViews><workbookView activeTab="1"/></bookViews><sheets><sheet name="First" sheetId="1" r:id="rId1"/><sheet name="Second" sheetId="2" r:id="rId2"/></sheets></workbook>"#;
        let sheet = r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData/></worksheet>"#;
        let workbook = XlsxReader::read(Cursor::new(package(workbook_xml, sheet, None))).unwrap();

        assert_eq!(workbook.sheet_count(), 2);
        assert_eq!(workbook.active_worksheet().unwrap().name(), "Second");
    }

    #[test]
    fn test_missing_content_types_is_invalid() {
        let mut buf = Vec::new();
        {
            let mut zip = zip::ZipWriter::new(Cursor::new(&mut buf));
            zip.start_file("hello.txt", zip::write::SimpleFileOptions::default())
                .unwrap();
            zip.write_all(b"hi").unwrap();
            zip.finish().unwrap();
        }

        let err = XlsxReader::read(Cursor::new(buf)).unwrap_err();
        assert!(matches!(err, XlsxError::InvalidFormat(_)));
    }
}

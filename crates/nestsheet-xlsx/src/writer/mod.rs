//! XLSX writer

use std::fs::File;
use std::io::{Seek, Write};
use std::path::Path;

use crate::error::{XlsxError, XlsxResult};
use nestsheet_core::{CellAddress, CellError, CellValue, Workbook};

/// Single default cell format; cells carry no `s` attribute
const STYLES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
    <fonts count="1"><font><sz val="11"/><name val="Calibri"/></font></fonts>
    <fills count="2"><fill><patternFill patternType="none"/></fill><fill><patternFill patternType="gray125"/></fill></fills>
    <borders count="1"><border><left/><right/><top/><bottom/><diagonal/></border></borders>
    <cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs>
    <cellXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/></cellXfs>
    <cellStyles count="1"><cellStyle name="Normal" xfId="0" builtinId="0"/></cellStyles>
</styleSheet>"#;

/// XLSX file writer
pub struct XlsxWriter;

impl XlsxWriter {
    /// Write a workbook to a file path
    pub fn write_file<P: AsRef<Path>>(workbook: &Workbook, path: P) -> XlsxResult<()> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), sheets = workbook.sheet_count(), "writing xlsx");
        let file = File::create(path)?;
        Self::write(workbook, file)
    }

    /// Write a workbook to a writer
    pub fn write<W: Write + Seek>(workbook: &Workbook, writer: W) -> XlsxResult<()> {
        if workbook.is_empty() {
            return Err(XlsxError::InvalidFormat(
                "A workbook needs at least one worksheet".into(),
            ));
        }

        let mut zip = zip::ZipWriter::new(writer);

        Self::write_content_types(&mut zip, workbook)?;
        Self::write_root_rels(&mut zip)?;
        Self::write_workbook_xml(&mut zip, workbook)?;
        Self::write_workbook_rels(&mut zip, workbook)?;
        Self::write_styles_xml(&mut zip)?;

        for i in 0..workbook.sheet_count() {
            Self::write_worksheet(&mut zip, workbook, i)?;
        }

        zip.finish()?;
        Ok(())
    }

    fn write_content_types<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        workbook: &Workbook,
    ) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("[Content_Types].xml", options)?;

        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
    <Default Extension="xml" ContentType="application/xml"/>
    <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
    <Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>"#,
        );

        for i in 0..workbook.sheet_count() {
            content.push_str(&format!(
                r#"
    <Override PartName="/xl/worksheets/sheet{}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#,
                i + 1
            ));
        }

        content.push_str("\n</Types>");

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_root_rels<W: Write + Seek>(zip: &mut zip::ZipWriter<W>) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("_rels/.rels", options)?;

        let content = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#;

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_workbook_xml<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        workbook: &Workbook,
    ) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("xl/workbook.xml", options)?;

        let mut content = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
    <bookViews>
        <workbookView activeTab="{}"/>
    </bookViews>
    <sheets>"#,
            workbook.active_sheet()
        );

        for (i, sheet) in workbook.worksheets().enumerate() {
            content.push_str(&format!(
                r#"
        <sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
                Self::escape_xml(sheet.name()),
                i + 1,
                i + 1
            ));
        }

        content.push_str(
            r#"
    </sheets>
</workbook>"#,
        );

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_workbook_rels<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        workbook: &Workbook,
    ) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("xl/_rels/workbook.xml.rels", options)?;

        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        );

        for i in 0..workbook.sheet_count() {
            content.push_str(&format!(
                r#"
    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{}.xml"/>"#,
                i + 1,
                i + 1
            ));
        }

        // Styles relationship
        let styles_rid = workbook.sheet_count() + 1;
        content.push_str(&format!(
            r#"
    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>"#,
            styles_rid
        ));

        content.push_str("\n</Relationships>");

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_styles_xml<W: Write + Seek>(zip: &mut zip::ZipWriter<W>) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("xl/styles.xml", options)?;
        zip.write_all(STYLES_XML.as_bytes())?;
        Ok(())
    }

    fn write_worksheet<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        workbook: &Workbook,
        index: usize,
    ) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file(format!("xl/worksheets/sheet{}.xml", index + 1), options)?;

        let sheet = workbook
            .worksheet(index)
            .ok_or_else(|| XlsxError::InvalidFormat("Sheet not found".into()))?;

        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
        );

        let dimension = sheet
            .dimension()
            .map(|range| range.to_a1_string())
            .unwrap_or_else(|| "A1".to_string());
        content.push_str(&format!("\n    <dimension ref=\"{}\"/>", dimension));
        content.push_str("\n    <sheetData>");

        // Every row up to the dimension is emitted, so blank trailing rows
        // survive readers that ignore <dimension>
        if let Some(max_row) = sheet.max_row() {
            for row in 0..=max_row {
                let mut cells = sheet.iter_row(row).peekable();
                if cells.peek().is_none() {
                    content.push_str(&format!("\n        <row r=\"{}\"/>", row + 1));
                    continue;
                }

                content.push_str(&format!("\n        <row r=\"{}\">", row + 1));
                for (col, value) in cells {
                    let cell_ref = CellAddress::new(row, col).to_a1_string();
                    Self::write_cell(&mut content, &cell_ref, value);
                }
                content.push_str("\n        </row>");
            }
        }

        content.push_str("\n    </sheetData>");

        // Write merged cells (if any)
        let merged_regions = sheet.merged_regions();
        if !merged_regions.is_empty() {
            content.push_str(&format!(
                "\n    <mergeCells count=\"{}\">",
                merged_regions.len()
            ));
            for range in merged_regions {
                content.push_str(&format!("\n        <mergeCell ref=\"{}\"/>", range));
            }
            content.push_str("\n    </mergeCells>");
        }

        content.push_str("\n</worksheet>");

        tracing::trace!(
            sheet = sheet.name(),
            dimension = %dimension,
            merges = merged_regions.len(),
            "wrote worksheet"
        );

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_cell(content: &mut String, cell_ref: &str, value: &CellValue) {
        match value {
            CellValue::Number(n) if n.is_finite() => {
                content.push_str(&format!(
                    "\n            <c r=\"{}\"><v>{}</v></c>",
                    cell_ref, n
                ));
            }
            CellValue::Number(_) => {
                // NaN and infinities have no XML number form
                Self::write_cell(content, cell_ref, &CellValue::Error(CellError::Num));
            }
            CellValue::String(s) => {
                let space = if s.starts_with(char::is_whitespace) || s.ends_with(char::is_whitespace)
                {
                    " xml:space=\"preserve\""
                } else {
                    ""
                };
                content.push_str(&format!(
                    "\n            <c r=\"{}\" t=\"inlineStr\"><is><t{}>{}</t></is></c>",
                    cell_ref,
                    space,
                    Self::escape_xml(&encode_excel_escapes(s))
                ));
            }
            CellValue::Boolean(b) => {
                content.push_str(&format!(
                    "\n            <c r=\"{}\" t=\"b\"><v>{}</v></c>",
                    cell_ref,
                    if *b { 1 } else { 0 }
                ));
            }
            CellValue::Error(e) => {
                content.push_str(&format!(
                    "\n            <c r=\"{}\" t=\"e\"><v>{}</v></c>",
                    cell_ref,
                    Self::escape_xml(e.as_str())
                ));
            }
            CellValue::Empty => {}
        }
    }

    fn escape_xml(s: &str) -> String {
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&apos;")
    }
}

/// Characters XML 1.0 cannot carry, even as character references
fn is_xml_restricted(ch: char) -> bool {
    matches!(
        ch,
        '\u{0}'..='\u{8}' | '\u{B}' | '\u{C}' | '\u{E}'..='\u{1F}' | '\u{FFFE}' | '\u{FFFF}'
    )
}

/// Encode text for a `<t>` element using Excel's `_xHHHH_` escapes
///
/// Restricted control characters become `_xHHHH_`. The leading underscore of
/// literal `_xHHHH_` text is written as `_x005F_` so it reads back unchanged.
fn encode_excel_escapes(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut result = String::with_capacity(s.len());

    for (i, ch) in s.char_indices() {
        let looks_escaped = ch == '_'
            && bytes.len() >= i + 7
            && bytes[i + 1] == b'x'
            && bytes[i + 2..i + 6].iter().all(u8::is_ascii_hexdigit)
            && bytes[i + 6] == b'_';
        if looks_escaped {
            result.push_str("_x005F_");
        } else if is_xml_restricted(ch) {
            result.push_str(&format!("_x{:04X}_", u32::from(ch)));
        } else {
            result.push(ch);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_escape_xml() {
        assert_eq!(
            XlsxWriter::escape_xml(r#"<a href="x">&'"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&apos;"
        );
    }

    #[test]
    fn test_encode_excel_escapes() {
        assert_eq!(encode_excel_escapes("tags_1"), "tags_1");
        assert_eq!(encode_excel_escapes("a_x000d_b"), "a_x005F_x000d_b");
        assert_eq!(encode_excel_escapes("_x00"), "_x00");
        assert_eq!(encode_excel_escapes("ünï_x0041_"), "ünï_x005F_x0041_");
    }

    #[test]
    fn test_control_characters_are_escaped() {
        assert_eq!(encode_excel_escapes("a\u{7}b"), "a_x0007_b");
        assert_eq!(encode_excel_escapes("\u{0}\u{1F}"), "_x0000__x001F_");
        assert_eq!(encode_excel_escapes("tab\tline\nret\r"), "tab\tline\nret\r");
        assert_eq!(encode_excel_escapes("\u{FFFF}"), "_xFFFF_");
    }

    #[test]
    fn test_empty_workbook_rejected() {
        let mut buf = std::io::Cursor::new(Vec::new());
        let err = XlsxWriter::write(&Workbook::empty(), &mut buf).unwrap_err();
        assert!(matches!(err, XlsxError::InvalidFormat(_)));
    }
}

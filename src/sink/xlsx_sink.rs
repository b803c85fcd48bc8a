/*!
 * Office Open XML workbook writer.
 *
 * The package holds a single worksheet with inline strings, one `xf`
 * record per distinct cell style, and explicit column widths.
 */

use indexmap::IndexSet;
use quick_xml::escape::escape;
use std::fmt::Write as _;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::errors::Result;
use crate::projection::{CellStyle, HorizontalAlign, Sheet, VerticalAlign};

use super::{as_integer, TabularSink, WORKSHEET_NAME};

const XML_HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

const CONTENT_TYPES: &str = r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/><Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

const WORKBOOK_RELS: &str = r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

/// Excel workbook (.xlsx)
pub struct XlsxSink;

/// Spreadsheet column name for a 1-based index (1 -> A, 27 -> AA)
pub fn column_name(mut col: usize) -> String {
    let mut name = Vec::new();
    while col > 0 {
        let remainder = (col - 1) % 26;
        name.push(b'A' + remainder as u8);
        col = (col - 1) / 26;
    }
    name.reverse();
    String::from_utf8(name).unwrap_or_default()
}

fn horizontal_attribute(align: HorizontalAlign) -> &'static str {
    match align {
        HorizontalAlign::General => "general",
        HorizontalAlign::Left => "left",
        HorizontalAlign::Center => "center",
        HorizontalAlign::Right => "right",
        HorizontalAlign::Justify => "justify",
    }
}

fn vertical_attribute(align: VerticalAlign) -> &'static str {
    match align {
        VerticalAlign::Top => "top",
        VerticalAlign::Center => "center",
        VerticalAlign::Bottom => "bottom",
    }
}

fn workbook_xml() -> String {
    format!(
        r#"{XML_HEADER}<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="{}" sheetId="1" r:id="rId1"/></sheets></workbook>"#,
        WORKSHEET_NAME
    )
}

/// Stylesheet; `xf` 0 is the workbook default, cell styles follow in order
fn styles_xml(styles: &IndexSet<CellStyle>) -> String {
    let mut xml = String::from(XML_HEADER);
    xml.push_str(r#"<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#);
    xml.push_str(r#"<fonts count="2"><font><sz val="11"/><name val="Calibri"/></font><font><b/><sz val="11"/><name val="Calibri"/></font></fonts>"#);
    xml.push_str(r#"<fills count="2"><fill><patternFill patternType="none"/></fill><fill><patternFill patternType="gray125"/></fill></fills>"#);
    xml.push_str(r#"<borders count="1"><border><left/><right/><top/><bottom/><diagonal/></border></borders>"#);
    xml.push_str(r#"<cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs>"#);

    let _ = write!(xml, r#"<cellXfs count="{}">"#, styles.len() + 1);
    xml.push_str(r#"<xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/>"#);
    for style in styles {
        let _ = write!(
            xml,
            r#"<xf numFmtId="0" fontId="{}" fillId="0" borderId="0" xfId="0" applyFont="1" applyAlignment="1"><alignment horizontal="{}" vertical="{}" wrapText="{}"/></xf>"#,
            if style.bold { 1 } else { 0 },
            horizontal_attribute(style.horizontal),
            vertical_attribute(style.vertical),
            if style.wrap_text { 1 } else { 0 },
        );
    }
    xml.push_str("</cellXfs>");
    xml.push_str(r#"<cellStyles count="1"><cellStyle name="Normal" xfId="0" builtinId="0"/></cellStyles>"#);
    xml.push_str("</styleSheet>");
    xml
}

/// Worksheet body, registering every cell style it uses
fn sheet_xml(sheet: &Sheet, styles: &mut IndexSet<CellStyle>) -> String {
    let mut xml = String::from(XML_HEADER);
    xml.push_str(r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#);

    let widths: Vec<(usize, usize)> = (1..=sheet.column_count())
        .filter_map(|col| sheet.column_width(col).map(|width| (col, width)))
        .collect();
    if !widths.is_empty() {
        xml.push_str("<cols>");
        for (col, width) in widths {
            let _ = write!(xml, r#"<col min="{col}" max="{col}" width="{width}" customWidth="1"/>"#);
        }
        xml.push_str("</cols>");
    }

    xml.push_str("<sheetData>");
    for (row_index, row) in sheet.rows().iter().enumerate() {
        let row_number = row_index + 1;
        let _ = write!(xml, r#"<row r="{}">"#, row_number);
        for cell in row.iter().flatten() {
            let (style_index, _) = styles.insert_full(cell.style);
            let reference = format!("{}{}", column_name(cell.col), row_number);
            let style_id = style_index + 1;
            match as_integer(&cell.content).filter(|_| !cell.is_header) {
                Some(number) => {
                    let _ = write!(xml, r#"<c r="{reference}" s="{style_id}"><v>{number}</v></c>"#);
                }
                None => {
                    let _ = write!(
                        xml,
                        r#"<c r="{reference}" s="{style_id}" t="inlineStr"><is><t xml:space="preserve">{}</t></is></c>"#,
                        escape(cell.content.as_str())
                    );
                }
            }
        }
        xml.push_str("</row>");
    }
    xml.push_str("</sheetData></worksheet>");
    xml
}

impl TabularSink for XlsxSink {
    fn write(&self, sheet: &Sheet, out: &mut dyn Write) -> Result<()> {
        let mut styles = IndexSet::new();
        let worksheet = sheet_xml(sheet, &mut styles);

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        let parts = [
            ("[Content_Types].xml", format!("{XML_HEADER}{CONTENT_TYPES}")),
            ("_rels/.rels", format!("{XML_HEADER}{ROOT_RELS}")),
            ("xl/workbook.xml", workbook_xml()),
            ("xl/_rels/workbook.xml.rels", format!("{XML_HEADER}{WORKBOOK_RELS}")),
            ("xl/styles.xml", styles_xml(&styles)),
            ("xl/worksheets/sheet1.xml", worksheet),
        ];
        for (name, content) in parts {
            zip.start_file(name, options)?;
            zip.write_all(content.as_bytes())?;
        }

        let archive = zip.finish()?.into_inner();
        out.write_all(&archive)?;
        Ok(())
    }
}

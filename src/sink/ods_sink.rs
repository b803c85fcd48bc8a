/*!
 * OpenDocument spreadsheet writer.
 *
 * The `mimetype` entry must come first and be stored uncompressed so that
 * readers can sniff the package type.
 */

use indexmap::IndexSet;
use quick_xml::escape::escape;
use std::fmt::Write as _;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::errors::Result;
use crate::projection::{Cell, CellStyle, HorizontalAlign, Sheet, VerticalAlign};

use super::{as_integer, TabularSink, CHARACTER_WIDTH_INCHES, WORKSHEET_NAME};

const MIMETYPE: &str = "application/vnd.oasis.opendocument.spreadsheet";

const MANIFEST: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<manifest:manifest xmlns:manifest="urn:oasis:names:tc:opendocument:xmlns:manifest:1.0" manifest:version="1.2"><manifest:file-entry manifest:full-path="/" manifest:version="1.2" manifest:media-type="application/vnd.oasis.opendocument.spreadsheet"/><manifest:file-entry manifest:full-path="content.xml" manifest:media-type="text/xml"/></manifest:manifest>"#;

/// OpenDocument spreadsheet (.ods)
pub struct OdsSink;

fn text_align(align: HorizontalAlign) -> Option<&'static str> {
    match align {
        HorizontalAlign::General => None,
        HorizontalAlign::Left => Some("start"),
        HorizontalAlign::Center => Some("center"),
        HorizontalAlign::Right => Some("end"),
        HorizontalAlign::Justify => Some("justify"),
    }
}

fn vertical_align(align: VerticalAlign) -> &'static str {
    match align {
        VerticalAlign::Top => "top",
        VerticalAlign::Center => "middle",
        VerticalAlign::Bottom => "bottom",
    }
}

fn cell_style_xml(name: &str, style: &CellStyle) -> String {
    let mut xml = format!(
        r#"<style:style style:name="{name}" style:family="table-cell"><style:table-cell-properties style:vertical-align="{}""#,
        vertical_align(style.vertical)
    );
    if style.wrap_text {
        xml.push_str(r#" fo:wrap-option="wrap""#);
    }
    xml.push_str("/>");
    if let Some(align) = text_align(style.horizontal) {
        let _ = write!(xml, r#"<style:paragraph-properties fo:text-align="{align}"/>"#);
    }
    if style.bold {
        xml.push_str(r#"<style:text-properties fo:font-weight="bold"/>"#);
    }
    xml.push_str("</style:style>");
    xml
}

fn cell_xml(cell: &Cell, style_name: &str) -> String {
    let paragraphs: String = cell
        .content
        .split('\n')
        .map(|line| format!("<text:p>{}</text:p>", escape(line)))
        .collect();
    match as_integer(&cell.content).filter(|_| !cell.is_header) {
        Some(number) => format!(
            r#"<table:table-cell table:style-name="{style_name}" office:value-type="float" office:value="{number}">{paragraphs}</table:table-cell>"#
        ),
        None => format!(
            r#"<table:table-cell table:style-name="{style_name}" office:value-type="string">{paragraphs}</table:table-cell>"#
        ),
    }
}

fn content_xml(sheet: &Sheet) -> String {
    let mut styles: IndexSet<CellStyle> = IndexSet::new();
    let mut rows = String::new();
    for row in sheet.rows() {
        rows.push_str("<table:table-row>");
        for cell in row {
            match cell {
                Some(cell) => {
                    let (index, _) = styles.insert_full(cell.style);
                    rows.push_str(&cell_xml(cell, &format!("ce{}", index + 1)));
                }
                None => rows.push_str("<table:table-cell/>"),
            }
        }
        rows.push_str("</table:table-row>");
    }

    let mut automatic = String::new();
    let mut columns = String::new();
    for col in 1..=sheet.column_count() {
        match sheet.column_width(col) {
            Some(width) => {
                let _ = write!(
                    automatic,
                    r#"<style:style style:name="co{col}" style:family="table-column"><style:table-column-properties style:column-width="{:.3}in"/></style:style>"#,
                    width as f64 * CHARACTER_WIDTH_INCHES
                );
                let _ = write!(columns, r#"<table:table-column table:style-name="co{col}"/>"#);
            }
            None => columns.push_str("<table:table-column/>"),
        }
    }
    for (index, style) in styles.iter().enumerate() {
        automatic.push_str(&cell_style_xml(&format!("ce{}", index + 1), style));
    }

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<office:document-content xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0" xmlns:style="urn:oasis:names:tc:opendocument:xmlns:style:1.0" xmlns:text="urn:oasis:names:tc:opendocument:xmlns:text:1.0" xmlns:table="urn:oasis:names:tc:opendocument:xmlns:table:1.0" xmlns:fo="urn:oasis:names:tc:opendocument:xmlns:xsl-fo-compatible:1.0" office:version="1.2"><office:automatic-styles>{automatic}</office:automatic-styles><office:body><office:spreadsheet><table:table table:name="{}">{columns}{rows}</table:table></office:spreadsheet></office:body></office:document-content>"#,
        WORKSHEET_NAME
    )
}

impl TabularSink for OdsSink {
    fn write(&self, sheet: &Sheet, out: &mut dyn Write) -> Result<()> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let stored = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
        let deflated = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        zip.start_file("mimetype", stored)?;
        zip.write_all(MIMETYPE.as_bytes())?;
        zip.start_file("META-INF/manifest.xml", deflated)?;
        zip.write_all(MANIFEST.as_bytes())?;
        zip.start_file("content.xml", deflated)?;
        zip.write_all(content_xml(sheet).as_bytes())?;

        let archive = zip.finish()?.into_inner();
        out.write_all(&archive)?;
        Ok(())
    }
}

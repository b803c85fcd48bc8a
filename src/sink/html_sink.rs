use quick_xml::escape::escape;
use std::io::Write;

use crate::errors::Result;
use crate::projection::{Cell, CellStyle, HorizontalAlign, Sheet, VerticalAlign};

use super::{TabularSink, WORKSHEET_NAME};

/// Standalone HTML document holding one table
pub struct HtmlSink;

fn css_for(style: &CellStyle) -> String {
    let mut css = String::new();
    match style.horizontal {
        HorizontalAlign::General => {}
        HorizontalAlign::Left => css.push_str("text-align:left;"),
        HorizontalAlign::Center => css.push_str("text-align:center;"),
        HorizontalAlign::Right => css.push_str("text-align:right;"),
        HorizontalAlign::Justify => css.push_str("text-align:justify;"),
    }
    css.push_str(match style.vertical {
        VerticalAlign::Top => "vertical-align:top;",
        VerticalAlign::Center => "vertical-align:middle;",
        VerticalAlign::Bottom => "vertical-align:bottom;",
    });
    if !style.wrap_text {
        css.push_str("white-space:nowrap;");
    }
    if style.bold {
        css.push_str("font-weight:bold;");
    }
    css
}

fn render_cell(cell: Option<&Cell>) -> String {
    let Some(cell) = cell else {
        return "<td></td>".to_string();
    };
    let tag = if cell.is_header { "th" } else { "td" };
    let body = cell
        .content
        .split('\n')
        .map(|line| escape(line).into_owned())
        .collect::<Vec<_>>()
        .join("<br>");
    format!("<{tag} style=\"{}\">{}</{tag}>", css_for(&cell.style), body)
}

impl TabularSink for HtmlSink {
    fn write(&self, sheet: &Sheet, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "<!DOCTYPE html>")?;
        writeln!(out, "<html>")?;
        writeln!(out, "<head>")?;
        writeln!(out, "<meta charset=\"utf-8\">")?;
        writeln!(out, "<title>{}</title>", WORKSHEET_NAME)?;
        writeln!(
            out,
            "<style>table {{ border-collapse: collapse; }} th, td {{ border: 1px solid #ccc; padding: 2px 4px; }}</style>"
        )?;
        writeln!(out, "</head>")?;
        writeln!(out, "<body>")?;
        writeln!(out, "<table>")?;

        writeln!(out, "<colgroup>")?;
        for col in 1..=sheet.column_count() {
            match sheet.column_width(col) {
                Some(width) => writeln!(out, "<col style=\"width:{}ch\">", width)?,
                None => writeln!(out, "<col>")?,
            }
        }
        writeln!(out, "</colgroup>")?;

        for row in sheet.rows() {
            let cells: String = row.iter().map(|cell| render_cell(*cell)).collect();
            writeln!(out, "<tr>{}</tr>", cells)?;
        }

        writeln!(out, "</table>")?;
        writeln!(out, "</body>")?;
        writeln!(out, "</html>")?;
        Ok(())
    }
}

use log::debug;

use crate::scene::{AttributeRegistry, SceneRecord};

use super::sheet::Sheet;
use super::style::style_for_key;
use super::{header_width, CellContent};

// @module: Full-dump projection

/// One column per key in use, rows in parse order.
///
/// A cell is only written when the record has the key. Widths are capped at
/// `wrap_size` and set for every column except the last, which is left to
/// grow.
pub fn prepare_full_sheet(records: &[SceneRecord], registry: &AttributeRegistry, wrap_size: usize) -> Sheet {
    let headers = registry.headers();
    let mut sheet = Sheet::new();
    let mut widths = Vec::with_capacity(headers.len());

    for (index, header) in headers.iter().enumerate() {
        sheet.set_header(index + 1, &header.label);
        widths.push(header_width(&header.label));
    }

    for (offset, record) in records.iter().enumerate() {
        let row = offset + 2;
        for (index, header) in headers.iter().enumerate() {
            if !record.contains_key(&header.key) {
                continue;
            }
            let content = CellContent::from_value(record.get(&header.key));
            widths[index] = widths[index].max(content.length);
            sheet.set_cell(row, index + 1, content.text, style_for_key(&header.key).to_cell_style());
        }
    }

    for (index, width) in widths.iter().enumerate().take(headers.len().saturating_sub(1)) {
        sheet.set_column_width(index + 1, (*width).min(wrap_size));
    }

    debug!("Full sheet: {} columns, {} scenes", headers.len(), records.len());
    sheet
}

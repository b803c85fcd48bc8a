/*!
 * Grid of styled cells produced by the projection engine.
 *
 * Rows and columns are 1-based, with row 1 holding the headers.
 */

use std::collections::BTreeMap;

use super::style::CellStyle;

/// A single populated cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
    pub content: String,
    pub is_header: bool,
    pub style: CellStyle,
}

/// Cells plus derived column widths
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheet {
    cells: BTreeMap<(usize, usize), Cell>,
    column_widths: BTreeMap<usize, usize>,
}

impl Sheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a header cell in row 1
    pub fn set_header(&mut self, col: usize, label: &str) {
        self.cells.insert(
            (1, col),
            Cell {
                row: 1,
                col,
                content: label.to_string(),
                is_header: true,
                style: CellStyle::header(),
            },
        );
    }

    /// Place a data cell, replacing anything already at that position
    pub fn set_cell(&mut self, row: usize, col: usize, content: impl Into<String>, style: CellStyle) {
        self.cells.insert(
            (row, col),
            Cell {
                row,
                col,
                content: content.into(),
                is_header: false,
                style,
            },
        );
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.cells.get(&(row, col))
    }

    /// Content at a position, empty when the cell is absent
    pub fn value(&self, row: usize, col: usize) -> &str {
        self.cell(row, col).map(|cell| cell.content.as_str()).unwrap_or_default()
    }

    /// Cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.values()
    }

    pub fn set_column_width(&mut self, col: usize, width: usize) {
        self.column_widths.insert(col, width);
    }

    /// Width in characters, if one was derived for the column
    pub fn column_width(&self, col: usize) -> Option<usize> {
        self.column_widths.get(&col).copied()
    }

    pub fn row_count(&self) -> usize {
        self.cells.keys().map(|(row, _)| *row).max().unwrap_or(0)
    }

    pub fn column_count(&self) -> usize {
        self.cells.keys().map(|(_, col)| *col).max().unwrap_or(0)
    }

    /// Dense view of the sheet: one entry per row, one slot per column
    pub fn rows(&self) -> Vec<Vec<Option<&Cell>>> {
        let columns = self.column_count();
        (1..=self.row_count())
            .map(|row| (1..=columns).map(|col| self.cell(row, col)).collect())
            .collect()
    }
}

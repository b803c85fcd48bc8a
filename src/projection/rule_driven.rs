use log::debug;
use std::borrow::Cow;
use std::collections::{HashMap, HashSet};

use crate::criteria::Predicate;
use crate::rules::{ColumnPlan, PlannedColumn, ResultSource};
use crate::scene::SceneRecord;

use super::sheet::Sheet;
use super::style::{generic_style, style_for_key, ColumnStyle, HorizontalAlign};
use super::{header_width, CellContent, FIRST_OCCURRENCE_WIDTH_FACTOR};

// @module: Rule-driven projection

/// Values already shown in each on-first column, keyed by heading
#[derive(Debug, Default)]
struct FirstOccurrences {
    seen: HashMap<String, HashSet<String>>,
}

impl FirstOccurrences {
    /// Record `values` for a column, returning how many had not been seen before
    fn mark(&mut self, heading: &str, values: &[String]) -> usize {
        let seen = self.seen.entry(heading.to_string()).or_default();
        values.iter().filter(|value| seen.insert((*value).clone())).count()
    }
}

/// Tracks the 1-based position of a scene within its novel
#[derive(Debug, Default)]
struct NovelSequence {
    novel: Option<String>,
    position: usize,
}

impl NovelSequence {
    fn next(&mut self, novel: &str) -> usize {
        if self.novel.as_deref() != Some(novel) {
            self.novel = Some(novel.to_string());
            self.position = 0;
        }
        self.position += 1;
        self.position
    }
}

/// Build a sheet from compiled rule columns.
///
/// Every cell of every row is written, empty or not. Widths are capped at
/// `wrap_size` for all columns.
pub fn prepare_sheet(records: &[SceneRecord], plan: &[ColumnPlan], wrap_size: usize) -> Sheet {
    let mut sheet = Sheet::new();
    let mut widths: Vec<usize> = Vec::with_capacity(plan.len());

    for (index, column) in plan.iter().enumerate() {
        sheet.set_header(index + 1, &column.heading);
        widths.push(header_width(&column.heading));
    }

    let mut first_occurrences = FirstOccurrences::default();
    let mut sequence = NovelSequence::default();

    for (offset, record) in records.iter().enumerate() {
        let row = offset + 2;
        let position = sequence.next(record.novel());

        for (index, column) in plan.iter().enumerate() {
            let (mut content, mut style) = resolve_cell(record, &column.column, position);
            content.length += 1;

            if style.on_first {
                let new_values = first_occurrences.mark(&column.heading, &content.values);
                for _ in 0..new_values {
                    style.bold = true;
                    content.length = (content.length as f64 * FIRST_OCCURRENCE_WIDTH_FACTOR).round() as usize;
                }
            }

            widths[index] = widths[index].max(content.length);
            sheet.set_cell(row, index + 1, content.text, style.to_cell_style());
        }
    }

    for (index, width) in widths.iter().enumerate() {
        sheet.set_column_width(index + 1, (*width).min(wrap_size));
    }

    debug!("Rule sheet: {} columns, {} scenes", plan.len(), records.len());
    sheet
}

/// Content and style of one rule cell
fn resolve_cell(record: &SceneRecord, column: &PlannedColumn, position: usize) -> (CellContent, ColumnStyle) {
    match column {
        PlannedColumn::Blank => (CellContent::default(), generic_style()),
        PlannedColumn::Sequence => {
            let mut style = generic_style();
            style.align = HorizontalAlign::Right;
            (CellContent::literal(&position.to_string()), style)
        }
        PlannedColumn::Key(key) => (CellContent::from_value(record.get(key)), style_for_key(key)),
        PlannedColumn::Conditional {
            test,
            result,
            key,
            style,
        } => {
            if !test.evaluate(record) {
                return (CellContent::default(), generic_style());
            }
            let content = match (result, key) {
                (Some(ResultSource::Literal(text)), _) => CellContent::literal(text),
                (Some(ResultSource::Attribute(source)), _) => CellContent::from_value(record.get(source)),
                (None, Some(key)) => CellContent::from_value(record.get(key)),
                (None, None) => CellContent::literal("*"),
            };
            let base = key.as_deref().map(style_for_key).unwrap_or_else(generic_style);
            (content, base.merge(style))
        }
        PlannedColumn::Filtered { key, exclude, style } => {
            let source = if exclude.is_empty() {
                Cow::Borrowed(record)
            } else {
                Cow::Owned(record.without_values(key, exclude))
            };
            (
                CellContent::from_value(source.get(key)),
                style_for_key(key).merge(style),
            )
        }
    }
}

/*!
 * Projection of scene records into a styled grid.
 *
 * Two modes are available:
 * - full dump: one column per attribute key in use, in canonical order
 * - rule driven: the columns described by a rule file
 */

pub mod full_dump;
pub mod rule_driven;
pub mod sheet;
pub mod style;

use crate::errors::Result;
use crate::rules::ColumnSpec;
use crate::scene::{collapse_whitespace, AttributeRegistry, AttributeValue, SceneRecord};

pub use sheet::{Cell, Sheet};
pub use style::{style_for_key, CellStyle, ColumnStyle, HorizontalAlign, StyleOverride, VerticalAlign};

/// Column width cap when neither the configuration nor the rule file sets one
pub const DEFAULT_WRAP_SIZE: usize = 40;

/// Header widths are seeded at this multiple of the label length
pub const HEADER_WIDTH_FACTOR: f64 = 1.4;

/// Width growth applied for each first occurrence in an on-first column.
/// Tunable; it only affects column widths.
pub const FIRST_OCCURRENCE_WIDTH_FACTOR: f64 = 1.2;

/// Text of a cell, the distinct values it shows and its width contribution
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellContent {
    pub text: String,
    pub values: Vec<String>,
    pub length: usize,
}

impl CellContent {
    /// Display form of an attribute value.
    ///
    /// Lists are newline-joined and measured by their longest item; text has
    /// whitespace runs collapsed.
    pub fn from_value(value: Option<&AttributeValue>) -> Self {
        match value {
            Some(AttributeValue::List(items)) => Self {
                text: items.join("\n"),
                values: items.clone(),
                length: items.iter().map(|item| item.chars().count()).max().unwrap_or(0),
            },
            Some(AttributeValue::Text(text)) => {
                let text = collapse_whitespace(text).into_owned();
                Self {
                    length: text.chars().count(),
                    values: if text.is_empty() { Vec::new() } else { vec![text.clone()] },
                    text,
                }
            }
            None => Self::default(),
        }
    }

    /// Fixed text
    pub fn literal(text: &str) -> Self {
        Self {
            text: text.to_string(),
            values: vec![text.to_string()],
            length: text.chars().count(),
        }
    }
}

/// Initial width of a column from its header label
pub fn header_width(label: &str) -> usize {
    (HEADER_WIDTH_FACTOR * label.chars().count() as f64).ceil() as usize
}

/// Projection engine for one export
#[derive(Debug, Clone, Copy)]
pub struct ProjectionEngine {
    wrap_size: usize,
}

impl Default for ProjectionEngine {
    fn default() -> Self {
        Self::new(DEFAULT_WRAP_SIZE)
    }
}

impl ProjectionEngine {
    pub fn new(wrap_size: usize) -> Self {
        Self { wrap_size }
    }

    /// Every attribute in use, one column per key
    pub fn prepare_full_sheet(&self, records: &[SceneRecord], registry: &AttributeRegistry) -> Sheet {
        full_dump::prepare_full_sheet(records, registry, self.wrap_size)
    }

    /// Columns described by a rule file
    pub fn prepare_sheet(&self, records: &[SceneRecord], spec: &ColumnSpec) -> Result<Sheet> {
        let plan = spec.plan()?;
        Ok(rule_driven::prepare_sheet(
            records,
            &plan,
            spec.wrap.unwrap_or(self.wrap_size),
        ))
    }
}

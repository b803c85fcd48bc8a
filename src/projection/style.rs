/*!
 * Cell styles and the per-key style table.
 */

use serde::{Deserialize, Serialize};

/// Horizontal alignment of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalAlign {
    #[default]
    General,
    Left,
    #[serde(alias = "centre", alias = "centerContinuous")]
    Center,
    Right,
    #[serde(alias = "distributed")]
    Justify,
}

/// Vertical alignment of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    #[default]
    Top,
    Center,
    Bottom,
}

/// Presentation hints handed to the tabular sink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellStyle {
    pub horizontal: HorizontalAlign,
    pub vertical: VerticalAlign,
    pub wrap_text: bool,
    pub bold: bool,
}

impl Default for CellStyle {
    fn default() -> Self {
        Self {
            horizontal: HorizontalAlign::General,
            vertical: VerticalAlign::Top,
            wrap_text: true,
            bold: false,
        }
    }
}

impl CellStyle {
    /// Bold, centered header style
    pub fn header() -> Self {
        Self {
            horizontal: HorizontalAlign::Center,
            vertical: VerticalAlign::Top,
            wrap_text: false,
            bold: true,
        }
    }
}

/// Column style before it is applied to a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnStyle {
    pub align: HorizontalAlign,
    pub on_first: bool,
    pub wrap: bool,
    pub bold: bool,
}

impl ColumnStyle {
    /// Apply a partial override
    pub fn merge(mut self, style: &StyleOverride) -> Self {
        if let Some(align) = style.align {
            self.align = align;
        }
        if let Some(on_first) = style.on_first {
            self.on_first = on_first;
        }
        if let Some(wrap) = style.wrap {
            self.wrap = wrap;
        }
        if let Some(bold) = style.bold {
            self.bold = bold;
        }
        self
    }

    pub fn to_cell_style(self) -> CellStyle {
        CellStyle {
            horizontal: self.align,
            vertical: VerticalAlign::Top,
            wrap_text: self.wrap,
            bold: self.bold,
        }
    }
}

/// Partial style, as found in the style table and in rule files
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<HorizontalAlign>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_first: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wrap: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
}

const GENERIC_STYLE: ColumnStyle = ColumnStyle {
    align: HorizontalAlign::General,
    on_first: false,
    wrap: true,
    bold: false,
};

const REFERENCE_STYLE: ColumnStyle = ColumnStyle {
    align: HorizontalAlign::Center,
    on_first: true,
    wrap: true,
    bold: false,
};

const fn align_only(align: HorizontalAlign) -> StyleOverride {
    StyleOverride {
        align: Some(align),
        on_first: None,
        wrap: None,
        bold: None,
    }
}

/// Exact-key entries, merged over the generic style
const KEY_STYLES: &[(&str, StyleOverride)] = &[
    (
        "comments",
        StyleOverride {
            align: Some(HorizontalAlign::Left),
            on_first: None,
            wrap: Some(false),
            bold: None,
        },
    ),
    ("duration", align_only(HorizontalAlign::Right)),
    ("time", align_only(HorizontalAlign::Right)),
    ("words", align_only(HorizontalAlign::Right)),
];

/// Default style of a column showing `key`
pub fn style_for_key(key: &str) -> ColumnStyle {
    if let Some((_, style)) = KEY_STYLES.iter().find(|(known, _)| *known == key) {
        GENERIC_STYLE.merge(style)
    } else if key.starts_with('@') {
        REFERENCE_STYLE
    } else {
        GENERIC_STYLE
    }
}

/// Style for a column that has no key
pub fn generic_style() -> ColumnStyle {
    GENERIC_STYLE
}

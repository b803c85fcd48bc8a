/*!
 * Column rule files.
 *
 * A rule file describes the columns of a custom report:
 *
 * ```json
 * {
 *   "wrap": 30,
 *   "columns": [
 *     "_sequence",
 *     "name",
 *     {"key": "@char", "heading": "Cast", "exclude": ["Narrator"]},
 *     {"test": "char contains Alice", "result": "A", "heading": "Alice?"}
 *   ]
 * }
 * ```
 */

pub mod loader;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::criteria::Criteria;
use crate::errors::{ExtractError, Result};
use crate::projection::StyleOverride;
use crate::scene::{label_for, BLANK_KEY, SEQUENCE_KEY};

pub use loader::load_column_spec;

/// Heading used when a rule column names neither a heading nor a key
pub const UNNAMED_HEADING: &str = "???";

/// Parsed rule file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub columns: Vec<ColumnDef>,
    /// Column width cap overriding the configured wrap size
    #[serde(default, deserialize_with = "deserialize_wrap", skip_serializing_if = "Option::is_none")]
    pub wrap: Option<usize>,
}

/// Any JSON number is a width; fractions round to the nearest character
fn deserialize_wrap<'de, D>(deserializer: D) -> std::result::Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<f64>::deserialize(deserializer)?
        .map(|width| {
            if width.is_finite() && width >= 0.0 {
                Ok(width.round() as usize)
            } else {
                Err(D::Error::custom(format!("wrap must be a positive number, found {}", width)))
            }
        })
        .transpose()
}

/// One entry of the `columns` array
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnDef {
    /// Attribute key, `_blank` or `_sequence`
    Key(String),
    Rule(RuleColumn),
}

/// Object form of a column
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleColumn {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,
    #[serde(default)]
    pub style: StyleOverride,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
}

/// Where a conditional column takes its content from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultSource {
    /// Literal text
    Literal(String),
    /// `*key`: another attribute of the scene
    Attribute(String),
}

impl ResultSource {
    fn parse(result: &str) -> Self {
        match result.strip_prefix('*') {
            Some(key) => Self::Attribute(key.to_string()),
            None => Self::Literal(result.to_string()),
        }
    }
}

/// Column definition ready for projection
#[derive(Debug, Clone)]
pub enum PlannedColumn {
    Blank,
    Sequence,
    Key(String),
    Conditional {
        test: Criteria,
        result: Option<ResultSource>,
        key: Option<String>,
        style: StyleOverride,
    },
    Filtered {
        key: String,
        exclude: Vec<String>,
        style: StyleOverride,
    },
}

/// Column heading and its compiled definition
#[derive(Debug, Clone)]
pub struct ColumnPlan {
    pub heading: String,
    pub column: PlannedColumn,
}

impl ColumnDef {
    /// Heading shown for this column
    pub fn heading(&self) -> String {
        match self {
            Self::Key(key) => label_for(key),
            Self::Rule(rule) => match (&rule.heading, &rule.key) {
                (Some(heading), _) => heading.clone(),
                (None, Some(key)) => label_for(key),
                (None, None) => UNNAMED_HEADING.to_string(),
            },
        }
    }

    /// Compile the definition, checking any test expression
    pub fn plan(&self) -> Result<ColumnPlan> {
        let column = match self {
            Self::Key(key) if key == BLANK_KEY => PlannedColumn::Blank,
            Self::Key(key) if key == SEQUENCE_KEY => PlannedColumn::Sequence,
            Self::Key(key) => PlannedColumn::Key(key.clone()),
            Self::Rule(rule) => match (&rule.test, &rule.key) {
                (Some(test), _) => PlannedColumn::Conditional {
                    test: Criteria::compile(test)?,
                    result: rule.result.as_deref().map(ResultSource::parse),
                    key: rule.key.clone(),
                    style: rule.style,
                },
                (None, Some(key)) => PlannedColumn::Filtered {
                    key: key.clone(),
                    exclude: rule.exclude.clone(),
                    style: rule.style,
                },
                (None, None) => PlannedColumn::Blank,
            },
        };

        Ok(ColumnPlan {
            heading: self.heading(),
            column,
        })
    }
}

impl ColumnSpec {
    /// Compile every column
    pub fn plan(&self) -> Result<Vec<ColumnPlan>> {
        self.columns.iter().map(ColumnDef::plan).collect()
    }

    /// Structural checks applied when a rule file is loaded
    pub fn validate(&self) -> Result<()> {
        if self.columns.is_empty() {
            return Err(ExtractError::Config("rule file defines no columns".to_string()));
        }
        if self.wrap == Some(0) {
            return Err(ExtractError::Config("wrap must be greater than zero".to_string()));
        }
        self.plan().map_err(|e| match e {
            ExtractError::Criteria(message) => ExtractError::Config(format!("invalid test expression: {}", message)),
            other => other,
        })?;
        Ok(())
    }
}

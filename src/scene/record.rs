/*!
 * Scene record model.
 *
 * A scene record is an insertion-ordered mapping from attribute key to
 * value. Keys are discovered while parsing, so the record is a map rather
 * than a fixed struct.
 */

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::borrow::Cow;

/// Owning novel name
pub const NOVEL_KEY: &str = "_novel";
/// Scene title
pub const NAME_KEY: &str = "name";
/// Word count of the source document (first scene only)
pub const WORDS_KEY: &str = "words";
/// Free-text header notes
pub const COMMENTS_KEY: &str = "comments";
/// Short description of the scene
pub const SYNOPSIS_KEY: &str = "synopsis";

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Collapse every run of whitespace into a single space
pub fn collapse_whitespace(text: &str) -> Cow<'_, str> {
    WHITESPACE_RUN.replace_all(text, " ")
}

/// Value of a scene attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// Single normalized string
    Text(String),
    /// Ordered items of a reference attribute
    List(Vec<String>),
}

impl AttributeValue {
    /// Build a text value
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Build a list value
    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// True for an empty string or an empty list
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.is_empty(),
            Self::List(items) => items.is_empty(),
        }
    }

    /// Items of the value; a text value is a single item
    pub fn items(&self) -> Vec<&str> {
        match self {
            Self::Text(text) => vec![text.as_str()],
            Self::List(items) => items.iter().map(String::as_str).collect(),
        }
    }

    /// Inline form used when comparing values: list items joined with ", "
    pub fn inline(&self) -> Cow<'_, str> {
        match self {
            Self::Text(text) => Cow::Borrowed(text.as_str()),
            Self::List(items) => Cow::Owned(items.join(", ")),
        }
    }
}

/// One scene and its attributes
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SceneRecord {
    attributes: IndexMap<String, AttributeValue>,
}

impl SceneRecord {
    /// Open a record for a scene title
    pub fn new(novel: &str, name: &str, words: &str) -> Self {
        let mut record = Self::default();
        record.set(NOVEL_KEY, AttributeValue::text(novel));
        record.set(NAME_KEY, AttributeValue::text(name));
        record.set(WORDS_KEY, AttributeValue::text(words));
        record
    }

    /// Set an attribute, keeping the original position when the key already exists
    pub fn set(&mut self, key: impl Into<String>, value: AttributeValue) {
        self.attributes.insert(key.into(), value);
    }

    /// Look up an attribute.
    ///
    /// A bare key that is not present falls back to its reference form,
    /// so `char` finds `@char`.
    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes.get(key).or_else(|| {
            if key.starts_with('@') {
                None
            } else {
                self.attributes.get(&format!("@{}", key))
            }
        })
    }

    /// Exact-key membership, without the reference fallback
    pub fn contains_key(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    /// Text of a single-valued attribute
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.get(key) {
            Some(AttributeValue::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// Items of a multi-valued attribute
    pub fn list(&self, key: &str) -> Option<&[String]> {
        match self.get(key) {
            Some(AttributeValue::List(items)) => Some(items),
            _ => None,
        }
    }

    pub fn name(&self) -> &str {
        self.text(NAME_KEY).unwrap_or_default()
    }

    pub fn novel(&self) -> &str {
        self.text(NOVEL_KEY).unwrap_or_default()
    }

    pub fn words(&self) -> &str {
        self.text(WORDS_KEY).unwrap_or_default()
    }

    /// Header notes collected for the scene
    pub fn comments(&self) -> &[String] {
        self.list(COMMENTS_KEY).unwrap_or_default()
    }

    /// Copy of the record with matching values removed from one attribute.
    ///
    /// List items found in `exclude` are dropped; a text value found in
    /// `exclude` is blanked.
    pub fn without_values(&self, key: &str, exclude: &[String]) -> SceneRecord {
        let mut filtered = self.clone();
        let Some(value) = self.get(key) else {
            return filtered;
        };
        let resolved_key = if self.attributes.contains_key(key) {
            key.to_string()
        } else {
            format!("@{}", key)
        };
        let replacement = match value {
            AttributeValue::List(items) => AttributeValue::List(
                items
                    .iter()
                    .filter(|item| !exclude.contains(item))
                    .cloned()
                    .collect(),
            ),
            AttributeValue::Text(text) if exclude.contains(text) => AttributeValue::text(""),
            AttributeValue::Text(text) => AttributeValue::text(text.clone()),
        };
        filtered.set(resolved_key, replacement);
        filtered
    }

    /// Attributes in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &AttributeValue)> {
        self.attributes.iter()
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

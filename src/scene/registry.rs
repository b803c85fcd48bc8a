/*!
 * Attribute registry and canonical headings.
 *
 * The canonical table is a constant; the set of keys in use is per-run
 * state owned by whoever drives the parse.
 */

use indexmap::IndexSet;

use super::record::{NAME_KEY, WORDS_KEY};

/// Spacer column in rule files
pub const BLANK_KEY: &str = "_blank";
/// Per-novel sequence column in rule files
pub const SEQUENCE_KEY: &str = "_sequence";

/// Known attribute keys and their display labels, in column order
pub const CANONICAL_HEADINGS: &[(&str, &str)] = &[
    ("_blank", ""),
    ("_novel", "Novel"),
    ("_sequence", "#"),
    ("name", "Scene"),
    ("words", "Words"),
    ("synopsis", "Synopsis"),
    ("value", "Value Shift"),
    ("polarity", "Polarity Shift"),
    ("purpose", "Purpose"),
    ("incite", "Inciting Incident"),
    ("goal", "Goal"),
    ("complication", "Complication(s)"),
    ("turning", "Turning Point"),
    ("crisis", "Crisis"),
    ("climax", "Climax"),
    ("resolution", "(Non-)Resolution"),
    ("about", "What is this scene about?"),
    ("impact", "Impact of the scene"),
    ("@pov", "Point of View"),
    ("@plot", "Plot"),
    ("time", "Period/Time"),
    ("tod", "Time of Day"),
    ("duration", "Duration"),
    ("@location", "Location(s)"),
    ("@timeline", "Timelines"),
    ("@focus", "Focus Character"),
    ("@char", "Characters"),
    ("others", "Off-stage Characters"),
    ("@entity", "Entities"),
    ("@object", "Objects"),
    ("@custom", "Custom"),
    ("@mention", "Mentions"),
    ("@story", "References"),
    ("pace", "Pace"),
    ("weather", "What is the weather?"),
    ("appearance", "What does it look like?"),
    ("touch", "What do the materials feel like?"),
    ("aural", "What are the sounds?"),
    ("smell", "What are the smells?"),
    ("clothing", "What are the characters wearing?"),
    ("prose", "Quality/cadence in the prose"),
    ("emotions", "What are the characters feeling emotionally?"),
    ("comments", "Additional Notes"),
];

/// Canonical label for a key, if it has one
pub fn canonical_label(key: &str) -> Option<&'static str> {
    CANONICAL_HEADINGS
        .iter()
        .find(|(known, _)| *known == key)
        .map(|(_, label)| *label)
}

/// Label for a key without a canonical entry: first character upper-cased
pub fn derive_label(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Canonical label, or the derived one
pub fn label_for(key: &str) -> String {
    canonical_label(key)
        .map(str::to_string)
        .unwrap_or_else(|| derive_label(key))
}

/// A column heading produced by the registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub key: String,
    pub label: String,
}

/// Keys seen during one extraction run
#[derive(Debug, Clone)]
pub struct AttributeRegistry {
    in_use: IndexSet<String>,
}

impl Default for AttributeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl AttributeRegistry {
    /// Fresh registry; `name` and `words` are always in use
    pub fn new() -> Self {
        let mut in_use = IndexSet::new();
        in_use.insert(NAME_KEY.to_string());
        in_use.insert(WORDS_KEY.to_string());
        Self { in_use }
    }

    /// Mark a key as in use
    pub fn record(&mut self, key: &str) {
        if !self.in_use.contains(key) {
            self.in_use.insert(key.to_string());
        }
    }

    pub fn is_in_use(&self, key: &str) -> bool {
        self.in_use.contains(key)
    }

    pub fn len(&self) -> usize {
        self.in_use.len()
    }

    pub fn is_empty(&self) -> bool {
        self.in_use.is_empty()
    }

    /// Headings for every key in use.
    ///
    /// Canonical keys come first in canonical order, followed by the
    /// remaining keys in discovery order with derived labels.
    pub fn headers(&self) -> Vec<Header> {
        let mut headers: Vec<Header> = CANONICAL_HEADINGS
            .iter()
            .filter(|(key, _)| self.in_use.contains(*key))
            .map(|(key, label)| Header {
                key: key.to_string(),
                label: label.to_string(),
            })
            .collect();

        headers.extend(
            self.in_use
                .iter()
                .filter(|key| canonical_label(key).is_none())
                .map(|key| Header {
                    key: key.clone(),
                    label: derive_label(key),
                }),
        );

        headers
    }
}

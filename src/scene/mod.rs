/*!
 * Scene extraction.
 *
 * - `record`: the scene record model
 * - `registry`: canonical headings and the per-run set of keys in use
 * - `parser`: line-based parsing of scene documents
 */

pub mod parser;
pub mod record;
pub mod registry;

pub use parser::{SceneParser, SceneSource};
pub use record::{
    collapse_whitespace, AttributeValue, SceneRecord, COMMENTS_KEY, NAME_KEY, NOVEL_KEY, SYNOPSIS_KEY,
    WORDS_KEY,
};
pub use registry::{
    canonical_label, derive_label, label_for, AttributeRegistry, Header, BLANK_KEY, CANONICAL_HEADINGS,
    SEQUENCE_KEY,
};

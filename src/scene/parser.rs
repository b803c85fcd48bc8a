/*!
 * Scene parser for novelWriter documents.
 *
 * Documents are walked line by line. A `### ` line opens a scene; header
 * comments (`%`) and references (`@`) attach metadata to the open scene.
 * The first non-metadata line ends the scene header, after which comments
 * are prose annotations and are ignored.
 */

use log::trace;
use std::mem;

use super::record::{AttributeValue, SceneRecord, COMMENTS_KEY, SYNOPSIS_KEY};
use super::registry::AttributeRegistry;

const SCENE_TITLE_MARKER: &str = "### ";
const COMMENT_MARKER: char = '%';
const HEADER_BOUNDARY_MARKER: &str = "%%";
const REFERENCE_MARKER: char = '@';
const IGNORED_COMMAND_MARKER: char = '~';

/// One scene document and the context it is parsed under
#[derive(Debug, Clone, Copy)]
pub struct SceneSource<'a> {
    pub text: &'a str,
    pub novel_name: &'a str,
    pub word_count: &'a str,
}

impl<'a> SceneSource<'a> {
    pub fn new(text: &'a str, novel_name: &'a str, word_count: &'a str) -> Self {
        Self {
            text,
            novel_name,
            word_count,
        }
    }
}

/// Per-document parse state
struct DocumentState {
    scene: Option<SceneRecord>,
    comments: Vec<String>,
    in_header: bool,
    words: Option<String>,
}

impl DocumentState {
    fn new(word_count: &str) -> Self {
        Self {
            scene: None,
            comments: Vec::new(),
            in_header: true,
            words: Some(word_count.to_string()),
        }
    }

    /// Attach buffered comments to the open scene and emit it
    fn seal(&mut self, output: &mut Vec<SceneRecord>) {
        if let Some(mut scene) = self.scene.take() {
            scene.set(COMMENTS_KEY, AttributeValue::List(mem::take(&mut self.comments)));
            output.push(scene);
        }
    }
}

/// Parser turning scene documents into scene records
#[derive(Debug, Clone)]
pub struct SceneParser {
    structure_prefix: String,
}

impl Default for SceneParser {
    fn default() -> Self {
        Self::new("story")
    }
}

impl SceneParser {
    /// Create a parser for structured comments using `keyword` (e.g. `story`)
    pub fn new(structure_keyword: &str) -> Self {
        Self {
            structure_prefix: format!("{}.", structure_keyword.trim().to_lowercase()),
        }
    }

    /// Parse every document in order, recording attribute keys in `registry`
    pub fn parse_documents<'a, I>(&self, sources: I, registry: &mut AttributeRegistry) -> Vec<SceneRecord>
    where
        I: IntoIterator<Item = SceneSource<'a>>,
    {
        let mut scenes = Vec::new();
        for source in sources {
            self.parse_document(source, registry, &mut scenes);
        }
        scenes
    }

    /// Parse one document, appending its scenes to `output`
    pub fn parse_document(
        &self,
        source: SceneSource<'_>,
        registry: &mut AttributeRegistry,
        output: &mut Vec<SceneRecord>,
    ) {
        let mut state = DocumentState::new(source.word_count);

        for raw_line in source.text.lines() {
            let line = raw_line.trim_end();

            if let Some(title) = line.strip_prefix(SCENE_TITLE_MARKER) {
                state.seal(output);
                // Only the first scene of a document carries the word count
                let words = state.words.take().unwrap_or_default();
                state.scene = Some(SceneRecord::new(source.novel_name, title.trim(), &words));
                state.in_header = true;
                state.comments.clear();
            } else if line.starts_with(COMMENT_MARKER) {
                if line.starts_with(HEADER_BOUNDARY_MARKER) {
                    state.in_header = true;
                } else if state.in_header {
                    self.classify_comment(line, &mut state, registry);
                }
            } else if line.starts_with(REFERENCE_MARKER) {
                Self::classify_reference(line, &mut state, registry);
            } else if !line.is_empty() {
                state.in_header = false;
            }
        }

        state.seal(output);
    }

    /// Handle a `%` line inside a scene header
    fn classify_comment(&self, line: &str, state: &mut DocumentState, registry: &mut AttributeRegistry) {
        let Some(scene) = state.scene.as_mut() else {
            trace!("Ignoring comment outside of a scene: {}", line);
            return;
        };

        let body = &line[COMMENT_MARKER.len_utf8()..];
        let (head, note) = match body.split_once(':') {
            Some((head, note)) => (head, Some(note)),
            None => (body, None),
        };
        let command = head.trim().to_lowercase();

        if command.starts_with("synopsis") || command.starts_with("short") {
            if let Some(note) = note {
                scene.set(SYNOPSIS_KEY, AttributeValue::text(note.trim()));
                registry.record(SYNOPSIS_KEY);
            }
        } else if let Some(rest) = command.strip_prefix(&self.structure_prefix) {
            let term = rest.split('.').next().unwrap_or_default().trim();
            let note = note.map(str::trim).unwrap_or_default();
            if !term.is_empty() && !note.is_empty() {
                scene.set(term, AttributeValue::text(note));
                registry.record(term);
            }
        } else if !command.starts_with(IGNORED_COMMAND_MARKER) {
            state.comments.push(body.trim().to_string());
            registry.record(COMMENTS_KEY);
        }
    }

    /// Handle an `@key: a, b, c` line
    fn classify_reference(line: &str, state: &mut DocumentState, registry: &mut AttributeRegistry) {
        let Some(scene) = state.scene.as_mut() else {
            trace!("Ignoring reference outside of a scene: {}", line);
            return;
        };
        let Some((head, values)) = line.split_once(':') else {
            return;
        };
        if values.trim().is_empty() {
            return;
        }

        let key = head.trim().to_lowercase();
        let items: Vec<String> = values
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect();

        registry.record(&key);
        scene.set(key, AttributeValue::List(items));
    }
}

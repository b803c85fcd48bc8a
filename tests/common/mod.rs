/*!
 * Common test utilities for the nwextract test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// A scene document to place in a test project
pub struct TestDocument<'a> {
    pub handle: &'a str,
    pub word_count: &'a str,
    /// Document text; `None` leaves the content file out
    pub text: Option<&'a str>,
}

/// Creates a novelWriter project folder with one novel root holding `documents`
pub fn create_test_project(dir: &Path, novel_name: &str, documents: &[TestDocument]) -> Result<PathBuf> {
    let mut items = format!(
        r#"    <item handle="root0001" parent="None" root="root0001" order="0" type="ROOT" class="NOVEL">
      <meta expanded="yes"/>
      <name status="s000000" import="i000004">{}</name>
    </item>
"#,
        novel_name
    );
    for (order, document) in documents.iter().enumerate() {
        items.push_str(&format!(
            r#"    <item handle="{handle}" parent="root0001" root="root0001" order="{order}" type="FILE" class="NOVEL" layout="DOCUMENT">
      <meta expanded="no" heading="H3" charCount="0" wordCount="{words}" paraCount="0" cursorPos="0"/>
      <name status="s000000" import="i000004" active="yes">{handle}</name>
    </item>
"#,
            handle = document.handle,
            order = order,
            words = document.word_count,
        ));
        if let Some(text) = document.text {
            create_test_file(dir, &format!("content/{}.nwd", document.handle), text)?;
        }
    }

    let index = format!(
        r#"<?xml version='1.0' encoding='utf-8'?>
<novelWriterXML appVersion="2.2" hexVersion="0x020200f0" fileVersion="1.5" fileRevision="2" timeStamp="2024-01-01 10:00:00">
  <project id="d0a1f7a4" saveCount="12" autoCount="3" editTime="1000">
    <name>{}</name>
  </project>
  <content items="{}" novelWords="0" notesWords="0">
{}  </content>
</novelWriterXML>
"#,
        novel_name,
        documents.len() + 1,
        items
    );
    create_test_file(dir, "nwProject.nwx", &index)?;
    Ok(dir.to_path_buf())
}

/// Scene text used across the integration tests
pub const OPENING_DOCUMENT: &str = "### Opening
%synopsis: A beginning
@char: Alice, Bob
@location: Harbour

Once upon a time.

### Next
%story.goal: Find the map
@char: Bob

More prose.
";

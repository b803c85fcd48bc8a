use serde::Deserialize;

use crate::errors::{ExtractError, Result};

// @module: novelWriter project index (nwProject.nwx)

const NOVEL_CLASS: &str = "NOVEL";
const ROOT_TYPE: &str = "ROOT";
const FILE_TYPE: &str = "FILE";

/// A scene document listed in the project index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneDocument {
    pub handle: String,
    pub novel_name: String,
    /// Word count as recorded by novelWriter, empty if unknown
    pub word_count: String,
}

#[derive(Debug, Deserialize)]
struct ProjectIndex {
    #[serde(default)]
    content: IndexContent,
}

#[derive(Debug, Default, Deserialize)]
struct IndexContent {
    #[serde(rename = "item", default)]
    items: Vec<IndexItem>,
}

#[derive(Debug, Deserialize)]
struct IndexItem {
    #[serde(rename = "@handle", default)]
    handle: String,
    #[serde(rename = "@root", default)]
    root: String,
    #[serde(rename = "@type", default)]
    item_type: String,
    #[serde(rename = "@class", default)]
    class: String,
    #[serde(default)]
    meta: Option<ItemMeta>,
    #[serde(default)]
    name: Option<ItemName>,
}

#[derive(Debug, Deserialize)]
struct ItemMeta {
    #[serde(rename = "@wordCount", default)]
    word_count: String,
}

#[derive(Debug, Deserialize)]
struct ItemName {
    #[serde(rename = "$text", default)]
    text: String,
}

/// List the scene documents of every novel root, in index order.
///
/// Items outside the novel class are skipped. A file belongs to the most
/// recent root item only when its `root` attribute names that root.
pub fn parse_index(xml: &str) -> Result<Vec<SceneDocument>> {
    let index: ProjectIndex =
        quick_xml::de::from_str(xml).map_err(|e| ExtractError::ProjectParse(e.to_string()))?;

    let mut documents = Vec::new();
    let mut parent = String::new();
    let mut novel_name = String::new();

    for item in index.content.items {
        if item.class != NOVEL_CLASS {
            continue;
        }
        match item.item_type.as_str() {
            ROOT_TYPE => {
                parent = item.handle;
                novel_name = item.name.map(|name| name.text).unwrap_or_default();
            }
            FILE_TYPE if !parent.is_empty() && item.root == parent => {
                documents.push(SceneDocument {
                    handle: item.handle,
                    novel_name: novel_name.clone(),
                    word_count: item.meta.map(|meta| meta.word_count).unwrap_or_default(),
                });
            }
            _ => {}
        }
    }

    Ok(documents)
}

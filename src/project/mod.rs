/*!
 * Access to a novelWriter project folder.
 *
 * The project index lists the documents of each novel; the document text
 * itself lives in the content directory, one file per handle.
 */

pub mod index;

use log::{debug, info};
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::errors::Result;
use crate::file_utils::FileManager;

pub use index::{parse_index, SceneDocument};

/// A project folder on disk
#[derive(Debug, Clone)]
pub struct NovelWriterProject {
    root: PathBuf,
    project_file: String,
    content_dir: String,
    content_extension: String,
}

impl NovelWriterProject {
    /// Project at `root` with the file layout described by `config`
    pub fn open<P: AsRef<Path>>(root: P, config: &Config) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            project_file: config.project_file.clone(),
            content_dir: config.content_dir.clone(),
            content_extension: config.content_extension.clone(),
        }
    }

    /// Location of the project index
    pub fn index_path(&self) -> PathBuf {
        self.root.join(&self.project_file)
    }

    /// Location of the text of one document
    pub fn document_path(&self, document: &SceneDocument) -> PathBuf {
        self.root
            .join(&self.content_dir)
            .join(format!("{}.{}", document.handle, self.content_extension))
    }

    /// Read the index and list the novel documents in order.
    ///
    /// An unreadable or malformed index is fatal.
    pub fn load_documents(&self) -> Result<Vec<SceneDocument>> {
        let path = self.index_path();
        debug!("Loading project index {:?}", path);
        let xml = FileManager::read_to_string(&path)?;
        let documents = parse_index(&xml)?;
        info!("Project lists {} novel documents", documents.len());
        Ok(documents)
    }

    /// Text of a document; an unreadable file counts as empty
    pub fn read_document(&self, document: &SceneDocument) -> String {
        FileManager::read_or_empty(self.document_path(document))
    }
}

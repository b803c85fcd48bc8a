use log::{debug, warn};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::errors::{ExtractError, Result};

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        let path = path.as_ref();
        fs::read_to_string(path).map_err(|e| ExtractError::MissingContent {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Read a file as text, replacing byte sequences that are not UTF-8
    pub fn read_lossy<P: AsRef<Path>>(path: P) -> Result<String> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| ExtractError::MissingContent {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        match String::from_utf8(bytes) {
            Ok(content) => Ok(content),
            Err(e) => {
                warn!("{:?} is not valid UTF-8; replacing invalid bytes", path);
                Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
            }
        }
    }

    /// Read a file as text, treating an unreadable file as empty
    pub fn read_or_empty<P: AsRef<Path>>(path: P) -> String {
        match Self::read_lossy(&path) {
            Ok(content) => content,
            Err(e) => {
                warn!("{}; treating it as empty", e);
                String::new()
            }
        }
    }

    /// Lowercased extension of a path, empty if there is none
    pub fn extension_of<P: AsRef<Path>>(path: P) -> String {
        path.as_ref()
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default()
    }

    /// Write a file through a temporary sibling that replaces the target
    /// only once `write` succeeds.
    pub fn write_atomically<P, F>(path: P, write: F) -> Result<()>
    where
        P: AsRef<Path>,
        F: FnOnce(&mut dyn Write) -> Result<()>,
    {
        let path = path.as_ref();
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        Self::ensure_dir(parent)?;

        let mut staged = tempfile::Builder::new()
            .prefix(".nwextract-")
            .suffix(".tmp")
            .tempfile_in(parent)?;
        debug!("Staging output for {:?} in {:?}", path, staged.path());

        {
            let mut writer = BufWriter::new(staged.as_file_mut());
            write(&mut writer)?;
            writer.flush()?;
        }

        staged.persist(path).map_err(|e| ExtractError::Io(e.error))?;
        Ok(())
    }
}

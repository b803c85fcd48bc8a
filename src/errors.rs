/*!
 * Error types for the nwextract application.
 *
 * This module contains the error taxonomy for an export run,
 * using the thiserror crate for ergonomic error definitions.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while extracting a project into a table
#[derive(Error, Debug)]
pub enum ExtractError {
    /// A project file could not be read
    #[error("Unable to read {path:?}: {reason}")]
    MissingContent {
        /// File that was requested
        path: PathBuf,
        /// Underlying reason reported by the file system
        reason: String,
    },

    /// The project index is not a usable novelWriter project file
    #[error("Error loading project file: {0}")]
    ProjectParse(String),

    /// The rule file or application configuration is unusable
    #[error("Configuration error: {0}")]
    Config(String),

    /// A criteria expression could not be compiled
    #[error("Invalid test expression: {0}")]
    Criteria(String),

    /// The output file extension has no writer
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    /// A tabular writer failed while serializing the sheet
    #[error("Output error: {0}")]
    Sink(String),

    /// Any other file system failure
    #[error("File error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<csv::Error> for ExtractError {
    fn from(error: csv::Error) -> Self {
        Self::Sink(error.to_string())
    }
}

impl From<zip::result::ZipError> for ExtractError {
    fn from(error: zip::result::ZipError) -> Self {
        Self::Sink(error.to_string())
    }
}

/// Result alias used across the library
pub type Result<T> = std::result::Result<T, ExtractError>;

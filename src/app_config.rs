use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and defaulting configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Maximum column width, in characters, before text wraps
    #[serde(default = "default_wrap_size")]
    pub wrap_size: usize,

    /// Prefix of structured in-header comments (`%story.goal: ...`)
    #[serde(default = "default_structure_keyword")]
    pub structure_keyword: String,

    /// Name of the project index inside the project folder
    #[serde(default = "default_project_file")]
    pub project_file: String,

    /// Folder holding the scene documents
    #[serde(default = "default_content_dir")]
    pub content_dir: String,

    /// Extension of scene documents
    #[serde(default = "default_content_extension")]
    pub content_extension: String,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching log crate filter
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_wrap_size() -> usize {
    40
}

fn default_structure_keyword() -> String {
    "story".to_string()
}

fn default_project_file() -> String {
    "nwProject.nwx".to_string()
}

fn default_content_dir() -> String {
    "content".to_string()
}

fn default_content_extension() -> String {
    "nwd".to_string()
}

impl Config {
    /// Load a configuration file, keeping defaults for any missing field
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {:?}", path))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Validate the configuration values
    pub fn validate(&self) -> Result<()> {
        if self.wrap_size == 0 {
            return Err(anyhow!("wrap_size must be greater than zero"));
        }

        if self.structure_keyword.trim().is_empty() {
            return Err(anyhow!("structure_keyword must not be empty"));
        }

        if self.project_file.trim().is_empty() {
            return Err(anyhow!("project_file must not be empty"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            log_level: LogLevel::default(),
            wrap_size: default_wrap_size(),
            structure_keyword: default_structure_keyword(),
            project_file: default_project_file(),
            content_dir: default_content_dir(),
            content_extension: default_content_extension(),
        }
    }
}

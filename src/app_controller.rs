use log::{debug, info};
use std::path::Path;

use crate::app_config::Config;
use crate::errors::Result;
use crate::project::NovelWriterProject;
use crate::projection::ProjectionEngine;
use crate::rules::load_column_spec;
use crate::scene::{AttributeRegistry, SceneParser, SceneSource};
use crate::sink::{self, OutputFormat};

// @module: Application controller for project exports

/// Outcome of a successful export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportSummary {
    /// Scenes extracted from the project
    pub scenes: usize,
    /// Rows written, header included
    pub rows: usize,
    pub columns: usize,
    pub format: OutputFormat,
}

/// Main application controller for scene exports
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> anyhow::Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> anyhow::Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Export the scenes of `project_dir` to `output`.
    ///
    /// Without a rule file every attribute in use becomes a column. The
    /// output format and the rule file are checked before the project is
    /// read, and nothing is written unless the whole export succeeds.
    pub fn export(&self, project_dir: &Path, output: &Path, format_file: Option<&Path>) -> Result<ExportSummary> {
        let format = OutputFormat::from_path(output)?;
        let spec = format_file.map(load_column_spec).transpose()?;

        info!("Extracting scenes from {:?}", project_dir);
        let project = NovelWriterProject::open(project_dir, &self.config);
        let documents = project.load_documents()?;
        let texts: Vec<String> = documents
            .iter()
            .map(|document| project.read_document(document))
            .collect();

        let parser = SceneParser::new(&self.config.structure_keyword);
        let mut registry = AttributeRegistry::new();
        let records = parser.parse_documents(
            documents.iter().zip(&texts).map(|(document, text)| {
                SceneSource::new(text, &document.novel_name, &document.word_count)
            }),
            &mut registry,
        );
        debug!(
            "Parsed {} scenes using {} attribute keys",
            records.len(),
            registry.len()
        );

        let engine = ProjectionEngine::new(self.config.wrap_size);
        let sheet = match &spec {
            Some(spec) => {
                info!("Applying {} rule columns", spec.columns.len());
                engine.prepare_sheet(&records, spec)?
            }
            None => {
                info!("Exporting all {} attributes in use", registry.len());
                engine.prepare_full_sheet(&records, &registry)
            }
        };

        sink::write_sheet(&sheet, output, format)?;

        Ok(ExportSummary {
            scenes: records.len(),
            rows: sheet.row_count(),
            columns: sheet.column_count(),
            format,
        })
    }
}

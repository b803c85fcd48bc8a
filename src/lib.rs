/*!
 * # nwextract - scene grids for novelWriter projects
 *
 * A Rust library that reads a novelWriter project and lays its scenes out
 * as a table, one row per scene.
 *
 * ## Features
 *
 * - Scene extraction from novelWriter documents:
 *   - titles, synopses and short descriptions
 *   - tag references (`@char: Alice, Bob`)
 *   - structured comments (`%story.goal: ...`)
 * - Full dump of every attribute in use, in a canonical column order
 * - Rule files describing columns, conditional cells and styling
 * - Boolean test expressions over scene attributes
 * - Output as CSV, HTML, ODS or XLSX, chosen by file extension
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `project`: Project index and document access
 * - `scene`: Scene records, attribute registry and document parser
 * - `criteria`: Test expression language
 * - `rules`: Rule file model and loader
 * - `projection`: Styled sheet construction
 * - `sink`: Tabular writers
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod criteria;
pub mod errors;
pub mod file_utils;
pub mod project;
pub mod projection;
pub mod rules;
pub mod scene;
pub mod sink;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, ExportSummary};
pub use criteria::Criteria;
pub use errors::{ExtractError, Result};
pub use projection::{ProjectionEngine, Sheet};
pub use rules::{load_column_spec, ColumnSpec};
pub use scene::{AttributeRegistry, AttributeValue, SceneParser, SceneRecord};
pub use sink::{write_sheet, OutputFormat};

/*!
 * Tabular output writers.
 *
 * The output format is chosen from the file extension. Every writer
 * serializes a complete `Sheet`; files are staged and only replace the
 * target once serialization has succeeded.
 */

pub mod csv_sink;
pub mod html_sink;
pub mod ods_sink;
pub mod xlsx_sink;

use log::info;
use std::fmt;
use std::io::Write;
use std::path::Path;

use crate::errors::{ExtractError, Result};
use crate::file_utils::FileManager;
use crate::projection::Sheet;

pub use csv_sink::CsvSink;
pub use html_sink::HtmlSink;
pub use ods_sink::OdsSink;
pub use xlsx_sink::XlsxSink;

/// Name of the single worksheet in spreadsheet outputs
pub const WORKSHEET_NAME: &str = "Worksheet";

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Csv,
    Html,
    Ods,
    Xlsx,
}

impl OutputFormat {
    /// Format for a file extension, case-insensitive
    pub fn from_extension(extension: &str) -> Result<Self> {
        match extension.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "html" => Ok(Self::Html),
            "ods" => Ok(Self::Ods),
            "xlsx" => Ok(Self::Xlsx),
            other => Err(ExtractError::UnsupportedFormat(other.to_string())),
        }
    }

    /// Format for an output path
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_extension(&FileManager::extension_of(path))
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Html => "html",
            Self::Ods => "ods",
            Self::Xlsx => "xlsx",
        }
    }

    /// Writer for this format
    pub fn sink(&self) -> Box<dyn TabularSink> {
        match self {
            Self::Csv => Box::new(CsvSink),
            Self::Html => Box::new(HtmlSink),
            Self::Ods => Box::new(OdsSink),
            Self::Xlsx => Box::new(XlsxSink),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension().to_uppercase())
    }
}

/// Serializer for a sheet
pub trait TabularSink {
    fn write(&self, sheet: &Sheet, out: &mut dyn Write) -> Result<()>;
}

/// Serialize `sheet` to `path` in `format`
pub fn write_sheet<P: AsRef<Path>>(sheet: &Sheet, path: P, format: OutputFormat) -> Result<()> {
    let path = path.as_ref();
    let sink = format.sink();
    FileManager::write_atomically(path, |out| sink.write(sheet, out))?;
    info!(
        "Wrote {} rows x {} columns to {:?} ({})",
        sheet.row_count(),
        sheet.column_count(),
        path,
        format
    );
    Ok(())
}

/// Whether content should be written as a number by spreadsheet writers
pub(crate) fn as_integer(content: &str) -> Option<i64> {
    let digits = content.strip_prefix('-').unwrap_or(content);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if digits.len() > 1 && digits.starts_with('0') {
        return None;
    }
    content.parse().ok()
}

/// Approximate rendering width of one character, in inches
pub(crate) const CHARACTER_WIDTH_INCHES: f64 = 0.08;

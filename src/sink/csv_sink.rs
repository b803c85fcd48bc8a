use std::io::Write;

use crate::errors::Result;
use crate::projection::Sheet;

use super::TabularSink;

/// Comma-separated values, header row first
pub struct CsvSink;

impl TabularSink for CsvSink {
    fn write(&self, sheet: &Sheet, out: &mut dyn Write) -> Result<()> {
        let mut writer = csv::WriterBuilder::new().flexible(false).from_writer(out);
        for row in sheet.rows() {
            writer.write_record(
                row.iter()
                    .map(|cell| cell.map(|cell| cell.content.as_str()).unwrap_or_default()),
            )?;
        }
        writer.flush()?;
        Ok(())
    }
}

/*!
 * Tests for the tabular writers
 */

use anyhow::Result;
use std::fs;
use std::io::Read;

use nwextract::errors::ExtractError;
use nwextract::projection::{CellStyle, Sheet};
use nwextract::sink::{write_sheet, OutputFormat};
use crate::common;

fn sample_sheet() -> Sheet {
    let mut sheet = Sheet::new();
    sheet.set_header(1, "Scene");
    sheet.set_header(2, "Words");
    sheet.set_cell(2, 1, "Opening", CellStyle::default());
    sheet.set_cell(2, 2, "250", CellStyle::default());
    sheet.set_column_width(1, 9);
    sheet
}

/// Test that each extension maps to its writer
#[test]
fn test_outputFormat_fromExtension_shouldCoverSupportedTypes() {
    for (extension, format) in [
        ("csv", OutputFormat::Csv),
        ("HTML", OutputFormat::Html),
        ("ods", OutputFormat::Ods),
        ("Xlsx", OutputFormat::Xlsx),
    ] {
        assert_eq!(OutputFormat::from_extension(extension).unwrap(), format);
    }
    assert!(matches!(
        OutputFormat::from_extension("pdf"),
        Err(ExtractError::UnsupportedFormat(_))
    ));
    assert_eq!(OutputFormat::Xlsx.to_string(), "XLSX");
}

/// Test writing a CSV file to disk
#[test]
fn test_writeSheet_csv_shouldWriteRows() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("grid.csv");
    write_sheet(&sample_sheet(), &path, OutputFormat::Csv)?;
    assert_eq!(fs::read_to_string(&path)?, "Scene,Words\nOpening,250\n");
    Ok(())
}

/// Test that the output folder is created when needed
#[test]
fn test_writeSheet_intoMissingFolder_shouldCreateIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("reports/2024/grid.html");
    write_sheet(&sample_sheet(), &path, OutputFormat::Html)?;
    let html = fs::read_to_string(&path)?;
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<td style=\"vertical-align:top;\">Opening</td>"));
    Ok(())
}

/// Test that spreadsheet outputs are valid zip packages with a single sheet
#[test]
fn test_writeSheet_spreadsheets_shouldProducePackages() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;

    let xlsx = temp_dir.path().join("grid.xlsx");
    write_sheet(&sample_sheet(), &xlsx, OutputFormat::Xlsx)?;
    let mut archive = zip::ZipArchive::new(fs::File::open(&xlsx)?)?;
    let mut workbook = String::new();
    archive.by_name("xl/workbook.xml")?.read_to_string(&mut workbook)?;
    assert!(workbook.contains(r#"<sheet name="Worksheet""#));

    let ods = temp_dir.path().join("grid.ods");
    write_sheet(&sample_sheet(), &ods, OutputFormat::Ods)?;
    let mut archive = zip::ZipArchive::new(fs::File::open(&ods)?)?;
    let mut mimetype = String::new();
    archive.by_name("mimetype")?.read_to_string(&mut mimetype)?;
    assert_eq!(mimetype, "application/vnd.oasis.opendocument.spreadsheet");
    Ok(())
}

/// Test that no staging files are left next to the output
#[test]
fn test_writeSheet_afterSuccess_shouldLeaveOnlyTarget() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    write_sheet(&sample_sheet(), temp_dir.path().join("grid.csv"), OutputFormat::Csv)?;
    let entries: Vec<_> = fs::read_dir(temp_dir.path())?
        .map(|entry| entry.map(|entry| entry.file_name()))
        .collect::<std::io::Result<Vec<_>>>()?;
    assert_eq!(entries, vec![std::ffi::OsString::from("grid.csv")]);
    Ok(())
}

/*!
 * Tests for error types and conversions
 */

use std::path::PathBuf;

use nwextract::errors::ExtractError;

#[test]
fn test_missingContent_shouldDisplayPathAndReason() {
    let error = ExtractError::MissingContent {
        path: PathBuf::from("book/nwProject.nwx"),
        reason: "No such file or directory".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("nwProject.nwx"));
    assert!(display.contains("No such file or directory"));
}

#[test]
fn test_unsupportedFormat_shouldNameExtension() {
    let error = ExtractError::UnsupportedFormat("txt".to_string());
    assert_eq!(error.to_string(), "Unsupported file type: txt");
}

#[test]
fn test_ioError_shouldConvertWithQuestionMark() {
    fn fails() -> nwextract::Result<()> {
        Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"))?;
        Ok(())
    }
    let error = fails().unwrap_err();
    assert!(matches!(error, ExtractError::Io(_)));
    assert!(error.to_string().contains("read-only"));
}

#[test]
fn test_csvError_shouldBecomeSinkError() {
    let io_error = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
    let error: ExtractError = csv::Error::from(io_error).into();
    assert!(matches!(error, ExtractError::Sink(_)));
}

/*!
 * Tests for rule file loading and column planning
 */

use anyhow::Result;
use nwextract::errors::ExtractError;
use nwextract::rules::loader::parse_column_spec;
use nwextract::rules::{load_column_spec, PlannedColumn, ResultSource, UNNAMED_HEADING};
use crate::common;

/// Test that every column form compiles to the expected plan
#[test]
fn test_plan_withAllColumnForms_shouldCompile() {
    let spec = parse_column_spec(
        r#"{"columns": [
            "_blank",
            "_sequence",
            "synopsis",
            {"key": "@char", "exclude": ["Narrator"]},
            {"test": "@pov contains Alice", "result": "*@pov", "style": {"align": "centre", "onFirst": true}},
            {"heading": "Spacer"}
        ]}"#,
    )
    .unwrap();
    let plan = spec.plan().unwrap();

    let headings: Vec<&str> = plan.iter().map(|column| column.heading.as_str()).collect();
    assert_eq!(headings, ["", "#", "Synopsis", "Characters", UNNAMED_HEADING, "Spacer"]);

    assert!(matches!(plan[0].column, PlannedColumn::Blank));
    assert!(matches!(plan[1].column, PlannedColumn::Sequence));
    assert!(matches!(&plan[2].column, PlannedColumn::Key(key) if key == "synopsis"));
    assert!(matches!(&plan[3].column, PlannedColumn::Filtered { exclude, .. } if exclude == &["Narrator"]));
    match &plan[4].column {
        PlannedColumn::Conditional { result, style, .. } => {
            assert_eq!(result, &Some(ResultSource::Attribute("@pov".to_string())));
            assert_eq!(style.on_first, Some(true));
        }
        other => panic!("expected a conditional column, got {:?}", other),
    }
    assert!(matches!(plan[5].column, PlannedColumn::Blank));
}

/// Test that a bad test expression is reported while loading
#[test]
fn test_parseColumnSpec_withBadTest_shouldBeConfigError() {
    let result = parse_column_spec(r#"{"columns": [{"test": "char contains", "heading": "X"}]}"#);
    assert!(matches!(result, Err(ExtractError::Config(message)) if message.contains("test expression")));
}

/// Test the wrap override and its validation
#[test]
fn test_parseColumnSpec_wrap_shouldBePositive() {
    assert_eq!(parse_column_spec(r#"{"columns": ["name"], "wrap": 12}"#).unwrap().wrap, Some(12));
    assert!(parse_column_spec(r#"{"columns": ["name"], "wrap": 0}"#).is_err());
}

/// Test loading rule files from disk
#[test]
fn test_loadColumnSpec_fromDisk_shouldReportMissingAndMalformedFiles() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;

    let missing = load_column_spec(temp_dir.path().join("missing.json"));
    assert!(matches!(missing, Err(ExtractError::Config(_))));

    let malformed = common::create_test_file(temp_dir.path(), "bad.json", "{\"columns\": [")?;
    assert!(matches!(load_column_spec(&malformed), Err(ExtractError::Config(_))));

    let valid = common::create_test_file(temp_dir.path(), "good.json", r#"{"columns": ["name", "words"]}"#)?;
    assert_eq!(load_column_spec(&valid)?.columns.len(), 2);
    Ok(())
}

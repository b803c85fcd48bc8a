/*!
 * Tests for sheet projection
 */

use nwextract::projection::{HorizontalAlign, ProjectionEngine};
use nwextract::rules::loader::parse_column_spec;
use nwextract::scene::{AttributeRegistry, SceneParser, SceneSource};
use nwextract::SceneRecord;

const DOCUMENT: &str = "### Opening
%synopsis: A beginning
@char: Alice, Bob
Once upon a time.
### Next
@char: Bob
% a note for later
";

fn parse() -> (Vec<SceneRecord>, AttributeRegistry) {
    let mut registry = AttributeRegistry::new();
    let records = SceneParser::default()
        .parse_documents([SceneSource::new(DOCUMENT, "Book", "250")], &mut registry);
    (records, registry)
}

/// Test that the full dump lays out every key in use
#[test]
fn test_prepareFullSheet_withOpeningScenario_shouldUseCanonicalColumns() {
    let (records, registry) = parse();
    let sheet = ProjectionEngine::default().prepare_full_sheet(&records, &registry);

    let headers: Vec<&str> = (1..=sheet.column_count()).map(|col| sheet.value(1, col)).collect();
    assert_eq!(headers, ["Scene", "Words", "Synopsis", "Characters", "Additional Notes"]);
    assert_eq!(sheet.row_count(), 3);
    assert_eq!(sheet.value(2, 1), "Opening");
    assert_eq!(sheet.value(2, 2), "250");
    assert_eq!(sheet.value(2, 4), "Alice\nBob");
    assert_eq!(sheet.value(3, 4), "Bob");
    assert_eq!(sheet.value(3, 5), "a note for later");
    assert!(sheet.cell(3, 3).is_none());
    assert_eq!(sheet.cell(2, 2).unwrap().style.horizontal, HorizontalAlign::Right);
    assert!(sheet.column_width(5).is_none());
}

/// Test the rule scenario: a conditional column copying the characters
#[test]
fn test_prepareSheet_withConditionalRule_shouldFillMatchingRowsOnly() {
    let (records, _) = parse();
    let spec = parse_column_spec(
        r#"{"columns":["name", {"key":"char","test":"char contains Alice","result":"*char"}]}"#,
    )
    .unwrap();
    let sheet = ProjectionEngine::default().prepare_sheet(&records, &spec).unwrap();

    assert_eq!(sheet.value(1, 1), "Scene");
    assert_eq!(sheet.value(1, 2), "Char");
    assert_eq!(sheet.value(2, 2), "Alice\nBob");
    assert_eq!(sheet.value(3, 1), "Next");
    assert_eq!(sheet.value(3, 2), "");
    assert!(sheet.cell(3, 2).is_some());
}

/// Test that the rule file wrap overrides the engine wrap size
#[test]
fn test_prepareSheet_withRuleWrap_shouldCapWidths() {
    let (records, _) = parse();
    let spec = parse_column_spec(r#"{"columns":["synopsis"], "wrap": 6}"#).unwrap();
    let sheet = ProjectionEngine::new(40).prepare_sheet(&records, &spec).unwrap();
    assert_eq!(sheet.column_width(1), Some(6));

    let spec = parse_column_spec(r#"{"columns":["synopsis"]}"#).unwrap();
    let sheet = ProjectionEngine::new(40).prepare_sheet(&records, &spec).unwrap();
    // "A beginning" is 11 characters plus padding; the header seeds ceil(1.4 * 8) = 12
    assert_eq!(sheet.column_width(1), Some(12));
}

/// Test that reference columns bold each value the first time it appears
#[test]
fn test_prepareSheet_withReferenceColumn_shouldBoldFirstAppearances() {
    let (records, _) = parse();
    let spec = parse_column_spec(r#"{"columns":["@char"]}"#).unwrap();
    let sheet = ProjectionEngine::default().prepare_sheet(&records, &spec).unwrap();

    assert!(sheet.cell(2, 1).unwrap().style.bold);
    assert!(!sheet.cell(3, 1).unwrap().style.bold);
    assert_eq!(sheet.cell(2, 1).unwrap().style.horizontal, HorizontalAlign::Center);
}

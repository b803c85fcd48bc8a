/*!
 * Tests for scene extraction from novelWriter documents
 */

use nwextract::scene::{AttributeRegistry, AttributeValue, SceneParser, SceneSource, COMMENTS_KEY};

fn parse_all(sources: &[(&str, &str, &str)]) -> (Vec<nwextract::SceneRecord>, AttributeRegistry) {
    let mut registry = AttributeRegistry::new();
    let records = SceneParser::default().parse_documents(
        sources
            .iter()
            .map(|(text, novel, words)| SceneSource::new(text, novel, words)),
        &mut registry,
    );
    (records, registry)
}

/// Test the opening scenario: two scenes, metadata on the first only
#[test]
fn test_parseDocuments_withOpeningScenario_shouldYieldTwoRecords() {
    let text = "### Opening\n%synopsis: A beginning\n@char: Alice, Bob\nOnce upon a time.\n### Next\n";
    let (records, registry) = parse_all(&[(text, "Book", "12")]);

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].name(), "Opening");
    assert_eq!(records[0].text("synopsis"), Some("A beginning"));
    assert_eq!(
        records[0].get("char"),
        Some(&AttributeValue::list(["Alice", "Bob"]))
    );
    assert_eq!(records[1].name(), "Next");
    assert!(registry.is_in_use("@char"));
    assert!(registry.is_in_use("synopsis"));
}

/// Test that scenes never continue into the next document
#[test]
fn test_parseDocuments_acrossDocuments_shouldSealEachDocument() {
    let (records, _) = parse_all(&[
        ("### First\n@pov: Alice\n", "Book", "10"),
        ("@pov: Bob\nNo title here.\n", "Book", "20"),
        ("### Second\n", "Book", "30"),
    ]);

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].list("@pov").unwrap(), ["Alice"]);
    assert_eq!(records[1].name(), "Second");
    assert_eq!(records[1].words(), "30");
}

/// Test that each record remembers its novel
#[test]
fn test_parseDocuments_withTwoNovels_shouldTagRecords() {
    let (records, _) = parse_all(&[("### A\n", "Book One", ""), ("### B\n", "Book Two", "")]);
    assert_eq!(records[0].novel(), "Book One");
    assert_eq!(records[1].novel(), "Book Two");
}

/// Test that a later reference line replaces an earlier one
#[test]
fn test_parseDocuments_withRepeatedReference_shouldKeepLastValue() {
    let (records, _) = parse_all(&[("### A\n@char: Alice\n@char: Bob, Carol\n", "Book", "")]);
    assert_eq!(records[0].list("char").unwrap(), ["Bob", "Carol"]);
}

/// Test that a custom structure keyword is honoured
#[test]
fn test_parseDocuments_withCustomKeyword_shouldReadStructuredComments() {
    let mut registry = AttributeRegistry::new();
    let records = SceneParser::new("beat").parse_documents(
        [SceneSource::new(
            "### A\n%beat.turning: The door opens\n%story.goal: Not structured here\n",
            "Book",
            "",
        )],
        &mut registry,
    );

    assert_eq!(records[0].text("turning"), Some("The door opens"));
    assert!(records[0].get("goal").is_none());
    assert_eq!(records[0].comments(), ["story.goal: Not structured here"]);
    assert!(registry.is_in_use(COMMENTS_KEY));
}

/// Test the registry heading order for the keys found
#[test]
fn test_registryHeaders_afterParse_shouldFollowCanonicalOrder() {
    let (_, registry) = parse_all(&[(
        "### A\n@char: Alice\n%story.mood: Grim\n%story.goal: Escape\n%synopsis: Short\n",
        "Book",
        "",
    )]);
    let labels: Vec<String> = registry.headers().into_iter().map(|header| header.label).collect();
    assert_eq!(labels, ["Scene", "Words", "Synopsis", "Goal", "Characters", "Mood"]);
}

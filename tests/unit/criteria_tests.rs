/*!
 * Tests for the test expression language
 */

use nwextract::criteria::{evaluate, Criteria, Predicate};
use nwextract::errors::ExtractError;
use nwextract::scene::{AttributeValue, SceneRecord};

fn attributes() -> SceneRecord {
    let mut attributes = SceneRecord::new("Book", "Opening", "420");
    attributes.set("@char", AttributeValue::list(["Alice", "Bob"]));
    attributes.set("@pov", AttributeValue::list(["Alice"]));
    attributes.set("tod", AttributeValue::text("Night"));
    attributes.set("pace", AttributeValue::text(""));
    attributes
}

/// Test comparisons against single and multi-valued attributes
#[test]
fn test_evaluate_equality_shouldUseInlineForm() {
    let attributes = attributes();
    assert!(evaluate("tod = Night", &attributes).unwrap());
    assert!(evaluate("tod == 'Night'", &attributes).unwrap());
    assert!(evaluate("@char = \"Alice, Bob\"", &attributes).unwrap());
    assert!(evaluate("@pov != Bob", &attributes).unwrap());
    assert!(evaluate("@pov <> Bob", &attributes).unwrap());
}

/// Test the boolean connectives and their precedence
#[test]
fn test_evaluate_connectives_shouldBindNotThenAndThenOr() {
    let attributes = attributes();
    assert!(evaluate("@pov contains Bob or @char contains Alice and tod = Night", &attributes).unwrap());
    assert!(!evaluate("(@pov contains Bob or @char contains Alice) and tod = Day", &attributes).unwrap());
    assert!(evaluate("not @pov contains Bob && tod", &attributes).unwrap());
    assert!(evaluate("NOT pace || false_key", &attributes).unwrap());
}

/// Test that an attribute with an empty value is falsy
#[test]
fn test_evaluate_emptyValue_shouldBeFalsy() {
    let attributes = attributes();
    assert!(!evaluate("pace", &attributes).unwrap());
    assert!(evaluate("tod", &attributes).unwrap());
}

/// Test that malformed expressions are rejected when compiled
#[test]
fn test_compile_malformedExpressions_shouldFail() {
    for expression in ["", "and", "(tod", "tod = ", "tod = 'open", "tod > 3", "tod tod"] {
        assert!(
            matches!(Criteria::compile(expression), Err(ExtractError::Criteria(_))),
            "expression {:?} should not compile",
            expression
        );
    }
}

/// Test that a compiled expression can be evaluated repeatedly
#[test]
fn test_criteria_compiledOnce_shouldBeReusable() {
    let criteria = Criteria::compile("@char contains Bob").unwrap();
    let mut attributes = attributes();
    assert!(criteria.evaluate(&attributes));
    attributes.set("@char", AttributeValue::list(["Carol"]));
    assert!(!criteria.evaluate(&attributes));
    assert_eq!(criteria.source(), "@char contains Bob");
}

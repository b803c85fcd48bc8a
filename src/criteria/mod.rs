/*!
 * Criteria evaluation for conditional columns.
 *
 * A criteria expression is a small boolean language over scene attributes:
 * equality (`=`, `==`, `!=`, `<>`), containment (`contains`,
 * `not contains`), negation, `and`/`or` and parentheses. Missing attributes
 * read as the empty string.
 */

pub mod lexer;
pub mod parser;

use crate::errors::Result;
use crate::scene::{AttributeValue, SceneRecord};

pub use lexer::CompareOp;
pub use parser::Expr;

/// Source of attribute values for evaluation
pub trait AttributeLookup {
    fn lookup(&self, key: &str) -> Option<&AttributeValue>;
}

impl AttributeLookup for SceneRecord {
    fn lookup(&self, key: &str) -> Option<&AttributeValue> {
        self.get(key)
    }
}

/// A compiled boolean test over scene attributes
pub trait Predicate {
    /// Deterministic, side-effect free evaluation
    fn evaluate(&self, lookup: &dyn AttributeLookup) -> bool;
}

/// Compiled criteria expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Criteria {
    source: String,
    expr: Expr,
}

impl Criteria {
    /// Compile an expression
    pub fn compile(expression: &str) -> Result<Self> {
        Ok(Self {
            source: expression.to_string(),
            expr: parser::parse(expression)?,
        })
    }

    /// The expression as written
    pub fn source(&self) -> &str {
        &self.source
    }
}

impl Predicate for Criteria {
    fn evaluate(&self, lookup: &dyn AttributeLookup) -> bool {
        evaluate_expr(&self.expr, lookup)
    }
}

/// Compile and evaluate in one step
pub fn evaluate(expression: &str, lookup: &dyn AttributeLookup) -> Result<bool> {
    Ok(Criteria::compile(expression)?.evaluate(lookup))
}

fn evaluate_expr(expr: &Expr, lookup: &dyn AttributeLookup) -> bool {
    match expr {
        Expr::Truthy(key) => lookup.lookup(key).is_some_and(|value| !value.is_empty()),
        Expr::Compare { key, op, value } => {
            let actual = lookup.lookup(key);
            match op {
                CompareOp::Equal => inline(actual) == value.as_str(),
                CompareOp::NotEqual => inline(actual) != value.as_str(),
                CompareOp::Contains => contains(actual, value),
                CompareOp::NotContains => !contains(actual, value),
            }
        }
        Expr::Not(inner) => !evaluate_expr(inner, lookup),
        Expr::And(left, right) => evaluate_expr(left, lookup) && evaluate_expr(right, lookup),
        Expr::Or(left, right) => evaluate_expr(left, lookup) || evaluate_expr(right, lookup),
    }
}

fn inline(value: Option<&AttributeValue>) -> std::borrow::Cow<'_, str> {
    value
        .map(AttributeValue::inline)
        .unwrap_or(std::borrow::Cow::Borrowed(""))
}

fn contains(value: Option<&AttributeValue>, needle: &str) -> bool {
    match value {
        Some(AttributeValue::List(items)) => items.iter().any(|item| item == needle),
        Some(AttributeValue::Text(text)) => text.contains(needle),
        None => needle.is_empty(),
    }
}

/*!
 * Recursive-descent parser for criteria expressions.
 *
 * ```text
 * expr       := or
 * or         := and (OR and)*
 * and        := unary (AND unary)*
 * unary      := NOT unary | '(' expr ')' | comparison
 * comparison := WORD [op literal]
 * ```
 */

use crate::errors::{ExtractError, Result};

use super::lexer::{tokenize, CompareOp, Token};

/// Parsed expression tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Attribute is present and non-empty
    Truthy(String),
    Compare {
        key: String,
        op: CompareOp,
        value: String,
    },
    Not(Box<Expr>),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
}

struct Parser<'a> {
    tokens: Vec<Token>,
    position: usize,
    source: &'a str,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    fn peek_at(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.position + offset)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.position).cloned();
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    fn error(&self, message: &str) -> ExtractError {
        ExtractError::Criteria(format!("{} in \"{}\"", message, self.source))
    }

    fn parse_or(&mut self) -> Result<Expr> {
        let mut left = self.parse_and()?;
        while self.peek() == Some(&Token::Or) {
            self.advance();
            let right = self.parse_and()?;
            left = Expr::Or(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expr> {
        let mut left = self.parse_unary()?;
        while self.peek() == Some(&Token::And) {
            self.advance();
            let right = self.parse_unary()?;
            left = Expr::And(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expr> {
        match self.peek() {
            Some(Token::Not) => {
                self.advance();
                Ok(Expr::Not(Box::new(self.parse_unary()?)))
            }
            Some(Token::LParen) => {
                self.advance();
                let inner = self.parse_or()?;
                match self.advance() {
                    Some(Token::RParen) => Ok(inner),
                    _ => Err(self.error("missing ')'")),
                }
            }
            _ => self.parse_comparison(),
        }
    }

    fn parse_comparison(&mut self) -> Result<Expr> {
        let key = match self.advance() {
            Some(Token::Word(word)) => word,
            Some(token) => return Err(self.error(&format!("expected an attribute name, found {:?}", token))),
            None => return Err(self.error("unexpected end of expression")),
        };

        let operator = match (self.peek(), self.peek_at(1)) {
            (Some(Token::Op(op)), _) => Some((*op, 1)),
            (Some(Token::Contains), _) => Some((CompareOp::Contains, 1)),
            (Some(Token::Not), Some(Token::Contains)) => Some((CompareOp::NotContains, 2)),
            _ => None,
        };
        let Some((op, width)) = operator else {
            return Ok(Expr::Truthy(key));
        };
        self.position += width;

        let value = match self.advance() {
            Some(Token::Word(word)) | Some(Token::Quoted(word)) => word,
            _ => return Err(self.error(&format!("expected a value after '{}'", key))),
        };

        Ok(Expr::Compare { key, op, value })
    }
}

/// Parse an expression string into a tree
pub fn parse(expression: &str) -> Result<Expr> {
    let tokens = tokenize(expression)?;
    let mut parser = Parser {
        tokens,
        position: 0,
        source: expression,
    };

    if parser.peek().is_none() {
        return Err(parser.error("empty expression"));
    }

    let expr = parser.parse_or()?;
    if let Some(token) = parser.peek() {
        return Err(parser.error(&format!("unexpected {:?}", token)));
    }
    Ok(expr)
}

/*!
 * Tokenizer for criteria expressions.
 */

use crate::errors::{ExtractError, Result};

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Equal,
    NotEqual,
    Contains,
    NotContains,
}

/// Lexical token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    LParen,
    RParen,
    And,
    Or,
    Not,
    Contains,
    Op(CompareOp),
    /// Bare word: attribute key, number or unquoted literal
    Word(String),
    /// Quoted literal
    Quoted(String),
}

fn is_word_char(c: char) -> bool {
    !c.is_whitespace() && !matches!(c, '(' | ')' | '=' | '!' | '<' | '>' | '&' | '|' | '\'' | '"')
}

fn keyword(word: &str) -> Option<Token> {
    match word.to_ascii_lowercase().as_str() {
        "and" => Some(Token::And),
        "or" => Some(Token::Or),
        "not" => Some(Token::Not),
        "contains" => Some(Token::Contains),
        _ => None,
    }
}

/// Split an expression into tokens
pub fn tokenize(expression: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = expression.char_indices().peekable();

    while let Some(&(position, c)) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '(' => {
                chars.next();
                tokens.push(Token::LParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::RParen);
            }
            '=' => {
                chars.next();
                chars.next_if(|&(_, next)| next == '=');
                tokens.push(Token::Op(CompareOp::Equal));
            }
            '!' => {
                chars.next();
                if chars.next_if(|&(_, next)| next == '=').is_some() {
                    tokens.push(Token::Op(CompareOp::NotEqual));
                } else {
                    tokens.push(Token::Not);
                }
            }
            '<' => {
                chars.next();
                if chars.next_if(|&(_, next)| next == '>').is_none() {
                    return Err(ExtractError::Criteria(format!(
                        "unexpected '<' at offset {} in \"{}\"",
                        position, expression
                    )));
                }
                tokens.push(Token::Op(CompareOp::NotEqual));
            }
            '&' | '|' => {
                chars.next();
                if chars.next_if(|&(_, next)| next == c).is_none() {
                    return Err(ExtractError::Criteria(format!(
                        "expected '{}{}' at offset {} in \"{}\"",
                        c, c, position, expression
                    )));
                }
                tokens.push(if c == '&' { Token::And } else { Token::Or });
            }
            '\'' | '"' => {
                chars.next();
                let mut literal = String::new();
                let mut closed = false;
                for (_, next) in chars.by_ref() {
                    if next == c {
                        closed = true;
                        break;
                    }
                    literal.push(next);
                }
                if !closed {
                    return Err(ExtractError::Criteria(format!(
                        "unterminated string at offset {} in \"{}\"",
                        position, expression
                    )));
                }
                tokens.push(Token::Quoted(literal));
            }
            '>' => {
                return Err(ExtractError::Criteria(format!(
                    "unexpected '>' at offset {} in \"{}\"",
                    position, expression
                )));
            }
            _ => {
                let mut word = String::new();
                while let Some((_, next)) = chars.next_if(|&(_, next)| is_word_char(next)) {
                    word.push(next);
                }
                tokens.push(keyword(&word).unwrap_or(Token::Word(word)));
            }
        }
    }

    Ok(tokens)
}

//! Recursive-descent parser for PEP 508 environment markers
//!
//! ```text
//! marker_or   = marker_and ("or" marker_and)*
//! marker_and  = marker_atom ("and" marker_atom)*
//! marker_atom = "(" marker_or ")" | value operator value
//! value       = quoted_string | identifier ("." identifier)*
//! ```

use std::str::FromStr;

use crate::error::MarkerParseError;
use crate::tree::{BoolOperator, MarkerExpression, MarkerOperator, MarkerValue};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Identifier(String),
    Literal(String),
    Operator(MarkerOperator),
    And,
    Or,
    Dot,
    LeftParen,
    RightParen,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Identifier(name) => format!("`{name}`"),
            Token::Literal(value) => format!("string '{value}'"),
            Token::Operator(op) => format!("operator `{op}`"),
            Token::And => "`and`".to_string(),
            Token::Or => "`or`".to_string(),
            Token::Dot => "`.`".to_string(),
            Token::LeftParen => "`(`".to_string(),
            Token::RightParen => "`)`".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
struct Spanned {
    token: Token,
    start: usize,
    end: usize,
}

fn tokenize(src: &str) -> Result<Vec<Spanned>, MarkerParseError> {
    let mut tokens = Vec::new();
    let mut chars = src.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }

        let token = match c {
            '(' => {
                chars.next();
                Token::LeftParen
            }
            ')' => {
                chars.next();
                Token::RightParen
            }
            '.' => {
                chars.next();
                Token::Dot
            }
            '\'' | '"' => {
                chars.next();
                let mut value = String::new();
                let mut closed = false;
                for (_, ch) in chars.by_ref() {
                    if ch == c {
                        closed = true;
                        break;
                    }
                    value.push(ch);
                }
                if !closed {
                    return Err(MarkerParseError::new(
                        src,
                        start,
                        src.len() - start,
                        "unterminated string",
                    ));
                }
                Token::Literal(value)
            }
            '=' | '!' | '<' | '>' | '~' => {
                let mut op = String::new();
                while let Some(&(_, ch)) = chars.peek() {
                    if matches!(ch, '=' | '!' | '<' | '>' | '~') {
                        op.push(ch);
                        chars.next();
                    } else {
                        break;
                    }
                }
                let operator = match op.as_str() {
                    "==" => MarkerOperator::Equal,
                    "!=" => MarkerOperator::NotEqual,
                    "<" => MarkerOperator::LessThan,
                    "<=" => MarkerOperator::LessEqual,
                    ">" => MarkerOperator::GreaterThan,
                    ">=" => MarkerOperator::GreaterEqual,
                    "~=" => MarkerOperator::TildeEqual,
                    "===" => MarkerOperator::ExactEqual,
                    _ => {
                        return Err(MarkerParseError::new(
                            src,
                            start,
                            op.len(),
                            format!("unknown operator `{op}`"),
                        ));
                    }
                };
                Token::Operator(operator)
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let mut word = String::new();
                while let Some(&(_, ch)) = chars.peek() {
                    if ch.is_ascii_alphanumeric() || ch == '_' {
                        word.push(ch);
                        chars.next();
                    } else {
                        break;
                    }
                }
                match word.as_str() {
                    "and" => Token::And,
                    "or" => Token::Or,
                    "in" => Token::Operator(MarkerOperator::In),
                    "not" => {
                        // `not` only exists as the first half of `not in`
                        while chars.peek().is_some_and(|(_, ch)| ch.is_whitespace()) {
                            chars.next();
                        }
                        let rest = &src[chars.peek().map_or(src.len(), |(i, _)| *i)..];
                        let follows_in = rest.starts_with("in")
                            && !rest[2..]
                                .chars()
                                .next()
                                .is_some_and(|ch| ch.is_ascii_alphanumeric() || ch == '_');
                        if !follows_in {
                            return Err(MarkerParseError::new(
                                src,
                                start,
                                3,
                                "expected `in` after `not`",
                            ));
                        }
                        chars.next();
                        chars.next();
                        Token::Operator(MarkerOperator::NotIn)
                    }
                    _ => Token::Identifier(word),
                }
            }
            other => {
                return Err(MarkerParseError::new(
                    src,
                    start,
                    other.len_utf8(),
                    format!("unexpected character `{other}`"),
                ));
            }
        };

        let end = chars.peek().map_or(src.len(), |(i, _)| *i);
        tokens.push(Spanned { token, start, end });
    }

    Ok(tokens)
}

struct Parser<'a> {
    src: &'a str,
    tokens: Vec<Spanned>,
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<&Spanned> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Spanned> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn error(&self, expected: &str) -> MarkerParseError {
        match self.peek() {
            Some(spanned) => MarkerParseError::new(
                self.src,
                spanned.start,
                spanned.end - spanned.start,
                format!("expected {expected}, found {}", spanned.token.describe()),
            ),
            None => MarkerParseError::new(
                self.src,
                self.src.len(),
                0,
                format!("expected {expected}, found end of marker"),
            ),
        }
    }

    fn parse_or(&mut self) -> Result<MarkerExpression, MarkerParseError> {
        let mut lhs = self.parse_and()?;
        while self.peek().is_some_and(|s| s.token == Token::Or) {
            self.next();
            let rhs = self.parse_and()?;
            lhs = MarkerExpression::BoolOp {
                operator: BoolOperator::Or,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    fn parse_and(&mut self) -> Result<MarkerExpression, MarkerParseError> {
        let mut lhs = self.parse_atom()?;
        while self.peek().is_some_and(|s| s.token == Token::And) {
            self.next();
            let rhs = self.parse_atom()?;
            lhs = MarkerExpression::BoolOp {
                operator: BoolOperator::And,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    fn parse_atom(&mut self) -> Result<MarkerExpression, MarkerParseError> {
        if self.peek().is_some_and(|s| s.token == Token::LeftParen) {
            self.next();
            let expr = self.parse_or()?;
            if !self.peek().is_some_and(|s| s.token == Token::RightParen) {
                return Err(self.error("`)`"));
            }
            self.next();
            return Ok(expr);
        }

        let lhs = self.parse_value()?;
        let operator = match self.peek() {
            Some(Spanned {
                token: Token::Operator(op),
                ..
            }) => *op,
            _ => return Err(self.error("a comparison operator")),
        };
        self.next();
        let rhs = self.parse_value()?;

        Ok(MarkerExpression::Compare { lhs, operator, rhs })
    }

    fn parse_value(&mut self) -> Result<MarkerValue, MarkerParseError> {
        match self.peek().map(|s| &s.token) {
            Some(Token::Literal(value)) => {
                let value = value.clone();
                self.next();
                Ok(MarkerValue::Literal(value))
            }
            Some(Token::Identifier(name)) => {
                let mut name = name.clone();
                self.next();
                // attribute access such as `sys.platform`
                while self.peek().is_some_and(|s| s.token == Token::Dot) {
                    self.next();
                    match self.peek().map(|s| &s.token) {
                        Some(Token::Identifier(attr)) => {
                            name.push('.');
                            name.push_str(attr);
                            self.next();
                        }
                        _ => return Err(self.error("an attribute name")),
                    }
                }
                Ok(MarkerValue::Identifier(name))
            }
            _ => Err(self.error("a quoted string or a marker variable")),
        }
    }
}

/// Parse an environment marker into an expression tree.
pub fn parse_marker(src: &str) -> Result<MarkerExpression, MarkerParseError> {
    let tokens = tokenize(src)?;
    let mut parser = Parser {
        src,
        tokens,
        pos: 0,
    };

    let expr = parser.parse_or()?;
    if parser.peek().is_some() {
        return Err(parser.error("`and`, `or` or the end of the marker"));
    }

    Ok(expr)
}

impl FromStr for MarkerExpression {
    type Err = MarkerParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_marker(s)
    }
}

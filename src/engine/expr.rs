//! Embedded arithmetic expression evaluator
//!
//! Volume formulas are catalog data, not code, so they arrive as strings
//! and are evaluated by this small recursive-descent interpreter rather
//! than anything resembling a runtime eval. Supported syntax:
//!
//! - operators `+ - * /`, parentheses, and right-associative `**`
//! - unary plus/minus
//! - floating point literals
//! - the `pi` constant
//! - named variables, resolved through a [`Scope`]
//!
//! The evaluator returns `Result` and is tested on its own; the formula
//! layer above it is what absorbs errors into a zero volume.

use std::collections::BTreeMap;
use thiserror::Error;

use crate::engine::measure::MeasurementSet;

/// Variable resolution for expression evaluation
pub trait Scope {
    fn resolve(&self, name: &str) -> Option<f64>;
}

/// Empty scope for pure arithmetic
impl Scope for () {
    fn resolve(&self, _name: &str) -> Option<f64> {
        None
    }
}

impl Scope for BTreeMap<String, f64> {
    fn resolve(&self, name: &str) -> Option<f64> {
        self.get(name).copied()
    }
}

/// Measurement sets resolve canonical names, legacy casings, and
/// positional aliases.
impl Scope for MeasurementSet {
    fn resolve(&self, name: &str) -> Option<f64> {
        self.lookup(name)
    }
}

/// Errors from tokenizing or evaluating an expression
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExprError {
    #[error("unexpected character '{0}' in expression")]
    UnexpectedChar(char),

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("unexpected token '{0}'")]
    UnexpectedToken(String),

    #[error("unknown variable '{0}'")]
    UnknownVariable(String),

    #[error("invalid numeric literal '{0}'")]
    InvalidNumber(String),
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Num(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Pow,
    LParen,
    RParen,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Num(n) => n.to_string(),
            Token::Ident(s) => s.clone(),
            Token::Plus => "+".to_string(),
            Token::Minus => "-".to_string(),
            Token::Star => "*".to_string(),
            Token::Slash => "/".to_string(),
            Token::Pow => "**".to_string(),
            Token::LParen => "(".to_string(),
            Token::RParen => ")".to_string(),
        }
    }
}

fn tokenize(input: &str) -> Result<Vec<Token>, ExprError> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '0'..='9' | '.' => {
                let mut lit = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_ascii_digit() || c == '.' {
                        lit.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                let value: f64 = lit
                    .parse()
                    .map_err(|_| ExprError::InvalidNumber(lit.clone()))?;
                tokens.push(Token::Num(value));
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let mut name = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_ascii_alphanumeric() || c == '_' {
                        name.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token::Ident(name));
            }
            '+' => {
                chars.next();
                tokens.push(Token::Plus);
            }
            '-' => {
                chars.next();
                tokens.push(Token::Minus);
            }
            '*' => {
                chars.next();
                if chars.peek() == Some(&'*') {
                    chars.next();
                    tokens.push(Token::Pow);
                } else {
                    tokens.push(Token::Star);
                }
            }
            '/' => {
                chars.next();
                tokens.push(Token::Slash);
            }
            '(' => {
                chars.next();
                tokens.push(Token::LParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::RParen);
            }
            other => return Err(ExprError::UnexpectedChar(other)),
        }
    }

    Ok(tokens)
}

struct Parser<'a> {
    tokens: Vec<Token>,
    pos: usize,
    scope: &'a dyn Scope,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let tok = self.tokens.get(self.pos).cloned();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn eat(&mut self, expected: &Token) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    // expr := term (('+' | '-') term)*
    fn expr(&mut self) -> Result<f64, ExprError> {
        let mut value = self.term()?;
        loop {
            if self.eat(&Token::Plus) {
                value += self.term()?;
            } else if self.eat(&Token::Minus) {
                value -= self.term()?;
            } else {
                break;
            }
        }
        Ok(value)
    }

    // term := unary (('*' | '/') unary)*
    fn term(&mut self) -> Result<f64, ExprError> {
        let mut value = self.unary()?;
        loop {
            if self.eat(&Token::Star) {
                value *= self.unary()?;
            } else if self.eat(&Token::Slash) {
                value /= self.unary()?;
            } else {
                break;
            }
        }
        Ok(value)
    }

    // unary := ('-' | '+') unary | power
    // Negation binds looser than '**', so -x**2 is -(x**2).
    fn unary(&mut self) -> Result<f64, ExprError> {
        if self.eat(&Token::Minus) {
            Ok(-self.unary()?)
        } else if self.eat(&Token::Plus) {
            self.unary()
        } else {
            self.power()
        }
    }

    // power := primary ('**' unary)?   (right-associative)
    fn power(&mut self) -> Result<f64, ExprError> {
        let base = self.primary()?;
        if self.eat(&Token::Pow) {
            let exponent = self.unary()?;
            Ok(base.powf(exponent))
        } else {
            Ok(base)
        }
    }

    // primary := number | ident | '(' expr ')'
    fn primary(&mut self) -> Result<f64, ExprError> {
        match self.next() {
            Some(Token::Num(n)) => Ok(n),
            Some(Token::Ident(name)) => {
                if name == "pi" {
                    Ok(std::f64::consts::PI)
                } else {
                    self.scope
                        .resolve(&name)
                        .ok_or(ExprError::UnknownVariable(name))
                }
            }
            Some(Token::LParen) => {
                let value = self.expr()?;
                if self.eat(&Token::RParen) {
                    Ok(value)
                } else {
                    Err(self
                        .peek()
                        .map(|t| ExprError::UnexpectedToken(t.describe()))
                        .unwrap_or(ExprError::UnexpectedEnd))
                }
            }
            Some(other) => Err(ExprError::UnexpectedToken(other.describe())),
            None => Err(ExprError::UnexpectedEnd),
        }
    }
}

/// Evaluate an arithmetic expression against a variable scope.
///
/// Division by zero follows IEEE semantics and surfaces as a non-finite
/// result; callers that need a hard guarantee check `is_finite` on the
/// output.
pub fn eval(input: &str, scope: &dyn Scope) -> Result<f64, ExprError> {
    let tokens = tokenize(input)?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        scope,
    };
    let value = parser.expr()?;
    match parser.peek() {
        None => Ok(value),
        Some(tok) => Err(ExprError::UnexpectedToken(tok.describe())),
    }
}

/// All identifiers in the expression, in order of first appearance.
///
/// Tolerant of malformed tail input: identifiers lexed before the first
/// bad character are still returned, which lets callers prompt for inputs
/// while a formula is mid-edit.
pub fn identifiers(input: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_ascii_alphabetic() || c == '_' {
            let mut name = String::new();
            while let Some(&c) = chars.peek() {
                if c.is_ascii_alphanumeric() || c == '_' {
                    name.push(c);
                    chars.next();
                } else {
                    break;
                }
            }
            if !out.contains(&name) {
                out.push(name);
            }
        } else {
            chars.next();
        }
    }

    out
}

//! Side-effect free evaluator for text test descriptions.
//!
//! A description is a list of `key = expression` lines. Expressions may use
//! numbers, `+ - * / **`, parentheses, `pi` and keys bound on earlier lines.
//! `radius` may also be `None`. Nothing else is in scope.

use std::{collections::HashMap, f64::consts::PI};

use super::test_description::{DescriptionError, TestDescription, TestDescriptionSerde};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token<'a> {
    Number(f64),
    Name(&'a str),
    Plus,
    Minus,
    Star,
    Slash,
    Power,
    LeftParen,
    RightParen,
}

fn tokenize(line: usize, source: &str) -> Result<Vec<Token<'_>>, DescriptionError> {
    let syntax = |message: String| DescriptionError::Syntax { line, message };
    let bytes = source.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let c = bytes[i];
        match c {
            b' ' | b'\t' => i += 1,
            b'+' => {
                tokens.push(Token::Plus);
                i += 1;
            }
            b'-' => {
                tokens.push(Token::Minus);
                i += 1;
            }
            b'*' if bytes.get(i + 1) == Some(&b'*') => {
                tokens.push(Token::Power);
                i += 2;
            }
            b'*' => {
                tokens.push(Token::Star);
                i += 1;
            }
            b'/' => {
                tokens.push(Token::Slash);
                i += 1;
            }
            b'(' => {
                tokens.push(Token::LeftParen);
                i += 1;
            }
            b')' => {
                tokens.push(Token::RightParen);
                i += 1;
            }
            b'0'..=b'9' | b'.' => {
                let start = i;
                while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == b'.') {
                    i += 1;
                }
                if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
                    i += 1;
                    if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
                        i += 1;
                    }
                    while i < bytes.len() && bytes[i].is_ascii_digit() {
                        i += 1;
                    }
                }
                let literal = &source[start..i];
                let value = literal
                    .parse::<f64>()
                    .map_err(|_| syntax(format!("invalid number {:?}", literal)))?;
                tokens.push(Token::Number(value));
            }
            c if c.is_ascii_alphabetic() || c == b'_' => {
                let start = i;
                while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
                    i += 1;
                }
                tokens.push(Token::Name(&source[start..i]));
            }
            _ => {
                let unexpected = source[i..].chars().next().unwrap_or('?');
                return Err(syntax(format!("unexpected character {:?}", unexpected)));
            }
        }
    }
    Ok(tokens)
}

/// Recursive descent evaluator over the tokens of one expression.
struct Evaluator<'t, 'a> {
    tokens: &'t [Token<'a>],
    position: usize,
    key: &'a str,
    scope: &'t HashMap<&'a str, f64>,
}

impl<'t, 'a> Evaluator<'t, 'a> {
    fn error(&self, message: impl Into<String>) -> DescriptionError {
        DescriptionError::Eval {
            key: self.key.into(),
            message: message.into(),
        }
    }

    fn peek(&self) -> Option<Token<'a>> {
        self.tokens.get(self.position).copied()
    }

    fn next(&mut self) -> Option<Token<'a>> {
        let token = self.peek();
        self.position += 1;
        token
    }

    fn evaluate(mut self) -> Result<f64, DescriptionError> {
        let value = self.sum()?;
        if let Some(token) = self.peek() {
            return Err(self.error(format!("unexpected {:?}", token)));
        }
        if !value.is_finite() {
            return Err(self.error(format!("evaluates to {}", value)));
        }
        Ok(value)
    }

    fn sum(&mut self) -> Result<f64, DescriptionError> {
        let mut value = self.product()?;
        loop {
            match self.peek() {
                Some(Token::Plus) => {
                    self.next();
                    value += self.product()?;
                }
                Some(Token::Minus) => {
                    self.next();
                    value -= self.product()?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn product(&mut self) -> Result<f64, DescriptionError> {
        let mut value = self.unary()?;
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.next();
                    value *= self.unary()?;
                }
                Some(Token::Slash) => {
                    self.next();
                    let divisor = self.unary()?;
                    if divisor == 0.0 {
                        return Err(self.error("division by zero"));
                    }
                    value /= divisor;
                }
                _ => return Ok(value),
            }
        }
    }

    // unary minus binds looser than `**`, so -2**2 == -4
    fn unary(&mut self) -> Result<f64, DescriptionError> {
        match self.peek() {
            Some(Token::Minus) => {
                self.next();
                Ok(-self.unary()?)
            }
            Some(Token::Plus) => {
                self.next();
                self.unary()
            }
            _ => self.power(),
        }
    }

    fn power(&mut self) -> Result<f64, DescriptionError> {
        let base = self.primary()?;
        if self.peek() == Some(Token::Power) {
            self.next();
            let exponent = self.unary()?;
            return Ok(base.powf(exponent));
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<f64, DescriptionError> {
        match self.next() {
            Some(Token::Number(value)) => Ok(value),
            Some(Token::Name(name)) => {
                if self.peek() == Some(Token::LeftParen) {
                    return Err(self.error(format!("call to {:?} is not allowed", name)));
                }
                if name == "pi" {
                    return Ok(PI);
                }
                self.scope
                    .get(name)
                    .copied()
                    .ok_or_else(|| self.error(format!("unknown name {:?}", name)))
            }
            Some(Token::LeftParen) => {
                let value = self.sum()?;
                match self.next() {
                    Some(Token::RightParen) => Ok(value),
                    _ => Err(self.error("missing ')'")),
                }
            }
            Some(token) => Err(self.error(format!("unexpected {:?}", token))),
            None => Err(self.error("unexpected end of expression")),
        }
    }
}

/// Parses a `key = expression` description into a [`TestDescription`].
pub fn parse_description(text: &str) -> Result<TestDescription, DescriptionError> {
    let mut description = TestDescriptionSerde::default();
    let mut scope = HashMap::<&str, f64>::new();
    let mut bound = Vec::<&str>::new();

    for (i, raw_line) in text.lines().enumerate() {
        let line = i + 1;
        let content = raw_line.split('#').next().unwrap_or("").trim();
        if content.is_empty() {
            continue;
        }

        let Some((key, expression)) = content.split_once('=') else {
            return Err(DescriptionError::Syntax {
                line,
                message: format!("expected `key = expression`, got {:?}", content),
            });
        };
        let key = key.trim();
        let expression = expression.trim();
        if bound.contains(&key) {
            return Err(DescriptionError::Syntax {
                line,
                message: format!("{:?} is assigned twice", key),
            });
        }

        let value = if key == "radius" && expression == "None" {
            None
        } else {
            let tokens = tokenize(line, expression)?;
            let evaluator = Evaluator {
                tokens: &tokens,
                position: 0,
                key,
                scope: &scope,
            };
            Some(evaluator.evaluate()?)
        };

        description.set(key, value)?;
        if let Some(value) = value {
            scope.insert(key, value);
        }
        bound.push(key);
    }

    description.try_into()
}

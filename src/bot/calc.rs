//! `!calc` arithmetic.
//!
//! Input is first checked against a character allow-list (`0123456789+-*/(). `), then
//! evaluated by a small recursive-descent parser:
//!
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := unary (('*' | '/' | '//') unary)*
//! unary  := ('+' | '-') unary | power
//! power  := atom ('**' unary)?
//! atom   := number | '(' expr ')'
//! ```
//!
//! `**` binds tighter than unary minus on its left and is right-associative, so
//! `-2**2 == -4` and `2**3**2 == 512`.
//!
//! Nesting depth is capped at [`MAX_DEPTH`]; deeper input fails with
//! [`CalcError::TooDeep`].
use thiserror::Error;

pub const ALLOWED_CHARS: &str = "0123456789+-*/(). ";

/// Deepest nesting the parser will follow.
pub const MAX_DEPTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("Invalid characters in expression.")]
    InvalidCharacters,
    #[error("Empty expression.")]
    Empty,
    #[error("Unexpected '{0}' in expression.")]
    Unexpected(String),
    #[error("Unexpected end of expression.")]
    UnexpectedEnd,
    #[error("Malformed number '{0}'.")]
    BadNumber(String),
    #[error("Division by zero.")]
    DivisionByZero,
    #[error("Result is not a finite number.")]
    NotFinite,
    #[error("Expression is nested too deeply.")]
    TooDeep,
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Num(f64),
    Plus,
    Minus,
    Star,
    Slash,
    DoubleSlash,
    Pow,
    LParen,
    RParen,
}

fn tokenize(src: &str) -> Result<Vec<Token>, CalcError> {
    let chars: Vec<char> = src.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        match c {
            ' ' => i += 1,
            '0'..='9' | '.' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                let lit: String = chars[start..i].iter().collect();
                let n = lit
                    .parse::<f64>()
                    .map_err(|_| CalcError::BadNumber(lit.clone()))?;
                tokens.push(Token::Num(n));
            }
            '+' => {
                tokens.push(Token::Plus);
                i += 1;
            }
            '-' => {
                tokens.push(Token::Minus);
                i += 1;
            }
            '*' => {
                if chars.get(i + 1) == Some(&'*') {
                    tokens.push(Token::Pow);
                    i += 2;
                } else {
                    tokens.push(Token::Star);
                    i += 1;
                }
            }
            '/' => {
                if chars.get(i + 1) == Some(&'/') {
                    tokens.push(Token::DoubleSlash);
                    i += 2;
                } else {
                    tokens.push(Token::Slash);
                    i += 1;
                }
            }
            '(' => {
                tokens.push(Token::LParen);
                i += 1;
            }
            ')' => {
                tokens.push(Token::RParen);
                i += 1;
            }
            other => return Err(CalcError::Unexpected(other.to_string())),
        }
    }
    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let t = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        t
    }

    fn expr(&mut self) -> Result<f64, CalcError> {
        let mut acc = self.term()?;
        while let Some(t) = self.peek() {
            match t {
                Token::Plus => {
                    self.pos += 1;
                    acc += self.term()?;
                }
                Token::Minus => {
                    self.pos += 1;
                    acc -= self.term()?;
                }
                _ => break,
            }
        }
        Ok(acc)
    }

    fn term(&mut self) -> Result<f64, CalcError> {
        let mut acc = self.unary()?;
        while let Some(t) = self.peek() {
            match t {
                Token::Star => {
                    self.pos += 1;
                    acc *= self.unary()?;
                }
                Token::Slash => {
                    self.pos += 1;
                    let rhs = self.unary()?;
                    if rhs == 0.0 {
                        return Err(CalcError::DivisionByZero);
                    }
                    acc /= rhs;
                }
                Token::DoubleSlash => {
                    self.pos += 1;
                    let rhs = self.unary()?;
                    if rhs == 0.0 {
                        return Err(CalcError::DivisionByZero);
                    }
                    acc = (acc / rhs).floor();
                }
                _ => break,
            }
        }
        Ok(acc)
    }

    fn descend(&mut self) -> Result<(), CalcError> {
        if self.depth >= MAX_DEPTH {
            return Err(CalcError::TooDeep);
        }
        self.depth += 1;
        Ok(())
    }

    fn unary(&mut self) -> Result<f64, CalcError> {
        self.descend()?;
        let value = match self.peek() {
            Some(Token::Minus) => {
                self.pos += 1;
                self.unary().map(|v| -v)
            }
            Some(Token::Plus) => {
                self.pos += 1;
                self.unary()
            }
            _ => self.power(),
        };
        self.depth -= 1;
        value
    }

    fn power(&mut self) -> Result<f64, CalcError> {
        let base = self.atom()?;
        if let Some(Token::Pow) = self.peek() {
            self.pos += 1;
            let exp = self.unary()?;
            return Ok(base.powf(exp));
        }
        Ok(base)
    }

    fn atom(&mut self) -> Result<f64, CalcError> {
        match self.next() {
            Some(Token::Num(n)) => Ok(n),
            Some(Token::LParen) => {
                self.descend()?;
                let v = self.expr();
                self.depth -= 1;
                let v = v?;
                match self.next() {
                    Some(Token::RParen) => Ok(v),
                    Some(t) => Err(CalcError::Unexpected(describe(&t))),
                    None => Err(CalcError::UnexpectedEnd),
                }
            }
            Some(t) => Err(CalcError::Unexpected(describe(&t))),
            None => Err(CalcError::UnexpectedEnd),
        }
    }
}

fn describe(t: &Token) -> String {
    match t {
        Token::Num(n) => format_number(*n),
        Token::Plus => "+".into(),
        Token::Minus => "-".into(),
        Token::Star => "*".into(),
        Token::Slash => "/".into(),
        Token::DoubleSlash => "//".into(),
        Token::Pow => "**".into(),
        Token::LParen => "(".into(),
        Token::RParen => ")".into(),
    }
}

/// Evaluate `expression` after the allow-list check.
pub fn evaluate(expression: &str) -> Result<f64, CalcError> {
    if expression.chars().any(|c| !ALLOWED_CHARS.contains(c)) {
        return Err(CalcError::InvalidCharacters);
    }
    let tokens = tokenize(expression)?;
    if tokens.is_empty() {
        return Err(CalcError::Empty);
    }
    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let value = parser.expr()?;
    if let Some(t) = parser.peek() {
        return Err(CalcError::Unexpected(describe(t)));
    }
    if !value.is_finite() {
        return Err(CalcError::NotFinite);
    }
    Ok(value)
}

/// Integral values print without a fractional part: `6`, `3.5`, `-0.25`.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

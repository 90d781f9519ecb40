//! Parser and evaluator for a single binary fraction expression.
//!
//! The recognized shape is `N1/D1 OP N2/D2` with OP one of `+ - * /`.
//! Whitespace around tokens is tolerated; anything trailing the second
//! fraction is an error.

use crate::fraction::{Fraction, FractionError};
use thiserror::Error;

/// The four supported operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

/// A parsed `lhs OP rhs` expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expression {
    pub lhs: Fraction,
    pub op: BinOp,
    pub rhs: Fraction,
}

/// Errors from parsing or evaluating an expression line.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExprError {
    #[error("malformed expression")]
    Malformed,

    #[error(transparent)]
    Fraction(#[from] FractionError),
}

impl Expression {
    /// Applies the operator.
    pub fn evaluate(&self) -> Result<Fraction, ExprError> {
        match self.op {
            BinOp::Add => Ok(self.lhs + self.rhs),
            BinOp::Sub => Ok(self.lhs - self.rhs),
            BinOp::Mul => Ok(self.lhs * self.rhs),
            BinOp::Div => Ok(self.lhs.checked_div(self.rhs)?),
        }
    }
}

/// Parses one expression line.
pub fn parse(line: &str) -> Result<Expression, ExprError> {
    let mut scanner = Scanner::new(line);

    let lhs = scanner.fraction()?;
    let op = scanner.operator()?;
    let rhs = scanner.fraction()?;
    scanner.end()?;

    Ok(Expression { lhs, op, rhs })
}

/// Parses and evaluates one expression line.
pub fn evaluate(line: &str) -> Result<Fraction, ExprError> {
    parse(line)?.evaluate()
}

/// Minimal cursor over the input bytes.
struct Scanner<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Scanner {
            bytes: input.as_bytes(),
            pos: 0,
        }
    }

    fn skip_ws(&mut self) {
        while self.pos < self.bytes.len() && self.bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
    }

    /// A signed decimal integer.
    fn integer(&mut self) -> Result<i64, ExprError> {
        self.skip_ws();
        let start = self.pos;
        if self.pos < self.bytes.len() && self.bytes[self.pos] == b'-' {
            self.pos += 1;
        }
        let digits_start = self.pos;
        while self.pos < self.bytes.len() && self.bytes[self.pos].is_ascii_digit() {
            self.pos += 1;
        }
        if self.pos == digits_start {
            return Err(ExprError::Malformed);
        }
        // Only ASCII digits and an optional sign: always valid UTF-8.
        std::str::from_utf8(&self.bytes[start..self.pos])
            .map_err(|_| ExprError::Malformed)?
            .parse()
            .map_err(|_| ExprError::Malformed)
    }

    /// `N/D` as a reduced fraction.
    fn fraction(&mut self) -> Result<Fraction, ExprError> {
        let numer = self.integer()?;
        self.skip_ws();
        if self.pos >= self.bytes.len() || self.bytes[self.pos] != b'/' {
            return Err(ExprError::Malformed);
        }
        self.pos += 1;
        let deno = self.integer()?;
        Ok(Fraction::new(numer, deno)?)
    }

    fn operator(&mut self) -> Result<BinOp, ExprError> {
        self.skip_ws();
        let op = match self.bytes.get(self.pos) {
            Some(b'+') => BinOp::Add,
            Some(b'-') => BinOp::Sub,
            Some(b'*') => BinOp::Mul,
            Some(b'/') => BinOp::Div,
            _ => return Err(ExprError::Malformed),
        };
        self.pos += 1;
        Ok(op)
    }

    /// Nothing but whitespace may remain.
    fn end(&mut self) -> Result<(), ExprError> {
        self.skip_ws();
        if self.pos == self.bytes.len() {
            Ok(())
        } else {
            Err(ExprError::Malformed)
        }
    }
}

//! Parser and sorter for a comma-separated fraction list.
//!
//! The line's final character selects the order: `<` ascending, `>`
//! descending. The head is a non-empty, comma-separated list of `N/D`
//! literals; every fraction is reduced on parse.

use crate::fraction::{Fraction, FractionError};
use std::fmt::Write as _;
use thiserror::Error;

/// Sort direction selected by the terminator character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Errors from parsing a fraction-list line.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListError {
    /// The line does not end in `<` or `>`.
    #[error("missing sort terminator")]
    BadTerminator,

    /// An entry is not a fraction literal, or the list is empty.
    #[error("malformed fraction list")]
    Malformed,

    #[error(transparent)]
    Fraction(#[from] FractionError),
}

/// Splits a line into its fractions and sort order.
pub fn parse(line: &str) -> Result<(Vec<Fraction>, SortOrder), ListError> {
    let trimmed = line.trim();
    let (head, order) = match trimmed.strip_suffix('<') {
        Some(head) => (head, SortOrder::Ascending),
        None => match trimmed.strip_suffix('>') {
            Some(head) => (head, SortOrder::Descending),
            None => return Err(ListError::BadTerminator),
        },
    };

    if head.trim().is_empty() {
        return Err(ListError::Malformed);
    }

    let mut fractions = Vec::new();
    for entry in head.split(',') {
        let fraction: Fraction = entry.parse().map_err(|e| match e {
            FractionError::ZeroDenominator => ListError::Fraction(e),
            _ => ListError::Malformed,
        })?;
        fractions.push(fraction);
    }
    Ok((fractions, order))
}

/// Stable sort in the given order.
pub fn sort(fractions: &mut [Fraction], order: SortOrder) {
    match order {
        SortOrder::Ascending => fractions.sort_by(|a, b| a.cmp(b)),
        SortOrder::Descending => fractions.sort_by(|a, b| b.cmp(a)),
    }
}

/// Renders the fractions space-separated.
pub fn render(fractions: &[Fraction]) -> String {
    let mut out = String::new();
    for (i, fraction) in fractions.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{}", fraction);
    }
    out
}

/// Parses, sorts, and renders one list line.
pub fn evaluate(line: &str) -> Result<String, ListError> {
    let (mut fractions, order) = parse(line)?;
    sort(&mut fractions, order);
    Ok(render(&fractions))
}

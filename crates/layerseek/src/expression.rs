//! Filter-expression builders.
//!
//! Everything in this module is pure string construction. The host's query
//! engine is the only thing that ever parses the produced expressions; the
//! builders' contract is purely structural: OR over string fields for the
//! free-word clause, one refinement clause per mode, fully parenthesized
//! combination, and a single escaping policy applied everywhere.
//!
//! ## Escaping policy
//!
//! Single quotes are doubled in every quoted literal. Inside `LIKE`
//! patterns, the wildcard characters `%` and `_` and the escape character
//! `\` are additionally backslash-escaped so that keyword characters are
//! always matched literally. The equality path carries no pattern, so it
//! only doubles quotes.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SearchError};
use crate::layer::{FieldDescriptor, FieldKind};

// ---------------------------------------------------------------------------
// Expression and policy types
// ---------------------------------------------------------------------------

/// A filter expression in the host's expression grammar.
///
/// Constructed only by this module; the rest of the crate passes it around
/// opaquely and hands it to the host for execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterExpression(String);

impl FilterExpression {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FilterExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Boolean operator joining the free-word clause and the refinement clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinPolicy {
    #[default]
    And,
    Or,
}

impl JoinPolicy {
    fn keyword(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

/// How an across-fields refinement term compares against field values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Substring match (`%term%`).
    #[default]
    Contains,
    /// Case-insensitive equality.
    Exact,
    /// Prefix match (`term%`).
    Prefix,
}

/// Operator for the single-field typed comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparator {
    #[default]
    Equals,
    GreaterThan,
    LessThan,
    Contains,
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// Builds the free-word clause: a case-insensitive contains test ORed over
/// every string field.
///
/// Returns `None` when the term is blank or no string field exists; the
/// caller decides which of the two it was.
pub fn build_contains_over_fields(
    fields: &[FieldDescriptor],
    term: &str,
) -> Option<FilterExpression> {
    let term = term.trim();
    if term.is_empty() {
        return None;
    }

    let escaped = escape_like(term);
    let parts: Vec<String> = fields
        .iter()
        .filter(|field| field.kind == FieldKind::String)
        .map(|field| {
            format!(
                "lower({}) LIKE lower('%{}%')",
                quote_field(&field.name),
                escaped
            )
        })
        .collect();

    group_or(parts)
}

/// Builds the across-fields refinement clause for the given match mode,
/// ORed over every string field.
///
/// Same absent conditions as [`build_contains_over_fields`].
pub fn build_refinement(
    fields: &[FieldDescriptor],
    term: &str,
    mode: MatchMode,
) -> Option<FilterExpression> {
    let term = term.trim();
    if term.is_empty() {
        return None;
    }

    let parts: Vec<String> = fields
        .iter()
        .filter(|field| field.kind == FieldKind::String)
        .map(|field| {
            let name = quote_field(&field.name);
            match mode {
                MatchMode::Contains => {
                    format!("lower({name}) LIKE lower('%{}%')", escape_like(term))
                }
                MatchMode::Prefix => {
                    format!("lower({name}) LIKE lower('{}%')", escape_like(term))
                }
                MatchMode::Exact => {
                    format!("lower({name}) = lower('{}')", escape_quotes(term))
                }
            }
        })
        .collect();

    group_or(parts)
}

/// Builds a typed comparison against a single named field.
///
/// `Equals` dispatches on whether the term is a numeric literal: numeric
/// terms are emitted unquoted, anything else as a quoted string. The
/// ordering comparators require a numeric term and fail with
/// [`SearchError::NonNumericComparison`] otherwise — the caller must not
/// fall back silently.
pub fn build_typed_comparison(
    field: &FieldDescriptor,
    term: &str,
    comparator: Comparator,
) -> Result<FilterExpression> {
    let term = term.trim();
    if term.is_empty() {
        return Err(SearchError::NoUsableExpression);
    }

    let name = quote_field(&field.name);
    let clause = match comparator {
        Comparator::Equals => {
            if is_numeric_literal(term) {
                format!("({name} = {term})")
            } else {
                format!("({name} = '{}')", escape_quotes(term))
            }
        }
        Comparator::GreaterThan | Comparator::LessThan => {
            if !is_numeric_literal(term) {
                return Err(SearchError::NonNumericComparison(term.to_string()));
            }
            let op = if comparator == Comparator::GreaterThan {
                ">"
            } else {
                "<"
            };
            format!("({name} {op} {term})")
        }
        Comparator::Contains => {
            format!("(lower({name}) LIKE lower('%{}%'))", escape_like(term))
        }
    };

    Ok(FilterExpression(clause))
}

/// Combines two optional clauses under the join policy.
///
/// Both present: `(a AND b)` / `(a OR b)`, fully parenthesized. One
/// present: that clause unchanged. Neither: `None` — the caller must not
/// run a query.
pub fn combine(
    a: Option<FilterExpression>,
    b: Option<FilterExpression>,
    policy: JoinPolicy,
) -> Option<FilterExpression> {
    match (a, b) {
        (Some(a), Some(b)) => Some(FilterExpression(format!(
            "({} {} {})",
            a.0,
            policy.keyword(),
            b.0
        ))),
        (Some(a), None) => Some(a),
        (None, Some(b)) => Some(b),
        (None, None) => None,
    }
}

// ---------------------------------------------------------------------------
// Literal helpers
// ---------------------------------------------------------------------------

/// Whole-string numeric literal test: optional sign, digits, optional
/// single decimal point with digits after it. No exponents, no separators,
/// no surrounding whitespace.
pub fn is_numeric_literal(term: &str) -> bool {
    let unsigned = term
        .strip_prefix(['+', '-'])
        .unwrap_or(term);

    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (unsigned, None),
    };

    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    all_digits(int_part) && frac_part.map_or(true, all_digits)
}

fn group_or(parts: Vec<String>) -> Option<FilterExpression> {
    if parts.is_empty() {
        None
    } else {
        Some(FilterExpression(format!("({})", parts.join(" OR "))))
    }
}

fn quote_field(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn escape_quotes(term: &str) -> String {
    term.replace('\'', "''")
}

fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
        .replace('\'', "''")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Parse error types.

use std::fmt::{Display, Formatter, Result as FmtResult};

use thiserror::Error;

use crate::parser::ast::Span;
use crate::skeleton::SkeletonError;

/// A token class the parser was looking for when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Expectation {
    /// Exact text such as `"{"` or `"plural"`.
    Literal(&'static str),
    /// A named rule such as `argNameOrNumber`.
    Named(&'static str),
    EndOfInput,
}

impl Display for Expectation {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Expectation::Literal(text) => write!(f, "\"{}\"", escape(text)),
            Expectation::Named(name) => f.write_str(name),
            Expectation::EndOfInput => f.write_str("end of input"),
        }
    }
}

/// An error that occurred during parsing.
///
/// Parsing aborts at the first error; no partial AST is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// No rule could continue at the rightmost position the parser reached.
    #[error("{}", describe_failure(.expected, .found))]
    Expected {
        /// Every token class tried at `location`.
        expected: Vec<Expectation>,
        /// The character at `location`, `None` at end of input.
        found: Option<char>,
        location: Span,
    },

    #[error("Duplicate option \"{id}\" in {kind} element: \"{text}\"")]
    DuplicateOption {
        id: String,
        kind: &'static str,
        /// Full source text of the plural or select element.
        text: String,
        location: Span,
    },

    #[error("Mismatched tag \"{open}\" closed by \"{close}\" at {location}")]
    MismatchedTag {
        open: String,
        close: String,
        location: Span,
    },

    #[error("Invalid skeleton at {location}: {error}")]
    InvalidSkeleton {
        #[source]
        error: SkeletonError,
        location: Span,
    },

    #[error("Invalid plural offset \"{text}\" at {location}")]
    InvalidOffset { text: String, location: Span },
}

impl ParseError {
    /// Source range the error points at.
    pub fn location(&self) -> Span {
        match self {
            ParseError::Expected { location, .. }
            | ParseError::DuplicateOption { location, .. }
            | ParseError::MismatchedTag { location, .. }
            | ParseError::InvalidSkeleton { location, .. }
            | ParseError::InvalidOffset { location, .. } => *location,
        }
    }
}

/// `Expected "a", "b", or c but "x" found.`
fn describe_failure(expected: &[Expectation], found: &Option<char>) -> String {
    let mut descriptions: Vec<String> = expected.iter().map(ToString::to_string).collect();
    descriptions.sort();
    descriptions.dedup();
    let expected = match descriptions.as_slice() {
        [] => "nothing".to_string(),
        [only] => only.clone(),
        [first, second] => format!("{first} or {second}"),
        [init @ .., last] => format!("{}, or {last}", init.join(", ")),
    };
    let found = match *found {
        Some(c) => format!("\"{}\"", escape(&c.to_string())),
        None => "end of input".to_string(),
    };
    format!("Expected {expected} but {found} found.")
}

fn escape(text: &str) -> String {
    text.chars().flat_map(char::escape_debug).collect()
}

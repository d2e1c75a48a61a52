use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::types::Value;

/// One unit of formatted output.
#[derive(Debug, Clone, PartialEq)]
pub enum FormatPart {
    /// Formatted text. A part sequence never holds two of these in a row.
    Literal(String),
    /// A caller value passed through unchanged.
    Object(Value),
}

impl FormatPart {
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            FormatPart::Literal(text) => Some(text),
            FormatPart::Object(_) => None,
        }
    }
}

impl Display for FormatPart {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            FormatPart::Literal(text) => f.write_str(text),
            FormatPart::Object(value) => write!(f, "{value}"),
        }
    }
}

/// Result of formatting a whole message.
///
/// Plain text when every part was text, otherwise the part list so the caller
/// can interleave its own objects.
#[derive(Debug, Clone, PartialEq)]
pub enum Formatted {
    Text(String),
    Parts(Vec<FormatPart>),
}

impl Formatted {
    /// Collapses a part list, keeping it only if it holds an object.
    pub fn from_parts(parts: Vec<FormatPart>) -> Self {
        if parts.iter().all(|part| matches!(part, FormatPart::Literal(_))) {
            Formatted::Text(parts.iter().map(ToString::to_string).collect())
        } else {
            Formatted::Parts(parts)
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Formatted::Text(text) => Some(text),
            Formatted::Parts(_) => None,
        }
    }
}

impl Display for Formatted {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Formatted::Text(text) => f.write_str(text),
            Formatted::Parts(parts) => parts.iter().try_for_each(|part| write!(f, "{part}")),
        }
    }
}

//! Public AST types for ICU messages.
//!
//! These types are public to enable external tooling (linters, printers,
//! precompiled message stores). They serialize with serde so a parsed message
//! can be stored as JSON and handed back to [`MessageFormat`] later.
//!
//! [`MessageFormat`]: crate::MessageFormat

use std::collections::BTreeSet;
use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

use crate::intl::{DateTimeFormatOptions, NumberFormatOptions};
use crate::skeleton::NumberSkeletonToken;

/// A point in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// Byte offset into the source string.
    pub offset: usize,
    /// 1-based line number.
    pub line: usize,
    /// 1-based column, counted in characters.
    pub column: usize,
}

/// A half-open source range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Display for Span {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}:{}", self.start.line, self.start.column)
    }
}

/// Whether a plural element selects on cardinal or ordinal categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PluralKind {
    /// `{n, plural, ...}`
    #[default]
    Cardinal,
    /// `{n, selectordinal, ...}`
    Ordinal,
}

/// The style of a number, date, or time element.
///
/// Either a name looked up in the configured [`Styles`] buckets, or a `::`
/// skeleton carrying its parsed options.
///
/// [`Styles`]: crate::Styles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Style<S> {
    Named(String),
    Skeleton(S),
}

/// A `::` number skeleton.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberSkeleton {
    pub tokens: Vec<NumberSkeletonToken>,
    /// Empty unless the message was parsed with `should_parse_skeleton`.
    #[serde(default)]
    pub parsed_options: NumberFormatOptions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Span>,
}

/// A `::` date/time skeleton.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateTimeSkeleton {
    pub pattern: String,
    /// Empty unless the message was parsed with `should_parse_skeleton`.
    #[serde(default)]
    pub parsed_options: DateTimeFormatOptions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Span>,
}

pub type NumberStyle = Style<NumberSkeleton>;
pub type DateTimeStyle = Style<DateTimeSkeleton>;

/// One branch of a plural or select element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectorOption {
    /// `=N`, a plural category, or an arbitrary select key.
    pub selector: String,
    pub value: Vec<MessageElement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Span>,
}

/// A single element of a parsed message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum MessageElement {
    /// Plain text with escapes already resolved.
    Literal {
        value: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        location: Option<Span>,
    },
    /// `{name}`
    Argument {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        location: Option<Span>,
    },
    /// `{name, number[, style]}`
    Number {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        style: Option<NumberStyle>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        location: Option<Span>,
    },
    /// `{name, date[, style]}`
    Date {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        style: Option<DateTimeStyle>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        location: Option<Span>,
    },
    /// `{name, time[, style]}`
    Time {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        style: Option<DateTimeStyle>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        location: Option<Span>,
    },
    /// `{name, plural|selectordinal, [offset:N] key{...} ...}`
    Plural {
        name: String,
        kind: PluralKind,
        #[serde(default)]
        offset: i64,
        options: Vec<SelectorOption>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        location: Option<Span>,
    },
    /// `{name, select, key{...} ...}`
    Select {
        name: String,
        options: Vec<SelectorOption>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        location: Option<Span>,
    },
    /// `<name>children</name>`
    Tag {
        name: String,
        children: Vec<MessageElement>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        location: Option<Span>,
    },
    /// `#` inside a plural branch.
    Pound {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        location: Option<Span>,
    },
}

impl MessageElement {
    /// Creates a literal element without location.
    pub fn literal(value: impl Into<String>) -> Self {
        MessageElement::Literal {
            value: value.into(),
            location: None,
        }
    }

    /// Creates an argument element without location.
    pub fn argument(name: impl Into<String>) -> Self {
        MessageElement::Argument {
            name: name.into(),
            location: None,
        }
    }

    /// Source span of this element, when the parser captured locations.
    pub fn location(&self) -> Option<&Span> {
        match self {
            MessageElement::Literal { location, .. }
            | MessageElement::Argument { location, .. }
            | MessageElement::Number { location, .. }
            | MessageElement::Date { location, .. }
            | MessageElement::Time { location, .. }
            | MessageElement::Plural { location, .. }
            | MessageElement::Select { location, .. }
            | MessageElement::Tag { location, .. }
            | MessageElement::Pound { location } => location.as_ref(),
        }
    }

    /// The argument name this element reads, if any.
    pub fn argument_name(&self) -> Option<&str> {
        match self {
            MessageElement::Argument { name, .. }
            | MessageElement::Number { name, .. }
            | MessageElement::Date { name, .. }
            | MessageElement::Time { name, .. }
            | MessageElement::Plural { name, .. }
            | MessageElement::Select { name, .. }
            | MessageElement::Tag { name, .. } => Some(name),
            MessageElement::Literal { .. } | MessageElement::Pound { .. } => None,
        }
    }
}

/// Every argument name read anywhere in `elements`, including inside
/// branches and tag children.
///
/// ```
/// use icumsg::{ParseOptions, parse};
/// use icumsg::parser::argument_names;
///
/// let ast = parse("<b>{n, plural, other{# by {author}}}</b>", &ParseOptions::default()).unwrap();
/// let names: Vec<&str> = argument_names(&ast).into_iter().collect();
/// assert_eq!(names, ["author", "b", "n"]);
/// ```
pub fn argument_names(elements: &[MessageElement]) -> BTreeSet<&str> {
    let mut names = BTreeSet::new();
    collect_argument_names(elements, &mut names);
    names
}

fn collect_argument_names<'a>(elements: &'a [MessageElement], names: &mut BTreeSet<&'a str>) {
    for element in elements {
        names.extend(element.argument_name());
        match element {
            MessageElement::Plural { options, .. } | MessageElement::Select { options, .. } => {
                for option in options {
                    collect_argument_names(&option.value, names);
                }
            }
            MessageElement::Tag { children, .. } => collect_argument_names(children, names),
            MessageElement::Literal { .. }
            | MessageElement::Argument { .. }
            | MessageElement::Number { .. }
            | MessageElement::Date { .. }
            | MessageElement::Time { .. }
            | MessageElement::Pound { .. } => {}
        }
    }
}

/// Finds the branch with the given selector key.
pub fn find_option<'a>(options: &'a [SelectorOption], selector: &str) -> Option<&'a SelectorOption> {
    options.iter().find(|option| option.selector == selector)
}

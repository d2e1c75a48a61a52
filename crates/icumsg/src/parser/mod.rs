//! ICU message parser.
//!
//! Turns message text into a sequence of [`MessageElement`]s. The AST is
//! public so tooling can inspect it, store it as JSON, or print it back with
//! [`print_ast`](crate::print_ast).

pub mod ast;
mod chars;
pub mod error;
mod grammar;
mod hashtag;

use bon::Builder;
use serde::{Deserialize, Serialize};

pub use ast::*;
pub use error::{Expectation, ParseError};
pub use hashtag::{normalize_hashtag_in_plural, normalize_hashtag_in_plural_mut};

use crate::parser::grammar::Parser;

/// Options controlling how message text is parsed.
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParseOptions {
    /// Treat `<` as plain text and never parse tags.
    #[builder(default)]
    pub ignore_tag: bool,
    /// Attach a source [`Span`] to every element.
    #[builder(default)]
    pub capture_location: bool,
    /// Resolve `::` skeletons into formatter options while parsing.
    #[builder(default = true)]
    pub should_parse_skeleton: bool,
    /// Rewrite `#` left in plural and select literals into number elements.
    #[builder(default = true)]
    pub normalize_hashtag_in_plural: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions::builder().build()
    }
}

/// Parse message text into an AST.
///
/// # Example
///
/// ```
/// use icumsg::{MessageElement, ParseOptions, parse};
///
/// let ast = parse("Hello, {name}!", &ParseOptions::default()).unwrap();
/// assert_eq!(ast.len(), 3);
/// assert_eq!(ast[1], MessageElement::argument("name"));
/// ```
pub fn parse(input: &str, options: &ParseOptions) -> Result<Vec<MessageElement>, ParseError> {
    let mut elements = Parser::new(input, options).parse()?;
    if options.normalize_hashtag_in_plural {
        normalize_hashtag_in_plural_mut(&mut elements);
    }
    Ok(elements)
}

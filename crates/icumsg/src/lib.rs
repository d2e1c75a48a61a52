//! ICU MessageFormat parsing and formatting.
//!
//! Messages are parsed into an AST of [`MessageElement`]s, then evaluated
//! against a map of argument [`Value`]s for a locale.
//!
//! ```
//! use icumsg::{MessageFormat, values};
//!
//! let message = MessageFormat::new(
//!     "{gender, select, female{She} male{He} other{They}} liked {count, plural, one{# photo} other{# photos}}.",
//!     "en",
//! )
//! .unwrap();
//! let text = message.format(&values! { "gender" => "female", "count" => 2 }).unwrap();
//! assert_eq!(text.to_string(), "She liked 2 photos.");
//! ```

pub mod catalog;
pub mod interpreter;
pub mod intl;
pub mod message;
pub mod parser;
pub mod printer;
pub mod skeleton;
pub mod types;

pub use catalog::{Catalog, primary_language};
pub use interpreter::{
    BuildError, CacheStore, CatalogError, EvalContext, FormatError, FormatterCache, LoadError,
    LruStore, Styles, UnboundedStore, compute_suggestions, format_to_parts,
};
pub use intl::{BasicIntl, IntlProvider, NoPluralRules, PluralCategory};
pub use message::{FormatOptions, MessageFormat, MessageSource};
pub use parser::{
    Expectation, MessageElement, ParseError, ParseOptions, PluralKind, Span, Style,
    normalize_hashtag_in_plural, parse,
};
pub use printer::print_ast;
pub use skeleton::SkeletonError;
pub use types::{FormatPart, Formatted, Opaque, TagFn, Value};

/// Creates a `HashMap<String, Value>` from key-value pairs.
///
/// Values are converted via `Into<Value>`, so integers, floats, strings,
/// dates, and [`Value`]s can be passed directly.
///
/// # Example
///
/// ```
/// use icumsg::{values, Value};
///
/// let v = values! { "count" => 3, "name" => "Alice" };
/// assert_eq!(v.len(), 2);
/// assert_eq!(v["count"].as_number(), Some(3));
/// assert_eq!(v["name"].as_string(), Some("Alice"));
/// ```
#[macro_export]
macro_rules! values {
    {} => {
        ::std::collections::HashMap::<String, $crate::Value>::new()
    };
    { $($key:expr => $value:expr),+ $(,)? } => {
        {
            let mut map = ::std::collections::HashMap::<String, $crate::Value>::new();
            $(
                map.insert($key.to_string(), ::std::convert::Into::<$crate::Value>::into($value));
            )+
            map
        }
    };
}

//! The message facade.
//!
//! [`MessageFormat`] ties a parsed message to a locale, a set of named
//! styles, and a formatter cache, and exposes `format`/`format_to_parts`.

use std::collections::HashMap;
use std::sync::Arc;

use bon::Builder;
use icu_locale_core::Locale;
use serde_json::Value as JsonValue;

use crate::interpreter::{
    BuildError, EvalContext, FormatError, FormatterCache, Styles, format_to_parts,
};
use crate::intl::IntlProvider;
use crate::parser::{MessageElement, ParseOptions, parse};
use crate::types::{FormatPart, Formatted, Value};

/// Either message text or an already-parsed AST.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageSource {
    Text(String),
    Ast(Vec<MessageElement>),
}

impl From<&str> for MessageSource {
    fn from(text: &str) -> Self {
        MessageSource::Text(text.to_string())
    }
}

impl From<String> for MessageSource {
    fn from(text: String) -> Self {
        MessageSource::Text(text)
    }
}

impl From<Vec<MessageElement>> for MessageSource {
    fn from(ast: Vec<MessageElement>) -> Self {
        MessageSource::Ast(ast)
    }
}

/// Construction options for [`MessageFormat`].
///
/// # Example
///
/// ```
/// use icumsg::{FormatOptions, ParseOptions, Styles};
///
/// let options = FormatOptions::builder()
///     .parse(ParseOptions::builder().ignore_tag(true).build())
///     .build();
/// assert_eq!(options.styles, Styles::empty());
/// ```
#[derive(Clone, Builder)]
pub struct FormatOptions {
    /// Overrides merged on top of [`Styles::default`].
    #[builder(default = Styles::empty())]
    pub styles: Styles,

    #[builder(default)]
    pub parse: ParseOptions,

    /// Share an existing cache instead of creating one per message.
    pub cache: Option<Arc<FormatterCache>>,

    /// Provider for a freshly created cache. Ignored when `cache` is set.
    pub provider: Option<Arc<dyn IntlProvider>>,
}

impl Default for FormatOptions {
    fn default() -> Self {
        FormatOptions::builder().build()
    }
}

impl FormatOptions {
    /// The configured cache, or a new one over the configured provider.
    pub fn resolve_cache(&self) -> Arc<FormatterCache> {
        match (&self.cache, &self.provider) {
            (Some(cache), _) => Arc::clone(cache),
            (None, Some(provider)) => Arc::new(FormatterCache::with_provider(Arc::clone(provider))),
            (None, None) => Arc::new(FormatterCache::new()),
        }
    }
}

/// A compiled message bound to a locale.
///
/// # Example
///
/// ```
/// use icumsg::{MessageFormat, values};
///
/// let message = MessageFormat::new("{n, plural, one{# item} other{# items}}", "en").unwrap();
/// let text = message.format(&values! { "n" => 3 }).unwrap();
/// assert_eq!(text.to_string(), "3 items");
/// ```
#[derive(Debug, Clone)]
pub struct MessageFormat {
    ast: Vec<MessageElement>,
    locale: String,
    styles: Styles,
    cache: Arc<FormatterCache>,
}

impl MessageFormat {
    /// Compile a message with default options.
    pub fn new(
        message: impl Into<MessageSource>,
        locale: impl AsRef<str>,
    ) -> Result<Self, BuildError> {
        MessageFormat::with_options(message, locale, &FormatOptions::default())
    }

    /// Compile a message, parsing text sources with `options.parse`.
    ///
    /// A pre-built AST is used as given.
    pub fn with_options(
        message: impl Into<MessageSource>,
        locale: impl AsRef<str>,
        options: &FormatOptions,
    ) -> Result<Self, BuildError> {
        let ast = match message.into() {
            MessageSource::Text(text) => parse(&text, &options.parse)?,
            MessageSource::Ast(ast) => ast,
        };
        Ok(MessageFormat {
            ast,
            locale: resolve_locale(locale.as_ref()),
            styles: Styles::default().merged(&options.styles),
            cache: options.resolve_cache(),
        })
    }

    /// Compile a message from JSON: a string is parsed, an array is read as
    /// a serialized AST.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::InvalidMessage`] for any other JSON type.
    pub fn from_json(
        message: JsonValue,
        locale: impl AsRef<str>,
        options: &FormatOptions,
    ) -> Result<Self, BuildError> {
        let source = match message {
            JsonValue::String(text) => MessageSource::Text(text),
            array @ JsonValue::Array(_) => {
                MessageSource::Ast(serde_json::from_value(array).map_err(BuildError::InvalidAst)?)
            }
            other => {
                return Err(BuildError::InvalidMessage {
                    found: json_kind(&other),
                });
            }
        };
        MessageFormat::with_options(source, locale, options)
    }

    /// Format to text, or to parts if any value passed through as an object.
    pub fn format(&self, values: &HashMap<String, Value>) -> Result<Formatted, FormatError> {
        self.format_to_parts(values).map(Formatted::from_parts)
    }

    /// Format to an ordered part list with adjacent text merged.
    pub fn format_to_parts(
        &self,
        values: &HashMap<String, Value>,
    ) -> Result<Vec<FormatPart>, FormatError> {
        let ctx = EvalContext::new(&self.locale, &self.cache, &self.styles, values);
        format_to_parts(&self.ast, &ctx, None)
    }

    pub fn ast(&self) -> &[MessageElement] {
        &self.ast
    }

    /// The canonical form of the locale this message formats for.
    pub fn resolved_locale(&self) -> &str {
        &self.locale
    }

    /// Built-in styles with this message's overrides applied.
    pub fn styles(&self) -> &Styles {
        &self.styles
    }

    pub fn cache(&self) -> &Arc<FormatterCache> {
        &self.cache
    }
}

/// Canonicalizes a BCP-47 tag, keeping unparsable input as written.
fn resolve_locale(locale: &str) -> String {
    match Locale::try_from_str(locale) {
        Ok(parsed) => parsed.to_string(),
        Err(err) => {
            tracing::warn!(%locale, %err, "unparsable locale, using it as written");
            locale.to_string()
        }
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locale_is_canonicalized() {
        assert_eq!(resolve_locale("EN-us"), "en-US");
        assert_eq!(resolve_locale("not a locale!"), "not a locale!");
    }

    #[test]
    fn json_numbers_are_rejected() {
        let err = MessageFormat::from_json(JsonValue::from(3), "en", &FormatOptions::default())
            .unwrap_err();
        assert!(matches!(err, BuildError::InvalidMessage { found: "number" }));
    }
}

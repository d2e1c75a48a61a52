//! Per-locale message dictionaries.
//!
//! A [`Catalog`] owns the messages of every loaded locale, tracks the current
//! and fallback locale, and compiles each message once per locale. All
//! compiled messages share one [`FormatterCache`].

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use bon::bon;
use serde_json::{Map, Value as JsonValue};

use crate::interpreter::{CatalogError, FormatterCache, LoadError, compute_suggestions};
use crate::message::{FormatOptions, MessageFormat};
use crate::types::{Formatted, Value};

/// Messages for several locales with fallback lookup.
///
/// # Example
///
/// ```
/// use icumsg::{Catalog, values};
///
/// let mut catalog = Catalog::builder()
///     .fallback_locale("en")
///     .initial_locale("fr-CA")
///     .build();
/// catalog.add_messages_str("en", r#"{ "inbox": { "count": "{n, plural, one{# message} other{# messages}}" } }"#).unwrap();
/// catalog.add_messages_str("fr", r#"{ "greeting": "Bonjour {name}" }"#).unwrap();
///
/// assert_eq!(catalog.locale(), "fr");
/// assert_eq!(catalog.format("greeting", &values! { "name" => "Ada" }), "Bonjour Ada");
/// // Missing in French, found in the fallback locale
/// assert_eq!(catalog.format("inbox.count", &values! { "n" => 2 }), "2 messages");
/// ```
pub struct Catalog {
    locale: String,
    fallback_locale: String,
    format_options: FormatOptions,

    /// Per-locale dictionaries, id -> message text.
    dictionaries: HashMap<String, BTreeMap<String, String>>,

    /// File paths for reload support. Only file-loaded locales appear here.
    loaded_paths: HashMap<String, PathBuf>,

    /// Compiled messages keyed by (locale, id).
    compiled: Mutex<HashMap<(String, String), Arc<MessageFormat>>>,
}

#[bon]
impl Catalog {
    /// Create a catalog.
    ///
    /// The initial locale is reduced to its primary language subtag
    /// (`"fr-CA"` becomes `"fr"`) and defaults to the fallback locale.
    #[builder]
    pub fn new(
        #[builder(into, default = "en".to_string())] fallback_locale: String,
        #[builder(into)] initial_locale: Option<String>,
        #[builder(default)] format_options: FormatOptions,
    ) -> Self {
        let locale = primary_language(initial_locale.as_deref().unwrap_or(&fallback_locale));
        let format_options = FormatOptions {
            cache: Some(format_options.resolve_cache()),
            ..format_options
        };
        Catalog {
            locale,
            fallback_locale,
            format_options,
            dictionaries: HashMap::new(),
            loaded_paths: HashMap::new(),
            compiled: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::builder().build()
    }
}

impl Catalog {
    // =========================================================================
    // Locale Management
    // =========================================================================

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Change the current locale. Messages need not be loaded yet.
    pub fn set_locale(&mut self, locale: impl Into<String>) {
        self.locale = locale.into();
    }

    pub fn fallback_locale(&self) -> &str {
        &self.fallback_locale
    }

    /// Locales with at least one registered dictionary, sorted.
    pub fn locales(&self) -> Vec<&str> {
        let mut locales: Vec<&str> = self.dictionaries.keys().map(String::as_str).collect();
        locales.sort_unstable();
        locales
    }

    /// Message ids registered for `locale`, sorted.
    pub fn ids(&self, locale: &str) -> Vec<&str> {
        self.dictionaries
            .get(locale)
            .map(|dictionary| dictionary.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// `(id, text)` pairs registered for `locale`, sorted by id.
    pub fn entries(&self, locale: &str) -> Vec<(&str, &str)> {
        self.dictionaries
            .get(locale)
            .map(|dictionary| {
                dictionary
                    .iter()
                    .map(|(id, text)| (id.as_str(), text.as_str()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The formatter cache shared by every message in this catalog.
    pub fn cache(&self) -> Option<&Arc<FormatterCache>> {
        self.format_options.cache.as_ref()
    }

    // =========================================================================
    // Message Loading
    // =========================================================================

    /// Merge messages from a JSON object into `locale`'s dictionary.
    ///
    /// Nested objects flatten to dotted ids: `{"a": {"b": "x"}}` registers
    /// `a.b`. Existing ids are overwritten. Returns the number of messages
    /// read.
    pub fn add_messages_str(&mut self, locale: &str, json: &str) -> Result<usize, LoadError> {
        let messages = read_dictionary(locale, json)?;
        let count = messages.len();
        self.forget_compiled(locale);
        self.dictionaries
            .entry(locale.to_string())
            .or_default()
            .extend(messages);
        Ok(count)
    }

    /// Load a JSON messages file, replacing everything registered for
    /// `locale`.
    ///
    /// The path is remembered for [`Catalog::reload`].
    pub fn load_file(&mut self, locale: &str, path: impl AsRef<Path>) -> Result<usize, LoadError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let messages = read_dictionary(locale, &content)?;
        let count = messages.len();
        self.forget_compiled(locale);
        self.dictionaries.insert(locale.to_string(), messages);
        self.loaded_paths
            .insert(locale.to_string(), path.to_path_buf());
        tracing::debug!(%locale, path = %path.display(), count, "loaded messages");
        Ok(count)
    }

    /// Re-read `locale` from the file it was loaded from.
    pub fn reload(&mut self, locale: &str) -> Result<usize, LoadError> {
        let path = self
            .loaded_paths
            .get(locale)
            .cloned()
            .ok_or_else(|| LoadError::NoPathForReload {
                locale: locale.to_string(),
            })?;
        self.load_file(locale, path)
    }

    fn forget_compiled(&self, locale: &str) {
        self.compiled
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|(compiled_locale, _), _| compiled_locale != locale);
    }

    // =========================================================================
    // Formatting
    // =========================================================================

    /// The locale and raw text of `id`, trying the current locale and then
    /// the fallback locale.
    pub fn message(&self, id: &str) -> Option<(&str, &str)> {
        [self.locale.as_str(), self.fallback_locale.as_str()]
            .into_iter()
            .find_map(|locale| {
                let text = self.dictionaries.get(locale)?.get(id)?;
                Some((locale, text.as_str()))
            })
    }

    /// Format `id`, reporting every failure.
    pub fn try_format(
        &self,
        id: &str,
        values: &HashMap<String, Value>,
    ) -> Result<Formatted, CatalogError> {
        let (locale, _) = self.message(id).ok_or_else(|| CatalogError::MissingMessage {
            id: id.to_string(),
            locale: self.locale.clone(),
            suggestions: self.suggest_ids(id),
        })?;
        let message = self.compiled_message(locale, id)?;
        message
            .format(values)
            .map_err(|source| CatalogError::Format {
                id: id.to_string(),
                locale: locale.to_string(),
                source,
            })
    }

    /// Format `id` for display, never failing.
    ///
    /// Failures are logged. A message that fails to compile or format
    /// yields its raw text, and an unknown id yields the id itself.
    pub fn format(&self, id: &str, values: &HashMap<String, Value>) -> String {
        match self.try_format(id, values) {
            Ok(formatted) => formatted.to_string(),
            Err(err) => {
                tracing::warn!(%id, locale = %self.locale, %err, "failed to format message");
                match self.message(id) {
                    Some((_, text)) => text.to_string(),
                    None => id.to_string(),
                }
            }
        }
    }

    fn compiled_message(&self, locale: &str, id: &str) -> Result<Arc<MessageFormat>, CatalogError> {
        let key = (locale.to_string(), id.to_string());
        if let Some(message) = self
            .compiled
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            return Ok(Arc::clone(message));
        }

        let text = self
            .dictionaries
            .get(locale)
            .and_then(|dictionary| dictionary.get(id))
            .map(String::as_str)
            .unwrap_or_default();
        let message = MessageFormat::with_options(text, locale, &self.format_options)
            .map(Arc::new)
            .map_err(|source| CatalogError::Build {
                id: id.to_string(),
                locale: locale.to_string(),
                source,
            })?;
        self.compiled
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, Arc::clone(&message));
        Ok(message)
    }

    fn suggest_ids(&self, id: &str) -> Vec<String> {
        let known: Vec<String> = [self.locale.as_str(), self.fallback_locale.as_str()]
            .into_iter()
            .filter_map(|locale| self.dictionaries.get(locale))
            .flat_map(BTreeMap::keys)
            .cloned()
            .collect();
        let mut suggestions = compute_suggestions(id, known.iter());
        suggestions.dedup();
        suggestions
    }
}

/// The primary language subtag of a locale tag, lowercased.
///
/// ```
/// assert_eq!(icumsg::primary_language("fr-CA"), "fr");
/// assert_eq!(icumsg::primary_language("pt_BR"), "pt");
/// ```
pub fn primary_language(locale: &str) -> String {
    locale
        .split(['-', '_'])
        .next()
        .unwrap_or(locale)
        .to_ascii_lowercase()
}

fn read_dictionary(locale: &str, json: &str) -> Result<BTreeMap<String, String>, LoadError> {
    let root: JsonValue = serde_json::from_str(json).map_err(|source| LoadError::Json {
        locale: locale.to_string(),
        source,
    })?;
    let entries = match root {
        JsonValue::Object(entries) => entries,
        other => {
            return Err(LoadError::InvalidEntry {
                locale: locale.to_string(),
                key: String::new(),
                found: json_kind(&other),
            });
        }
    };
    let mut messages = BTreeMap::new();
    flatten_into(locale, "", entries, &mut messages)?;
    Ok(messages)
}

fn flatten_into(
    locale: &str,
    prefix: &str,
    entries: Map<String, JsonValue>,
    messages: &mut BTreeMap<String, String>,
) -> Result<(), LoadError> {
    for (key, value) in entries {
        let id = if prefix.is_empty() {
            key
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            JsonValue::String(text) => {
                messages.insert(id, text);
            }
            JsonValue::Object(nested) => flatten_into(locale, &id, nested, messages)?,
            other => {
                return Err(LoadError::InvalidEntry {
                    locale: locale.to_string(),
                    key: id,
                    found: json_kind(&other),
                });
            }
        }
    }
    Ok(())
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

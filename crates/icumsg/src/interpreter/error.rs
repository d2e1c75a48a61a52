//! Error types for message formatting and catalog loading.

use std::io;
use std::path::PathBuf;

use strsim::levenshtein;
use thiserror::Error;

use crate::parser::ParseError;

/// Errors that occur when loading catalog messages.
#[derive(Debug, Error)]
pub enum LoadError {
    /// File I/O error when reading a messages file.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The messages are not valid JSON.
    #[error("invalid JSON for locale '{locale}': {source}")]
    Json {
        locale: String,
        #[source]
        source: serde_json::Error,
    },

    /// A dictionary entry is neither a message string nor a nested object.
    #[error("entry '{key}' for locale '{locale}' must be a string or object, found {found}")]
    InvalidEntry {
        locale: String,
        key: String,
        found: &'static str,
    },

    /// Attempted to reload messages that were registered from a string.
    #[error("cannot reload '{locale}': was loaded from string, not file")]
    NoPathForReload { locale: String },
}

/// Errors that occur when building a [`MessageFormat`](crate::MessageFormat).
#[derive(Debug, Error)]
pub enum BuildError {
    /// The message text is not valid ICU message syntax.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A JSON message source is neither a string nor an element array.
    #[error("a message must be a string or an array of elements, found {found}")]
    InvalidMessage { found: &'static str },

    /// A JSON element array does not describe a valid AST.
    #[error("invalid message AST: {0}")]
    InvalidAst(#[source] serde_json::Error),
}

/// Errors from [`Catalog::try_format`](crate::Catalog::try_format).
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No loaded locale has a message with this id.
    #[error("no message \"{id}\" in locale '{locale}'{}", did_you_mean(.suggestions))]
    MissingMessage {
        id: String,
        locale: String,
        suggestions: Vec<String>,
    },

    #[error("message \"{id}\" in locale '{locale}': {source}")]
    Build {
        id: String,
        locale: String,
        #[source]
        source: BuildError,
    },

    #[error("message \"{id}\" in locale '{locale}': {source}")]
    Format {
        id: String,
        locale: String,
        #[source]
        source: FormatError,
    },
}

/// An error that occurred while formatting a parsed message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The message references an argument the caller did not provide.
    #[error("missing value for argument \"{name}\"{}", did_you_mean(.suggestions))]
    MissingValue {
        name: String,
        suggestions: Vec<String>,
    },

    /// The provided value has the wrong type for its element.
    #[error("value for \"{name}\" must be of type {expected}, found {found}")]
    InvalidValueType {
        name: String,
        expected: &'static str,
        found: &'static str,
    },

    /// A plural or select value matched no branch and there is no `other`.
    #[error("invalid value for \"{name}\": \"{value}\", options are \"{}\"", .options.join("\", \""))]
    InvalidValue {
        name: String,
        value: String,
        options: Vec<String>,
    },

    /// The locale provider lacks a primitive the message needs.
    #[error("{capability} is not available from the locale provider")]
    MissingCapability { capability: &'static str },
}

fn did_you_mean(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(", did you mean: {}?", suggestions.join(", "))
    }
}

/// Names within a small edit distance of `name`, closest first, at most 3.
///
/// Short names (3 characters or fewer) allow distance 1; longer names allow
/// distance 2.
pub fn compute_suggestions<'a>(name: &str, available: impl Iterator<Item = &'a String>) -> Vec<String> {
    let max_distance = if name.len() <= 3 { 1 } else { 2 };
    let mut suggestions: Vec<(usize, String)> = available
        .filter_map(|candidate| {
            let dist = levenshtein(name, candidate);
            if dist <= max_distance && dist > 0 {
                Some((dist, candidate.clone()))
            } else {
                None
            }
        })
        .collect();

    suggestions.sort();
    suggestions.into_iter().take(3).map(|(_, s)| s).collect()
}

//! Evaluation context carried through recursive formatting.

use std::collections::HashMap;

use crate::interpreter::cache::FormatterCache;
use crate::interpreter::error::{FormatError, compute_suggestions};
use crate::interpreter::styles::Styles;
use crate::types::Value;

/// Everything an evaluation reads besides the AST itself.
///
/// The context is immutable; the ambient plural value for `#` is passed
/// alongside it because it changes at each nested plural.
#[derive(Debug, Clone, Copy)]
pub struct EvalContext<'a> {
    pub locale: &'a str,
    pub cache: &'a FormatterCache,
    pub styles: &'a Styles,
    pub values: &'a HashMap<String, Value>,
}

impl<'a> EvalContext<'a> {
    pub fn new(
        locale: &'a str,
        cache: &'a FormatterCache,
        styles: &'a Styles,
        values: &'a HashMap<String, Value>,
    ) -> Self {
        EvalContext {
            locale,
            cache,
            styles,
            values,
        }
    }

    /// Look up an argument value, suggesting near-miss names when absent.
    pub fn value(&self, name: &str) -> Result<&'a Value, FormatError> {
        self.values.get(name).ok_or_else(|| FormatError::MissingValue {
            name: name.to_string(),
            suggestions: compute_suggestions(name, self.values.keys()),
        })
    }
}

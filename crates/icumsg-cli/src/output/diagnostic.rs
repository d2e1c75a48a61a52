//! Miette diagnostic wrapper for message parse errors.

use icumsg::ParseError;
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// A miette-compatible diagnostic for message parse errors.
///
/// Note: Fields are read by miette derive macros, not directly by code.
#[derive(Debug, Error, Diagnostic)]
#[error("syntax error: {message}")]
#[diagnostic(code(icumsg::syntax))]
pub struct MessageDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("error here")]
    span: SourceSpan,

    message: String,

    #[help]
    help: Option<String>,
}

impl MessageDiagnostic {
    /// Create a diagnostic from a ParseError over the message text it came
    /// from. `name` labels the source, e.g. `en.json#greeting`.
    pub fn from_parse_error(name: &str, content: &str, err: &ParseError) -> Self {
        let location = err.location();

        // Clamp offsets to content length to avoid a miette panic
        let start = location.start.offset.min(content.len());
        let end = location.end.offset.clamp(start, content.len());

        let help = match err {
            ParseError::DuplicateOption { id, .. } => {
                Some(format!("remove or rename one of the \"{id}\" branches"))
            }
            ParseError::MismatchedTag { open, .. } => Some(format!("close the tag with </{open}>")),
            ParseError::InvalidSkeleton { .. } => {
                Some("see the ICU number and date skeleton documentation".to_string())
            }
            ParseError::Expected { .. } | ParseError::InvalidOffset { .. } => None,
        };

        MessageDiagnostic {
            src: NamedSource::new(name, content.to_string()),
            span: (start, end - start).into(),
            message: err.to_string(),
            help,
        }
    }
}

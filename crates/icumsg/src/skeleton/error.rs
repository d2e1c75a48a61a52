//! Skeleton error types.

use thiserror::Error;

/// A number or date/time skeleton that cannot be turned into options.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkeletonError {
    #[error("number skeleton cannot be empty")]
    EmptyNumberSkeleton,

    #[error("date/time skeleton cannot be empty")]
    EmptyDateTimeSkeleton,

    /// A token with an empty stem or an empty `/` option.
    #[error("invalid number skeleton")]
    InvalidNumberSkeleton,

    #[error("`{stem}` only accepts a single option")]
    MultipleOptions { stem: String },

    /// `integer-width` forms that bound the digit count from above.
    #[error("we currently do not support {what} integer digits")]
    UnsupportedIntegerWidth { what: &'static str },

    #[error("malformed concise scientific notation `{stem}`")]
    MalformedConciseNotation { stem: String },

    #[error("`{letters}`: {message}")]
    UnsupportedDateField {
        letters: String,
        message: &'static str,
    },
}

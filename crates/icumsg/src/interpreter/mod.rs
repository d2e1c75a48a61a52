//! Message evaluation.
//!
//! This module provides the engine that takes a parsed message and a set of
//! argument values and produces formatted output. Locale primitives come
//! from a [`FormatterCache`], and named styles from [`Styles`].

mod cache;
mod context;
mod error;
mod evaluator;
mod styles;

pub use cache::{CacheStore, FormatterCache, LruStore, UnboundedStore};
pub use context::EvalContext;
pub use error::{BuildError, CatalogError, FormatError, LoadError, compute_suggestions};
pub use evaluator::format_to_parts;
pub use styles::Styles;

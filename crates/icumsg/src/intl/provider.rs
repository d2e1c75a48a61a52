//! Locale capabilities consumed by the evaluator.
//!
//! The engine never classifies plural categories or renders digits itself; it
//! asks an [`IntlProvider`] for formatter handles and caches them. Hosts plug
//! in their own provider to use a different locale backend.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::sync::Arc;

use time::OffsetDateTime;

use crate::intl::options::{DateTimeFormatOptions, NumberFormatOptions, PluralRulesOptions};

/// CLDR plural category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluralCategory {
    Zero,
    One,
    Two,
    Few,
    Many,
    Other,
}

impl PluralCategory {
    /// The selector key used for this category in plural branches.
    pub fn as_str(self) -> &'static str {
        match self {
            PluralCategory::Zero => "zero",
            PluralCategory::One => "one",
            PluralCategory::Two => "two",
            PluralCategory::Few => "few",
            PluralCategory::Many => "many",
            PluralCategory::Other => "other",
        }
    }
}

impl Display for PluralCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// A constructed number formatter.
pub trait NumberFormat: Send + Sync {
    fn format(&self, value: f64) -> String;
}

/// A constructed date/time formatter.
pub trait DateTimeFormat: Send + Sync {
    fn format(&self, value: OffsetDateTime) -> String;
}

/// A constructed plural-category selector.
pub trait PluralSelector: Send + Sync {
    fn select(&self, value: f64) -> PluralCategory;
}

/// Factory for locale formatters.
///
/// Each method corresponds to one formatter constructor taking
/// `(locale, options)`. Returning `None` from [`IntlProvider::plural_rules`]
/// reports that plural-category selection is unavailable, which surfaces as
/// [`FormatError::MissingCapability`] when a message needs it.
///
/// [`FormatError::MissingCapability`]: crate::FormatError::MissingCapability
pub trait IntlProvider: Send + Sync {
    fn number_format(&self, locale: &str, options: &NumberFormatOptions) -> Arc<dyn NumberFormat>;

    fn date_time_format(
        &self,
        locale: &str,
        options: &DateTimeFormatOptions,
    ) -> Arc<dyn DateTimeFormat>;

    fn plural_rules(
        &self,
        locale: &str,
        options: &PluralRulesOptions,
    ) -> Option<Arc<dyn PluralSelector>>;
}

/// Wraps a provider and withholds its plural-rule capability.
///
/// Models a host without plural rules; messages that only use exact `=N`
/// branches still format.
pub struct NoPluralRules<P>(pub P);

impl<P: IntlProvider> IntlProvider for NoPluralRules<P> {
    fn number_format(&self, locale: &str, options: &NumberFormatOptions) -> Arc<dyn NumberFormat> {
        self.0.number_format(locale, options)
    }

    fn date_time_format(
        &self,
        locale: &str,
        options: &DateTimeFormatOptions,
    ) -> Arc<dyn DateTimeFormat> {
        self.0.date_time_format(locale, options)
    }

    fn plural_rules(
        &self,
        _locale: &str,
        _options: &PluralRulesOptions,
    ) -> Option<Arc<dyn PluralSelector>> {
        None
    }
}

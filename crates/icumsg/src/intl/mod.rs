//! Locale formatting capabilities.
//!
//! Option records, the provider trait the evaluator consumes, and the
//! built-in [`BasicIntl`] implementation.

mod basic;
mod datetime;
mod number;
mod options;
mod plural;
mod provider;

pub use basic::BasicIntl;
pub use datetime::BasicDateTimeFormat;
pub use number::BasicNumberFormat;
pub use options::{
    CompactDisplay, CurrencyDisplay, CurrencySign, DateTimeFormatOptions, HourCycle, Notation,
    NumberFormatOptions, NumberStyleKind, PluralRulesOptions, SignDisplay, TrailingZeroDisplay,
    UnitDisplay, Width,
};
pub use plural::IcuPluralSelector;
pub use provider::{
    DateTimeFormat, IntlProvider, NoPluralRules, NumberFormat, PluralCategory, PluralSelector,
};

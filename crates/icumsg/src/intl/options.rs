//! Option records handed to the locale formatter factories.
//!
//! Field names and value spellings follow the ECMA-402 option bags so that
//! style definitions read the same in JSON configuration as they do in a
//! browser. Every field is optional; an unset field means "use the
//! formatter's default".

use serde::{Deserialize, Serialize};

use crate::parser::PluralKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NumberStyleKind {
    Decimal,
    Percent,
    Currency,
    Unit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CurrencyDisplay {
    Symbol,
    NarrowSymbol,
    Code,
    Name,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CurrencySign {
    Standard,
    Accounting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UnitDisplay {
    Short,
    Narrow,
    Long,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Notation {
    Standard,
    Scientific,
    Engineering,
    Compact,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CompactDisplay {
    Short,
    Long,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SignDisplay {
    Auto,
    Always,
    Never,
    ExceptZero,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TrailingZeroDisplay {
    Auto,
    StripIfInteger,
}

/// Options for a number formatter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberFormatOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<NumberStyleKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency_display: Option<CurrencyDisplay>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency_sign: Option<CurrencySign>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_display: Option<UnitDisplay>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_grouping: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_integer_digits: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_fraction_digits: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum_fraction_digits: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_significant_digits: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum_significant_digits: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notation: Option<Notation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compact_display: Option<CompactDisplay>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sign_display: Option<SignDisplay>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trailing_zero_display: Option<TrailingZeroDisplay>,
    /// Multiplier applied to the value before formatting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
}

impl NumberFormatOptions {
    /// Field-wise merge: every field set on `other` replaces the one on `self`.
    pub fn merged(&self, other: &NumberFormatOptions) -> NumberFormatOptions {
        NumberFormatOptions {
            style: other.style.or(self.style),
            currency: other.currency.clone().or_else(|| self.currency.clone()),
            currency_display: other.currency_display.or(self.currency_display),
            currency_sign: other.currency_sign.or(self.currency_sign),
            unit: other.unit.clone().or_else(|| self.unit.clone()),
            unit_display: other.unit_display.or(self.unit_display),
            use_grouping: other.use_grouping.or(self.use_grouping),
            minimum_integer_digits: other.minimum_integer_digits.or(self.minimum_integer_digits),
            minimum_fraction_digits: other
                .minimum_fraction_digits
                .or(self.minimum_fraction_digits),
            maximum_fraction_digits: other
                .maximum_fraction_digits
                .or(self.maximum_fraction_digits),
            minimum_significant_digits: other
                .minimum_significant_digits
                .or(self.minimum_significant_digits),
            maximum_significant_digits: other
                .maximum_significant_digits
                .or(self.maximum_significant_digits),
            notation: other.notation.or(self.notation),
            compact_display: other.compact_display.or(self.compact_display),
            sign_display: other.sign_display.or(self.sign_display),
            trailing_zero_display: other.trailing_zero_display.or(self.trailing_zero_display),
            scale: other.scale.or(self.scale),
        }
    }
}

/// Rendering width of a date/time field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Width {
    #[serde(rename = "numeric")]
    Numeric,
    #[serde(rename = "2-digit")]
    TwoDigit,
    #[serde(rename = "short")]
    Short,
    #[serde(rename = "long")]
    Long,
    #[serde(rename = "narrow")]
    Narrow,
}

impl Width {
    pub fn is_textual(self) -> bool {
        matches!(self, Width::Short | Width::Long | Width::Narrow)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HourCycle {
    H11,
    H12,
    H23,
    H24,
}

/// Options for a date/time formatter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateTimeFormatOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub era: Option<Width>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<Width>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<Width>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<Width>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekday: Option<Width>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hour: Option<Width>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minute: Option<Width>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second: Option<Width>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hour_cycle: Option<HourCycle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hour12: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone_name: Option<Width>,
}

impl DateTimeFormatOptions {
    /// Field-wise merge: every field set on `other` replaces the one on `self`.
    pub fn merged(&self, other: &DateTimeFormatOptions) -> DateTimeFormatOptions {
        DateTimeFormatOptions {
            era: other.era.or(self.era),
            year: other.year.or(self.year),
            month: other.month.or(self.month),
            day: other.day.or(self.day),
            weekday: other.weekday.or(self.weekday),
            hour: other.hour.or(self.hour),
            minute: other.minute.or(self.minute),
            second: other.second.or(self.second),
            hour_cycle: other.hour_cycle.or(self.hour_cycle),
            hour12: other.hour12.or(self.hour12),
            time_zone_name: other.time_zone_name.or(self.time_zone_name),
        }
    }

    /// True when no date or time field was requested.
    pub fn has_no_fields(&self) -> bool {
        self.era.is_none()
            && self.year.is_none()
            && self.month.is_none()
            && self.day.is_none()
            && self.weekday.is_none()
            && self.hour.is_none()
            && self.minute.is_none()
            && self.second.is_none()
    }
}

/// Options for a plural-category selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluralRulesOptions {
    #[serde(rename = "type")]
    pub kind: PluralKind,
}

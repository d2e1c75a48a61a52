//! Named styles for `{n, number, name}`, `{d, date, name}`, and `{t, time, name}`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::intl::{DateTimeFormatOptions, NumberFormatOptions, NumberStyleKind, Width};

/// Style buckets keyed by style name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Styles {
    #[serde(default)]
    pub number: BTreeMap<String, NumberFormatOptions>,
    #[serde(default)]
    pub date: BTreeMap<String, DateTimeFormatOptions>,
    #[serde(default)]
    pub time: BTreeMap<String, DateTimeFormatOptions>,
}

impl Styles {
    /// No styles at all; a starting point for overrides.
    pub fn empty() -> Self {
        Styles {
            number: BTreeMap::new(),
            date: BTreeMap::new(),
            time: BTreeMap::new(),
        }
    }

    pub fn with_number(mut self, name: impl Into<String>, options: NumberFormatOptions) -> Self {
        self.number.insert(name.into(), options);
        self
    }

    pub fn with_date(mut self, name: impl Into<String>, options: DateTimeFormatOptions) -> Self {
        self.date.insert(name.into(), options);
        self
    }

    pub fn with_time(mut self, name: impl Into<String>, options: DateTimeFormatOptions) -> Self {
        self.time.insert(name.into(), options);
        self
    }

    /// Overlays `overrides` on these styles.
    ///
    /// A style named in both is merged field by field, with the override's
    /// fields winning. Styles named only here are kept whole.
    pub fn merged(&self, overrides: &Styles) -> Styles {
        Styles {
            number: merge_bucket(&self.number, &overrides.number, NumberFormatOptions::merged),
            date: merge_bucket(&self.date, &overrides.date, DateTimeFormatOptions::merged),
            time: merge_bucket(&self.time, &overrides.time, DateTimeFormatOptions::merged),
        }
    }
}

/// The built-in styles.
impl Default for Styles {
    fn default() -> Self {
        let date = |month, year| DateTimeFormatOptions {
            month: Some(month),
            day: Some(Width::Numeric),
            year: Some(year),
            ..DateTimeFormatOptions::default()
        };
        let short_time = DateTimeFormatOptions {
            hour: Some(Width::Numeric),
            minute: Some(Width::Numeric),
            ..DateTimeFormatOptions::default()
        };
        let medium_time = DateTimeFormatOptions {
            second: Some(Width::Numeric),
            ..short_time.clone()
        };
        let long_time = DateTimeFormatOptions {
            time_zone_name: Some(Width::Short),
            ..medium_time.clone()
        };

        Styles::empty()
            .with_number(
                "integer",
                NumberFormatOptions {
                    maximum_fraction_digits: Some(0),
                    ..NumberFormatOptions::default()
                },
            )
            .with_number(
                "currency",
                NumberFormatOptions {
                    style: Some(NumberStyleKind::Currency),
                    ..NumberFormatOptions::default()
                },
            )
            .with_number(
                "percent",
                NumberFormatOptions {
                    style: Some(NumberStyleKind::Percent),
                    ..NumberFormatOptions::default()
                },
            )
            .with_date("short", date(Width::Numeric, Width::TwoDigit))
            .with_date("medium", date(Width::Short, Width::Numeric))
            .with_date("long", date(Width::Long, Width::Numeric))
            .with_date(
                "full",
                DateTimeFormatOptions {
                    weekday: Some(Width::Long),
                    ..date(Width::Long, Width::Numeric)
                },
            )
            .with_time("short", short_time)
            .with_time("medium", medium_time)
            .with_time("long", long_time.clone())
            .with_time("full", long_time)
    }
}

fn merge_bucket<T: Clone>(
    base: &BTreeMap<String, T>,
    overrides: &BTreeMap<String, T>,
    merge: fn(&T, &T) -> T,
) -> BTreeMap<String, T> {
    let mut merged = base.clone();
    for (name, options) in overrides {
        let value = match base.get(name) {
            Some(existing) => merge(existing, options),
            None => options.clone(),
        };
        merged.insert(name.clone(), value);
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_is_field_wise_per_style() {
        let overrides = Styles::empty().with_number(
            "percent",
            NumberFormatOptions {
                minimum_fraction_digits: Some(1),
                ..NumberFormatOptions::default()
            },
        );
        let merged = Styles::default().merged(&overrides);
        let percent = &merged.number["percent"];
        assert_eq!(percent.style, Some(NumberStyleKind::Percent));
        assert_eq!(percent.minimum_fraction_digits, Some(1));
        assert_eq!(merged.number["currency"], Styles::default().number["currency"]);
        assert_eq!(merged.time, Styles::default().time);
    }

    #[test]
    fn new_style_names_are_added() {
        let overrides = Styles::empty().with_date(
            "year-only",
            DateTimeFormatOptions {
                year: Some(Width::Numeric),
                ..DateTimeFormatOptions::default()
            },
        );
        let merged = Styles::default().merged(&overrides);
        assert_eq!(merged.date.len(), 5);
    }
}

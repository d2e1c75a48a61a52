//! CLDR plural category resolution backed by ICU4X.
//!
//! Different languages have different plural rules - English has "one" and
//! "other", Russian has "one", "few", "many", and "other", and Arabic uses all
//! six categories. Ordinal rules (`selectordinal`) are separate again: English
//! ordinals distinguish "one", "two", "few", and "other" (1st, 2nd, 3rd, 4th).
//!
//! `PluralRules` instances are cached per thread per (locale, kind) to avoid
//! re-creating them on every call. The cache is initialized lazily on first
//! access within each thread.

use std::cell::RefCell;

use fixed_decimal::Decimal;
use icu_locale_core::{Locale, locale};
use icu_plurals::{PluralCategory as IcuCategory, PluralRuleType, PluralRules};

use crate::intl::provider::{PluralCategory, PluralSelector};
use crate::parser::PluralKind;

thread_local! {
    /// Per-thread cache of `PluralRules` keyed by locale tag and rule kind.
    static PLURAL_RULES_CACHE: RefCell<Vec<(String, PluralKind, PluralRules)>> = const { RefCell::new(Vec::new()) };
}

/// Plural selector for one locale and rule kind.
#[derive(Debug, Clone)]
pub struct IcuPluralSelector {
    locale: Locale,
    tag: String,
    kind: PluralKind,
}

impl IcuPluralSelector {
    /// Returns `None` when ICU4X has no plural data for the locale.
    ///
    /// Unparsable tags fall back to the root locale, whose rules put every
    /// number in "other".
    pub fn try_new(locale: &str, kind: PluralKind) -> Option<Self> {
        let locale = parse_locale(locale);
        let tag = locale.to_string();
        let rules = build_rules(&locale, kind)?;
        PLURAL_RULES_CACHE.with_borrow_mut(|cache| {
            if !cache.iter().any(|(t, k, _)| *t == tag && *k == kind) {
                cache.push((tag.clone(), kind, rules));
            }
        });
        Some(IcuPluralSelector { locale, tag, kind })
    }
}

impl PluralSelector for IcuPluralSelector {
    fn select(&self, value: f64) -> PluralCategory {
        PLURAL_RULES_CACHE.with_borrow_mut(|cache| {
            if let Some((_, _, rules)) = cache
                .iter()
                .find(|(tag, kind, _)| *tag == self.tag && *kind == self.kind)
            {
                return category_for(rules, value);
            }
            let Some(rules) = build_rules(&self.locale, self.kind) else {
                return PluralCategory::Other;
            };
            let category = category_for(&rules, value);
            cache.push((self.tag.clone(), self.kind, rules));
            category
        })
    }
}

/// Parse a BCP-47 tag, accepting `_` as a subtag separator.
fn parse_locale(tag: &str) -> Locale {
    tag.replace('_', "-")
        .parse::<Locale>()
        .unwrap_or_else(|_| locale!("und"))
}

fn build_rules(locale: &Locale, kind: PluralKind) -> Option<PluralRules> {
    let rule_type = match kind {
        PluralKind::Cardinal => PluralRuleType::Cardinal,
        PluralKind::Ordinal => PluralRuleType::Ordinal,
    };
    PluralRules::try_new(locale.clone().into(), rule_type.into()).ok()
}

/// Fractional values go through their shortest decimal text so the visible
/// fraction digits (the `v`, `f`, and `t` operands) match what is displayed.
fn category_for(rules: &PluralRules, value: f64) -> PluralCategory {
    let value = value.abs();
    let category = if value.fract() == 0.0 && value < 9.0e15 {
        rules.category_for(value as i64)
    } else {
        match Decimal::try_from_str(&value.to_string()) {
            Ok(decimal) => rules.category_for(&decimal),
            Err(_) => IcuCategory::Other,
        }
    };
    from_icu(category)
}

fn from_icu(category: IcuCategory) -> PluralCategory {
    match category {
        IcuCategory::Zero => PluralCategory::Zero,
        IcuCategory::One => PluralCategory::One,
        IcuCategory::Two => PluralCategory::Two,
        IcuCategory::Few => PluralCategory::Few,
        IcuCategory::Many => PluralCategory::Many,
        IcuCategory::Other => PluralCategory::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_cardinal() {
        let rules = IcuPluralSelector::try_new("en", PluralKind::Cardinal).unwrap();
        assert_eq!(rules.select(1.0), PluralCategory::One);
        assert_eq!(rules.select(0.0), PluralCategory::Other);
        assert_eq!(rules.select(5.0), PluralCategory::Other);
        assert_eq!(rules.select(1.5), PluralCategory::Other);
    }

    #[test]
    fn english_ordinal() {
        let rules = IcuPluralSelector::try_new("en", PluralKind::Ordinal).unwrap();
        assert_eq!(rules.select(1.0), PluralCategory::One);
        assert_eq!(rules.select(2.0), PluralCategory::Two);
        assert_eq!(rules.select(3.0), PluralCategory::Few);
        assert_eq!(rules.select(4.0), PluralCategory::Other);
        assert_eq!(rules.select(11.0), PluralCategory::Other);
    }

    #[test]
    fn russian_cardinal() {
        let rules = IcuPluralSelector::try_new("ru", PluralKind::Cardinal).unwrap();
        assert_eq!(rules.select(1.0), PluralCategory::One);
        assert_eq!(rules.select(2.0), PluralCategory::Few);
        assert_eq!(rules.select(5.0), PluralCategory::Many);
    }

    #[test]
    fn fractions_use_visible_digits() {
        let french = IcuPluralSelector::try_new("fr", PluralKind::Cardinal).unwrap();
        assert_eq!(french.select(1.5), PluralCategory::One);
        assert_eq!(french.select(2.5), PluralCategory::Other);
        let russian = IcuPluralSelector::try_new("ru", PluralKind::Cardinal).unwrap();
        assert_eq!(russian.select(1.5), PluralCategory::Other);
    }

    #[test]
    fn region_subtag_with_underscore() {
        let rules = IcuPluralSelector::try_new("en_US", PluralKind::Cardinal).unwrap();
        assert_eq!(rules.select(1.0), PluralCategory::One);
    }
}

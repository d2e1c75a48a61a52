//! ICU number skeletons.
//!
//! A skeleton is a whitespace-separated list of tokens, each a stem followed
//! by zero or more `/option` suffixes:
//!
//! ```text
//! currency/EUR .00 sign-accounting
//! compact-short @@#
//! ```
//!
//! Tokens are folded left to right into one [`NumberFormatOptions`]; a later
//! token overwrites fields set by an earlier one. Stems we do not recognize
//! are skipped.

use serde::{Deserialize, Serialize};
use winnow::combinator::{preceded, repeat, terminated};
use winnow::prelude::*;
use winnow::token::take_while;

use crate::intl::{
    CompactDisplay, CurrencyDisplay, CurrencySign, Notation, NumberFormatOptions,
    NumberStyleKind, SignDisplay, TrailingZeroDisplay, UnitDisplay,
};
use crate::skeleton::SkeletonError;

/// One `stem/option/option` token of a number skeleton.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberSkeletonToken {
    pub stem: String,
    #[serde(default)]
    pub options: Vec<String>,
}

/// Split skeleton text into tokens.
pub fn parse_number_skeleton_tokens(
    text: &str,
) -> Result<Vec<NumberSkeletonToken>, SkeletonError> {
    let words = skeleton_words
        .parse(text)
        .map_err(|_| SkeletonError::InvalidNumberSkeleton)?;
    if words.is_empty() {
        return Err(SkeletonError::EmptyNumberSkeleton);
    }
    words
        .into_iter()
        .map(|word| {
            let mut pieces = word.split('/');
            let stem = pieces.next().unwrap_or_default();
            let options: Vec<String> = pieces.map(str::to_string).collect();
            if stem.is_empty() || options.iter().any(String::is_empty) {
                return Err(SkeletonError::InvalidNumberSkeleton);
            }
            Ok(NumberSkeletonToken {
                stem: stem.to_string(),
                options,
            })
        })
        .collect()
}

fn skeleton_words<'i>(input: &mut &'i str) -> ModalResult<Vec<&'i str>> {
    preceded(
        take_while(0.., char::is_whitespace),
        repeat(
            0..,
            terminated(
                take_while(1.., |c: char| !c.is_whitespace()),
                take_while(0.., char::is_whitespace),
            ),
        ),
    )
    .parse_next(input)
}

/// Fold tokens into number format options.
pub fn parse_number_skeleton(
    tokens: &[NumberSkeletonToken],
) -> Result<NumberFormatOptions, SkeletonError> {
    let mut result = NumberFormatOptions::default();
    for token in tokens {
        let stem = token.stem.as_str();
        let first_option = token.options.first().map(String::as_str);
        match stem {
            "percent" | "%" => result.style = Some(NumberStyleKind::Percent),
            "%x100" => {
                result.style = Some(NumberStyleKind::Percent);
                result.scale = Some(100.0);
            }
            "currency" => {
                result.style = Some(NumberStyleKind::Currency);
                result.currency = first_option.map(str::to_string);
            }
            "group-off" | ",_" => result.use_grouping = Some(false),
            "precision-integer" | "." => result.maximum_fraction_digits = Some(0),
            "measure-unit" | "unit" => {
                result.style = Some(NumberStyleKind::Unit);
                result.unit = first_option.map(strip_unit_type);
            }
            "compact-short" | "K" => {
                result.notation = Some(Notation::Compact);
                result.compact_display = Some(CompactDisplay::Short);
            }
            "compact-long" | "KK" => {
                result.notation = Some(Notation::Compact);
                result.compact_display = Some(CompactDisplay::Long);
            }
            "scientific" | "engineering" => {
                result.notation = Some(if stem == "scientific" {
                    Notation::Scientific
                } else {
                    Notation::Engineering
                });
                for option in &token.options {
                    if let Some(sign) = parse_sign(option) {
                        result = result.merged(&sign);
                    }
                }
            }
            "notation-simple" => result.notation = Some(Notation::Standard),
            "unit-width-narrow" => {
                result.currency_display = Some(CurrencyDisplay::NarrowSymbol);
                result.unit_display = Some(UnitDisplay::Narrow);
            }
            "unit-width-short" => {
                result.currency_display = Some(CurrencyDisplay::Code);
                result.unit_display = Some(UnitDisplay::Short);
            }
            "unit-width-full-name" => {
                result.currency_display = Some(CurrencyDisplay::Name);
                result.unit_display = Some(UnitDisplay::Long);
            }
            "unit-width-iso-code" => result.currency_display = Some(CurrencyDisplay::Symbol),
            "scale" => {
                result.scale = first_option.and_then(|option| option.parse::<f64>().ok());
            }
            "integer-width" => {
                if token.options.len() > 1 {
                    return Err(SkeletonError::MultipleOptions {
                        stem: stem.to_string(),
                    });
                }
                if let Some(option) = first_option {
                    if let Some(min) = parse_integer_width(option)? {
                        result.minimum_integer_digits = Some(min);
                    }
                }
            }
            _ => result = fold_pattern_stem(result, token)?,
        }
    }
    Ok(result)
}

/// Stems recognized by shape rather than by name.
fn fold_pattern_stem(
    result: NumberFormatOptions,
    token: &NumberSkeletonToken,
) -> Result<NumberFormatOptions, SkeletonError> {
    let stem = token.stem.as_str();
    if is_run_of(stem, '0') {
        return Ok(NumberFormatOptions {
            minimum_integer_digits: Some(count(stem)),
            ..result
        });
    }
    if let Some(fraction) = parse_fraction_precision(stem) {
        if token.options.len() > 1 {
            return Err(SkeletonError::MultipleOptions {
                stem: stem.to_string(),
            });
        }
        let mut result = result.merged(&fraction);
        match token.options.first().map(String::as_str) {
            Some("w") => {
                result.trailing_zero_display = Some(TrailingZeroDisplay::StripIfInteger);
            }
            Some(option) => {
                if let Some(significant) = parse_significant_precision(option) {
                    result = result.merged(&significant);
                }
            }
            None => {}
        }
        return Ok(result);
    }
    if let Some(significant) = parse_significant_precision(stem) {
        return Ok(result.merged(&significant));
    }
    if let Some(sign) = parse_sign(stem) {
        return Ok(result.merged(&sign));
    }
    if let Some(notation) = parse_concise_notation(stem)? {
        return Ok(result.merged(&notation));
    }
    Ok(result)
}

/// `measure-unit/length-meter` names the unit `meter`.
fn strip_unit_type(unit: &str) -> String {
    match unit.split_once('-') {
        Some((_, rest)) => rest.to_string(),
        None => unit.to_string(),
    }
}

fn parse_integer_width(option: &str) -> Result<Option<u32>, SkeletonError> {
    if let Some(zeros) = option.strip_prefix('*') {
        if is_run_of(zeros, '0') {
            return Ok(Some(count(zeros)));
        }
        return Ok(None);
    }
    let hashes = option.trim_start_matches('#');
    if hashes.len() < option.len() && is_run_of(hashes, '0') {
        return Err(SkeletonError::UnsupportedIntegerWidth { what: "maximum" });
    }
    if is_run_of(option, '0') {
        return Err(SkeletonError::UnsupportedIntegerWidth { what: "exact" });
    }
    Ok(None)
}

/// `.00`, `.00*`, `.##`, and `.00##`.
fn parse_fraction_precision(stem: &str) -> Option<NumberFormatOptions> {
    let digits = stem.strip_prefix('.')?;
    let (min, max) = if let Some(zeros) = digits.strip_suffix('*') {
        if !is_run_of(zeros, '0') {
            return None;
        }
        (Some(count(zeros)), None)
    } else if is_run_of(digits, '#') {
        (None, Some(count(digits)))
    } else {
        let hashes = digits.trim_start_matches('0');
        let zeros = count(digits) - count(hashes);
        if zeros == 0 || !(hashes.is_empty() || is_run_of(hashes, '#')) {
            return None;
        }
        (Some(zeros), Some(count(digits)))
    };
    Some(NumberFormatOptions {
        minimum_fraction_digits: min,
        maximum_fraction_digits: max,
        ..NumberFormatOptions::default()
    })
}

/// `@@@`, `@@+`, and `@@##`, each optionally followed by `r` or `s`.
fn parse_significant_precision(stem: &str) -> Option<NumberFormatOptions> {
    let body = stem
        .strip_suffix('r')
        .or_else(|| stem.strip_suffix('s'))
        .unwrap_or(stem);
    let rest = body.trim_start_matches('@');
    let ats = count(body) - count(rest);
    if ats == 0 {
        return None;
    }
    let (min, max) = if rest.is_empty() {
        (ats, Some(ats))
    } else if rest == "+" {
        (ats, None)
    } else if is_run_of(rest, '#') {
        (ats, Some(ats + count(rest)))
    } else {
        return None;
    };
    Some(NumberFormatOptions {
        minimum_significant_digits: Some(min),
        maximum_significant_digits: max,
        ..NumberFormatOptions::default()
    })
}

fn parse_sign(stem: &str) -> Option<NumberFormatOptions> {
    let (sign_display, currency_sign) = match stem {
        "sign-auto" => (Some(SignDisplay::Auto), None),
        "sign-accounting" | "()" => (None, Some(CurrencySign::Accounting)),
        "sign-always" | "+!" => (Some(SignDisplay::Always), None),
        "sign-accounting-always" | "()!" => {
            (Some(SignDisplay::Always), Some(CurrencySign::Accounting))
        }
        "sign-except-zero" | "+?" => (Some(SignDisplay::ExceptZero), None),
        "sign-accounting-except-zero" | "()?" => {
            (Some(SignDisplay::ExceptZero), Some(CurrencySign::Accounting))
        }
        "sign-never" | "+_" => (Some(SignDisplay::Never), None),
        _ => return None,
    };
    Some(NumberFormatOptions {
        sign_display,
        currency_sign,
        ..NumberFormatOptions::default()
    })
}

/// `E0`, `EE00`, `E+!00`, `EE+?0`.
fn parse_concise_notation(stem: &str) -> Result<Option<NumberFormatOptions>, SkeletonError> {
    let (notation, rest) = if let Some(rest) = stem.strip_prefix("EE") {
        (Notation::Engineering, rest)
    } else if let Some(rest) = stem.strip_prefix('E') {
        (Notation::Scientific, rest)
    } else {
        return Ok(None);
    };
    let (sign_display, digits) = if let Some(digits) = rest.strip_prefix("+!") {
        (Some(SignDisplay::Always), digits)
    } else if let Some(digits) = rest.strip_prefix("+?") {
        (Some(SignDisplay::ExceptZero), digits)
    } else {
        (None, rest)
    };
    if !is_run_of(digits, '0') {
        return Err(SkeletonError::MalformedConciseNotation {
            stem: stem.to_string(),
        });
    }
    Ok(Some(NumberFormatOptions {
        notation: Some(notation),
        sign_display,
        minimum_integer_digits: Some(count(digits)),
        ..NumberFormatOptions::default()
    }))
}

fn is_run_of(text: &str, c: char) -> bool {
    !text.is_empty() && text.chars().all(|x| x == c)
}

fn count(text: &str) -> u32 {
    u32::try_from(text.chars().count()).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(text: &str) -> NumberFormatOptions {
        parse_number_skeleton(&parse_number_skeleton_tokens(text).unwrap()).unwrap()
    }

    #[test]
    fn tokens_split_on_whitespace_and_slash() {
        let tokens = parse_number_skeleton_tokens("  currency/EUR  .00/w ").unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].stem, "currency");
        assert_eq!(tokens[0].options, vec!["EUR"]);
        assert_eq!(tokens[1].stem, ".00");
        assert_eq!(tokens[1].options, vec!["w"]);
    }

    #[test]
    fn empty_option_is_invalid() {
        assert_eq!(
            parse_number_skeleton_tokens("currency/"),
            Err(SkeletonError::InvalidNumberSkeleton)
        );
        assert_eq!(
            parse_number_skeleton_tokens("   "),
            Err(SkeletonError::EmptyNumberSkeleton)
        );
    }

    #[test]
    fn fraction_precision_shapes() {
        let o = options(".00");
        assert_eq!(o.minimum_fraction_digits, Some(2));
        assert_eq!(o.maximum_fraction_digits, Some(2));

        let o = options(".0*");
        assert_eq!(o.minimum_fraction_digits, Some(1));
        assert_eq!(o.maximum_fraction_digits, None);

        let o = options(".##");
        assert_eq!(o.minimum_fraction_digits, None);
        assert_eq!(o.maximum_fraction_digits, Some(2));

        let o = options(".0##");
        assert_eq!(o.minimum_fraction_digits, Some(1));
        assert_eq!(o.maximum_fraction_digits, Some(3));
    }

    #[test]
    fn significant_precision_shapes() {
        let o = options("@@@");
        assert_eq!(o.minimum_significant_digits, Some(3));
        assert_eq!(o.maximum_significant_digits, Some(3));

        let o = options("@+");
        assert_eq!(o.minimum_significant_digits, Some(1));
        assert_eq!(o.maximum_significant_digits, None);

        let o = options("@@##r");
        assert_eq!(o.minimum_significant_digits, Some(2));
        assert_eq!(o.maximum_significant_digits, Some(4));
    }

    #[test]
    fn fraction_with_significant_option() {
        let o = options(".00/@@");
        assert_eq!(o.maximum_fraction_digits, Some(2));
        assert_eq!(o.maximum_significant_digits, Some(2));
    }

    #[test]
    fn later_tokens_overwrite_earlier_ones() {
        let o = options("percent currency/USD");
        assert_eq!(o.style, Some(NumberStyleKind::Currency));
        assert_eq!(o.currency.as_deref(), Some("USD"));
    }

    #[test]
    fn unknown_stems_are_ignored() {
        assert_eq!(options("rounding-mode-floor"), NumberFormatOptions::default());
    }

    #[test]
    fn integer_width() {
        assert_eq!(options("integer-width/*000").minimum_integer_digits, Some(3));
        assert_eq!(options("000").minimum_integer_digits, Some(3));
        let tokens = parse_number_skeleton_tokens("integer-width/##00").unwrap();
        assert_eq!(
            parse_number_skeleton(&tokens),
            Err(SkeletonError::UnsupportedIntegerWidth { what: "maximum" })
        );
        let tokens = parse_number_skeleton_tokens("integer-width/00").unwrap();
        assert_eq!(
            parse_number_skeleton(&tokens),
            Err(SkeletonError::UnsupportedIntegerWidth { what: "exact" })
        );
    }

    #[test]
    fn concise_notation() {
        let o = options("EE+!00");
        assert_eq!(o.notation, Some(Notation::Engineering));
        assert_eq!(o.sign_display, Some(SignDisplay::Always));
        assert_eq!(o.minimum_integer_digits, Some(2));

        let tokens = parse_number_skeleton_tokens("E+x").unwrap();
        assert!(matches!(
            parse_number_skeleton(&tokens),
            Err(SkeletonError::MalformedConciseNotation { .. })
        ));
    }

    #[test]
    fn measure_unit_strips_type() {
        let o = options("measure-unit/length-meter unit-width-full-name");
        assert_eq!(o.style, Some(NumberStyleKind::Unit));
        assert_eq!(o.unit.as_deref(), Some("meter"));
        assert_eq!(o.unit_display, Some(UnitDisplay::Long));
    }

    #[test]
    fn percent_shorthand_scales() {
        let o = options("%x100");
        assert_eq!(o.style, Some(NumberStyleKind::Percent));
        assert_eq!(o.scale, Some(100.0));
    }
}

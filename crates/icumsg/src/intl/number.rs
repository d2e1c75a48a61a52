//! Locale-neutral number formatting for the built-in provider.
//!
//! Renders with `,` grouping and `.` as the decimal point. Honors the digit,
//! grouping, sign, notation, and affix options of [`NumberFormatOptions`].
//! Hosts that need localized digits or separators supply their own
//! [`IntlProvider`](crate::intl::IntlProvider).

use crate::intl::options::{
    CompactDisplay, CurrencyDisplay, CurrencySign, Notation, NumberFormatOptions, NumberStyleKind,
    SignDisplay, TrailingZeroDisplay, UnitDisplay,
};
use crate::intl::provider::NumberFormat;

const COMPACT_STEPS: [(f64, &str, &str); 4] = [
    (1e12, "T", " trillion"),
    (1e9, "B", " billion"),
    (1e6, "M", " million"),
    (1e3, "K", " thousand"),
];

/// Number formatter built from one option record.
#[derive(Debug, Clone)]
pub struct BasicNumberFormat {
    options: NumberFormatOptions,
}

/// Resolved rounding strategy.
#[derive(Debug, Clone, Copy)]
enum Rounding {
    Fraction { min: u32, max: u32 },
    Significant { min: u32, max: u32 },
}

impl BasicNumberFormat {
    pub fn new(options: NumberFormatOptions) -> Self {
        BasicNumberFormat { options }
    }

    fn style(&self) -> NumberStyleKind {
        self.options.style.unwrap_or(NumberStyleKind::Decimal)
    }

    fn has_digit_options(&self) -> bool {
        let o = &self.options;
        o.minimum_fraction_digits.is_some()
            || o.maximum_fraction_digits.is_some()
            || o.minimum_significant_digits.is_some()
            || o.maximum_significant_digits.is_some()
    }

    fn rounding(&self) -> Rounding {
        let o = &self.options;
        if o.minimum_significant_digits.is_some() || o.maximum_significant_digits.is_some() {
            let min = o.minimum_significant_digits.unwrap_or(1).clamp(1, 21);
            let max = o.maximum_significant_digits.unwrap_or(21).clamp(min, 21);
            return Rounding::Significant { min, max };
        }
        let (default_min, default_max) = match self.style() {
            NumberStyleKind::Currency => (2, 2),
            NumberStyleKind::Percent => (0, 0),
            NumberStyleKind::Decimal | NumberStyleKind::Unit => (0, 3),
        };
        let min = o.minimum_fraction_digits.unwrap_or(default_min).min(100);
        let max = o
            .maximum_fraction_digits
            .unwrap_or(default_max.max(min))
            .clamp(min, 100);
        Rounding::Fraction { min, max }
    }

    /// Rounds and renders a non-negative finite value.
    fn digits(&self, magnitude: f64, rounding: Rounding, grouping: bool) -> String {
        let (mut integer, mut fraction) = match rounding {
            Rounding::Fraction { min, max } => {
                let (integer, mut fraction) = round_fraction(magnitude, max);
                trim_trailing_zeros(&mut fraction, min as usize);
                (integer, fraction)
            }
            Rounding::Significant { min, max } => {
                let (integer, mut fraction) = round_significant(magnitude, max);
                trim_trailing_zeros(&mut fraction, 0);
                while significant_count(&integer, &fraction) < min as usize {
                    fraction.push('0');
                }
                (integer, fraction)
            }
        };
        if self.options.trailing_zero_display == Some(TrailingZeroDisplay::StripIfInteger)
            && fraction.chars().all(|c| c == '0')
        {
            fraction.clear();
        }
        let min_integer = self.options.minimum_integer_digits.unwrap_or(1).min(21) as usize;
        while integer.len() < min_integer {
            integer.insert(0, '0');
        }
        if grouping {
            integer = group_thousands(&integer);
        }
        if fraction.is_empty() {
            integer
        } else {
            format!("{integer}.{fraction}")
        }
    }

    fn format_standard(&self, magnitude: f64) -> String {
        let grouping = self.options.use_grouping.unwrap_or(true);
        self.digits(magnitude, self.rounding(), grouping)
    }

    fn format_exponent(&self, magnitude: f64, step: i32) -> String {
        let mut exponent = if magnitude == 0.0 {
            0
        } else {
            magnitude.log10().floor() as i32
        };
        exponent -= exponent.rem_euclid(step);
        let mantissa = magnitude / 10f64.powi(exponent);
        format!("{}E{exponent}", self.digits(mantissa, self.rounding(), false))
    }

    fn format_compact(&self, magnitude: f64) -> String {
        let step = COMPACT_STEPS
            .iter()
            .find(|(threshold, _, _)| magnitude >= *threshold);
        let (scaled, suffix) = match step {
            Some((threshold, short, long)) => {
                let suffix = match self.options.compact_display {
                    Some(CompactDisplay::Long) => *long,
                    Some(CompactDisplay::Short) | None => *short,
                };
                (magnitude / threshold, suffix)
            }
            None => (magnitude, ""),
        };
        let rounding = if self.has_digit_options() {
            self.rounding()
        } else if scaled < 100.0 {
            Rounding::Significant { min: 1, max: 2 }
        } else {
            Rounding::Fraction { min: 0, max: 0 }
        };
        let grouping = self.options.use_grouping.unwrap_or(true);
        format!("{}{suffix}", self.digits(scaled, rounding, grouping))
    }

    fn currency_affixes(&self) -> (String, String) {
        let Some(code) = self.options.currency.as_deref() else {
            return (String::new(), String::new());
        };
        let code = code.to_ascii_uppercase();
        match self
            .options
            .currency_display
            .unwrap_or(CurrencyDisplay::Symbol)
        {
            CurrencyDisplay::Symbol | CurrencyDisplay::NarrowSymbol => {
                match currency_symbol(&code) {
                    Some(symbol) => (symbol.to_string(), String::new()),
                    None => (format!("{code}\u{a0}"), String::new()),
                }
            }
            CurrencyDisplay::Code => (format!("{code}\u{a0}"), String::new()),
            CurrencyDisplay::Name => (String::new(), format!(" {code}")),
        }
    }

    fn affixes(&self) -> (String, String) {
        match self.style() {
            NumberStyleKind::Decimal => (String::new(), String::new()),
            NumberStyleKind::Percent => (String::new(), "%".to_string()),
            NumberStyleKind::Currency => self.currency_affixes(),
            NumberStyleKind::Unit => match self.options.unit.as_deref() {
                Some(unit) => match self.options.unit_display {
                    Some(UnitDisplay::Narrow) => (String::new(), unit.to_string()),
                    Some(UnitDisplay::Short | UnitDisplay::Long) | None => {
                        (String::new(), format!(" {unit}"))
                    }
                },
                None => (String::new(), String::new()),
            },
        }
    }
}

impl NumberFormat for BasicNumberFormat {
    fn format(&self, value: f64) -> String {
        if value.is_nan() {
            return "NaN".to_string();
        }
        let value = if self.style() == NumberStyleKind::Percent {
            value * 100.0
        } else {
            value
        };
        let negative = value < 0.0;
        let magnitude = value.abs();
        let body = if magnitude.is_infinite() {
            "∞".to_string()
        } else {
            match self.options.notation.unwrap_or(Notation::Standard) {
                Notation::Standard => self.format_standard(magnitude),
                Notation::Scientific => self.format_exponent(magnitude, 1),
                Notation::Engineering => self.format_exponent(magnitude, 3),
                Notation::Compact => self.format_compact(magnitude),
            }
        };
        let is_zero = !body.chars().any(|c| c.is_ascii_digit() && c != '0') && !body.contains('∞');
        let (prefix, suffix) = self.affixes();

        let accounting = self.style() == NumberStyleKind::Currency
            && self.options.currency_sign == Some(CurrencySign::Accounting);
        if accounting && negative && !is_zero {
            return format!("({prefix}{body}{suffix})");
        }

        let sign = match self.options.sign_display.unwrap_or(SignDisplay::Auto) {
            SignDisplay::Auto => {
                if negative {
                    "-"
                } else {
                    ""
                }
            }
            SignDisplay::Always => {
                if negative {
                    "-"
                } else {
                    "+"
                }
            }
            SignDisplay::ExceptZero => {
                if is_zero {
                    ""
                } else if negative {
                    "-"
                } else {
                    "+"
                }
            }
            SignDisplay::Never => "",
        };
        format!("{sign}{prefix}{body}{suffix}")
    }
}

fn currency_symbol(code: &str) -> Option<&'static str> {
    match code {
        "USD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        "JPY" => Some("¥"),
        "INR" => Some("₹"),
        "KRW" => Some("₩"),
        "ILS" => Some("₪"),
        "VND" => Some("₫"),
        "NGN" => Some("₦"),
        _ => None,
    }
}

fn split_point(text: &str) -> (String, String) {
    match text.split_once('.') {
        Some((integer, fraction)) => (integer.to_string(), fraction.to_string()),
        None => (text.to_string(), String::new()),
    }
}

fn round_fraction(magnitude: f64, max_fraction: u32) -> (String, String) {
    split_point(&format!("{:.*}", max_fraction as usize, magnitude))
}

fn round_significant(magnitude: f64, max_significant: u32) -> (String, String) {
    if magnitude == 0.0 {
        return ("0".to_string(), String::new());
    }
    let precision = max_significant.saturating_sub(1) as usize;
    let scientific = format!("{magnitude:.precision$e}");
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return split_point(&scientific);
    };
    let exponent: i64 = exponent.parse().unwrap_or(0);
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let point = exponent + 1;
    if point <= 0 {
        let zeros = "0".repeat(point.unsigned_abs() as usize);
        ("0".to_string(), format!("{zeros}{digits}"))
    } else {
        let point = point as usize;
        if point >= digits.len() {
            let zeros = "0".repeat(point - digits.len());
            (format!("{digits}{zeros}"), String::new())
        } else {
            (digits[..point].to_string(), digits[point..].to_string())
        }
    }
}

fn trim_trailing_zeros(fraction: &mut String, keep: usize) {
    while fraction.len() > keep && fraction.ends_with('0') {
        fraction.pop();
    }
    while fraction.len() < keep {
        fraction.push('0');
    }
}

fn significant_count(integer: &str, fraction: &str) -> usize {
    let all = format!("{integer}{fraction}");
    all.trim_start_matches('0').len()
}

fn group_thousands(integer: &str) -> String {
    let len = integer.len();
    let mut grouped = String::with_capacity(len + len.div_ceil(3));
    for (index, c) in integer.chars().enumerate() {
        if index > 0 && (len - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

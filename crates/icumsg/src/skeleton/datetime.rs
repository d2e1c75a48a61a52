//! ICU date/time skeletons such as `yMMMd` or `EEEE, h:mm a`.
//!
//! Each run of one field letter selects a field and its width. Text inside
//! single quotes is literal and ignored; `''` is a literal quote.

use winnow::combinator::{alt, delimited, opt, repeat};
use winnow::prelude::*;
use winnow::token::{any, take_till, take_while};

use crate::intl::{DateTimeFormatOptions, HourCycle, Width};
use crate::skeleton::SkeletonError;

const NUMERIC_WIDTHS: [Width; 2] = [Width::Numeric, Width::TwoDigit];
const MONTH_WIDTHS: [Width; 5] = [
    Width::Numeric,
    Width::TwoDigit,
    Width::Short,
    Width::Long,
    Width::Narrow,
];
/// `eeee`/`cccc` through six letters: wide, narrow, short.
const LOCAL_WEEKDAY_WIDTHS: [Width; 3] = [Width::Long, Width::Narrow, Width::Short];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Piece {
    Field(char, usize),
    Literal,
}

/// Parse a date/time skeleton into formatter options.
pub fn parse_date_time_skeleton(pattern: &str) -> Result<DateTimeFormatOptions, SkeletonError> {
    if pattern.trim().is_empty() {
        return Err(SkeletonError::EmptyDateTimeSkeleton);
    }
    let pieces: Vec<Piece> = repeat(0.., piece).parse(pattern).unwrap_or_default();
    let mut result = DateTimeFormatOptions::default();
    for piece in pieces {
        let Piece::Field(letter, run) = piece else {
            continue;
        };
        let max = max_run(letter);
        let mut remaining = run;
        while remaining > 0 {
            let len = remaining.min(max);
            apply_field(&mut result, letter, len)?;
            remaining -= len;
        }
    }
    Ok(result)
}

fn piece(input: &mut &str) -> ModalResult<Piece> {
    alt((quoted, field, any.value(Piece::Literal))).parse_next(input)
}

fn quoted(input: &mut &str) -> ModalResult<Piece> {
    delimited('\'', take_till(0.., '\''), opt('\''))
        .value(Piece::Literal)
        .parse_next(input)
}

fn field(input: &mut &str) -> ModalResult<Piece> {
    let letter = any
        .verify(|c: &char| c.is_ascii_alphabetic())
        .parse_next(input)?;
    let rest = take_while(0.., letter).parse_next(input)?;
    Ok(Piece::Field(letter, 1 + rest.len()))
}

/// Longest run of a letter that forms one field; longer runs repeat it.
fn max_run(letter: char) -> usize {
    match letter {
        'E' | 'e' | 'c' => 6,
        'G' | 'Q' | 'q' | 'U' | 'M' | 'L' | 'a' | 'b' | 'B' => 5,
        'z' | 'Z' | 'O' | 'v' | 'V' | 'x' | 'X' => 4,
        'D' => 3,
        'd' | 'h' | 'H' | 'k' | 'K' | 'w' | 'm' | 's' => 2,
        'F' | 'W' => 1,
        _ => usize::MAX,
    }
}

fn apply_field(
    result: &mut DateTimeFormatOptions,
    letter: char,
    len: usize,
) -> Result<(), SkeletonError> {
    let unsupported = |message: &'static str| {
        Err(SkeletonError::UnsupportedDateField {
            letters: letter.to_string().repeat(len),
            message,
        })
    };
    match letter {
        'G' => {
            result.era = Some(match len {
                4 => Width::Long,
                5 => Width::Narrow,
                _ => Width::Short,
            });
        }
        'y' => result.year = Some(if len == 2 { Width::TwoDigit } else { Width::Numeric }),
        'Y' | 'u' | 'U' | 'r' => {
            return unsupported("`Y/u/U/r` (year) patterns are not supported, use `y` instead");
        }
        'q' | 'Q' => return unsupported("`q/Q` (quarter) patterns are not supported"),
        'M' | 'L' => result.month = Some(MONTH_WIDTHS[len - 1]),
        'w' | 'W' => return unsupported("`w/W` (week) patterns are not supported"),
        'd' => result.day = Some(NUMERIC_WIDTHS[len - 1]),
        'D' | 'F' | 'g' => {
            return unsupported("`D/F/g` (day) patterns are not supported, use `d` instead");
        }
        'E' => {
            result.weekday = Some(match len {
                4 => Width::Long,
                5 => Width::Narrow,
                _ => Width::Short,
            });
        }
        'e' | 'c' if len < 4 => {
            return unsupported(if letter == 'e' {
                "`e..eee` (weekday) patterns are not supported"
            } else {
                "`c..ccc` (weekday) patterns are not supported"
            });
        }
        'e' | 'c' => result.weekday = Some(LOCAL_WEEKDAY_WIDTHS[len - 4]),
        'a' => result.hour12 = Some(true),
        'b' | 'B' => {
            return unsupported("`b/B` (period) patterns are not supported, use `a` instead");
        }
        'h' | 'H' | 'K' | 'k' => {
            result.hour_cycle = Some(match letter {
                'h' => HourCycle::H12,
                'H' => HourCycle::H23,
                'K' => HourCycle::H11,
                _ => HourCycle::H24,
            });
            result.hour = Some(NUMERIC_WIDTHS[len - 1]);
        }
        'j' | 'J' | 'C' => {
            return unsupported(
                "`j/J/C` (hour) patterns are not supported, use `h/H/K/k` instead",
            );
        }
        'm' => result.minute = Some(NUMERIC_WIDTHS[len - 1]),
        's' => result.second = Some(NUMERIC_WIDTHS[len - 1]),
        'S' | 'A' => {
            return unsupported("`S/A` (second) patterns are not supported, use `s` instead");
        }
        'z' => result.time_zone_name = Some(if len < 4 { Width::Short } else { Width::Long }),
        'Z' | 'O' | 'v' | 'V' | 'X' | 'x' => {
            return unsupported(
                "`Z/O/v/V/X/x` (timeZone) patterns are not supported, use `z` instead",
            );
        }
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn medium_date() {
        let o = parse_date_time_skeleton("yMMMd").unwrap();
        assert_eq!(o.year, Some(Width::Numeric));
        assert_eq!(o.month, Some(Width::Short));
        assert_eq!(o.day, Some(Width::Numeric));
    }

    #[test]
    fn hour_letter_selects_cycle() {
        let o = parse_date_time_skeleton("HH:mm").unwrap();
        assert_eq!(o.hour_cycle, Some(HourCycle::H23));
        assert_eq!(o.hour, Some(Width::TwoDigit));
        assert_eq!(o.minute, Some(Width::TwoDigit));
    }

    #[test]
    fn quoted_text_is_skipped() {
        let o = parse_date_time_skeleton("EEEE 'at' h a").unwrap();
        assert_eq!(o.weekday, Some(Width::Long));
        assert_eq!(o.hour12, Some(true));
        assert_eq!(o.second, None);
        assert_eq!(o.time_zone_name, None);
    }

    #[test]
    fn local_weekday_needs_four_letters() {
        assert_eq!(parse_date_time_skeleton("eeee").unwrap().weekday, Some(Width::Long));
        assert_eq!(parse_date_time_skeleton("ccccc").unwrap().weekday, Some(Width::Narrow));
        assert_eq!(parse_date_time_skeleton("eeeeee").unwrap().weekday, Some(Width::Short));
        assert!(parse_date_time_skeleton("ee").is_err());
    }

    #[test]
    fn unsupported_letters_name_alternative() {
        let error = parse_date_time_skeleton("YYYY").unwrap_err();
        assert_eq!(
            error.to_string(),
            "`YYYY`: `Y/u/U/r` (year) patterns are not supported, use `y` instead"
        );
        assert!(parse_date_time_skeleton("Q").is_err());
        assert!(parse_date_time_skeleton("ss.SSS").is_err());
    }

    #[test]
    fn empty_skeleton() {
        assert_eq!(
            parse_date_time_skeleton(" "),
            Err(SkeletonError::EmptyDateTimeSkeleton)
        );
    }
}

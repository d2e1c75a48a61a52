//! English date/time formatting for the built-in provider.

use time::{OffsetDateTime, UtcOffset};

use crate::intl::options::{DateTimeFormatOptions, HourCycle, Width};
use crate::intl::provider::DateTimeFormat;

const MONTHS_LONG: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const WEEKDAYS_LONG: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Date/time formatter built from one option record.
///
/// Field order and punctuation follow the `en-US` conventions:
/// `Friday, March 15, 2024, 3:04:05 PM UTC`.
#[derive(Debug, Clone)]
pub struct BasicDateTimeFormat {
    options: DateTimeFormatOptions,
}

impl BasicDateTimeFormat {
    pub fn new(options: DateTimeFormatOptions) -> Self {
        let options = if options.has_no_fields() {
            DateTimeFormatOptions {
                year: Some(Width::Numeric),
                month: Some(Width::Numeric),
                day: Some(Width::Numeric),
                ..options
            }
        } else {
            options
        };
        BasicDateTimeFormat { options }
    }

    fn format_date(&self, value: &OffsetDateTime) -> Option<String> {
        let o = &self.options;
        let weekday = o.weekday.map(|width| {
            let name = WEEKDAYS_LONG[usize::from(value.weekday().number_days_from_monday())];
            text_width(name, width)
        });
        let month_index = usize::from(u8::from(value.month())) - 1;
        let day = o.day.map(|width| numeric_width(i64::from(value.day()), width));
        let year = o.year.map(|width| match width {
            Width::TwoDigit => format!("{:02}", value.year().rem_euclid(100)),
            Width::Numeric | Width::Short | Width::Long | Width::Narrow => {
                value.year().to_string()
            }
        });
        let era = o.era.map(|width| {
            let ad = value.year() > 0;
            match (width, ad) {
                (Width::Long, true) => "Anno Domini",
                (Width::Long, false) => "Before Christ",
                (Width::Narrow, true) => "A",
                (Width::Narrow, false) => "B",
                (_, true) => "AD",
                (_, false) => "BC",
            }
        });

        let date = match o.month {
            Some(width) if width.is_textual() => {
                let month = text_width(MONTHS_LONG[month_index], width);
                let month_day = match day {
                    Some(day) => format!("{month} {day}"),
                    None => month,
                };
                join_present(&[Some(month_day), year], ", ")
            }
            Some(width) => {
                let month = numeric_width(month_index as i64 + 1, width);
                join_present(&[Some(month), day, year], "/")
            }
            None => join_present(&[day, year], "/"),
        };
        let date = match era {
            Some(era) if !date.is_empty() => format!("{date} {era}"),
            Some(era) => era.to_string(),
            None => date,
        };
        non_empty(join_present(&[weekday, non_empty(date)], ", "))
    }

    fn format_time(&self, value: &OffsetDateTime) -> Option<String> {
        let o = &self.options;
        if o.hour.is_none() && o.minute.is_none() && o.second.is_none() {
            return None;
        }
        let cycle = match (o.hour12, o.hour_cycle) {
            (Some(true), Some(cycle @ (HourCycle::H11 | HourCycle::H12))) => cycle,
            (Some(true), _) => HourCycle::H12,
            (Some(false), Some(cycle @ (HourCycle::H23 | HourCycle::H24))) => cycle,
            (Some(false), _) => HourCycle::H23,
            (None, Some(cycle)) => cycle,
            (None, None) => HourCycle::H12,
        };
        let hour24 = i64::from(value.hour());
        let (hour, period) = match cycle {
            HourCycle::H12 => {
                let h = hour24.rem_euclid(12);
                (if h == 0 { 12 } else { h }, Some(day_period(hour24)))
            }
            HourCycle::H11 => (hour24.rem_euclid(12), Some(day_period(hour24))),
            HourCycle::H23 => (hour24, None),
            HourCycle::H24 => (if hour24 == 0 { 24 } else { hour24 }, None),
        };

        let mut fields = Vec::new();
        if let Some(width) = o.hour {
            let width = if period.is_none() { Width::TwoDigit } else { width };
            fields.push(numeric_width(hour, width));
        }
        if let Some(width) = o.minute {
            let width = if o.hour.is_some() { Width::TwoDigit } else { width };
            fields.push(numeric_width(i64::from(value.minute()), width));
        }
        if let Some(width) = o.second {
            let width = if o.minute.is_some() { Width::TwoDigit } else { width };
            fields.push(numeric_width(i64::from(value.second()), width));
        }
        let mut time = fields.join(":");
        if let (Some(period), Some(_)) = (period, o.hour) {
            time.push(' ');
            time.push_str(period);
        }
        if let Some(width) = o.time_zone_name {
            time.push(' ');
            time.push_str(&zone_name(value.offset(), width));
        }
        Some(time)
    }
}

impl DateTimeFormat for BasicDateTimeFormat {
    fn format(&self, value: OffsetDateTime) -> String {
        join_present(&[self.format_date(&value), self.format_time(&value)], ", ")
    }
}

fn day_period(hour24: i64) -> &'static str {
    if hour24 < 12 { "AM" } else { "PM" }
}

fn zone_name(offset: UtcOffset, width: Width) -> String {
    if offset.is_utc() {
        return match width {
            Width::Long => "Coordinated Universal Time".to_string(),
            Width::Numeric | Width::TwoDigit | Width::Short | Width::Narrow => "UTC".to_string(),
        };
    }
    let hours = offset.whole_hours();
    let minutes = offset.minutes_past_hour().abs();
    let sign = if offset.is_negative() { '-' } else { '+' };
    match (width, minutes) {
        (Width::Long, _) => format!("GMT{sign}{:02}:{minutes:02}", hours.abs()),
        (_, 0) => format!("GMT{sign}{}", hours.abs()),
        (_, _) => format!("GMT{sign}{}:{minutes:02}", hours.abs()),
    }
}

fn text_width(name: &str, width: Width) -> String {
    match width {
        Width::Long | Width::Numeric | Width::TwoDigit => name.to_string(),
        Width::Short => name.chars().take(3).collect(),
        Width::Narrow => name.chars().take(1).collect(),
    }
}

fn numeric_width(value: i64, width: Width) -> String {
    match width {
        Width::TwoDigit => format!("{:02}", value.rem_euclid(100)),
        Width::Numeric | Width::Short | Width::Long | Width::Narrow => value.to_string(),
    }
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() { None } else { Some(text) }
}

fn join_present(parts: &[Option<String>], separator: &str) -> String {
    parts
        .iter()
        .flatten()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(separator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn format_with(options: DateTimeFormatOptions) -> String {
        BasicDateTimeFormat::new(options).format(datetime!(2024-03-15 15:04:05 UTC))
    }

    #[test]
    fn default_is_numeric_date() {
        assert_eq!(format_with(DateTimeFormatOptions::default()), "3/15/2024");
    }

    #[test]
    fn long_date_with_weekday() {
        let options = DateTimeFormatOptions {
            weekday: Some(Width::Long),
            month: Some(Width::Long),
            day: Some(Width::Numeric),
            year: Some(Width::Numeric),
            ..Default::default()
        };
        assert_eq!(format_with(options), "Friday, March 15, 2024");
    }

    #[test]
    fn short_time() {
        let options = DateTimeFormatOptions {
            hour: Some(Width::Numeric),
            minute: Some(Width::Numeric),
            ..Default::default()
        };
        assert_eq!(format_with(options), "3:04 PM");
    }

    #[test]
    fn twenty_four_hour_with_zone() {
        let options = DateTimeFormatOptions {
            hour: Some(Width::Numeric),
            minute: Some(Width::Numeric),
            second: Some(Width::Numeric),
            hour_cycle: Some(HourCycle::H23),
            time_zone_name: Some(Width::Short),
            ..Default::default()
        };
        assert_eq!(format_with(options), "15:04:05 UTC");
    }
}

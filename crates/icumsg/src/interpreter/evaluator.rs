//! AST evaluation.
//!
//! Walks a parsed message and produces [`FormatPart`]s:
//! - Literals pass through
//! - Arguments stringify primitives and pass other values through as objects
//! - Number, date, and time elements resolve a style and format via the cache
//! - Plural and select pick a branch and recurse
//! - Tags format their children and hand them to the caller's renderer
//!
//! Adjacent literal parts are always merged.

use time::OffsetDateTime;

use crate::interpreter::EvalContext;
use crate::interpreter::error::FormatError;
use crate::intl::{DateTimeFormatOptions, NumberFormatOptions, PluralRulesOptions};
use crate::parser::ast::{
    DateTimeStyle, MessageElement, NumberStyle, PluralKind, SelectorOption, Style, find_option,
};
use crate::types::{FormatPart, Value};

/// Format `elements` into parts.
///
/// `ambient` is the offset-adjusted value of the innermost enclosing plural,
/// substituted for `#`. Top-level callers pass `None`.
///
/// # Errors
///
/// Returns an error if:
/// - An argument is missing from the values map
/// - A value has the wrong type for its element (e.g. a tag bound to a string)
/// - A plural or select value matches no branch and there is no `other`
/// - Plural categories are needed but the provider has no plural rules
pub fn format_to_parts(
    elements: &[MessageElement],
    ctx: &EvalContext<'_>,
    ambient: Option<f64>,
) -> Result<Vec<FormatPart>, FormatError> {
    if let [MessageElement::Literal { value, .. }] = elements {
        return Ok(vec![FormatPart::Literal(value.clone())]);
    }
    let mut parts = Vec::new();
    for element in elements {
        match element {
            MessageElement::Literal { value, .. } => push_literal(&mut parts, value.clone()),
            MessageElement::Pound { .. } => {
                if let Some(value) = ambient {
                    let text = ctx
                        .cache
                        .number_format(ctx.locale, &NumberFormatOptions::default())
                        .format(value);
                    push_literal(&mut parts, text);
                }
            }
            MessageElement::Argument { name, .. } => {
                let value = ctx.value(name)?;
                if value.is_primitive() {
                    push_literal(&mut parts, value.to_string());
                } else {
                    parts.push(FormatPart::Object(value.clone()));
                }
            }
            MessageElement::Number { name, style, .. } => {
                let text = format_number(name, style.as_ref(), ctx)?;
                push_literal(&mut parts, text);
            }
            MessageElement::Date { name, style, .. } => {
                let options = date_time_options(style.as_ref(), DateTimeBucket::Date, ctx);
                let text = format_date_time(name, &options, ctx)?;
                push_literal(&mut parts, text);
            }
            MessageElement::Time { name, style, .. } => {
                let options = date_time_options(style.as_ref(), DateTimeBucket::Time, ctx);
                let text = format_date_time(name, &options, ctx)?;
                push_literal(&mut parts, text);
            }
            MessageElement::Tag { name, children, .. } => {
                let render = match ctx.value(name)? {
                    Value::Tag(render) => render,
                    other => {
                        return Err(FormatError::InvalidValueType {
                            name: name.clone(),
                            expected: "function",
                            found: other.kind(),
                        });
                    }
                };
                let children = format_to_parts(children, ctx, ambient)?
                    .into_iter()
                    .map(|part| match part {
                        FormatPart::Literal(text) => Value::String(text),
                        FormatPart::Object(value) => value,
                    })
                    .collect();
                for chunk in render.call(children) {
                    if chunk.is_primitive() {
                        push_literal(&mut parts, chunk.to_string());
                    } else {
                        parts.push(FormatPart::Object(chunk));
                    }
                }
            }
            MessageElement::Select { name, options, .. } => {
                let value = ctx.value(name)?.to_string();
                let branch = find_option(options, &value)
                    .or_else(|| find_option(options, "other"))
                    .ok_or_else(|| invalid_value(name, value.clone(), options))?;
                for part in format_to_parts(&branch.value, ctx, None)? {
                    push_part(&mut parts, part);
                }
            }
            MessageElement::Plural {
                name,
                kind,
                offset,
                options,
                ..
            } => {
                let value = numeric_value(name, ctx.value(name)?)?;
                let adjusted = value - *offset as f64;
                let branch = select_plural_branch(name, *kind, value, adjusted, options, ctx)?;
                for part in format_to_parts(&branch.value, ctx, Some(adjusted))? {
                    push_part(&mut parts, part);
                }
            }
        }
    }
    Ok(parts)
}

/// Picks a plural branch: `=value`, then `=value-offset`, then the locale
/// category of `value-offset`, then `other`.
fn select_plural_branch<'e>(
    name: &str,
    kind: PluralKind,
    value: f64,
    adjusted: f64,
    options: &'e [SelectorOption],
    ctx: &EvalContext<'_>,
) -> Result<&'e SelectorOption, FormatError> {
    let exact = find_option(options, &format!("={value}"))
        .or_else(|| find_option(options, &format!("={adjusted}")));
    if let Some(branch) = exact {
        return Ok(branch);
    }
    let rules = ctx
        .cache
        .plural_rules(ctx.locale, &PluralRulesOptions { kind })
        .ok_or(FormatError::MissingCapability {
            capability: "Intl.PluralRules",
        })?;
    let category = rules.select(adjusted);
    find_option(options, category.as_str())
        .or_else(|| find_option(options, "other"))
        .ok_or_else(|| invalid_value(name, value.to_string(), options))
}

fn format_number(
    name: &str,
    style: Option<&NumberStyle>,
    ctx: &EvalContext<'_>,
) -> Result<String, FormatError> {
    let value = numeric_value(name, ctx.value(name)?)?;
    let options = match style {
        Some(Style::Named(style)) => ctx.styles.number.get(style).cloned().unwrap_or_default(),
        Some(Style::Skeleton(skeleton)) => skeleton.parsed_options.clone(),
        None => NumberFormatOptions::default(),
    };
    let value = value * options.scale.unwrap_or(1.0);
    Ok(ctx.cache.number_format(ctx.locale, &options).format(value))
}

#[derive(Debug, Clone, Copy)]
enum DateTimeBucket {
    Date,
    Time,
}

/// Unstyled dates use the formatter default; unstyled times use `medium`.
fn date_time_options(
    style: Option<&DateTimeStyle>,
    bucket: DateTimeBucket,
    ctx: &EvalContext<'_>,
) -> DateTimeFormatOptions {
    let styles = match bucket {
        DateTimeBucket::Date => &ctx.styles.date,
        DateTimeBucket::Time => &ctx.styles.time,
    };
    let named = |name: &str| styles.get(name).cloned().unwrap_or_default();
    match (style, bucket) {
        (Some(Style::Named(name)), _) => named(name),
        (Some(Style::Skeleton(skeleton)), _) => skeleton.parsed_options.clone(),
        (None, DateTimeBucket::Date) => DateTimeFormatOptions::default(),
        (None, DateTimeBucket::Time) => named("medium"),
    }
}

fn format_date_time(
    name: &str,
    options: &DateTimeFormatOptions,
    ctx: &EvalContext<'_>,
) -> Result<String, FormatError> {
    let date = match ctx.value(name)? {
        Value::Date(date) => *date,
        other => other
            .as_float()
            .and_then(from_epoch_millis)
            .ok_or_else(|| FormatError::InvalidValueType {
                name: name.to_string(),
                expected: "date",
                found: other.kind(),
            })?,
    };
    Ok(ctx.cache.date_time_format(ctx.locale, options).format(date))
}

fn from_epoch_millis(millis: f64) -> Option<OffsetDateTime> {
    if !millis.is_finite() {
        return None;
    }
    let nanos = (millis * 1_000_000.0).round() as i128;
    OffsetDateTime::from_unix_timestamp_nanos(nanos).ok()
}

/// Numbers pass through; strings are accepted when they parse as numbers.
fn numeric_value(name: &str, value: &Value) -> Result<f64, FormatError> {
    let number = match value {
        Value::String(text) => text.trim().parse::<f64>().ok(),
        other => other.as_float(),
    };
    number.ok_or_else(|| FormatError::InvalidValueType {
        name: name.to_string(),
        expected: "number",
        found: value.kind(),
    })
}

fn invalid_value(name: &str, value: String, options: &[SelectorOption]) -> FormatError {
    FormatError::InvalidValue {
        name: name.to_string(),
        value,
        options: options.iter().map(|option| option.selector.clone()).collect(),
    }
}

fn push_part(parts: &mut Vec<FormatPart>, part: FormatPart) {
    match part {
        FormatPart::Literal(text) => push_literal(parts, text),
        object @ FormatPart::Object(_) => parts.push(object),
    }
}

fn push_literal(parts: &mut Vec<FormatPart>, text: String) {
    if let Some(FormatPart::Literal(last)) = parts.last_mut() {
        last.push_str(&text);
    } else {
        parts.push(FormatPart::Literal(text));
    }
}

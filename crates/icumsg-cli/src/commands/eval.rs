//! Implementation of the `icumsg eval` command.

use std::collections::HashMap;
use std::path::PathBuf;

use icumsg::{BuildError, Catalog, FormatPart, Formatted, MessageFormat, Value};
use miette::{miette, IntoDiagnostic};
use serde::Serialize;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::commands::locale_of;
use crate::output::MessageDiagnostic;

/// Arguments for the eval command.
#[derive(Debug, clap::Args)]
pub struct EvalArgs {
    /// Message text to format
    #[arg(long, required_unless_present = "id", conflicts_with = "id")]
    pub message: Option<String>,

    /// Id of a message in --catalog
    #[arg(long, requires = "catalog")]
    pub id: Option<String>,

    /// JSON catalog file holding --id
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Locale to format for (e.g. en, de, ru)
    #[arg(long, default_value = "en")]
    pub locale: String,

    /// Arguments in name=value format (repeatable)
    #[arg(short = 'a', long = "arg", value_parser = parse_key_val)]
    pub args: Vec<(String, String)>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for eval results.
#[derive(Serialize)]
pub struct EvalResult {
    pub result: String,
    /// Present when some argument passed through as an object.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parts: Option<Vec<String>>,
}

/// Parse a key=value argument string.
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let pos = s
        .find('=')
        .ok_or_else(|| format!("invalid argument format '{s}': expected name=value"))?;
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}

/// Integers, floats, booleans, and RFC 3339 timestamps get their own value
/// types; anything else is a string.
fn parse_value(text: String) -> Value {
    if let Ok(n) = text.parse::<i64>() {
        return Value::from(n);
    }
    if let Ok(n) = text.parse::<f64>() {
        return Value::from(n);
    }
    if let Ok(b) = text.parse::<bool>() {
        return Value::from(b);
    }
    if let Ok(date) = OffsetDateTime::parse(&text, &Rfc3339) {
        return Value::from(date);
    }
    Value::from(text)
}

/// Run the eval command.
pub fn run_eval(args: EvalArgs) -> miette::Result<i32> {
    let values: HashMap<String, Value> = args
        .args
        .into_iter()
        .map(|(k, v)| (k, parse_value(v)))
        .collect();

    let result = match (&args.message, &args.id, &args.catalog) {
        (Some(message), _, _) => {
            let format = match MessageFormat::new(message.as_str(), &args.locale) {
                Ok(format) => format,
                Err(BuildError::Parse(e)) => {
                    let diagnostic = MessageDiagnostic::from_parse_error("<message>", message, &e);
                    return Err(diagnostic.into());
                }
                Err(e) => return Err(miette!("{e}")),
            };
            format.format(&values).map_err(|e| e.to_string())
        }
        (None, Some(id), Some(path)) => {
            let mut catalog = Catalog::builder()
                .fallback_locale(locale_of(path))
                .initial_locale(args.locale.clone())
                .build();
            catalog
                .load_file(&locale_of(path), path)
                .map_err(|e| miette!("Failed to load {}: {}", path.display(), e))?;
            catalog.try_format(id, &values).map_err(|e| e.to_string())
        }
        _ => return Err(miette!("either --message or --id with --catalog is required")),
    };

    match result {
        Ok(formatted) => {
            if args.json {
                let output = EvalResult {
                    result: formatted.to_string(),
                    parts: match &formatted {
                        Formatted::Text(_) => None,
                        Formatted::Parts(parts) => {
                            Some(parts.iter().map(FormatPart::to_string).collect())
                        }
                    },
                };
                println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
            } else {
                println!("{formatted}");
            }
            Ok(exitcode::OK)
        }
        Err(e) => {
            if args.json {
                let output = serde_json::json!({
                    "error": e
                });
                eprintln!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
            } else {
                eprintln!("Evaluation error: {e}");
            }
            Ok(exitcode::DATAERR)
        }
    }
}

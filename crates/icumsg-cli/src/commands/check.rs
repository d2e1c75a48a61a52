//! Implementation of the `icumsg check` command.

use std::path::PathBuf;

use icumsg::{parse, Catalog, ParseOptions};
use miette::{IntoDiagnostic, Report};
use serde::Serialize;

use crate::commands::load_catalog_file;
use crate::output::table::{format_check_table, CheckSummary};
use crate::output::MessageDiagnostic;

/// Arguments for the check command.
#[derive(Debug, clap::Args)]
pub struct CheckArgs {
    /// JSON catalog files to check (e.g. en.json)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Treat `<` as text instead of tag markup
    #[arg(long)]
    pub ignore_tag: bool,
}

/// JSON output for one invalid message.
#[derive(Debug, Serialize)]
struct CheckErrorJson {
    file: String,
    id: String,
    message: String,
    line: usize,
    column: usize,
}

/// Run the check command.
pub fn run_check(args: CheckArgs) -> miette::Result<i32> {
    let options = ParseOptions::builder().ignore_tag(args.ignore_tag).build();
    let mut catalog = Catalog::default();
    let mut summaries = Vec::new();
    let mut errors = Vec::new();

    for path in &args.files {
        let locale = load_catalog_file(&mut catalog, path)?;
        let entries = catalog.entries(&locale);
        let mut file_errors = 0;

        for (id, text) in &entries {
            if let Err(e) = parse(text, &options) {
                file_errors += 1;
                let location = e.location();
                if !args.json {
                    let name = format!("{}#{id}", path.display());
                    let diagnostic = MessageDiagnostic::from_parse_error(&name, text, &e);
                    eprintln!("{:?}", Report::new(diagnostic));
                }
                errors.push(CheckErrorJson {
                    file: path.display().to_string(),
                    id: (*id).to_string(),
                    message: e.to_string(),
                    line: location.start.line,
                    column: location.start.column,
                });
            }
        }

        tracing::debug!(path = %path.display(), messages = entries.len(), "checked catalog");
        summaries.push(CheckSummary {
            file: path.display().to_string(),
            messages: entries.len(),
            errors: file_errors,
        });
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&errors).into_diagnostic()?);
    } else {
        println!("{}", format_check_table(&summaries));
    }

    if errors.is_empty() {
        Ok(exitcode::OK)
    } else {
        Ok(exitcode::DATAERR)
    }
}

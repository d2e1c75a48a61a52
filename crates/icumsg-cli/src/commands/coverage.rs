//! Coverage command implementation.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use clap::Args;
use icumsg::parser::argument_names;
use icumsg::{Catalog, ParseOptions, parse};
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use crate::commands::load_catalog_file;
use crate::output::table::{LocaleCoverage, format_coverage_table};

/// Arguments for the coverage command.
#[derive(Debug, Args)]
pub struct CoverageArgs {
    /// Source catalog file (e.g., en.json).
    #[arg(long)]
    pub source: PathBuf,

    /// Locales to check coverage for (comma-separated).
    #[arg(long, value_delimiter = ',')]
    pub lang: Vec<String>,

    /// Directory containing translation catalogs. Defaults to the source file directory.
    #[arg(long)]
    pub translations: Option<PathBuf>,

    /// Exit with non-zero code if any translation is missing, broken, or mismatched.
    #[arg(long)]
    pub strict: bool,

    /// Output results as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CoverageJson<'a> {
    locale: &'a str,
    translated: usize,
    total: usize,
    missing: &'a [String],
    invalid: &'a [String],
    mismatched: &'a [String],
}

/// Argument names per message id, or `None` for messages that do not parse.
type ArgumentIndex = BTreeMap<String, Option<BTreeSet<String>>>;

fn index_arguments(catalog: &Catalog, locale: &str) -> ArgumentIndex {
    let options = ParseOptions::default();
    catalog
        .entries(locale)
        .into_iter()
        .map(|(id, text)| {
            let names = parse(text, &options).ok().map(|ast| {
                argument_names(&ast)
                    .into_iter()
                    .map(str::to_string)
                    .collect()
            });
            (id.to_string(), names)
        })
        .collect()
}

fn compare(locale: &str, source: &ArgumentIndex, translation: &ArgumentIndex) -> LocaleCoverage {
    let mut coverage = LocaleCoverage {
        locale: locale.to_string(),
        translated: 0,
        missing: Vec::new(),
        invalid: Vec::new(),
        mismatched: Vec::new(),
    };
    for (id, expected) in source {
        match translation.get(id) {
            None => coverage.missing.push(id.clone()),
            Some(None) => coverage.invalid.push(id.clone()),
            Some(Some(found)) => {
                coverage.translated += 1;
                if expected.as_ref().is_some_and(|expected| expected != found) {
                    coverage.mismatched.push(id.clone());
                }
            }
        }
    }
    coverage
}

/// Run the coverage command.
pub fn run_coverage(args: CoverageArgs) -> Result<i32> {
    let mut catalog = Catalog::default();
    let source_locale = load_catalog_file(&mut catalog, &args.source)?;
    let source = index_arguments(&catalog, &source_locale);

    let base_dir = args
        .translations
        .clone()
        .or_else(|| args.source.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."));

    let mut report = Vec::new();
    for lang in &args.lang {
        let path = base_dir.join(format!("{lang}.json"));
        let translation = if path.exists() {
            let locale = load_catalog_file(&mut catalog, &path)?;
            index_arguments(&catalog, &locale)
        } else {
            tracing::debug!(path = %path.display(), "translation catalog not found");
            ArgumentIndex::new()
        };
        report.push(compare(lang, &source, &translation));
    }

    if args.json {
        let rows: Vec<CoverageJson<'_>> = report
            .iter()
            .map(|c| CoverageJson {
                locale: &c.locale,
                translated: c.translated,
                total: source.len(),
                missing: &c.missing,
                invalid: &c.invalid,
                mismatched: &c.mismatched,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows).into_diagnostic()?);
    } else {
        println!("{}", format_coverage_table(source.len(), &report));
        for coverage in &report {
            print_ids("Missing in", &coverage.locale, &coverage.missing);
            print_ids("Unparsable in", &coverage.locale, &coverage.invalid);
            print_ids("Argument mismatch in", &coverage.locale, &coverage.mismatched);
        }
    }

    let incomplete = report.iter().any(LocaleCoverage::has_problems);
    if args.strict && incomplete {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}

fn print_ids(heading: &str, locale: &str, ids: &[String]) {
    if ids.is_empty() {
        return;
    }
    println!("\n{heading} {locale}:");
    for id in ids {
        println!("  - {id}");
    }
}

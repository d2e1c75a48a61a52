//! Table formatting utilities for CLI output.

use comfy_table::{presets, ContentArrangement, Table};

/// How one locale's catalog compares to the source catalog.
pub struct LocaleCoverage {
    pub locale: String,
    /// Source messages with a parsable translation.
    pub translated: usize,
    pub missing: Vec<String>,
    /// Translations that fail to parse.
    pub invalid: Vec<String>,
    /// Translations reading a different set of arguments than the source.
    pub mismatched: Vec<String>,
}

impl LocaleCoverage {
    pub fn has_problems(&self) -> bool {
        !(self.missing.is_empty() && self.invalid.is_empty() && self.mismatched.is_empty())
    }
}

/// Format coverage data as an ASCII table.
pub fn format_coverage_table(source_count: usize, coverage: &[LocaleCoverage]) -> Table {
    let mut table = new_table(vec!["Locale", "Coverage", "Missing", "Invalid", "Mismatched"]);
    for locale in coverage {
        table.add_row(vec![
            locale.locale.clone(),
            format!("{}/{}", locale.translated, source_count),
            locale.missing.len().to_string(),
            locale.invalid.len().to_string(),
            locale.mismatched.len().to_string(),
        ]);
    }
    table
}

/// Count of checked messages and errors per file.
pub struct CheckSummary {
    pub file: String,
    pub messages: usize,
    pub errors: usize,
}

/// Format check results as an ASCII table.
pub fn format_check_table(summaries: &[CheckSummary]) -> Table {
    let mut table = new_table(vec!["File", "Messages", "Errors"]);
    for summary in summaries {
        table.add_row(vec![
            summary.file.clone(),
            summary.messages.to_string(),
            summary.errors.to_string(),
        ]);
    }
    table
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header);
    table
}

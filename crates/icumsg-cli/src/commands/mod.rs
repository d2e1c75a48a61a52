//! CLI command implementations.

mod ast;
mod check;
mod coverage;
mod eval;
mod fmt;

use std::path::Path;

use icumsg::Catalog;
use miette::{miette, Result};

pub use ast::{run_ast, AstArgs};
pub use check::{run_check, CheckArgs};
pub use coverage::{run_coverage, CoverageArgs};
pub use eval::{run_eval, EvalArgs};
pub use fmt::{run_fmt, FmtArgs};

/// The locale a catalog file holds, taken from its stem (`fr.json` -> `fr`).
fn locale_of(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "und".to_string())
}

/// Load one catalog file into `catalog` under its file-stem locale.
fn load_catalog_file(catalog: &mut Catalog, path: &Path) -> Result<String> {
    let locale = locale_of(path);
    catalog
        .load_file(&locale, path)
        .map_err(|e| miette!("Failed to load {}: {}", path.display(), e))?;
    Ok(locale)
}

//! Implementation of the `icumsg ast` command.

use icumsg::{parse, ParseOptions};
use miette::IntoDiagnostic;

use crate::output::MessageDiagnostic;

/// Arguments for the ast command.
#[derive(Debug, clap::Args)]
pub struct AstArgs {
    /// Message text to parse
    pub message: String,

    /// Attach source locations to every element
    #[arg(long)]
    pub locations: bool,

    /// Treat `<` as text instead of tag markup
    #[arg(long)]
    pub ignore_tag: bool,

    /// Keep `::` skeletons unresolved
    #[arg(long)]
    pub raw_skeletons: bool,

    /// Leave `#` in plural branches as pound elements
    #[arg(long)]
    pub keep_pound: bool,
}

/// Run the ast command.
pub fn run_ast(args: AstArgs) -> miette::Result<i32> {
    let options = ParseOptions::builder()
        .capture_location(args.locations)
        .ignore_tag(args.ignore_tag)
        .should_parse_skeleton(!args.raw_skeletons)
        .normalize_hashtag_in_plural(!args.keep_pound)
        .build();

    match parse(&args.message, &options) {
        Ok(ast) => {
            println!("{}", serde_json::to_string_pretty(&ast).into_diagnostic()?);
            Ok(exitcode::OK)
        }
        Err(e) => {
            let diagnostic = MessageDiagnostic::from_parse_error("<message>", &args.message, &e);
            Err(diagnostic.into())
        }
    }
}

//! Implementation of the `icumsg fmt` command.

use icumsg::{parse, print_ast, ParseOptions};

use crate::output::MessageDiagnostic;

/// Arguments for the fmt command.
#[derive(Debug, clap::Args)]
pub struct FmtArgs {
    /// Message text to normalize
    pub message: String,

    /// Exit with a non-zero code if the message is not already normalized
    #[arg(long)]
    pub check: bool,
}

/// Run the fmt command.
pub fn run_fmt(args: FmtArgs) -> miette::Result<i32> {
    // Quoted `#` in plural branches stays literal text
    let options = ParseOptions::builder()
        .normalize_hashtag_in_plural(false)
        .build();
    let ast = parse(&args.message, &options).map_err(|e| {
        MessageDiagnostic::from_parse_error("<message>", &args.message, &e)
    })?;
    let printed = print_ast(&ast);
    println!("{printed}");

    if args.check && printed != args.message {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}

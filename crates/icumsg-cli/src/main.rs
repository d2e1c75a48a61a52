//! icumsg CLI entry point.
//!
//! Provides command-line tools for ICU messages and JSON message catalogs:
//! - `icumsg check` - Validate every message in catalog files
//! - `icumsg eval` - Format a message with arguments
//! - `icumsg ast` - Print the parsed AST as JSON
//! - `icumsg fmt` - Print a message in normalized syntax
//! - `icumsg coverage` - Report translation coverage across locales

mod commands;
mod output;

use std::io::stderr;
use std::process::exit;

use clap::{Parser, Subcommand, ValueEnum};
use commands::{
    run_ast, run_check, run_coverage, run_eval, run_fmt, AstArgs, CheckArgs, CoverageArgs,
    EvalArgs, FmtArgs,
};
use tracing_subscriber::EnvFilter;

/// ICU MessageFormat tools.
#[derive(Debug, Parser)]
#[command(name = "icumsg")]
#[command(about = "ICU MessageFormat tools", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Color output control
    #[arg(long, value_enum, default_value_t = ColorWhen::Auto, global = true)]
    pub color: ColorWhen,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// When to use colored output.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check that every message in JSON catalogs parses
    Check(CheckArgs),
    /// Report translation coverage across locales
    Coverage(CoverageArgs),
    /// Format a message with arguments
    Eval(EvalArgs),
    /// Print the parsed AST of a message as JSON
    Ast(AstArgs),
    /// Print a message in normalized syntax
    Fmt(FmtArgs),
}

impl ColorWhen {
    /// `Auto` leaves detection (TTY, `NO_COLOR`, `FORCE_COLOR`) to owo-colors.
    fn apply(self) {
        match self {
            ColorWhen::Auto => {}
            ColorWhen::Always => owo_colors::set_override(true),
            ColorWhen::Never => owo_colors::set_override(false),
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(stderr)
        .try_init();
}

fn install_report_handler() -> miette::Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))?;
    Ok(())
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    cli.color.apply();
    init_tracing(cli.verbose);
    install_report_handler()?;

    let code = match cli.command {
        Commands::Check(args) => run_check(args),
        Commands::Coverage(args) => run_coverage(args),
        Commands::Eval(args) => run_eval(args),
        Commands::Ast(args) => run_ast(args),
        Commands::Fmt(args) => run_fmt(args),
    }
    .unwrap_or_else(|err| {
        eprintln!("{err:?}");
        exitcode::SOFTWARE
    });
    exit(code)
}

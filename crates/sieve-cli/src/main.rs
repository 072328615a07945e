//! Sieve CLI - batch preparation of customer records.

mod cli;
mod commands;
mod logging;

use clap::Parser;
use cli::{Cli, Commands};
use colored::Colorize;
use sieve::SieveError;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Run {
            input,
            output,
            config,
            format,
            reader,
            summary,
        } => commands::run::run(input, output, config, format, reader, summary, cli.quiet),

        Commands::Check {
            input,
            config,
            reader,
            json,
        } => commands::check::run(input, config, reader, json),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        if let Some(hint) = source_hint(e.as_ref()) {
            eprintln!("{}", hint);
        }
        std::process::exit(1);
    }
}

/// Extra guidance for a missing input file.
fn source_hint(err: &(dyn std::error::Error + 'static)) -> Option<String> {
    match err.downcast_ref::<SieveError>()? {
        SieveError::SourceNotFound { path } => Some(format!(
            "Put a CSV at '{}' with columns: {}",
            path.display(),
            sieve::error::EXPECTED_INPUT_SHAPE
        )),
        _ => None,
    }
}

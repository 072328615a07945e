//! Run command - execute the full pipeline and write the cleaned table.

use std::fs;
use std::path::PathBuf;

use colored::Colorize;
use sieve::{OutputFormat, Sieve};

use super::{build_config, print_summary};
use crate::cli::ReaderArgs;

pub fn run(
    input: PathBuf,
    output: PathBuf,
    config: Option<PathBuf>,
    format: Option<OutputFormat>,
    reader: ReaderArgs,
    summary_path: Option<PathBuf>,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = build_config(config, &reader, format)?;
    let sieve = Sieve::with_config(config);

    let summary = sieve.run(&input, &output)?;

    if let Some(ref path) = summary_path {
        fs::write(path, serde_json::to_string_pretty(&summary)?)?;
    }

    if quiet {
        return Ok(());
    }

    print_summary(&summary);
    println!(
        "{} {} rows to {}",
        "Wrote".green().bold(),
        summary.rows_written.to_string().white().bold(),
        output.display().to_string().white()
    );
    if let Some(path) = summary_path {
        println!("Summary saved to {}", path.display().to_string().cyan());
    }

    Ok(())
}

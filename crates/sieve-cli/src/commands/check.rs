//! Check command - validate and audit a table without writing output.

use std::path::PathBuf;

use colored::Colorize;
use sieve::Sieve;

use super::{build_config, print_summary};
use crate::cli::ReaderArgs;

pub fn run(
    input: PathBuf,
    config: Option<PathBuf>,
    reader: ReaderArgs,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = build_config(config, &reader, None)?;
    let summary = Sieve::with_config(config).check(&input)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    print_summary(&summary);
    if summary.rows_written == 0 {
        println!("{}", "No rows would be written.".yellow());
    } else {
        println!(
            "{} {} rows would be written",
            "Clean:".green().bold(),
            summary.rows_written.to_string().white().bold()
        );
    }

    Ok(())
}

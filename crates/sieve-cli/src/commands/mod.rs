//! CLI command implementations.

pub mod check;
pub mod run;

use std::path::PathBuf;

use colored::Colorize;
use sieve::{OutputFormat, RunSummary, SieveConfig};
use tracing::debug;

use crate::cli::ReaderArgs;

/// Build the effective configuration: file values first, then flag overrides.
pub fn build_config(
    config: Option<PathBuf>,
    reader: &ReaderArgs,
    format: Option<OutputFormat>,
) -> Result<SieveConfig, Box<dyn std::error::Error>> {
    let mut config = match config {
        Some(path) => SieveConfig::load(path)?,
        None => SieveConfig::default(),
    };

    if let Some(delimiter) = reader.delimiter {
        let byte = u8::try_from(delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| format!("Delimiter must be a single ASCII character, got '{}'", delimiter))?;
        config.reader.delimiter = Some(byte);
    }
    if let Some(max_rows) = reader.max_rows {
        config.reader.max_rows = Some(max_rows);
    }
    if reader.no_header {
        config.reader.has_header = false;
    }
    if let Some(format) = format {
        config.output_format = format;
    }

    debug!(
        delimiter = ?config.reader.delimiter.map(char::from),
        has_header = config.reader.has_header,
        max_rows = ?config.reader.max_rows,
        output_format = %config.output_format,
        "resolved configuration"
    );

    Ok(config)
}

/// Print a human-readable run summary.
pub fn print_summary(summary: &RunSummary) {
    println!(
        "{} {} ({} rows, {})",
        "Source".cyan().bold(),
        summary.source.path.display().to_string().white(),
        summary.rows_read,
        summary.source.format
    );
    println!(
        "Dropped {} rows that failed schema validation",
        summary.rows_rejected.to_string().yellow()
    );

    println!();
    println!("{}", "Quality checks:".yellow().bold());
    for (check, count) in summary.quality.iter() {
        let value = if count == 0 {
            count.to_string().green()
        } else {
            count.to_string().red()
        };
        println!("  {:20} {}", check, value);
    }
    println!();

    println!(
        "Removed {} rows failing quality checks",
        summary.rows_removed.to_string().yellow()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_flags_override_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"output_format":"json","reader":{"max_rows":10}}"#)
            .unwrap();

        let reader = ReaderArgs {
            delimiter: Some(';'),
            max_rows: Some(3),
            no_header: true,
        };
        let config = build_config(Some(file.path().to_path_buf()), &reader, None).unwrap();

        assert_eq!(config.output_format, OutputFormat::Json);
        assert_eq!(config.reader.delimiter, Some(b';'));
        assert_eq!(config.reader.max_rows, Some(3));
        assert!(!config.reader.has_header);
    }

    #[test]
    fn test_non_ascii_delimiter_rejected() {
        let reader = ReaderArgs {
            delimiter: Some('§'),
            ..ReaderArgs::default()
        };
        assert!(build_config(None, &reader, None).is_err());
    }
}

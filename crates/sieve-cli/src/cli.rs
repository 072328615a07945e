//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use sieve::OutputFormat;

/// Default input location.
pub const DEFAULT_INPUT: &str = "data/raw_customers.csv";

/// Default output location.
pub const DEFAULT_OUTPUT: &str = "data/clean_customers.csv";

/// Sieve: validate, enrich and clean tabular customer records
#[derive(Parser)]
#[command(name = "sieve")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output (per-row rejections)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full pipeline and write the cleaned table
    Run {
        /// Path to the raw customer table (CSV/TSV)
        #[arg(value_name = "INPUT", default_value = DEFAULT_INPUT)]
        input: PathBuf,

        /// Output path for the cleaned table
        #[arg(short, long, default_value = DEFAULT_OUTPUT)]
        output: PathBuf,

        /// JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output format (csv, tsv, json)
        #[arg(short, long)]
        format: Option<OutputFormat>,

        #[command(flatten)]
        reader: ReaderArgs,

        /// Write the run summary as JSON to this path
        #[arg(long)]
        summary: Option<PathBuf>,
    },

    /// Validate and audit a table without writing output
    Check {
        /// Path to the raw customer table (CSV/TSV)
        #[arg(value_name = "INPUT", default_value = DEFAULT_INPUT)]
        input: PathBuf,

        /// JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        #[command(flatten)]
        reader: ReaderArgs,

        /// Output the summary as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Reader overrides shared by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct ReaderArgs {
    /// Field delimiter (auto-detected when omitted)
    #[arg(short, long)]
    pub delimiter: Option<char>,

    /// Read at most this many data rows
    #[arg(long)]
    pub max_rows: Option<usize>,

    /// Input has no header row; columns are read positionally
    #[arg(long)]
    pub no_header: bool,
}

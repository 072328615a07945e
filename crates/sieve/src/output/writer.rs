//! Tabular and JSON writers for cleaned records.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, SieveError};
use crate::model::{EnrichedRecord, columns};

/// Writes cleaned records to a destination.
pub trait RowWriter {
    /// Write `records` to `destination`, creating parent directories as
    /// needed. Returns the number of records written.
    fn write_rows(&self, destination: &Path, records: &[EnrichedRecord]) -> Result<usize>;
}

/// Output file format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Tsv,
    Json,
}

impl OutputFormat {
    /// Conventional file extension.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Tsv => "tsv",
            OutputFormat::Json => "json",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "tsv" => Ok(OutputFormat::Tsv),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}. Use csv, tsv, or json.", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// One output row. Field order is the output column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleanRow<'a> {
    pub customer_id: i64,
    pub signup_day: u32,
    pub feature_1: f64,
    pub feature_2: f64,
    pub feature_sum: f64,
    pub is_high_value: bool,
    pub country: &'a str,
}

impl<'a> From<&'a EnrichedRecord> for CleanRow<'a> {
    fn from(record: &'a EnrichedRecord) -> Self {
        Self {
            customer_id: record.customer_id(),
            signup_day: record.signup_day(),
            feature_1: record.feature_1(),
            feature_2: record.feature_2(),
            feature_sum: record.feature_sum(),
            is_high_value: record.is_high_value(),
            country: record.country(),
        }
    }
}

/// Writes records to a local file in the configured format.
#[derive(Debug, Clone, Default)]
pub struct FileRowWriter {
    format: OutputFormat,
}

impl FileRowWriter {
    /// Create a writer for the given format.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// The format this writer produces.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    fn write_delimited<W: Write>(
        &self,
        out: W,
        delimiter: u8,
        records: &[EnrichedRecord],
    ) -> Result<()> {
        // Header is written explicitly so an empty result still has one.
        let mut writer = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .from_writer(out);

        writer.write_record(columns::OUTPUT)?;
        for record in records {
            writer.serialize(CleanRow::from(record))?;
        }
        writer
            .flush()
            .map_err(|e| SieveError::Persistence(format!("Failed to flush output: {}", e)))?;
        Ok(())
    }

    fn write_json<W: Write>(&self, out: W, records: &[EnrichedRecord]) -> Result<()> {
        let rows: Vec<CleanRow<'_>> = records.iter().map(CleanRow::from).collect();
        serde_json::to_writer_pretty(out, &rows)?;
        Ok(())
    }
}

impl RowWriter for FileRowWriter {
    fn write_rows(&self, destination: &Path, records: &[EnrichedRecord]) -> Result<usize> {
        if let Some(parent) = destination.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    SieveError::Persistence(format!(
                        "Failed to create directory '{}': {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let file = File::create(destination).map_err(|e| {
            SieveError::Persistence(format!(
                "Failed to create file '{}': {}",
                destination.display(),
                e
            ))
        })?;
        let mut out = BufWriter::new(file);

        match self.format {
            OutputFormat::Csv => self.write_delimited(&mut out, b',', records)?,
            OutputFormat::Tsv => self.write_delimited(&mut out, b'\t', records)?,
            OutputFormat::Json => self.write_json(&mut out, records)?,
        }

        out.flush().map_err(|e| {
            SieveError::Persistence(format!(
                "Failed to write file '{}': {}",
                destination.display(),
                e
            ))
        })?;

        debug!(
            path = %destination.display(),
            format = %self.format,
            rows = records.len(),
            "wrote cleaned records"
        );

        Ok(records.len())
    }
}

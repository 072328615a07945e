//! CSV/TSV reader with delimiter detection.

use std::cmp::Reverse;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;

use super::source::SourceMetadata;
use crate::error::{Result, SieveError};
use crate::model::{RawRow, columns};

/// Delimiters to try when auto-detecting, in tie-break order.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Non-blank lines inspected when auto-detecting.
const SAMPLE_LINES: usize = 10;

/// Reads a source location into raw rows.
pub trait RowReader {
    /// Read every data row of `source`, in file order.
    ///
    /// Fails with [`SieveError::SourceNotFound`] when `source` does not exist.
    fn read_rows(&self, source: &Path) -> Result<(Vec<RawRow>, SourceMetadata)>;
}

/// Reader configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Whether the file has a header row. Headerless files are read
    /// positionally as `customer_id, signup_date, feature_1, feature_2, country`.
    pub has_header: bool,
    /// Maximum rows to read (None = all).
    pub max_rows: Option<usize>,
    /// Quote character.
    pub quote: u8,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            has_header: true,
            max_rows: None,
            quote: b'"',
        }
    }
}

/// Reads delimited text files.
#[derive(Debug, Clone, Default)]
pub struct CsvRowReader {
    config: ReaderConfig,
}

impl CsvRowReader {
    /// Create a reader with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a reader with custom configuration.
    pub fn with_config(config: ReaderConfig) -> Self {
        Self { config }
    }

    /// Parse bytes directly.
    fn parse_bytes(&self, bytes: &[u8], delimiter: u8) -> Result<(Vec<String>, Vec<RawRow>)> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(self.config.has_header)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        let headers: Vec<String> = if self.config.has_header {
            reader
                .byte_headers()?
                .iter()
                .map(|h| String::from_utf8_lossy(h).trim().to_string())
                .collect()
        } else {
            positional_headers()
        };

        if headers.iter().all(|h| h.is_empty()) {
            return Err(SieveError::EmptyData("No columns found".to_string()));
        }

        let mut rows = Vec::new();
        for (row_idx, result) in reader.byte_records().enumerate() {
            if let Some(max) = self.config.max_rows {
                if row_idx >= max {
                    break;
                }
            }

            let record = result?;
            // Short rows leave trailing columns absent; extra cells are dropped.
            let row = RawRow::from_pairs(
                headers
                    .iter()
                    .zip(record.iter())
                    .map(|(h, cell)| (h.clone(), String::from_utf8_lossy(cell).into_owned())),
            );
            rows.push(row);
        }

        Ok((headers, rows))
    }
}

impl RowReader for CsvRowReader {
    fn read_rows(&self, source: &Path) -> Result<(Vec<RawRow>, SourceMetadata)> {
        let mut file = File::open(source).map_err(|e| match e.kind() {
            ErrorKind::NotFound => SieveError::SourceNotFound {
                path: source.to_path_buf(),
            },
            _ => SieveError::Io {
                path: source.to_path_buf(),
                source: e,
            },
        })?;

        let mut contents = Vec::new();
        file.read_to_end(&mut contents).map_err(|e| SieveError::Io {
            path: source.to_path_buf(),
            source: e,
        })?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => detect_delimiter(&contents, self.config.quote)?,
        };

        let (headers, rows) = self.parse_bytes(&contents, delimiter)?;

        let format = match delimiter {
            b'\t' => "tsv",
            b',' => "csv",
            b';' => "csv-semicolon",
            b'|' => "psv",
            _ => "delimited",
        }
        .to_string();

        debug!(
            path = %source.display(),
            format = %format,
            rows = rows.len(),
            "read source table"
        );

        let metadata = SourceMetadata::new(
            source.to_path_buf(),
            hash,
            contents.len() as u64,
            format,
            headers,
            rows.len(),
        );

        Ok((rows, metadata))
    }
}

fn positional_headers() -> Vec<String> {
    columns::REQUIRED_INPUT
        .iter()
        .chain(std::iter::once(&columns::COUNTRY))
        .map(|c| c.to_string())
        .collect()
}

/// Pick the delimiter for `bytes`.
///
/// A first line that splits into every required customer column settles it.
/// Otherwise the candidate present on every sampled line with the steadiest
/// count wins; ties go to the higher count.
fn detect_delimiter(bytes: &[u8], quote: u8) -> Result<u8> {
    let text = String::from_utf8_lossy(bytes);
    let sample: Vec<&str> = text
        .lines()
        .filter(|l| !l.trim().is_empty())
        .take(SAMPLE_LINES)
        .collect();

    let Some(first) = sample.first() else {
        return Err(SieveError::EmptyData("No lines to analyze".to_string()));
    };

    if let Some(&delim) = DELIMITERS
        .iter()
        .find(|&&d| names_required_columns(first, d, quote))
    {
        return Ok(delim);
    }

    let best = DELIMITERS
        .iter()
        .filter_map(|&delim| {
            let (fewest, most) = sample
                .iter()
                .map(|line| count_unquoted(line, delim, quote))
                .fold((usize::MAX, 0), |(lo, hi), c| (lo.min(c), hi.max(c)));
            (fewest > 0).then_some((most - fewest, Reverse(most), delim))
        })
        .min();

    Ok(best.map_or(b',', |(_, _, delim)| delim))
}

fn names_required_columns(line: &str, delimiter: u8, quote: u8) -> bool {
    let quote = quote as char;
    let names: Vec<&str> = line
        .split(delimiter as char)
        .map(|name| name.trim().trim_matches(quote))
        .collect();
    columns::REQUIRED_INPUT
        .iter()
        .all(|required| names.contains(required))
}

/// Delimiter bytes outside quoted sections.
fn count_unquoted(line: &str, delimiter: u8, quote: u8) -> usize {
    line.bytes()
        .fold((0, false), |(count, quoted), b| {
            if b == quote {
                (count, !quoted)
            } else if b == delimiter && !quoted {
                (count + 1, quoted)
            } else {
                (count, quoted)
            }
        })
        .0
}

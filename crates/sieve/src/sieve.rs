//! Main Sieve struct and public API.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Result, SieveError};
use crate::input::{CsvRowReader, ReaderConfig, RowReader, SourceMetadata};
use crate::model::{EnrichedRecord, RawRow, columns};
use crate::output::{FileRowWriter, OutputFormat, RowWriter};
use crate::quality::{QualityAuditor, QualityReport, RowFilter};
use crate::reporter::{Checkpoint, RunReporter, TracingReporter};
use crate::transform::FeatureEnricher;
use crate::validation::{RowRejection, SchemaValidator};

/// Configuration for a Sieve run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SieveConfig {
    /// Reader configuration.
    pub reader: ReaderConfig,
    /// Format of the cleaned output.
    pub output_format: OutputFormat,
}

impl SieveConfig {
    /// Load configuration from a JSON file. Missing keys take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| SieveError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(|e| {
            SieveError::Config(format!("Invalid config '{}': {}", path.display(), e))
        })
    }
}

/// In-memory result of the core stages.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Records that passed every stage, in input order.
    pub records: Vec<EnrichedRecord>,
    /// Rows dropped by schema validation.
    pub rejections: Vec<RowRejection>,
    /// Quality counts over the enriched records, before filtering.
    pub quality: QualityReport,
    /// Number of records that reached the enricher.
    pub rows_enriched: usize,
}

impl PipelineOutput {
    /// Rows dropped by schema validation.
    pub fn rows_rejected(&self) -> usize {
        self.rejections.len()
    }

    /// Enriched records removed by the row filter.
    pub fn rows_removed(&self) -> usize {
        self.rows_enriched.saturating_sub(self.records.len())
    }
}

/// Externally visible summary of a run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Metadata about the source file.
    pub source: SourceMetadata,
    /// Data rows read from the source.
    pub rows_read: usize,
    /// Rows dropped at schema validation.
    pub rows_rejected: usize,
    /// Records produced by the enricher.
    pub rows_enriched: usize,
    /// Quality counts over the enriched records.
    pub quality: QualityReport,
    /// Enriched records removed by the row filter.
    pub rows_removed: usize,
    /// Records written (or that would be written, for a dry run).
    pub rows_written: usize,
    /// Output location. `None` for a dry run.
    pub destination: Option<PathBuf>,
}

/// The pipeline orchestrator.
///
/// Runs validate, enrich, audit and filter in that fixed order. Holds no
/// business logic of its own.
pub struct Sieve {
    config: SieveConfig,
    reader: Box<dyn RowReader>,
    writer: Box<dyn RowWriter>,
    validator: SchemaValidator,
    enricher: FeatureEnricher,
    auditor: QualityAuditor,
    filter: RowFilter,
    reporter: Arc<dyn RunReporter>,
    configured_reader: bool,
    configured_writer: bool,
}

impl Sieve {
    /// Create a Sieve instance with default configuration.
    pub fn new() -> Self {
        Self::with_config(SieveConfig::default())
    }

    /// Create a Sieve instance with custom configuration.
    pub fn with_config(config: SieveConfig) -> Self {
        let reader = CsvRowReader::with_config(config.reader.clone());
        let writer = FileRowWriter::new(config.output_format);

        Self {
            config,
            reader: Box::new(reader),
            writer: Box::new(writer),
            validator: SchemaValidator::new(),
            enricher: FeatureEnricher::new(),
            auditor: QualityAuditor::new(),
            filter: RowFilter::new(),
            reporter: Arc::new(TracingReporter),
            configured_reader: true,
            configured_writer: true,
        }
    }

    /// Replace the row reader.
    ///
    /// The replacement ignores `config().reader`.
    pub fn with_reader(mut self, reader: impl RowReader + 'static) -> Self {
        self.reader = Box::new(reader);
        self.configured_reader = false;
        self
    }

    /// Replace the row writer.
    ///
    /// The replacement ignores `config().output_format`.
    pub fn with_writer(mut self, writer: impl RowWriter + 'static) -> Self {
        self.writer = Box::new(writer);
        self.configured_writer = false;
        self
    }

    /// Replace the checkpoint reporter.
    pub fn with_reporter(mut self, reporter: impl RunReporter + 'static) -> Self {
        self.reporter = Arc::new(reporter);
        self
    }

    /// The configuration the default reader and writer were built from.
    ///
    /// Only describes the collaborators still in place: after
    /// [`Sieve::with_reader`] or [`Sieve::with_writer`] the matching section
    /// no longer reflects what runs. Use [`Sieve::uses_configured_io`] to
    /// tell.
    pub fn config(&self) -> &SieveConfig {
        &self.config
    }

    /// Whether the reader and writer are still the ones built from
    /// [`Sieve::config`].
    pub fn uses_configured_io(&self) -> bool {
        self.configured_reader && self.configured_writer
    }

    /// Read `input`, run every stage and write the clean records to `output`.
    pub fn run(&self, input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<RunSummary> {
        let output = output.as_ref();
        let (source, processed) = self.read_and_process(input.as_ref())?;

        let rows_written = self.writer.write_rows(output, &processed.records)?;
        self.reporter.report(&Checkpoint::Completed {
            rows_written,
            destination: Some(output.to_path_buf()),
        });

        Ok(summarize(source, processed, rows_written, Some(output.to_path_buf())))
    }

    /// Like [`Sieve::run`] but writes nothing.
    pub fn check(&self, input: impl AsRef<Path>) -> Result<RunSummary> {
        let (source, processed) = self.read_and_process(input.as_ref())?;

        let rows_written = processed.records.len();
        self.reporter.report(&Checkpoint::Completed {
            rows_written,
            destination: None,
        });

        Ok(summarize(source, processed, rows_written, None))
    }

    /// Run the core stages over rows already in memory.
    pub fn process(&self, rows: &[RawRow]) -> PipelineOutput {
        let outcome = self.validator.validate(rows);
        self.reporter.report(&Checkpoint::Validated {
            valid: outcome.records.len(),
            rejected: outcome.rejected(),
        });

        let enriched = self.enricher.enrich(&outcome.records);
        let rows_enriched = enriched.len();

        let quality = self.auditor.audit(&enriched);
        self.reporter.report(&Checkpoint::Audited {
            report: quality.clone(),
        });

        let records = self.filter.filter(enriched);
        self.reporter.report(&Checkpoint::Filtered {
            kept: records.len(),
            removed: rows_enriched - records.len(),
        });

        PipelineOutput {
            records,
            rejections: outcome.rejections,
            quality,
            rows_enriched,
        }
    }

    fn read_and_process(&self, input: &Path) -> Result<(SourceMetadata, PipelineOutput)> {
        self.reporter.report(&Checkpoint::Started {
            source: input.to_path_buf(),
        });

        let (rows, source) = self.reader.read_rows(input)?;

        let missing = source.missing_columns(columns::REQUIRED_INPUT);
        if !missing.is_empty() {
            warn!(
                missing = ?missing,
                "source is missing required columns; every row will be rejected"
            );
        }

        Ok((source, self.process(&rows)))
    }
}

impl Default for Sieve {
    fn default() -> Self {
        Self::new()
    }
}

fn summarize(
    source: SourceMetadata,
    processed: PipelineOutput,
    rows_written: usize,
    destination: Option<PathBuf>,
) -> RunSummary {
    RunSummary {
        rows_read: source.row_count,
        rows_rejected: processed.rows_rejected(),
        rows_enriched: processed.rows_enriched,
        rows_removed: processed.rows_removed(),
        quality: processed.quality,
        source,
        rows_written,
        destination,
    }
}

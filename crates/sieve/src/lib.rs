//! Sieve: batch preparation of tabular customer records.
//!
//! Sieve reads raw customer rows, enforces a typed schema, derives features,
//! audits data quality and writes a cleaned table for downstream use.
//!
//! # Pipeline
//!
//! Data flows strictly forward through four stages:
//!
//! - **Validate**: raw rows become [`ValidatedRecord`]s; rows that fail to
//!   coerce are dropped and counted
//! - **Enrich**: each record gains `signup_day`, `feature_sum`,
//!   `is_high_value` and a defaulted `country`
//! - **Audit**: a [`QualityReport`] counts missing and negative features
//! - **Filter**: records with missing or negative features are removed
//!
//! # Example
//!
//! ```no_run
//! use sieve::Sieve;
//!
//! let sieve = Sieve::new();
//! let summary = sieve
//!     .run("data/raw_customers.csv", "data/clean_customers.csv")
//!     .unwrap();
//!
//! println!("Rejected: {}", summary.rows_rejected);
//! println!("Written: {}", summary.rows_written);
//! ```

pub mod error;
pub mod input;
pub mod model;
pub mod output;
pub mod quality;
pub mod reporter;
pub mod transform;
pub mod validation;

mod sieve;

pub use crate::sieve::{PipelineOutput, RunSummary, Sieve, SieveConfig};
pub use error::{CoercionError, InvariantViolation, Result, SieveError};
pub use input::{CsvRowReader, ReaderConfig, RowReader, SourceMetadata};
pub use model::{
    EnrichedFields, EnrichedRecord, FEATURE_SUM_TOLERANCE, HIGH_VALUE_THRESHOLD, RawRow,
    UNKNOWN_COUNTRY, ValidatedRecord,
};
pub use output::{FileRowWriter, OutputFormat, RowWriter};
pub use quality::{QualityAuditor, QualityCheck, QualityReport, RowFilter};
pub use reporter::{Checkpoint, NullReporter, RecordingReporter, RunReporter, TracingReporter};
pub use transform::FeatureEnricher;
pub use validation::{RowRejection, SchemaValidator, ValidationOutcome};

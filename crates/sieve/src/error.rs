//! Error types for the sieve library.

use std::path::PathBuf;
use thiserror::Error;

/// Columns a source file is expected to carry, in order.
pub const EXPECTED_INPUT_SHAPE: &str =
    "customer_id, signup_date, feature_1, feature_2, country (optional)";

/// Main error type for sieve operations.
#[derive(Debug, Error)]
pub enum SieveError {
    /// The input location does not exist. Terminal: the run aborts before any stage.
    #[error(
        "Input file not found: '{path}' (expected a table with columns: {shape})",
        shape = EXPECTED_INPUT_SHAPE
    )]
    SourceNotFound { path: PathBuf },

    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Empty file or no header to read.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Failure writing results.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// An enriched record whose derived fields disagree with its inputs.
    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
}

impl SieveError {
    /// Stable code for each error kind, suitable for scripting.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::SourceNotFound { .. } => "SOURCE_NOT_FOUND",
            Self::Io { .. } => "IO_ERROR",
            Self::Csv(_) => "CSV_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::EmptyData(_) => "EMPTY_DATA",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Persistence(_) => "PERSISTENCE_ERROR",
            Self::Invariant(_) => "INVARIANT_VIOLATION",
        }
    }

    /// Returns true if this error means the input could not be located.
    pub fn is_source_not_found(&self) -> bool {
        matches!(self, Self::SourceNotFound { .. })
    }
}

/// Result type alias for sieve operations.
pub type Result<T> = std::result::Result<T, SieveError>;

/// Why a single raw row could not become a validated record.
///
/// These never abort a run; the validator counts them and drops the row.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoercionError {
    /// The field is absent or its cell is empty.
    #[error("missing value for '{field}'")]
    MissingField { field: &'static str },

    /// The value is not an integer.
    #[error("'{value}' is not an integer")]
    InvalidInteger { value: String },

    /// The value is not a calendar date.
    #[error("'{value}' is not a date (expected YYYY-MM-DD)")]
    InvalidDate { value: String },

    /// The value is not a floating-point number, or is `NaN`.
    #[error("'{value}' is not a number")]
    InvalidFloat { value: String },
}

/// Derived fields of an enriched record disagree with its inputs.
#[derive(Debug, Clone, PartialEq, Error)]
#[error(
    "inconsistent enriched record: feature_1={feature_1}, feature_2={feature_2}, \
     feature_sum={feature_sum}, is_high_value={is_high_value}"
)]
pub struct InvariantViolation {
    pub feature_1: f64,
    pub feature_2: f64,
    pub feature_sum: f64,
    pub is_high_value: bool,
}

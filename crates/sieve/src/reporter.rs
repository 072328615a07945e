//! Checkpoint reporting for pipeline runs.
//!
//! The pipeline announces progress at fixed points through a [`RunReporter`]
//! supplied by the caller. Transform code itself never logs progress.
//!
//! # Example
//!
//! ```no_run
//! use sieve::{Checkpoint, RunReporter, Sieve};
//!
//! struct Stdout;
//!
//! impl RunReporter for Stdout {
//!     fn report(&self, checkpoint: &Checkpoint) {
//!         println!("{:?}", checkpoint);
//!     }
//! }
//!
//! let summary = Sieve::new()
//!     .with_reporter(Stdout)
//!     .run("data/raw_customers.csv", "data/clean_customers.csv")
//!     .unwrap();
//! println!("wrote {} rows", summary.rows_written);
//! ```

use std::path::PathBuf;
use std::sync::Mutex;

use serde::Serialize;
use tracing::info;

use crate::quality::QualityReport;

/// A well-defined point in a pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "checkpoint", rename_all = "snake_case")]
pub enum Checkpoint {
    /// The run is about to read its input.
    Started { source: PathBuf },
    /// Schema validation finished.
    Validated { valid: usize, rejected: usize },
    /// The quality report is ready.
    Audited { report: QualityReport },
    /// Row filtering finished.
    Filtered { kept: usize, removed: usize },
    /// The run finished. `destination` is `None` for dry runs.
    Completed {
        rows_written: usize,
        destination: Option<PathBuf>,
    },
}

impl Checkpoint {
    /// Short stage name.
    pub fn stage(&self) -> &'static str {
        match self {
            Checkpoint::Started { .. } => "started",
            Checkpoint::Validated { .. } => "validated",
            Checkpoint::Audited { .. } => "audited",
            Checkpoint::Filtered { .. } => "filtered",
            Checkpoint::Completed { .. } => "completed",
        }
    }
}

/// Receives pipeline checkpoints.
pub trait RunReporter: Send + Sync {
    /// Called once per checkpoint, in pipeline order.
    fn report(&self, checkpoint: &Checkpoint);
}

/// Emits checkpoints as `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl RunReporter for TracingReporter {
    fn report(&self, checkpoint: &Checkpoint) {
        match checkpoint {
            Checkpoint::Started { source } => {
                info!(source = %source.display(), "loading raw data");
            }
            Checkpoint::Validated { valid, rejected } => {
                info!(valid, rejected, "dropped {} rows that failed schema validation", rejected);
            }
            Checkpoint::Audited { report } => {
                for (check, count) in report.iter() {
                    info!(check, count, "quality check");
                }
            }
            Checkpoint::Filtered { kept, removed } => {
                info!(kept, removed, "filtered rows failing quality checks");
            }
            Checkpoint::Completed {
                rows_written,
                destination: Some(path),
            } => {
                info!(rows_written, destination = %path.display(), "pipeline complete");
            }
            Checkpoint::Completed {
                rows_written,
                destination: None,
            } => {
                info!(rows_written, "pipeline complete (dry run)");
            }
        }
    }
}

/// Discards every checkpoint.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl RunReporter for NullReporter {
    fn report(&self, _checkpoint: &Checkpoint) {}
}

/// Keeps every checkpoint in memory.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    checkpoints: Mutex<Vec<Checkpoint>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Checkpoints seen so far, in order.
    pub fn checkpoints(&self) -> Vec<Checkpoint> {
        self.checkpoints
            .lock()
            .map(|c| c.clone())
            .unwrap_or_default()
    }
}

impl RunReporter for RecordingReporter {
    fn report(&self, checkpoint: &Checkpoint) {
        if let Ok(mut checkpoints) = self.checkpoints.lock() {
            checkpoints.push(checkpoint.clone());
        }
    }
}

impl<R: RunReporter + ?Sized> RunReporter for std::sync::Arc<R> {
    fn report(&self, checkpoint: &Checkpoint) {
        (**self).report(checkpoint)
    }
}

//! Aggregate quality metrics over enriched records.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::model::EnrichedRecord;

/// A single counted quality check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityCheck {
    /// `feature_1` holds no value.
    MissingFeature1,
    /// `feature_2` holds no value.
    MissingFeature2,
    /// `feature_1 < 0`.
    NegativeFeature1,
    /// `feature_2 < 0`.
    NegativeFeature2,
}

impl QualityCheck {
    /// Every check, in report order.
    pub const ALL: [QualityCheck; 4] = [
        QualityCheck::MissingFeature1,
        QualityCheck::MissingFeature2,
        QualityCheck::NegativeFeature1,
        QualityCheck::NegativeFeature2,
    ];

    /// Report key for this check.
    pub fn name(&self) -> &'static str {
        match self {
            QualityCheck::MissingFeature1 => "missing_feature_1",
            QualityCheck::MissingFeature2 => "missing_feature_2",
            QualityCheck::NegativeFeature1 => "negative_feature_1",
            QualityCheck::NegativeFeature2 => "negative_feature_2",
        }
    }

    /// Whether `record` is counted by this check.
    ///
    /// A missing feature is carried as NaN. Schema validation currently
    /// rejects such rows, so the missing checks only fire for records built
    /// outside the validator.
    pub fn matches(&self, record: &EnrichedRecord) -> bool {
        match self {
            QualityCheck::MissingFeature1 => record.feature_1().is_nan(),
            QualityCheck::MissingFeature2 => record.feature_2().is_nan(),
            QualityCheck::NegativeFeature1 => record.feature_1() < 0.0,
            QualityCheck::NegativeFeature2 => record.feature_2() < 0.0,
        }
    }
}

/// Check name to count. Keys always appear in [`QualityCheck::ALL`] order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QualityReport {
    counts: IndexMap<String, usize>,
}

impl QualityReport {
    /// Count for a check.
    pub fn count(&self, check: QualityCheck) -> usize {
        self.get(check.name()).unwrap_or(0)
    }

    /// Count by report key.
    pub fn get(&self, name: &str) -> Option<usize> {
        self.counts.get(name).copied()
    }

    /// Iterate `(name, count)` pairs in report order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

/// Computes a [`QualityReport`]. Read-only: never filters or changes records.
#[derive(Debug, Clone, Copy, Default)]
pub struct QualityAuditor;

impl QualityAuditor {
    /// Create a new auditor.
    pub fn new() -> Self {
        Self
    }

    /// Count each check independently over the full input.
    pub fn audit(&self, records: &[EnrichedRecord]) -> QualityReport {
        let counts = QualityCheck::ALL
            .iter()
            .map(|check| {
                let count = records.iter().filter(|r| check.matches(r)).count();
                (check.name().to_string(), count)
            })
            .collect();

        QualityReport { counts }
    }
}

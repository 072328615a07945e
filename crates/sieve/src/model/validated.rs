//! Strictly typed records produced by the schema validator.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A raw row whose every field has been coerced to its declared type.
///
/// A value of this type only exists when all fields coerced; the validator
/// never emits a partially filled record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatedRecord {
    pub customer_id: i64,
    pub signup_date: NaiveDate,
    pub feature_1: f64,
    pub feature_2: f64,
    /// Left unset when the source had no country; defaulting happens at enrichment.
    pub country: Option<String>,
}

impl ValidatedRecord {
    /// Create a validated record from already typed values.
    pub fn new(
        customer_id: i64,
        signup_date: NaiveDate,
        feature_1: f64,
        feature_2: f64,
        country: Option<String>,
    ) -> Self {
        Self {
            customer_id,
            signup_date,
            feature_1,
            feature_2,
            country,
        }
    }
}

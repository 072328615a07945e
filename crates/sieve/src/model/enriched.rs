//! Records carrying derived features.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::InvariantViolation;

use super::validated::ValidatedRecord;

/// `feature_sum` strictly above this marks a high-value customer.
pub const HIGH_VALUE_THRESHOLD: f64 = 10.0;

/// Country written for records whose source had none.
pub const UNKNOWN_COUNTRY: &str = "UNKNOWN";

/// Allowed drift between `feature_sum` and `feature_1 + feature_2`.
pub const FEATURE_SUM_TOLERANCE: f64 = 1e-6;

/// Plain field bag for an enriched record.
///
/// This is the shape used on the wire; turning it into an [`EnrichedRecord`]
/// goes through the consistency check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedFields {
    pub customer_id: i64,
    pub signup_date: NaiveDate,
    pub signup_day: u32,
    pub feature_1: f64,
    pub feature_2: f64,
    pub feature_sum: f64,
    pub is_high_value: bool,
    pub country: String,
}

/// A validated record plus derived features.
///
/// Invariants, checked on every construction path:
/// - `feature_sum` equals `feature_1 + feature_2` within [`FEATURE_SUM_TOLERANCE`]
/// - `is_high_value == (feature_sum > HIGH_VALUE_THRESHOLD)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "EnrichedFields", into = "EnrichedFields")]
pub struct EnrichedRecord {
    customer_id: i64,
    signup_date: NaiveDate,
    signup_day: u32,
    feature_1: f64,
    feature_2: f64,
    feature_sum: f64,
    is_high_value: bool,
    country: String,
}

impl EnrichedRecord {
    /// Build a record from its fields, rejecting inconsistent derived values.
    pub fn try_new(fields: EnrichedFields) -> Result<Self, InvariantViolation> {
        check_consistency(
            fields.feature_1,
            fields.feature_2,
            fields.feature_sum,
            fields.is_high_value,
        )?;

        Ok(Self {
            customer_id: fields.customer_id,
            signup_date: fields.signup_date,
            signup_day: fields.signup_day,
            feature_1: fields.feature_1,
            feature_2: fields.feature_2,
            feature_sum: fields.feature_sum,
            is_high_value: fields.is_high_value,
            country: fields.country,
        })
    }

    /// Re-run the consistency check.
    ///
    /// Useful for records that crossed a trust boundary by some path other
    /// than deserialization.
    pub fn verify(&self) -> Result<(), InvariantViolation> {
        check_consistency(
            self.feature_1,
            self.feature_2,
            self.feature_sum,
            self.is_high_value,
        )
    }

    pub fn customer_id(&self) -> i64 {
        self.customer_id
    }

    pub fn signup_date(&self) -> NaiveDate {
        self.signup_date
    }

    /// Day of month of `signup_date`.
    pub fn signup_day(&self) -> u32 {
        self.signup_day
    }

    pub fn feature_1(&self) -> f64 {
        self.feature_1
    }

    pub fn feature_2(&self) -> f64 {
        self.feature_2
    }

    pub fn feature_sum(&self) -> f64 {
        self.feature_sum
    }

    pub fn is_high_value(&self) -> bool {
        self.is_high_value
    }

    /// Source country, or [`UNKNOWN_COUNTRY`].
    pub fn country(&self) -> &str {
        &self.country
    }

    /// Project back onto the validated fields this record was derived from.
    ///
    /// The country is carried as set, so a defaulted record projects to
    /// `Some("UNKNOWN")`.
    pub fn to_validated(&self) -> ValidatedRecord {
        ValidatedRecord::new(
            self.customer_id,
            self.signup_date,
            self.feature_1,
            self.feature_2,
            Some(self.country.clone()),
        )
    }

    /// Copy the record out into a plain field bag.
    pub fn to_fields(&self) -> EnrichedFields {
        self.clone().into()
    }
}

impl TryFrom<EnrichedFields> for EnrichedRecord {
    type Error = InvariantViolation;

    fn try_from(fields: EnrichedFields) -> Result<Self, Self::Error> {
        Self::try_new(fields)
    }
}

impl From<EnrichedRecord> for EnrichedFields {
    fn from(record: EnrichedRecord) -> Self {
        Self {
            customer_id: record.customer_id,
            signup_date: record.signup_date,
            signup_day: record.signup_day,
            feature_1: record.feature_1,
            feature_2: record.feature_2,
            feature_sum: record.feature_sum,
            is_high_value: record.is_high_value,
            country: record.country,
        }
    }
}

impl EnrichedFields {
    /// Derive every computed field from a validated record.
    pub fn derive(record: &ValidatedRecord) -> Self {
        let feature_sum = record.feature_1 + record.feature_2;
        Self {
            customer_id: record.customer_id,
            signup_date: record.signup_date,
            signup_day: record.signup_date.day(),
            feature_1: record.feature_1,
            feature_2: record.feature_2,
            feature_sum,
            is_high_value: feature_sum > HIGH_VALUE_THRESHOLD,
            country: record
                .country
                .clone()
                .unwrap_or_else(|| UNKNOWN_COUNTRY.to_string()),
        }
    }
}

// NaN sums compare false on both sides and pass, matching how a missing
// feature would have flowed through before filtering.
fn check_consistency(
    feature_1: f64,
    feature_2: f64,
    feature_sum: f64,
    is_high_value: bool,
) -> Result<(), InvariantViolation> {
    let drift = (feature_1 + feature_2 - feature_sum).abs();
    if drift > FEATURE_SUM_TOLERANCE || is_high_value != (feature_sum > HIGH_VALUE_THRESHOLD) {
        return Err(InvariantViolation {
            feature_1,
            feature_2,
            feature_sum,
            is_high_value,
        });
    }
    Ok(())
}

//! Conversion of raw rows into typed records.

use std::fmt;

use tracing::debug;

use super::coerce::{coerce_date, coerce_float, coerce_integer};
use crate::error::CoercionError;
use crate::model::{RawRow, ValidatedRecord, columns};

/// A row dropped during validation.
#[derive(Debug, Clone, PartialEq)]
pub struct RowRejection {
    /// Zero-based index of the row in the input sequence.
    pub row: usize,
    /// First field that failed to coerce.
    pub field: &'static str,
    /// Why it failed.
    pub error: CoercionError,
}

impl fmt::Display for RowRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}: {}: {}", self.row, self.field, self.error)
    }
}

/// Result of validating a batch of raw rows.
#[derive(Debug, Clone, Default)]
pub struct ValidationOutcome {
    /// Surviving records, in input order.
    pub records: Vec<ValidatedRecord>,
    /// Details of every dropped row, in input order.
    pub rejections: Vec<RowRejection>,
}

impl ValidationOutcome {
    /// Number of rows dropped.
    pub fn rejected(&self) -> usize {
        self.rejections.len()
    }

    /// Split into the surviving records and the reject count.
    pub fn into_parts(self) -> (Vec<ValidatedRecord>, usize) {
        let rejected = self.rejected();
        (self.records, rejected)
    }
}

/// Validates raw rows against the customer record schema.
///
/// Each row either becomes a complete [`ValidatedRecord`] or is dropped and
/// counted. A bad row never fails the batch.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaValidator;

impl SchemaValidator {
    /// Create a new validator.
    pub fn new() -> Self {
        Self
    }

    /// Validate every row, preserving the order of survivors.
    pub fn validate(&self, rows: &[RawRow]) -> ValidationOutcome {
        let mut outcome = ValidationOutcome::default();

        for (row_idx, row) in rows.iter().enumerate() {
            match self.validate_row(row) {
                Ok(record) => outcome.records.push(record),
                Err((field, error)) => {
                    let rejection = RowRejection {
                        row: row_idx,
                        field,
                        error,
                    };
                    debug!(%rejection, "dropped row failing schema validation");
                    outcome.rejections.push(rejection);
                }
            }
        }

        outcome
    }

    /// Coerce a single row. All fields must succeed.
    pub fn validate_row(
        &self,
        row: &RawRow,
    ) -> Result<ValidatedRecord, (&'static str, CoercionError)> {
        let customer_id = field(row, columns::CUSTOMER_ID, coerce_integer)?;
        let signup_date = field(row, columns::SIGNUP_DATE, coerce_date)?;
        let feature_1 = field(row, columns::FEATURE_1, coerce_float)?;
        let feature_2 = field(row, columns::FEATURE_2, coerce_float)?;
        let country = row.get(columns::COUNTRY).map(str::to_string);

        Ok(ValidatedRecord::new(
            customer_id,
            signup_date,
            feature_1,
            feature_2,
            country,
        ))
    }
}

fn field<T>(
    row: &RawRow,
    name: &'static str,
    coerce: impl Fn(&str) -> Result<T, CoercionError>,
) -> Result<T, (&'static str, CoercionError)> {
    let value = row
        .get(name)
        .ok_or((name, CoercionError::MissingField { field: name }))?;
    coerce(value).map_err(|e| (name, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn row(id: &str, date: &str, f1: &str, f2: &str) -> RawRow {
        RawRow::new()
            .with("customer_id", id)
            .with("signup_date", date)
            .with("feature_1", f1)
            .with("feature_2", f2)
    }

    #[test]
    fn test_valid_row() {
        let raw = row("1", "2024-03-15", "5.0", "6.0").with("country", "US");
        let record = SchemaValidator::new().validate_row(&raw).unwrap();

        assert_eq!(record.customer_id, 1);
        assert_eq!(record.signup_date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        assert_eq!(record.feature_1, 5.0);
        assert_eq!(record.feature_2, 6.0);
        assert_eq!(record.country.as_deref(), Some("US"));
    }

    #[test]
    fn test_country_left_unset() {
        let record = SchemaValidator::new()
            .validate_row(&row("1", "2024-03-15", "1", "2").with("country", ""))
            .unwrap();
        assert_eq!(record.country, None);
    }

    #[test]
    fn test_null_marker_country_left_unset() {
        let validator = SchemaValidator::new();
        for marker in ["null", "N/A", "None", "nan"] {
            let record = validator
                .validate_row(&row("1", "2024-03-15", "1", "2").with("country", marker))
                .unwrap();
            assert_eq!(record.country, None);
        }
    }

    #[test]
    fn test_null_marker_feature_is_missing() {
        let (field, error) = SchemaValidator::new()
            .validate_row(&row("1", "2024-03-15", "null", "2"))
            .unwrap_err();
        assert_eq!(field, "feature_1");
        assert_eq!(error, CoercionError::MissingField { field: "feature_1" });
    }

    #[test]
    fn test_infinite_feature_accepted() {
        let record = SchemaValidator::new()
            .validate_row(&row("1", "2024-03-15", "inf", "-1e400"))
            .unwrap();
        assert_eq!(record.feature_1, f64::INFINITY);
        assert_eq!(record.feature_2, f64::NEG_INFINITY);
    }

    #[test]
    fn test_non_numeric_feature_rejected() {
        let (field, error) = SchemaValidator::new()
            .validate_row(&row("1", "2024-03-15", "abc", "2"))
            .unwrap_err();
        assert_eq!(field, "feature_1");
        assert!(matches!(error, CoercionError::InvalidFloat { .. }));
    }

    #[test]
    fn test_missing_feature_rejected() {
        let raw = RawRow::new()
            .with("customer_id", "1")
            .with("signup_date", "2024-03-15")
            .with("feature_1", "1.0");
        let (field, error) = SchemaValidator::new().validate_row(&raw).unwrap_err();
        assert_eq!(field, "feature_2");
        assert_eq!(error, CoercionError::MissingField { field: "feature_2" });
    }

    #[test]
    fn test_batch_counts_and_order() {
        let rows = vec![
            row("1", "2024-01-01", "1", "1"),
            row("x", "2024-01-02", "1", "1"),
            row("3", "not-a-date", "1", "1"),
            row("4", "2024-01-04", "1", "1"),
            row("5", "2024-01-05", "1", ""),
        ];

        let outcome = SchemaValidator::new().validate(&rows);
        let ids: Vec<i64> = outcome.records.iter().map(|r| r.customer_id).collect();
        assert_eq!(ids, vec![1, 4]);
        assert_eq!(outcome.rejected(), 3);

        let rejected_rows: Vec<usize> = outcome.rejections.iter().map(|r| r.row).collect();
        assert_eq!(rejected_rows, vec![1, 2, 4]);
        assert_eq!(outcome.rejections[0].field, "customer_id");
        assert_eq!(outcome.rejections[1].field, "signup_date");

        let (records, rejected) = outcome.into_parts();
        assert_eq!(records.len(), 2);
        assert_eq!(rejected, 3);
    }

    #[test]
    fn test_empty_input() {
        let outcome = SchemaValidator::new().validate(&[]);
        assert!(outcome.records.is_empty());
        assert_eq!(outcome.rejected(), 0);
    }
}

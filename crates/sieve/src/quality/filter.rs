//! Hard quality predicates applied before output.

use crate::model::EnrichedRecord;

/// Drops enriched records that fail the hard quality predicates.
///
/// A record is kept only when both features hold a value and neither is
/// negative. Kept records pass through unchanged and in their original order.
#[derive(Debug, Clone, Copy, Default)]
pub struct RowFilter;

impl RowFilter {
    /// Create a new filter.
    pub fn new() -> Self {
        Self
    }

    /// Whether a record satisfies every predicate.
    pub fn passes(&self, record: &EnrichedRecord) -> bool {
        let (f1, f2) = (record.feature_1(), record.feature_2());
        !f1.is_nan() && !f2.is_nan() && f1 >= 0.0 && f2 >= 0.0
    }

    /// Keep the records that pass.
    pub fn filter(&self, records: Vec<EnrichedRecord>) -> Vec<EnrichedRecord> {
        records.into_iter().filter(|r| self.passes(r)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ValidatedRecord;
    use crate::transform::FeatureEnricher;
    use chrono::NaiveDate;

    fn enriched(id: i64, f1: f64, f2: f64) -> EnrichedRecord {
        FeatureEnricher::new().enrich_record(&ValidatedRecord::new(
            id,
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            f1,
            f2,
            Some("FR".to_string()),
        ))
    }

    #[test]
    fn test_drops_negative_features() {
        let kept = RowFilter::new().filter(vec![
            enriched(1, -1.0, 2.0),
            enriched(2, 1.0, 2.0),
            enriched(3, 1.0, -0.001),
        ]);
        let ids: Vec<i64> = kept.iter().map(|r| r.customer_id()).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn test_keeps_zero() {
        assert!(RowFilter::new().passes(&enriched(1, 0.0, 0.0)));
    }

    #[test]
    fn test_drops_missing_features() {
        let filter = RowFilter::new();
        assert!(!filter.passes(&enriched(1, f64::NAN, 1.0)));
        assert!(!filter.passes(&enriched(1, 1.0, f64::NAN)));
    }

    #[test]
    fn test_preserves_order_and_values() {
        let input = vec![enriched(5, 3.0, 9.0), enriched(4, -2.0, 1.0), enriched(3, 0.5, 0.5)];
        let kept = RowFilter::new().filter(input.clone());
        assert_eq!(kept, vec![input[0].clone(), input[2].clone()]);
    }
}

//! Feature enrichment of validated records.

use crate::model::{EnrichedFields, EnrichedRecord, ValidatedRecord};

/// Computes derived features for validated records.
///
/// Total over its input: every validated record yields exactly one enriched
/// record, in the same order.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureEnricher;

impl FeatureEnricher {
    /// Create a new enricher.
    pub fn new() -> Self {
        Self
    }

    /// Enrich every record, preserving order.
    pub fn enrich(&self, records: &[ValidatedRecord]) -> Vec<EnrichedRecord> {
        records.iter().map(|r| self.enrich_record(r)).collect()
    }

    /// Enrich a single record.
    ///
    /// # Panics
    ///
    /// Panics if the derived fields fail the consistency check. The enricher is
    /// the only producer of these records, so a failure here is a bug in
    /// [`EnrichedFields::derive`], not bad data.
    pub fn enrich_record(&self, record: &ValidatedRecord) -> EnrichedRecord {
        match EnrichedRecord::try_new(EnrichedFields::derive(record)) {
            Ok(enriched) => enriched,
            Err(violation) => panic!("feature enricher produced an invalid record: {violation}"),
        }
    }
}

//! Fuzz target for schema validation and enrichment.
//!
//! Splits the input into four cells and pushes them through every core
//! stage. Any panic here means the enricher built an inconsistent record
//! from something the validator accepted.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sieve::{NullReporter, RawRow, Sieve};

fuzz_target!(|data: &[u8]| {
    if data.len() > 10_000 {
        return;
    }

    if let Ok(content) = std::str::from_utf8(data) {
        let mut cells = content.splitn(4, '|');
        let row = RawRow::new()
            .with("customer_id", cells.next().unwrap_or_default())
            .with("signup_date", cells.next().unwrap_or_default())
            .with("feature_1", cells.next().unwrap_or_default())
            .with("feature_2", cells.next().unwrap_or_default());

        let output = Sieve::new().with_reporter(NullReporter).process(&[row]);
        for record in &output.records {
            assert!(record.verify().is_ok());
        }
    }
});

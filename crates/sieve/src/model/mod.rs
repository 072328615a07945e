//! Record types flowing through the pipeline.
//!
//! Each stage owns the type it produces: the reader yields [`RawRow`]s, the
//! schema validator yields [`ValidatedRecord`]s and the feature enricher yields
//! [`EnrichedRecord`]s. Records are plain values and are never mutated after
//! construction.

mod enriched;
mod raw;
mod validated;

pub use enriched::{
    EnrichedFields, EnrichedRecord, FEATURE_SUM_TOLERANCE, HIGH_VALUE_THRESHOLD, UNKNOWN_COUNTRY,
};
pub use raw::RawRow;
pub use validated::ValidatedRecord;

/// Column names shared by the reader, validator and writer.
pub mod columns {
    pub const CUSTOMER_ID: &str = "customer_id";
    pub const SIGNUP_DATE: &str = "signup_date";
    pub const SIGNUP_DAY: &str = "signup_day";
    pub const FEATURE_1: &str = "feature_1";
    pub const FEATURE_2: &str = "feature_2";
    pub const FEATURE_SUM: &str = "feature_sum";
    pub const IS_HIGH_VALUE: &str = "is_high_value";
    pub const COUNTRY: &str = "country";

    /// Columns every input row must provide.
    pub const REQUIRED_INPUT: &[&str] = &[CUSTOMER_ID, SIGNUP_DATE, FEATURE_1, FEATURE_2];

    /// Columns of the cleaned output, in write order.
    pub const OUTPUT: &[&str] = &[
        CUSTOMER_ID,
        SIGNUP_DAY,
        FEATURE_1,
        FEATURE_2,
        FEATURE_SUM,
        IS_HIGH_VALUE,
        COUNTRY,
    ];
}

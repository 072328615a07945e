//! Data-quality auditing and filtering of enriched records.

mod auditor;
mod filter;

pub use auditor::{QualityAuditor, QualityCheck, QualityReport};
pub use filter::RowFilter;

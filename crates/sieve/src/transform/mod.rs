//! Derived feature computation.

mod enricher;

pub use enricher::FeatureEnricher;

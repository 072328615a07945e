//! Schema validation of raw rows.

mod coerce;
mod schema;

pub use coerce::{coerce_date, coerce_float, coerce_integer};
pub use schema::{RowRejection, SchemaValidator, ValidationOutcome};

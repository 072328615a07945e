//! Reading source tables into raw rows.

mod reader;
mod source;

pub use reader::{CsvRowReader, ReaderConfig, RowReader};
pub use source::SourceMetadata;

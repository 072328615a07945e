//! Writing cleaned records to storage.

mod writer;

pub use writer::{CleanRow, FileRowWriter, OutputFormat, RowWriter};

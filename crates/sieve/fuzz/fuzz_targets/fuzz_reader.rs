//! Fuzz target for the row reader.
//!
//! Arbitrary bytes are written to a file and read back; the reader and the
//! core stages must never panic, whatever the delimiter or encoding.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sieve::{CsvRowReader, NullReporter, RowReader, Sieve};
use std::io::Write;

fuzz_target!(|data: &[u8]| {
    // Only process reasonable-sized inputs to avoid OOM
    if data.len() > 100_000 {
        return;
    }

    if let Ok(mut temp_file) = tempfile::NamedTempFile::new() {
        if temp_file.write_all(data).is_ok() {
            if let Ok((rows, _)) = CsvRowReader::new().read_rows(temp_file.path()) {
                let _ = Sieve::new().with_reporter(NullReporter).process(&rows);
            }
        }
    }
});

//! Untyped input rows.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A row as read from the source table: column name to cell text.
///
/// No typing is enforced here. Column order follows the source header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRow {
    cells: IndexMap<String, String>,
}

impl RawRow {
    /// Create an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a row from header/value pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            cells: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Set a cell, returning the row.
    pub fn with(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(column, value);
        self
    }

    /// Set a cell, replacing any previous value for the column.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.cells.insert(column.into(), value.into());
    }

    /// Get the trimmed cell text for a column.
    ///
    /// Returns `None` when the column is absent or the cell is blank or a
    /// null marker (see [`RawRow::is_null_value`]).
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .get(column)
            .map(|v| v.trim())
            .filter(|v| !Self::is_null_value(v))
    }

    /// Check if cell text stands for a missing value.
    ///
    /// `NA` is not a marker here; it is the ISO code for Namibia.
    pub fn is_null_value(value: &str) -> bool {
        let trimmed = value.trim();
        trimmed.is_empty()
            || trimmed.eq_ignore_ascii_case("n/a")
            || trimmed.eq_ignore_ascii_case("null")
            || trimmed.eq_ignore_ascii_case("none")
            || trimmed.eq_ignore_ascii_case("nil")
            || trimmed.eq_ignore_ascii_case("nan")
            || trimmed == "."
            || trimmed == "-"
    }

    /// Column names present in this row, in source order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(|k| k.as_str())
    }

    /// Number of cells in the row.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true if the row has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_trims_and_treats_blank_as_absent() {
        let row = RawRow::new()
            .with("customer_id", " 42 ")
            .with("country", "   ");

        assert_eq!(row.get("customer_id"), Some("42"));
        assert_eq!(row.get("country"), None);
        assert_eq!(row.get("feature_1"), None);
    }

    #[test]
    fn test_null_markers_read_as_absent() {
        for marker in ["null", "NULL", "N/A", "n/a", "None", "nil", "nan", "NaN", ".", "-"] {
            let row = RawRow::new().with("country", marker);
            assert_eq!(row.get("country"), None, "marker {marker:?}");
        }

        let row = RawRow::new().with("country", "NA");
        assert_eq!(row.get("country"), Some("NA"));
    }

    #[test]
    fn test_columns_keep_insertion_order() {
        let row = RawRow::from_pairs([("b", "1"), ("a", "2"), ("c", "3")]);
        let columns: Vec<&str> = row.columns().collect();
        assert_eq!(columns, vec!["b", "a", "c"]);
        assert_eq!(row.len(), 3);
    }
}

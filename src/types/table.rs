//! Rectangular table extracted from the first sheet of a workbook

use serde::{Deserialize, Serialize};

/// A rectangular table: one header row plus zero or more data rows.
///
/// All rows are padded to the same column count when the table is built, so
/// consumers may assume a rectangle even if the source sheet had short rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetTable {
    /// Column titles from the sheet's first row
    pub header: Vec<String>,
    /// Data rows, each with `header.len()` cells
    pub rows: Vec<Vec<String>>,
}

impl SheetTable {
    /// Build a table from raw sheet rows, treating the first row as the
    /// header. Short rows are padded with empty cells to the widest row.
    pub fn from_rows(mut raw: Vec<Vec<String>>) -> Self {
        let width = raw.iter().map(|r| r.len()).max().unwrap_or(0);
        for row in &mut raw {
            row.resize(width, String::new());
        }

        let mut iter = raw.into_iter();
        let header = iter.next().unwrap_or_default();
        Self {
            header,
            rows: iter.collect(),
        }
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.header.len()
    }

    /// True when the sheet had no rows at all
    pub fn is_empty(&self) -> bool {
        self.header.is_empty() && self.rows.is_empty()
    }
}

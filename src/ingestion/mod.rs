//! Workbook parsing and delimited-text encoding
//!
//! Uploads arrive as workbook bytes (xlsx/xls/ods). Only the first sheet is
//! read. The sheet becomes a [`SheetTable`], which is then encoded as CSV
//! for storage: comma delimiter, `"` quoting for fields containing the
//! delimiter, a quote or a newline, `\n` line terminator.

use calamine::Reader;
use std::io::Cursor;

use crate::config::HeaderMode;
use crate::error::{Error, Result};
use crate::storage::FileRepository;
use crate::types::SheetTable;

/// Parses uploaded workbooks and writes their encoded tables to storage
#[derive(Clone, Copy)]
pub struct IngestPipeline {
    header_mode: HeaderMode,
}

impl IngestPipeline {
    /// Create a pipeline with the given header handling
    pub fn new(header_mode: HeaderMode) -> Self {
        Self { header_mode }
    }

    /// Parse a workbook, encode its first sheet and store it under `name`.
    ///
    /// Returns the storage row ID. Storage failures propagate unchanged.
    pub fn ingest(&self, repository: &FileRepository, name: &str, data: &[u8]) -> Result<i64> {
        let table = parse_workbook(name, data)?;
        let encoded = encode_table(&table, self.header_mode);

        let id = repository.put(name, &encoded)?;
        tracing::info!(
            "Ingested '{}': {} data rows x {} columns ({} bytes stored)",
            name,
            table.rows.len(),
            table.width(),
            encoded.len()
        );
        Ok(id)
    }

    /// Parse and encode without storing; used by the upload handler to
    /// report row/column counts.
    pub fn prepare(&self, name: &str, data: &[u8]) -> Result<(SheetTable, Vec<u8>)> {
        let table = parse_workbook(name, data)?;
        let encoded = encode_table(&table, self.header_mode);
        Ok((table, encoded))
    }
}

/// Parse the first sheet of a workbook into a table.
///
/// Fails when the bytes are not a readable workbook or the workbook has no
/// sheets. Cell values are stringified locale-independently.
pub fn parse_workbook(filename: &str, data: &[u8]) -> Result<SheetTable> {
    let cursor = Cursor::new(data);
    let mut workbook = calamine::open_workbook_auto_from_rs(cursor)
        .map_err(|e| Error::parse(filename, e.to_string()))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| Error::parse(filename, "workbook has no sheets"))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| Error::parse(filename, format!("cannot read sheet '{}': {}", sheet_name, e)))?;

    let raw: Vec<Vec<String>> = range
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect();

    Ok(SheetTable::from_rows(raw))
}

/// Stringify one cell the same way for every locale
fn cell_to_string(cell: &calamine::Data) -> String {
    match cell {
        calamine::Data::Empty => String::new(),
        calamine::Data::String(s) => s.clone(),
        calamine::Data::Float(f) => f.to_string(),
        calamine::Data::Int(i) => i.to_string(),
        calamine::Data::Bool(b) => b.to_string(),
        calamine::Data::DateTime(dt) => dt.to_string(),
        calamine::Data::DateTimeIso(s) => s.clone(),
        calamine::Data::DurationIso(s) => s.clone(),
        calamine::Data::Error(e) => format!("{:?}", e),
    }
}

/// Encode a table as CSV bytes.
///
/// In [`HeaderMode::Strip`] only the data rows are written and the column
/// titles are irrecoverably lost; in [`HeaderMode::Preserve`] the header is
/// written as the first record.
pub fn encode_table(table: &SheetTable, header_mode: HeaderMode) -> Vec<u8> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    if header_mode == HeaderMode::Preserve && !table.header.is_empty() {
        // Writing to a Vec cannot fail
        let _ = writer.write_record(&table.header);
    }
    for row in &table.rows {
        let _ = writer.write_record(row);
    }

    writer.into_inner().unwrap_or_default()
}

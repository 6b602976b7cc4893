//! Combined report generation
//!
//! Takes an ordered selection of stored file names, decodes each blob back
//! into a table and renders one Word table section per file into a single
//! .docx document. The document is built in memory and returned as bytes;
//! nothing is written to disk, so concurrent report requests cannot clobber
//! each other.

use docx_rs::{Docx, Paragraph, Run, Table, TableCell, TableRow};
use std::io::Cursor;

use crate::config::MissingFilePolicy;
use crate::error::{Error, Result};
use crate::storage::FileRepository;

/// Suggested filename for generated reports
pub const REPORT_FILENAME: &str = "combined_report.docx";

/// Media type of the generated document
pub const REPORT_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// One decoded table section destined for the report.
///
/// The stored blob is re-read header-first: `titles` is whatever the blob's
/// first record holds. When ingestion stripped the original header (the
/// legacy mode) that record is really the first data row, so the section's
/// titles are data values and that row is absent from `rows`. This mirrors
/// the source system exactly and is corrected only when ingestion runs in
/// preserve mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSection {
    /// Name of the stored file this section came from
    pub name: String,
    /// Title row (the blob's first record)
    pub titles: Vec<String>,
    /// Remaining records, padded or truncated to the title row's width
    pub rows: Vec<Vec<String>>,
}

/// Builds combined .docx reports from stored files
pub struct ReportBuilder {
    missing_files: MissingFilePolicy,
}

impl ReportBuilder {
    /// Create a builder with the given missing-file policy
    pub fn new(missing_files: MissingFilePolicy) -> Self {
        Self { missing_files }
    }

    /// Fetch, decode and render the selected files into one document.
    ///
    /// Names are processed in order; duplicates each produce their own
    /// section. Under [`MissingFilePolicy::Skip`] absent names are skipped
    /// silently; under [`MissingFilePolicy::Strict`] the first miss aborts
    /// the whole report. An empty or all-missing selection yields a valid
    /// zero-section document.
    pub fn build(&self, repository: &FileRepository, selected: &[String]) -> Result<Vec<u8>> {
        let sections = self.collect_sections(repository, selected)?;
        render_docx(&sections)
    }

    /// Fetch and decode the selected files without rendering
    pub fn collect_sections(
        &self,
        repository: &FileRepository,
        selected: &[String],
    ) -> Result<Vec<ReportSection>> {
        let mut sections = Vec::new();

        for name in selected {
            let blob = match repository.get(name) {
                Ok(blob) => blob,
                Err(Error::NotFound(_)) => match self.missing_files {
                    MissingFilePolicy::Skip => {
                        tracing::warn!("Report selection '{}' not found, skipping", name);
                        continue;
                    }
                    MissingFilePolicy::Strict => {
                        return Err(Error::NotFound(name.clone()));
                    }
                },
                // Storage failures always abort, regardless of policy
                Err(e) => return Err(e),
            };

            sections.push(decode_section(name, &blob)?);
        }

        Ok(sections)
    }
}

/// Decode one stored blob into a section, treating the first record as the
/// title row.
fn decode_section(name: &str, blob: &[u8]) -> Result<ReportSection> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(blob);

    let titles: Vec<String> = reader
        .headers()
        .map_err(|e| Error::parse(name, format!("stored blob is not valid delimited text: {}", e)))?
        .iter()
        .map(str::to_string)
        .collect();

    let width = titles.len();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| {
            Error::parse(name, format!("stored blob is not valid delimited text: {}", e))
        })?;
        let mut row: Vec<String> = record.iter().map(str::to_string).collect();
        // Every row conforms to the title width, so each rendered table is
        // exactly (rows + 1) x width
        row.resize(width, String::new());
        rows.push(row);
    }

    Ok(ReportSection {
        name: name.to_string(),
        titles,
        rows,
    })
}

/// Render sections into .docx bytes.
///
/// Each section becomes one `(rows + 1) x cols` table: row 0 holds the
/// titles, the rest the data rows.
fn render_docx(sections: &[ReportSection]) -> Result<Vec<u8>> {
    let mut docx = Docx::new();

    for section in sections {
        let mut table_rows = Vec::with_capacity(section.rows.len() + 1);
        table_rows.push(docx_row(&section.titles));
        for row in &section.rows {
            table_rows.push(docx_row(row));
        }

        docx = docx.add_table(Table::new(table_rows));
        // Blank paragraph keeps adjacent tables from merging in Word
        docx = docx.add_paragraph(Paragraph::new());
    }

    let mut buffer = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buffer)
        .map_err(|e| Error::internal(format!("Failed to pack report document: {}", e)))?;

    Ok(buffer.into_inner())
}

fn docx_row(cells: &[String]) -> TableRow {
    TableRow::new(
        cells
            .iter()
            .map(|text| {
                TableCell::new().add_paragraph(Paragraph::new().add_run(Run::new().add_text(text)))
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo_with(files: &[(&str, &[u8])]) -> FileRepository {
        let repo = FileRepository::in_memory().unwrap();
        for (name, content) in files {
            repo.put(name, content).unwrap();
        }
        repo
    }

    #[test]
    fn legacy_blob_promotes_first_data_row_to_titles() {
        // "a" ingested from header ["Name","Age"] with rows Alice/Bob in
        // strip mode stores only the data rows; the header-first re-parse
        // then reads Alice as the title row.
        let repo = repo_with(&[("a", b"Alice,30\nBob,25\n")]);
        let builder = ReportBuilder::new(MissingFilePolicy::Skip);

        let sections = builder
            .collect_sections(&repo, &["a".to_string()])
            .unwrap();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].titles, vec!["Alice", "30"]);
        assert_eq!(sections[0].rows, vec![vec!["Bob", "25"]]);
    }

    #[test]
    fn preserved_blob_round_trips_correctly() {
        let repo = repo_with(&[("a", b"Name,Age\nAlice,30\nBob,25\n")]);
        let builder = ReportBuilder::new(MissingFilePolicy::Skip);

        let sections = builder
            .collect_sections(&repo, &["a".to_string()])
            .unwrap();
        assert_eq!(sections[0].titles, vec!["Name", "Age"]);
        assert_eq!(
            sections[0].rows,
            vec![vec!["Alice", "30"], vec!["Bob", "25"]]
        );
    }

    #[test]
    fn skip_policy_drops_missing_names() {
        let repo = repo_with(&[("a", b"Alice,30\nBob,25\n")]);
        let builder = ReportBuilder::new(MissingFilePolicy::Skip);

        let sections = builder
            .collect_sections(&repo, &["a".to_string(), "missing".to_string()])
            .unwrap();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].name, "a");
    }

    #[test]
    fn strict_policy_aborts_on_missing_name() {
        let repo = repo_with(&[("a", b"Alice,30\n")]);
        let builder = ReportBuilder::new(MissingFilePolicy::Strict);

        match builder.collect_sections(&repo, &["a".to_string(), "missing".to_string()]) {
            Err(Error::NotFound(name)) => assert_eq!(name, "missing"),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn empty_selection_builds_a_valid_empty_document() {
        let repo = repo_with(&[]);
        let builder = ReportBuilder::new(MissingFilePolicy::Skip);

        let bytes = builder.build(&repo, &[]).unwrap();
        // A .docx file is a zip archive
        assert_eq!(&bytes[..2], b"PK");

        let doc = docx_rs::read_docx(&bytes).unwrap();
        let tables = doc
            .document
            .children
            .iter()
            .filter(|c| matches!(c, docx_rs::DocumentChild::Table(_)))
            .count();
        assert_eq!(tables, 0);
    }

    #[test]
    fn all_missing_selection_builds_a_zero_section_document() {
        let repo = repo_with(&[]);
        let builder = ReportBuilder::new(MissingFilePolicy::Skip);

        let bytes = builder
            .build(&repo, &["x".to_string(), "y".to_string()])
            .unwrap();
        let doc = docx_rs::read_docx(&bytes).unwrap();
        let tables = doc
            .document
            .children
            .iter()
            .filter(|c| matches!(c, docx_rs::DocumentChild::Table(_)))
            .count();
        assert_eq!(tables, 0);
    }

    #[test]
    fn duplicate_selection_gets_one_section_each() {
        let repo = repo_with(&[("a", b"Alice,30\nBob,25\n")]);
        let builder = ReportBuilder::new(MissingFilePolicy::Skip);

        let bytes = builder
            .build(&repo, &["a".to_string(), "a".to_string()])
            .unwrap();
        let doc = docx_rs::read_docx(&bytes).unwrap();
        let tables = doc
            .document
            .children
            .iter()
            .filter(|c| matches!(c, docx_rs::DocumentChild::Table(_)))
            .count();
        assert_eq!(tables, 2);
    }

    #[test]
    fn rendered_document_contains_cell_text() {
        let repo = repo_with(&[("a", b"Alice,30\nBob,25\n")]);
        let builder = ReportBuilder::new(MissingFilePolicy::Skip);

        let bytes = builder.build(&repo, &["a".to_string()]).unwrap();
        let doc = docx_rs::read_docx(&bytes).unwrap();
        let json = serde_json::to_string(&doc.document).unwrap();
        assert!(json.contains("Alice"));
        assert!(json.contains("Bob"));
    }

    #[test]
    fn ragged_blob_rows_are_padded_to_title_width() {
        let repo = repo_with(&[("r", b"a,b,c\n1\n")]);
        let builder = ReportBuilder::new(MissingFilePolicy::Skip);

        let sections = builder
            .collect_sections(&repo, &["r".to_string()])
            .unwrap();
        assert_eq!(sections[0].rows[0], vec!["1", "", ""]);
    }

    #[test]
    fn wide_blob_rows_are_truncated_to_title_width() {
        let repo = repo_with(&[("w", b"a,b\n1,2,3\n")]);
        let builder = ReportBuilder::new(MissingFilePolicy::Skip);

        let sections = builder
            .collect_sections(&repo, &["w".to_string()])
            .unwrap();
        assert_eq!(sections[0].rows[0], vec!["1", "2"]);
    }
}

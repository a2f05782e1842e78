//! CSV export — spreadsheet-ready local backup of a session.
//!
//! The payload is prefixed with the UTF-8 byte-order mark so common
//! spreadsheet tools detect the character set, and filenames embed a
//! timestamp so repeated exports never collide.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::catalog::{QuestionDescriptor, QuestionKind};
use crate::error::ExportError;
use crate::store::{Answer, ResponseStore};

const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// Rendering for unanswered slots.
const ABSENT: &str = "N/A";

/// Delimiter joining multi-select answers in a cell. Distinct from
/// the wire encoding's delimiter.
const EXPORT_MULTI_DELIMITER: &str = "; ";

const TIME_COLUMN: &str = "Submission Time";

/// Export tuning.
#[derive(Debug, Clone, Copy)]
pub struct ExportOptions {
    /// Append a third row re-stating the slot-to-column mapping, for
    /// auditing against the external schema.
    pub audit_row: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self { audit_row: true }
    }
}

/// Serialize the store into the CSV payload: a header row of question
/// titles (one column per catalog entry excluding the welcome screen,
/// with "Submission Time" prepended) and one data row of answers.
pub fn to_table(
    store: &ResponseStore,
    catalog: &[QuestionDescriptor],
    options: ExportOptions,
) -> Result<Vec<u8>, ExportError> {
    to_table_at(store, catalog, options, Local::now())
}

fn to_table_at(
    store: &ResponseStore,
    catalog: &[QuestionDescriptor],
    options: ExportOptions,
    now: DateTime<Local>,
) -> Result<Vec<u8>, ExportError> {
    let columns: Vec<&QuestionDescriptor> = catalog
        .iter()
        .filter(|q| q.kind != QuestionKind::Welcome)
        .collect();

    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header = Vec::with_capacity(columns.len() + 1);
    header.push(TIME_COLUMN.to_string());
    header.extend(columns.iter().map(|q| q.title.clone()));
    writer.write_record(&header)?;

    let mut row = Vec::with_capacity(columns.len() + 1);
    row.push(now.format("%Y-%m-%d %H:%M:%S").to_string());
    row.extend(columns.iter().map(|q| render_answer(store.answer(q.entry_index))));
    writer.write_record(&row)?;

    if options.audit_row {
        let mut audit = Vec::with_capacity(columns.len() + 1);
        audit.push(String::new());
        audit.extend(columns.iter().map(|q| format!("entry {}", q.entry_index)));
        writer.write_record(&audit)?;
    }

    let body = writer
        .into_inner()
        .map_err(|e| ExportError::Buffer(e.to_string()))?;

    let mut payload = Vec::with_capacity(UTF8_BOM.len() + body.len());
    payload.extend_from_slice(UTF8_BOM);
    payload.extend_from_slice(&body);
    Ok(payload)
}

fn render_answer(answer: Option<&Answer>) -> String {
    match answer {
        Some(Answer::Single(s)) => s.clone(),
        Some(Answer::Multi(items)) => items.join(EXPORT_MULTI_DELIMITER),
        None => ABSENT.to_string(),
    }
}

/// Unique artifact name for an export taken at `now`.
pub fn export_filename(now: DateTime<Local>) -> String {
    format!("satm_survey_results_{}.csv", now.format("%Y%m%d_%H%M%S"))
}

/// Write the export into `dir` and return the artifact path.
pub fn write_export(
    store: &ResponseStore,
    catalog: &[QuestionDescriptor],
    options: ExportOptions,
    dir: &Path,
) -> Result<PathBuf, ExportError> {
    let now = Local::now();
    let payload = to_table_at(store, catalog, options, now)?;
    std::fs::create_dir_all(dir)?;
    let path = dir.join(export_filename(now));
    std::fs::write(&path, payload)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::survey_catalog;

    fn sample_store() -> ResponseStore {
        let mut store = ResponseStore::new();
        store.set_answer(1, Answer::single("21-23"));
        store.set_answer(39, Answer::multi(["Reading", "Journaling"]));
        store
    }

    fn rows(payload: &[u8]) -> Vec<Vec<String>> {
        assert_eq!(&payload[..3], UTF8_BOM, "missing byte-order mark");
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(&payload[3..]);
        reader
            .records()
            .map(|r| r.unwrap().iter().map(|f| f.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_export_round_trip() {
        let catalog = survey_catalog();
        let payload = to_table(&sample_store(), &catalog, ExportOptions::default()).unwrap();
        let rows = rows(&payload);
        assert_eq!(rows.len(), 3);

        let header = &rows[0];
        let data = &rows[1];
        assert_eq!(header[0], TIME_COLUMN);
        // One column per catalog entry minus the welcome screen,
        // plus the timestamp column.
        assert_eq!(header.len(), catalog.len());
        assert_eq!(data.len(), header.len());

        // Columns are offset by one for the timestamp: slot n sits at
        // column n.
        assert_eq!(data[1], "21-23");
        assert_eq!(data[39], "Reading; Journaling");
        for (i, cell) in data.iter().enumerate().skip(1) {
            if i != 1 && i != 39 {
                assert_eq!(cell, ABSENT, "column {i} should be absent");
            }
        }
    }

    #[test]
    fn test_export_audit_row_restates_slots() {
        let catalog = survey_catalog();
        let payload = to_table(&sample_store(), &catalog, ExportOptions::default()).unwrap();
        let rows = rows(&payload);
        let audit = &rows[2];
        assert_eq!(audit[0], "");
        assert_eq!(audit[1], "entry 1");
        assert_eq!(audit[audit.len() - 1], "entry 46");
    }

    #[test]
    fn test_export_without_audit_row() {
        let catalog = survey_catalog();
        let payload =
            to_table(&sample_store(), &catalog, ExportOptions { audit_row: false }).unwrap();
        assert_eq!(rows(&payload).len(), 2);
    }

    #[test]
    fn test_export_escapes_embedded_quotes() {
        let catalog = survey_catalog();
        let mut store = ResponseStore::new();
        store.set_answer(41, Answer::single("I feel \"split\" online"));
        let payload = to_table(&store, &catalog, ExportOptions { audit_row: false }).unwrap();

        let text = String::from_utf8(payload[3..].to_vec()).unwrap();
        assert!(text.contains(r#""I feel ""split"" online""#));

        // And it reads back intact.
        let rows = rows(&payload);
        assert_eq!(rows[1][41], "I feel \"split\" online");
    }

    #[test]
    fn test_write_export_creates_timestamped_file() {
        let catalog = survey_catalog();
        let dir = tempfile::tempdir().unwrap();
        let path = write_export(
            &sample_store(),
            &catalog,
            ExportOptions::default(),
            dir.path(),
        )
        .unwrap();
        let name = path.file_name().unwrap().to_string_lossy();
        assert!(name.starts_with("satm_survey_results_"));
        assert!(name.ends_with(".csv"));
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..3], UTF8_BOM);
    }
}

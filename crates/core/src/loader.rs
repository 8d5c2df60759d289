//! CSV mapping-table loader.
//!
//! Reads the EMIS mapping export: comma-separated, UTF-8, one header line,
//! then one data line per mapping with at least six positional fields
//! (`source_code, source_label, target_code, target_label, equivalence, comment`).
//!
//! Duplicate source codes are collapsed as the file is read: the later row in
//! file order wins, but the code keeps its first-occurrence position, so the
//! returned sequence is deterministic for a given input file.

use std::fs::File;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use indexmap::IndexMap;

use crate::{MapError, MapResult};

/// Minimum number of fields a data line must carry.
pub const EXPECTED_FIELDS: usize = 6;

/// Emit a progress line after this many processed rows.
const PROGRESS_INTERVAL: u64 = 1000;

/// One parsed, deduplicated line of the input mapping table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapRow {
    /// Identifier in the EMIS local coding system; the dedup key.
    pub source_code: String,

    /// Display text for the source code.
    pub source_display: String,

    /// Identifier in SNOMED CT.
    pub target_code: String,

    /// Display text for the target code.
    pub target_display: String,

    /// Raw equivalence qualifier token, carried verbatim for classification.
    pub equivalence: String,

    /// Free-text annotation; may be empty.
    pub comment: String,
}

/// Load and deduplicate the mapping table at `path`.
///
/// The header line is skipped. Quoted fields may contain the delimiter or
/// embedded newlines. The reader owns the file handle, so it is closed on
/// every exit path, including early failure.
///
/// # Errors
///
/// Returns [`MapError`] if:
/// - the file cannot be opened (`FileAccess`),
/// - a line cannot be tokenised, e.g. invalid UTF-8 (`Csv`, with line context),
/// - a data line has fewer than [`EXPECTED_FIELDS`] fields (`MalformedRow`,
///   with the offending line number).
pub fn load(path: &Path) -> MapResult<Vec<MapRow>> {
    tracing::info!("processing EMIS mapping file {}", path.display());

    let file = File::open(path).map_err(|source| MapError::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = ReaderBuilder::new()
        .delimiter(b',')
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let mut rows: IndexMap<String, MapRow> = IndexMap::new();
    let mut processed: u64 = 0;

    for result in reader.records() {
        let record = result.map_err(csv_error_with_line)?;
        let line = record.position().map_or(0, |p| p.line());

        if record.len() < EXPECTED_FIELDS {
            return Err(MapError::MalformedRow {
                line,
                found: record.len(),
            });
        }

        let row = MapRow {
            source_code: field(&record, 0, "source_code", line)?,
            source_display: field(&record, 1, "source_label", line)?,
            target_code: field(&record, 2, "target_code", line)?,
            target_display: field(&record, 3, "target_label", line)?,
            equivalence: field(&record, 4, "equivalence", line)?,
            comment: field(&record, 5, "comment", line)?,
        };

        // Overwrite-on-insert: the later row wins, the key keeps its
        // first-occurrence position.
        rows.insert(row.source_code.clone(), row);

        processed += 1;
        if processed % PROGRESS_INTERVAL == 0 {
            tracing::info!("processed {processed} rows");
        }
    }

    tracing::info!("total mapped codes: {}", rows.len());

    Ok(rows.into_values().collect())
}

/// Checked positional field access.
///
/// Unreachable for records that passed the length check above, but short rows
/// must surface as a structured error rather than an indexing fault.
fn field(
    record: &StringRecord,
    index: usize,
    name: &'static str,
    line: u64,
) -> MapResult<String> {
    record
        .get(index)
        .map(str::to_owned)
        .ok_or(MapError::MissingField { line, field: name })
}

fn csv_error_with_line(err: csv::Error) -> MapError {
    let line = err.position().map_or(0, |p| p.line());
    MapError::Csv { line, source: err }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(dir: &tempfile::TempDir, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join("mapping.csv");
        std::fs::write(&path, contents).expect("write test csv");
        path
    }

    #[test]
    fn loads_rows_in_file_order() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = write_csv(
            &dir,
            "source_code,source_label,target_code,target_label,equivalence,comment\n\
             E001,Local label,S100,SCT label,equivalent,\n\
             E002,Local2,S200,SCT2,related,note\n",
        );

        let rows = load(&path).expect("load csv");

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].source_code, "E001");
        assert_eq!(rows[0].source_display, "Local label");
        assert_eq!(rows[0].target_code, "S100");
        assert_eq!(rows[0].equivalence, "equivalent");
        assert_eq!(rows[0].comment, "");
        assert_eq!(rows[1].source_code, "E002");
        assert_eq!(rows[1].comment, "note");
    }

    #[test]
    fn keeps_last_row_for_duplicate_source_codes() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = write_csv(
            &dir,
            "source_code,source_label,target_code,target_label,equivalence,comment\n\
             E003,First label,S300,First target,equivalent,\n\
             E004,Other,S400,Other target,equivalent,\n\
             E003,Second label,S301,Second target,related,replaced\n",
        );

        let rows = load(&path).expect("load csv");

        assert_eq!(rows.len(), 2);
        // Last write wins, first-occurrence position is kept.
        assert_eq!(rows[0].source_code, "E003");
        assert_eq!(rows[0].target_code, "S301");
        assert_eq!(rows[0].source_display, "Second label");
        assert_eq!(rows[0].equivalence, "related");
        assert_eq!(rows[1].source_code, "E004");
    }

    #[test]
    fn honours_quoting_rules() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = write_csv(
            &dir,
            "source_code,source_label,target_code,target_label,equivalence,comment\n\
             E005,\"Pain, severe\",S500,\"Severe pain\",equivalent,\"spans\ntwo lines\"\n",
        );

        let rows = load(&path).expect("load csv");

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].source_display, "Pain, severe");
        assert_eq!(rows[0].comment, "spans\ntwo lines");
    }

    #[test]
    fn fails_on_short_row_with_line_number() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = write_csv(
            &dir,
            "source_code,source_label,target_code,target_label,equivalence,comment\n\
             E001,Local label,S100,SCT label,equivalent,\n\
             E002,Local2,S200\n",
        );

        let err = load(&path).expect_err("should reject short row");
        match err {
            MapError::MalformedRow { line, found } => {
                assert_eq!(line, 3);
                assert_eq!(found, 3);
            }
            other => panic!("expected MalformedRow error, got {other:?}"),
        }
    }

    #[test]
    fn fails_when_file_missing() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("no-such-file.csv");

        let err = load(&path).expect_err("should fail on missing file");
        match err {
            MapError::FileAccess { path: reported, .. } => {
                assert!(reported.ends_with("no-such-file.csv"));
            }
            other => panic!("expected FileAccess error, got {other:?}"),
        }
    }

    #[test]
    fn fails_on_invalid_utf8() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("mapping.csv");
        let mut file = std::fs::File::create(&path).expect("create test csv");
        file.write_all(b"source_code,source_label,target_code,target_label,equivalence,comment\n")
            .expect("write header");
        file.write_all(b"E001,Lo\xff\xfecal,S100,SCT,equivalent,\n")
            .expect("write bad row");
        drop(file);

        let err = load(&path).expect_err("should fail on invalid UTF-8");
        match err {
            MapError::Csv { .. } => {}
            other => panic!("expected Csv error, got {other:?}"),
        }
    }

    #[test]
    fn accepts_rows_with_extra_fields() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = write_csv(
            &dir,
            "source_code,source_label,target_code,target_label,equivalence,comment,extra\n\
             E006,Label,S600,Target,equivalent,,ignored\n",
        );

        let rows = load(&path).expect("load csv");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].source_code, "E006");
        assert_eq!(rows[0].comment, "");
    }
}

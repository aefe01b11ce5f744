//! Reading and writing the content and collections CSV exports.

use std::io::Read;
use std::path::Path;

use plp_migrate_core::{SourceRecord, TargetColumns, TargetRecord, TargetTable};

use crate::error::MigrateError;
use crate::settings::{ColumnRef, SourceColumns, TargetColumnRefs};

/// Normalize a header cell for lookup: strip a UTF-8 BOM, surrounding
/// whitespace, and surrounding quotes.
pub fn clean_header(header: &str) -> String {
    header
        .trim_start_matches('\u{feff}')
        .trim()
        .trim_matches(|c: char| c == '"' || c == '\'')
        .trim()
        .to_string()
}

fn clean_headers(headers: &csv::StringRecord) -> Vec<String> {
    headers.iter().map(clean_header).collect()
}

fn require_column(headers: &[String], name: &str, file_kind: &str) -> Result<usize, MigrateError> {
    headers.iter().position(|h| h == name).ok_or_else(|| {
        MigrateError::schema_mismatch(format!(
            "{} CSV is missing required column '{}' (found: {})",
            file_kind,
            name,
            headers.join(", ")
        ))
    })
}

fn resolve_column(headers: &[String], column: &ColumnRef, file_kind: &str) -> Result<usize, MigrateError> {
    column.resolve(headers).ok_or_else(|| {
        MigrateError::schema_mismatch(format!(
            "{} CSV has no column {} ({} columns in header)",
            file_kind,
            column,
            headers.len()
        ))
    })
}

fn map_csv_error(err: csv::Error) -> MigrateError {
    if let csv::ErrorKind::UnequalLengths {
        pos,
        expected_len,
        len,
    } = err.kind()
    {
        let line = pos
            .as_ref()
            .map(|p| format!(" on line {}", p.line()))
            .unwrap_or_default();
        return MigrateError::schema_mismatch(format!(
            "row{} has {} fields, header has {}",
            line, len, expected_len
        ));
    }
    MigrateError::Csv(err)
}

/// Read the source content CSV at `path`.
pub fn read_source_records(path: &Path, columns: &SourceColumns) -> Result<Vec<SourceRecord>, MigrateError> {
    if !path.exists() {
        return Err(MigrateError::file_not_found(path));
    }
    let file = std::fs::File::open(path)?;
    parse_source_records(file, columns)
}

/// Parse source content CSV data.
///
/// `URL`, `Title` and `Description` are required columns; the subheading
/// and extra content columns are optional. Values are trimmed, and rows
/// where every field is blank are skipped.
pub fn parse_source_records<R: Read>(reader: R, columns: &SourceColumns) -> Result<Vec<SourceRecord>, MigrateError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = clean_headers(reader.headers()?);
    let url = require_column(&headers, &columns.url, "Source")?;
    let title = require_column(&headers, &columns.title, "Source")?;
    let description = require_column(&headers, &columns.description, "Source")?;
    let subheading = headers.iter().position(|h| *h == columns.subheading);
    let extra = headers.iter().position(|h| *h == columns.extra);

    if subheading.is_none() {
        log::debug!("Source CSV has no '{}' column", columns.subheading);
    }

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result?;
        if row.iter().all(|f| f.trim().is_empty()) {
            continue;
        }
        let get = |i: usize| row.get(i).unwrap_or("").trim();

        let mut record = SourceRecord::new(get(url), get(title), get(description));
        if let Some(i) = subheading {
            record = record.with_subheading(get(i));
        }
        if let Some(i) = extra {
            record = record.with_extra(get(i));
        }
        records.push(record);
    }

    Ok(records)
}

/// Read the target collections export at `path`.
pub fn read_target_table(path: &Path, columns: &TargetColumnRefs) -> Result<TargetTable, MigrateError> {
    if !path.exists() {
        return Err(MigrateError::file_not_found(path));
    }
    let file = std::fs::File::open(path)?;
    parse_target_table(file, columns)
}

/// Parse a target collections export.
///
/// The header is kept as read; columns are resolved against the cleaned
/// header names. Every row must have as many fields as the header.
pub fn parse_target_table<R: Read>(reader: R, columns: &TargetColumnRefs) -> Result<TargetTable, MigrateError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(reader);

    let raw_headers = reader.headers().map_err(map_csv_error)?.clone();
    let cleaned = clean_headers(&raw_headers);

    let resolved = TargetColumns {
        handle: resolve_column(&cleaned, &columns.handle, "Target")?,
        title: resolve_column(&cleaned, &columns.title, "Target")?,
        body_html: resolve_column(&cleaned, &columns.body_html, "Target")?,
        subheading: resolve_column(&cleaned, &columns.subheading, "Target")?,
    };

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result.map_err(map_csv_error)?;
        records.push(row.iter().collect::<TargetRecord>());
    }

    let headers = raw_headers.iter().map(String::from).collect();
    Ok(TargetTable::new(headers, resolved, records)?)
}

/// Serialize a target table to CSV bytes, header first.
pub fn target_table_to_csv(table: &TargetTable) -> Result<Vec<u8>, MigrateError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(table.headers())?;
    for record in table.records() {
        writer.write_record(record.fields())?;
    }
    writer.into_inner().map_err(|e| MigrateError::Io(e.into_error()))
}

/// Write `contents` to `path` through a temporary file in the same directory.
///
/// The destination is either left untouched or fully replaced.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), MigrateError> {
    let file_name = path
        .file_name()
        .ok_or_else(|| MigrateError::config(format!("{} is not a file path", path.display())))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut tmp_name = file_name.to_os_string();
    tmp_name.push(".tmp");
    let tmp = path.with_file_name(tmp_name);

    let result = std::fs::write(&tmp, contents).and_then(|()| std::fs::rename(&tmp, path));
    if result.is_err() {
        let _ = std::fs::remove_file(&tmp);
    }
    Ok(result?)
}

/// Serialize `table` and write it atomically to `path`.
pub fn write_target_table(table: &TargetTable, path: &Path) -> Result<(), MigrateError> {
    let bytes = target_table_to_csv(table)?;
    write_atomic(path, &bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_header_strips_bom_and_quotes() {
        assert_eq!(clean_header("\u{feff}URL"), "URL");
        assert_eq!(clean_header("  \"Title\" "), "Title");
        assert_eq!(clean_header("Sub-heading"), "Sub-heading");
    }

    #[test]
    fn map_unequal_lengths_to_schema_mismatch() {
        let data = "Handle,Title,Body HTML,Sub\nrings,Rings,,\nwatches,Watches\n";
        let columns = TargetColumnRefs {
            subheading: ColumnRef::from("Sub"),
            ..Default::default()
        };
        let err = parse_target_table(data.as_bytes(), &columns).unwrap_err();
        assert!(matches!(err, MigrateError::SchemaMismatch(_)), "{err}");
    }

    #[test]
    fn failed_rename_removes_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        // A non-empty directory cannot be replaced by a file
        let dest = dir.path().join("updated.csv");
        std::fs::create_dir(&dest).unwrap();
        std::fs::write(dest.join("keep"), b"x").unwrap();

        let err = write_atomic(&dest, b"Handle\nrings\n").unwrap_err();
        assert!(matches!(err, MigrateError::Io(_)), "{err}");
        assert!(!dir.path().join("updated.csv.tmp").exists());
        assert!(dest.join("keep").exists());
    }

    #[test]
    fn failed_write_leaves_destination_absent() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("updated.csv");
        // The temp path is a directory, so writing to it fails
        std::fs::create_dir(dir.path().join("updated.csv.tmp")).unwrap();

        let err = write_atomic(&dest, b"Handle\n").unwrap_err();
        assert!(matches!(err, MigrateError::Io(_)), "{err}");
        assert!(!dest.exists());
    }
}

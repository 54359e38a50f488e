//! JSON export and import of one record kind.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::record::RecordKind;
use crate::errors::{Result, SecuraError};

/// `secura-<kind>-<YYYY-MM-DD>.json`
pub fn export_file_name(kind: RecordKind, date: NaiveDate) -> String {
    format!("secura-{}-{}.json", kind.as_str(), date.format("%Y-%m-%d"))
}

/// Pretty-printed JSON array.
pub fn export_json<R: Serialize>(records: &[R]) -> Result<String> {
    serde_json::to_string_pretty(records)
        .map_err(|e| SecuraError::SerializationError(format!("JSON export: {e}")))
}

/// Write an export file into `dir` and return its path.
pub fn write_export<R: Serialize>(
    dir: &Path,
    kind: RecordKind,
    records: &[R],
    date: NaiveDate,
) -> Result<PathBuf> {
    let path = dir.join(export_file_name(kind, date));
    fs::create_dir_all(dir)?;
    fs::write(&path, export_json(records)?)?;
    Ok(path)
}

/// Parse an export file's contents.  The top level must be an array.
pub fn parse_import<R: DeserializeOwned>(text: &str) -> Result<Vec<R>> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| SecuraError::SerializationError(format!("import is not JSON: {e}")))?;
    if !value.is_array() {
        return Err(SecuraError::SerializationError(
            "import file must contain a JSON array of records".into(),
        ));
    }
    serde_json::from_value(value)
        .map_err(|e| SecuraError::SerializationError(format!("import records: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vault::{CardRecord, PasswordRecord};
    use tempfile::TempDir;

    #[test]
    fn file_name_uses_iso_date() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(
            export_file_name(RecordKind::Cards, date),
            "secura-cards-2026-03-07.json"
        );
    }

    #[test]
    fn export_is_indented_array() {
        let out = export_json::<PasswordRecord>(&[]).unwrap();
        assert_eq!(out, "[]");
    }

    #[test]
    fn import_rejects_objects() {
        let result = parse_import::<CardRecord>(r#"{"id":"x"}"#);
        assert!(matches!(result, Err(SecuraError::SerializationError(_))));
    }

    #[test]
    fn write_export_creates_file() {
        let dir = TempDir::new().unwrap();
        let date = NaiveDate::from_ymd_opt(2026, 1, 2).unwrap();
        let path = write_export::<CardRecord>(dir.path(), RecordKind::Cards, &[], date).unwrap();
        assert!(path.ends_with("secura-cards-2026-01-02.json"));
        assert_eq!(fs::read_to_string(path).unwrap(), "[]");
    }
}

//! Backup export/import: the full document as a standalone JSON file.
//!
//! Import wholesale-overwrites the remote store (via the engine's
//! `replace_all`), so the CLI requires explicit confirmation before
//! calling [`import`]'s result into the engine.

use std::path::Path;

use pawtrack_types::document::Document;
use pawtrack_types::error::BackupError;

/// Write the document to `path` as pretty-printed JSON.
pub fn export(document: &Document, path: &Path) -> Result<(), BackupError> {
    let json = serde_json::to_string_pretty(document)
        .map_err(|err| BackupError::Malformed(err.to_string()))?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Read a backup file back into a document. The file must contain a
/// single JSON object; anything else is rejected before it can reach the
/// remote store.
pub fn import(path: &Path) -> Result<Document, BackupError> {
    let raw = std::fs::read_to_string(path)?;
    serde_json::from_str(&raw).map_err(|err| BackupError::Malformed(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pawtrack_types::document::keys;

    #[test]
    fn export_then_import_round_trips() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("backup.json");

        let mut doc = Document::new();
        doc.insert(keys::MED_NOTES, serde_json::json!("no dairy"));
        export(&doc, &path).unwrap();

        let restored = import(&path).unwrap();
        assert_eq!(restored, doc);
    }

    #[test]
    fn import_rejects_non_object_files() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("bad.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();
        assert!(matches!(import(&path), Err(BackupError::Malformed(_))));
    }

    #[test]
    fn import_missing_file_is_an_io_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("nope.json");
        assert!(matches!(import(&path), Err(BackupError::Io(_))));
    }
}

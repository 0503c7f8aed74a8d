use std::io::Write;
use std::path::{Path, PathBuf};

use clientdesk_core::client::ClientRecord;

use crate::codec::encode_table;
use crate::error::StoreError;
use crate::import::load_table;
use crate::store::ClientStore;

/// Client table kept in a single CSV file.
///
/// Saves write a temp file next to the target and rename it into place, so
/// a failed save leaves the previous file untouched.
#[derive(Debug, Clone)]
pub struct CsvFileStore {
    path: PathBuf,
}

impl CsvFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory that holds the table; temp files are created here so the
    /// final rename stays on one filesystem.
    fn dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

impl ClientStore for CsvFileStore {
    fn load(&self) -> Result<Vec<ClientRecord>, StoreError> {
        let bytes = std::fs::read(&self.path)?;
        let decoded = load_table(&bytes)?;
        tracing::debug!(
            path = %self.path.display(),
            records = decoded.records.len(),
            coerced = decoded.report.len(),
            "Loaded client table"
        );
        Ok(decoded.records)
    }

    fn save(&self, records: &[ClientRecord]) -> Result<(), StoreError> {
        let bytes = encode_table(records)?;

        let mut tmp = tempfile::NamedTempFile::new_in(self.dir())?;
        tmp.write_all(&bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| StoreError::Io(e.error))?;

        tracing::info!(
            path = %self.path.display(),
            records = records.len(),
            bytes = bytes.len(),
            "Saved client table"
        );
        Ok(())
    }

    fn exists(&self) -> bool {
        self.path.is_file()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use clientdesk_core::client::ClientType;
    use clientdesk_core::seed::template_records;

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvFileStore::new(dir.path().join("clients.csv"));
        store.save(&template_records()).unwrap();
        assert_eq!(store.load().unwrap(), template_records());
    }

    #[test]
    fn save_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvFileStore::new(dir.path().join("clients.csv"));
        store.save(&template_records()).unwrap();
        store.save(&[ClientRecord::new("Solo", ClientType::New)]).unwrap();
        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn load_of_missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvFileStore::new(dir.path().join("absent.csv"));
        assert!(!store.exists());
        assert_matches!(store.load(), Err(StoreError::Io(_)));
    }

    #[test]
    fn save_into_missing_directory_fails_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("clients.csv");
        let store = CsvFileStore::new(&path);
        assert_matches!(store.save(&template_records()), Err(StoreError::Io(_)));
        assert!(!path.exists());
    }

    #[test]
    fn relative_path_uses_current_directory() {
        let store = CsvFileStore::new("clients.csv");
        assert_eq!(store.dir(), Path::new("."));
    }
}

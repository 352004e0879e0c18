//! Append-only JSON-lines record store.

use std::fs::OpenOptions;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::debug;

use crate::error::StoreError;
use crate::models::expense::ExpenseRecord;

use super::{RecordSource, RecordStore};

/// One JSON record per line in a single file.
///
/// Each put serializes the whole line first and appends it with one write,
/// so a failed put leaves no partial line from this process.
pub struct JsonlStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonlStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordStore for JsonlStore {
    fn put(&self, record: &ExpenseRecord) -> Result<(), StoreError> {
        let mut line = serde_json::to_string(record).map_err(|e| StoreError::Write {
            id: record.id.clone(),
            reason: e.to_string(),
        })?;
        line.push('\n');

        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes()).map_err(|e| StoreError::Write {
            id: record.id.clone(),
            reason: e.to_string(),
        })?;

        debug!("Appended record {} to {}", record.id, self.path.display());
        Ok(())
    }
}

impl RecordSource for JsonlStore {
    /// Every record in file order. A missing file is an empty store.
    fn scan(&self) -> Result<Vec<ExpenseRecord>, StoreError> {
        let file = match std::fs::File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut records = Vec::new();
        for (n, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let record = serde_json::from_str(&line)
                .map_err(|e| StoreError::Read(format!("line {}: {}", n + 1, e)))?;
            records.push(record);
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::expense::Category;
    use rust_decimal::Decimal;

    #[test]
    fn test_append_and_scan() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonlStore::new(dir.path().join("nested").join("expenses.jsonl"));

        assert!(store.scan().unwrap().is_empty());

        let a = ExpenseRecord::new(Category::Medical, Decimal::new(45000, 2), "Apollo Pharmacy", "uploads/a.png");
        let b = ExpenseRecord::new(Category::Travel, Decimal::new(120, 0), "Metro card", "uploads/b.jpg");
        store.put(&a).unwrap();
        store.put(&b).unwrap();

        let content = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert_eq!(store.scan().unwrap(), vec![a, b]);
    }

    #[test]
    fn test_corrupt_line_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("expenses.jsonl");
        std::fs::write(&path, "{\"id\": 1}\n").unwrap();

        let err = JsonlStore::new(&path).scan().unwrap_err();
        assert!(matches!(err, StoreError::Read(msg) if msg.starts_with("line 1")));
    }

    #[test]
    fn test_unwritable_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be.
        let store = JsonlStore::new(dir.path());
        let record = ExpenseRecord::new(Category::Food, Decimal::ONE, "x", "k");
        assert!(store.put(&record).is_err());
    }
}

//! JSONL event reader - sequential reader for replay

use crate::error::EventError;
use crate::journal::JournalRecord;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Sequential journal reader
pub struct EventReader {
    files: Vec<PathBuf>,
}

impl EventReader {
    /// Create a new reader from a directory (missing directories read as empty)
    pub fn from_directory(path: impl AsRef<Path>) -> Result<Self, EventError> {
        let path = path.as_ref();
        let mut files = Vec::new();

        if path.exists() {
            for entry in std::fs::read_dir(path)? {
                let file_path = entry?.path();
                if file_path.extension().is_some_and(|ext| ext == "jsonl") {
                    files.push(file_path);
                }
            }
        }

        files.sort();

        Ok(Self { files })
    }

    /// Read all records from all files in order
    pub fn read_all(&self) -> Result<Vec<JournalRecord>, EventError> {
        let mut records = Vec::new();

        for file_path in &self.files {
            let reader = BufReader::new(File::open(file_path)?);

            for (i, line) in reader.lines().enumerate() {
                let line = line?;
                if line.trim().is_empty() {
                    continue;
                }
                let record: JournalRecord =
                    serde_json::from_str(&line).map_err(|e| EventError::InvalidFile {
                        file: file_path.display().to_string(),
                        line: i + 1,
                        reason: e.to_string(),
                    })?;
                records.push(record);
            }
        }

        Ok(records)
    }

    /// Get the last record (for sequence and prev_hash)
    pub fn last_record(&self) -> Result<Option<JournalRecord>, EventError> {
        Ok(self.read_all()?.pop())
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::GENESIS_HASH;
    use crate::journal::Action;
    use crate::store::EventStore;
    use custodian_core::{Address, AssetId};
    use std::io::Write;
    use tempfile::TempDir;

    fn mint(sequence: u64, prev_hash: &str) -> JournalRecord {
        JournalRecord::new(
            sequence,
            prev_hash,
            format!("mint-{}", sequence),
            Action::Mint {
                owner: Address::from_low_u8(1),
                asset_id: AssetId::new(sequence),
            },
            Vec::new(),
        )
    }

    #[test]
    fn test_write_then_read() {
        let dir = TempDir::new().unwrap();
        let r1 = mint(1, GENESIS_HASH);
        let r2 = mint(2, &r1.hash);

        {
            let mut store = EventStore::open(dir.path()).unwrap();
            store.append(&r1).unwrap();
            store.append(&r2).unwrap();
        }

        let reader = EventReader::from_directory(dir.path()).unwrap();
        assert_eq!(reader.file_count(), 1);
        let records = reader.read_all().unwrap();
        assert_eq!(records, vec![r1, r2.clone()]);
        assert_eq!(reader.last_record().unwrap(), Some(r2));
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let dir = TempDir::new().unwrap();
        let reader = EventReader::from_directory(dir.path().join("nope")).unwrap();
        assert_eq!(reader.file_count(), 0);
        assert!(reader.read_all().unwrap().is_empty());
        assert_eq!(reader.last_record().unwrap(), None);
    }

    #[test]
    fn test_corrupt_line_reports_location() {
        let dir = TempDir::new().unwrap();
        let mut file = File::create(dir.path().join("2026-01-01.jsonl")).unwrap();
        writeln!(file).unwrap();
        writeln!(file, "{{not json").unwrap();

        let reader = EventReader::from_directory(dir.path()).unwrap();
        match reader.read_all() {
            Err(EventError::InvalidFile { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected InvalidFile, got {:?}", other.map(|r| r.len())),
        }
    }
}

//! Journal writer - appends sealed records to one JSONL file per UTC day

use crate::error::EventError;
use crate::hash::GENESIS_HASH;
use crate::journal::JournalRecord;
use crate::reader::EventReader;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Append-only journal writer
///
/// Tracks the head of the hash chain and refuses records that do not extend
/// it. A record is either fully on disk or not at all: a failed write is cut
/// back off the file and leaves the head where it was.
pub struct EventStore {
    base_path: PathBuf,
    /// Day file currently open for appending
    writer: Option<(String, File)>,
    last_sequence: u64,
    last_hash: String,
}

impl EventStore {
    /// Open the journal at `base_path`, continuing after its last record
    pub fn open(base_path: impl AsRef<Path>) -> Result<Self, EventError> {
        let base_path = base_path.as_ref().to_path_buf();
        fs::create_dir_all(&base_path)?;

        let (last_sequence, last_hash) = match EventReader::from_directory(&base_path)?.last_record()? {
            Some(last) => (last.sequence, last.hash),
            None => (0, GENESIS_HASH.to_string()),
        };

        Ok(Self {
            base_path,
            writer: None,
            last_sequence,
            last_hash,
        })
    }

    /// Sequence of the last record written (0 for an empty journal)
    pub fn last_sequence(&self) -> u64 {
        self.last_sequence
    }

    /// Hash the next record must link to
    pub fn last_hash(&self) -> &str {
        &self.last_hash
    }

    /// Append a record that extends the current head
    pub fn append(&mut self, record: &JournalRecord) -> Result<(), EventError> {
        let expected = self.last_sequence + 1;
        if record.sequence != expected || record.prev_hash != self.last_hash {
            return Err(EventError::Discontinuous {
                sequence: record.sequence,
                expected,
            });
        }

        let mut line = serde_json::to_vec(record)?;
        line.push(b'\n');
        let date = record.timestamp.format("%Y-%m-%d").to_string();

        if let Err(e) = self.write_line(&date, &line) {
            tracing::warn!(sequence = record.sequence, error = %e, "Journal append failed");
            return Err(e.into());
        }

        self.last_sequence = record.sequence;
        self.last_hash = record.hash.clone();

        tracing::trace!(sequence = record.sequence, action = record.action.name(), "Journal record appended");
        Ok(())
    }

    fn write_line(&mut self, date: &str, line: &[u8]) -> io::Result<()> {
        // On any error the writer stays taken, so the next append reopens
        let mut file = match self.writer.take() {
            Some((current, file)) if current == date => file,
            _ => OpenOptions::new()
                .create(true)
                .append(true)
                .open(self.base_path.join(format!("{}.jsonl", date)))?,
        };

        let start = file.metadata()?.len();
        if let Err(e) = file.write_all(line) {
            // Never leave a torn line behind for replay to trip over
            let _ = file.set_len(start);
            return Err(e);
        }

        self.writer = Some((date.to_string(), file));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::Action;
    use custodian_core::{Address, AssetId};
    use tempfile::TempDir;

    fn mint(sequence: u64, prev_hash: &str) -> JournalRecord {
        JournalRecord::new(
            sequence,
            prev_hash,
            "test",
            Action::Mint {
                owner: Address::from_low_u8(1),
                asset_id: AssetId::new(sequence),
            },
            Vec::new(),
        )
    }

    #[test]
    fn test_open_continues_existing_chain() {
        let dir = TempDir::new().unwrap();
        let r1 = mint(1, GENESIS_HASH);
        let r2 = mint(2, &r1.hash);

        {
            let mut store = EventStore::open(dir.path()).unwrap();
            assert_eq!(store.last_sequence(), 0);
            assert_eq!(store.last_hash(), GENESIS_HASH);
            store.append(&r1).unwrap();
            store.append(&r2).unwrap();
        }

        let store = EventStore::open(dir.path()).unwrap();
        assert_eq!(store.last_sequence(), 2);
        assert_eq!(store.last_hash(), r2.hash);
    }

    #[test]
    fn test_rejects_record_off_the_chain() {
        let dir = TempDir::new().unwrap();
        let mut store = EventStore::open(dir.path()).unwrap();
        let r1 = mint(1, GENESIS_HASH);
        store.append(&r1).unwrap();

        // Replaying the same sequence
        assert!(matches!(
            store.append(&r1),
            Err(EventError::Discontinuous {
                sequence: 1,
                expected: 2
            })
        ));

        // Right sequence, wrong link
        assert!(matches!(
            store.append(&mint(2, GENESIS_HASH)),
            Err(EventError::Discontinuous { sequence: 2, .. })
        ));

        assert_eq!(store.last_sequence(), 1);
        assert_eq!(store.last_hash(), r1.hash);
    }

    #[test]
    fn test_failed_write_keeps_head_and_recovers() {
        let dir = TempDir::new().unwrap();
        let mut store = EventStore::open(dir.path()).unwrap();
        let r1 = mint(1, GENESIS_HASH);

        // A directory where the day file should be makes the open fail
        let day_file = dir
            .path()
            .join(format!("{}.jsonl", r1.timestamp.format("%Y-%m-%d")));
        fs::create_dir(&day_file).unwrap();

        assert!(matches!(store.append(&r1), Err(EventError::Io(_))));
        assert_eq!(store.last_sequence(), 0);
        assert_eq!(store.last_hash(), GENESIS_HASH);

        fs::remove_dir(&day_file).unwrap();
        store.append(&r1).unwrap();
        assert_eq!(store.last_sequence(), 1);
    }
}

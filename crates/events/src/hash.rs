//! Hash chain utilities for journal integrity

use crate::journal::JournalRecord;
use sha2::{Digest, Sha256};
use thiserror::Error;

/// `prev_hash` of the first record
pub const GENESIS_HASH: &str = "GENESIS";

/// Calculate SHA256 hash of record content (excluding the hash field itself)
pub fn calculate_record_hash(record: &JournalRecord) -> String {
    let mut hasher = Sha256::new();

    hasher.update(record.sequence.to_le_bytes());
    hasher.update(record.prev_hash.as_bytes());
    hasher.update(record.timestamp.to_rfc3339().as_bytes());
    hasher.update(record.correlation_id.as_bytes());
    hasher.update(format!("{:?}", record.action).as_bytes());

    for event in &record.events {
        hasher.update(format!("{:?}", event).as_bytes());
    }

    hex::encode(hasher.finalize())
}

/// Errors in hash chain verification
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    #[error("Broken link at seq {sequence}: expected prev_hash '{expected}', got '{actual}'")]
    BrokenLink {
        sequence: u64,
        expected: String,
        actual: String,
    },

    #[error("Invalid hash at seq {sequence}: expected '{expected}', got '{actual}'")]
    InvalidHash {
        sequence: u64,
        expected: String,
        actual: String,
    },

    #[error("Invalid sequence: expected {expected}, got {actual}")]
    InvalidSequence { expected: u64, actual: u64 },
}

/// Verify hash chain integrity
pub fn verify_chain(records: &[JournalRecord]) -> Result<(), ChainError> {
    let mut prev_hash = GENESIS_HASH.to_string();

    for (i, record) in records.iter().enumerate() {
        let expected_sequence = i as u64 + 1;
        if record.sequence != expected_sequence {
            return Err(ChainError::InvalidSequence {
                expected: expected_sequence,
                actual: record.sequence,
            });
        }

        if record.prev_hash != prev_hash {
            return Err(ChainError::BrokenLink {
                sequence: record.sequence,
                expected: prev_hash,
                actual: record.prev_hash.clone(),
            });
        }

        let calculated = calculate_record_hash(record);
        if record.hash != calculated {
            return Err(ChainError::InvalidHash {
                sequence: record.sequence,
                expected: calculated,
                actual: record.hash.clone(),
            });
        }

        prev_hash = record.hash.clone();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::Action;
    use custodian_core::{Address, AssetId};

    fn create_record(sequence: u64, prev_hash: &str) -> JournalRecord {
        JournalRecord::new(
            sequence,
            prev_hash,
            format!("test-{}", sequence),
            Action::Mint {
                owner: Address::from_low_u8(1),
                asset_id: AssetId::new(sequence),
            },
            Vec::new(),
        )
    }

    #[test]
    fn test_hash_deterministic() {
        let record = create_record(1, GENESIS_HASH);
        assert_eq!(calculate_record_hash(&record), calculate_record_hash(&record));
    }

    #[test]
    fn test_verify_valid_chain() {
        let r1 = create_record(1, GENESIS_HASH);
        let r2 = create_record(2, &r1.hash);
        let r3 = create_record(3, &r2.hash);

        assert!(verify_chain(&[r1, r2, r3]).is_ok());
        assert!(verify_chain(&[]).is_ok());
    }

    #[test]
    fn test_verify_broken_link() {
        let r1 = create_record(1, GENESIS_HASH);
        let r2 = create_record(2, "wrong_hash");

        assert!(matches!(
            verify_chain(&[r1, r2]),
            Err(ChainError::BrokenLink { sequence: 2, .. })
        ));
    }

    #[test]
    fn test_verify_tampered_content() {
        let r1 = create_record(1, GENESIS_HASH);
        let mut r2 = create_record(2, &r1.hash);
        r2.action = Action::Burn {
            asset_id: AssetId::new(2),
        };

        assert!(matches!(
            verify_chain(&[r1, r2]),
            Err(ChainError::InvalidHash { sequence: 2, .. })
        ));
    }

    #[test]
    fn test_verify_sequence_gap() {
        let r1 = create_record(1, GENESIS_HASH);
        let r3 = create_record(3, &r1.hash);

        assert_eq!(
            verify_chain(&[r1, r3]),
            Err(ChainError::InvalidSequence {
                expected: 2,
                actual: 3,
            })
        );
    }
}

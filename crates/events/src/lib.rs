//! Custodian Events - JSONL journal
//!
//! Every successful state-changing action is appended to a hash-chained JSONL
//! journal. The journal is the Source of Truth: in-memory request logs and
//! ownership are rebuilt from it by replay.

pub mod error;
pub mod hash;
pub mod journal;
pub mod reader;
pub mod store;

pub use error::EventError;
pub use hash::{calculate_record_hash, verify_chain, ChainError, GENESIS_HASH};
pub use journal::{Action, JournalRecord};
pub use reader::EventReader;
pub use store::EventStore;

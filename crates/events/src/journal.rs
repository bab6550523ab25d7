//! Journal records

use crate::hash::calculate_record_hash;
use chrono::{DateTime, Utc};
use custodian_core::{Address, AssetId};
use custodian_validation::{GateEvent, RequestId};
use serde::{Deserialize, Serialize};
use strum_macros::IntoStaticStr;

/// A state-changing call, as issued by its caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, IntoStaticStr)]
#[serde(tag = "action", rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Action {
    Mint {
        owner: Address,
        asset_id: AssetId,
    },
    Burn {
        asset_id: AssetId,
    },
    SubmitTransfer {
        caller: Address,
        from: Address,
        to: Address,
        asset_id: AssetId,
    },
    SubmitApproval {
        owner: Address,
        grantee: Address,
        asset_id: AssetId,
    },
    SubmitApprovalForAll {
        owner: Address,
        operator: Address,
        grant: bool,
    },
    ConfirmTransfer {
        validator: Address,
        request_id: RequestId,
    },
    ConfirmApproval {
        validator: Address,
        request_id: RequestId,
    },
}

impl Action {
    pub fn name(&self) -> &'static str {
        self.into()
    }
}

/// One committed action with the notifications it produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalRecord {
    /// Position in the journal, starting at 1
    pub sequence: u64,
    pub prev_hash: String,
    pub hash: String,
    pub timestamp: DateTime<Utc>,
    pub correlation_id: String,
    pub action: Action,
    #[serde(default)]
    pub events: Vec<GateEvent>,
}

impl JournalRecord {
    /// Build a sealed record linked to `prev_hash`
    pub fn new(
        sequence: u64,
        prev_hash: impl Into<String>,
        correlation_id: impl Into<String>,
        action: Action,
        events: Vec<GateEvent>,
    ) -> Self {
        let mut record = Self {
            sequence,
            prev_hash: prev_hash.into(),
            hash: String::new(),
            timestamp: Utc::now(),
            correlation_id: correlation_id.into(),
            action,
            events,
        };
        record.hash = calculate_record_hash(&record);
        record
    }
}

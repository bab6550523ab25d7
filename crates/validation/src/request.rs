//! Request records

use custodian_core::{Address, AssetId};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Index of a request within its log
pub type RequestId = u64;

/// Which log a request lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RequestKind {
    Transfer,
    Approval,
}

/// Validation state of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RequestState {
    /// Recorded, not yet applied to the ledger
    Pending,
    /// Confirmed by a validator and applied
    Confirmed,
}

/// Pending or confirmed ownership change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRequest {
    /// Owner of record when the request was filed
    pub from: Address,
    pub to: Address,
    pub asset_id: AssetId,
    state: RequestState,
}

impl TransferRequest {
    pub(crate) fn new(from: Address, to: Address, asset_id: AssetId) -> Self {
        Self {
            from,
            to,
            asset_id,
            state: RequestState::Pending,
        }
    }

    pub fn state(&self) -> RequestState {
        self.state
    }

    /// True once confirmed
    pub fn is_valid(&self) -> bool {
        self.state == RequestState::Confirmed
    }

    pub(crate) fn confirm(&mut self) {
        self.state = RequestState::Confirmed;
    }
}

/// What an approval request grants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scope", content = "asset_id", rename_all = "snake_case")]
pub enum ApprovalScope {
    /// Permission over one asset
    Single(AssetId),
    /// Blanket permission over every asset of the owner
    All,
}

/// Pending or confirmed permission grant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalRequest {
    pub owner: Address,
    /// Single-asset grantee, or operator for blanket approvals
    pub grantee: Address,
    pub scope: ApprovalScope,
    state: RequestState,
}

impl ApprovalRequest {
    pub(crate) fn single(owner: Address, grantee: Address, asset_id: AssetId) -> Self {
        Self {
            owner,
            grantee,
            scope: ApprovalScope::Single(asset_id),
            state: RequestState::Pending,
        }
    }

    pub(crate) fn all(owner: Address, operator: Address) -> Self {
        Self {
            owner,
            grantee: operator,
            scope: ApprovalScope::All,
            state: RequestState::Pending,
        }
    }

    pub fn asset_id(&self) -> Option<AssetId> {
        match self.scope {
            ApprovalScope::Single(asset_id) => Some(asset_id),
            ApprovalScope::All => None,
        }
    }

    pub fn approve_all(&self) -> bool {
        self.scope == ApprovalScope::All
    }

    pub fn state(&self) -> RequestState {
        self.state
    }

    /// True once confirmed
    pub fn is_valid(&self) -> bool {
        self.state == RequestState::Confirmed
    }

    pub(crate) fn confirm(&mut self) {
        self.state = RequestState::Confirmed;
    }
}

/// Shared view over both request kinds
pub trait Validatable {
    fn state(&self) -> RequestState;

    fn is_pending(&self) -> bool {
        self.state() == RequestState::Pending
    }
}

impl Validatable for TransferRequest {
    fn state(&self) -> RequestState {
        self.state
    }
}

impl Validatable for ApprovalRequest {
    fn state(&self) -> RequestState {
        self.state
    }
}

//! Validation errors

use crate::request::{RequestId, RequestKind};
use custodian_core::{Address, AssetId};
use custodian_registry::RegistryError;
use thiserror::Error;

/// Errors from intake, confirmation and queries
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid transfer request: {from} does not own {asset} (owner is {owner})")]
    InvalidTransferRequest {
        from: Address,
        asset: AssetId,
        owner: Address,
    },

    #[error("Invalid recipient: assets cannot be sent to the null address")]
    InvalidRecipient,

    #[error("Invalid approval request: {owner} does not own {asset} (owner is {actual})")]
    InvalidApprovalRequest {
        owner: Address,
        asset: AssetId,
        actual: Address,
    },

    #[error("Self approval rejected for {0}")]
    SelfApprovalRejected(Address),

    #[error("Caller {caller} is not approved for {asset}")]
    CallerNotApproved { caller: Address, asset: AssetId },

    #[error("Caller {0} is not an authorized validator")]
    UnauthorizedValidator(Address),

    #[error("{kind} request {id} already validated")]
    AlreadyValidated { kind: RequestKind, id: RequestId },

    #[error("Ownership of {asset} changed: request filed by {expected}, current owner is {actual}")]
    OwnershipChanged {
        asset: AssetId,
        expected: Address,
        actual: Address,
    },

    #[error("{kind} request {id} out of range (total {total})")]
    OutOfRange {
        kind: RequestKind,
        id: RequestId,
        total: u64,
    },

    #[error("Ledger error: {0}")]
    Ledger(#[from] RegistryError),
}

//! # Custodian Validation
//!
//! Two-phase authorization for asset transfers and approvals.
//!
//! Every transfer or approval initiated by an asset owner is recorded as a
//! pending request and only reaches the ledger once an authorized validator
//! confirms it. Compromised owner credentials alone cannot move an asset.
//!
//! ## Flow
//! ```text
//! submit_transfer ──► should_defer? ──no──► ledger.raw_transfer  (operator bypass)
//!                          │
//!                         yes
//!                          ▼
//!                 TransferRequestLog[n] = Pending ──confirm_transfer──► ledger.raw_transfer
//!                                                                     state = Confirmed
//! ```
//!
//! ## Rules
//! - Request logs are append-only and densely indexed from 0
//! - A request is confirmed at most once
//! - Single-asset approvals re-check ownership at confirmation time
//! - Revoking a blanket approval is never deferred

mod config;
mod engine;
mod error;
mod event;
mod intake;
mod log;
mod policy;
mod request;
mod validator;

pub use config::{parse_validator_list, ConfigError, ValidationConfig, VALIDATORS_ENV};
pub use engine::{Checkpoint, ValidationEngine, ValidationStats};
pub use error::ValidationError;
pub use event::GateEvent;
pub use intake::{should_defer, ApprovalOutcome, TransferOutcome};
pub use log::RequestLog;
pub use policy::{AllowAll, AllowList, ValidatorPolicy};
pub use request::{
    ApprovalRequest, ApprovalScope, RequestId, RequestKind, RequestState, TransferRequest, Validatable,
};

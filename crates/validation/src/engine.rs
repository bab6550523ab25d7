//! Validation engine - request logs, ledger collaborator and query surface

use crate::config::ValidationConfig;
use crate::error::ValidationError;
use crate::event::GateEvent;
use crate::log::RequestLog;
use crate::policy::ValidatorPolicy;
use crate::request::{ApprovalRequest, RequestId, RequestKind, TransferRequest};
use custodian_registry::AssetLedger;

/// Two-phase validation engine
///
/// Owns both request logs and the ledger it defers mutations to. All
/// operations take `&mut self`, so assigning an index, writing the record and
/// queueing its notification happen as one step. Share an engine between
/// threads behind a mutex.
pub struct ValidationEngine<L: AssetLedger> {
    pub(crate) ledger: L,
    pub(crate) policy: Box<dyn ValidatorPolicy>,
    pub(crate) transfers: RequestLog<TransferRequest>,
    pub(crate) approvals: RequestLog<ApprovalRequest>,
    pub(crate) outbox: Vec<GateEvent>,
}

impl<L: AssetLedger> ValidationEngine<L> {
    /// Create an engine over `ledger` with the given validator policy
    pub fn new(ledger: L, policy: Box<dyn ValidatorPolicy>) -> Self {
        Self {
            ledger,
            policy,
            transfers: RequestLog::new(RequestKind::Transfer),
            approvals: RequestLog::new(RequestKind::Approval),
            outbox: Vec::new(),
        }
    }

    /// Create an engine using the policy described by `config`
    pub fn with_config(ledger: L, config: &ValidationConfig) -> Self {
        Self::new(ledger, config.policy())
    }

    /// Replace the validator policy
    pub fn set_policy(&mut self, policy: Box<dyn ValidatorPolicy>) {
        tracing::debug!(policy = policy.name(), "Validator policy installed");
        self.policy = policy;
    }

    pub fn policy(&self) -> &dyn ValidatorPolicy {
        self.policy.as_ref()
    }

    /// Marks implementors of the two-phase protocol for feature detection
    pub const fn is_validator_extension() -> bool {
        true
    }

    /// Read access to the ledger
    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Mutable access to the ledger for host-level operations (mint, burn)
    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    // === Query surface ===

    pub fn request_by_id(&self, id: RequestId) -> Result<&TransferRequest, ValidationError> {
        self.transfers.get(id)
    }

    pub fn approval_by_id(&self, id: RequestId) -> Result<&ApprovalRequest, ValidationError> {
        self.approvals.get(id)
    }

    pub fn total_transfer_requests(&self) -> u64 {
        self.transfers.len()
    }

    pub fn total_approval_requests(&self) -> u64 {
        self.approvals.len()
    }

    pub fn transfers(&self) -> &RequestLog<TransferRequest> {
        &self.transfers
    }

    pub fn approvals(&self) -> &RequestLog<ApprovalRequest> {
        &self.approvals
    }

    /// Transfer requests still awaiting confirmation
    pub fn pending_transfers(&self) -> Vec<(RequestId, &TransferRequest)> {
        self.transfers.pending().collect()
    }

    /// Approval requests still awaiting confirmation
    pub fn pending_approvals(&self) -> Vec<(RequestId, &ApprovalRequest)> {
        self.approvals.pending().collect()
    }

    pub fn stats(&self) -> ValidationStats {
        let confirmed_transfers = self.transfers.confirmed_count();
        let confirmed_approvals = self.approvals.confirmed_count();
        ValidationStats {
            pending_transfers: self.transfers.len() - confirmed_transfers,
            confirmed_transfers,
            pending_approvals: self.approvals.len() - confirmed_approvals,
            confirmed_approvals,
        }
    }

    /// Take all queued notifications, oldest first
    pub fn drain_events(&mut self) -> Vec<GateEvent> {
        std::mem::take(&mut self.outbox)
    }

    pub(crate) fn emit(&mut self, event: GateEvent) {
        self.outbox.push(event);
    }
}

impl<L: AssetLedger + Clone> ValidationEngine<L> {
    /// Capture the ledger, both logs and the queued notifications
    pub fn checkpoint(&self) -> Checkpoint<L> {
        Checkpoint {
            ledger: self.ledger.clone(),
            transfers: self.transfers.clone(),
            approvals: self.approvals.clone(),
            queued: self.outbox.len(),
        }
    }

    /// Roll back to `checkpoint`, dropping everything done since
    ///
    /// Notifications drained after the checkpoint was taken are not requeued.
    pub fn restore(&mut self, checkpoint: Checkpoint<L>) {
        self.ledger = checkpoint.ledger;
        self.transfers = checkpoint.transfers;
        self.approvals = checkpoint.approvals;
        self.outbox.truncate(checkpoint.queued);
    }
}

/// Engine state saved by [`ValidationEngine::checkpoint`]
#[derive(Debug, Clone)]
pub struct Checkpoint<L> {
    ledger: L,
    transfers: RequestLog<TransferRequest>,
    approvals: RequestLog<ApprovalRequest>,
    queued: usize,
}

/// Counts of requests per log and state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ValidationStats {
    pub pending_transfers: u64,
    pub confirmed_transfers: u64,
    pub pending_approvals: u64,
    pub confirmed_approvals: u64,
}

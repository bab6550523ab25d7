//! Request intake
//!
//! Turns transfer and approval intents into either an immediate ledger
//! mutation or a pending request.

use crate::engine::ValidationEngine;
use crate::error::ValidationError;
use crate::event::GateEvent;
use crate::request::{ApprovalRequest, RequestId, TransferRequest};
use custodian_core::{Address, AssetId};
use custodian_registry::AssetLedger;
use tracing::{debug, info};

/// Result of a transfer submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferOutcome {
    /// Recorded for validation at this index
    Deferred(RequestId),
    /// Applied to the ledger immediately (operator bypass)
    Executed,
}

/// Result of a blanket approval submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalOutcome {
    /// Recorded for validation at this index
    Deferred(RequestId),
    /// Revocation applied to the ledger immediately
    Revoked,
}

impl TransferOutcome {
    pub fn request_id(&self) -> Option<RequestId> {
        match self {
            TransferOutcome::Deferred(id) => Some(*id),
            TransferOutcome::Executed => None,
        }
    }
}

impl ApprovalOutcome {
    pub fn request_id(&self) -> Option<RequestId> {
        match self {
            ApprovalOutcome::Deferred(id) => Some(*id),
            ApprovalOutcome::Revoked => None,
        }
    }
}

/// Transfers initiated by the owner are deferred; operator transfers are not.
pub fn should_defer(caller: &Address, from: &Address) -> bool {
    caller == from
}

impl<L: AssetLedger> ValidationEngine<L> {
    /// Submit an ownership change of `asset` from `from` to `to`
    pub fn submit_transfer(
        &mut self,
        caller: Address,
        from: Address,
        to: Address,
        asset: AssetId,
    ) -> Result<TransferOutcome, ValidationError> {
        let owner = self.ledger.owner_of(asset)?;
        if owner != from {
            return Err(ValidationError::InvalidTransferRequest { from, asset, owner });
        }
        if to.is_null() {
            return Err(ValidationError::InvalidRecipient);
        }

        if should_defer(&caller, &from) {
            Ok(TransferOutcome::Deferred(self.defer_transfer(from, to, asset)))
        } else {
            self.execute_transfer(caller, from, to, asset)?;
            Ok(TransferOutcome::Executed)
        }
    }

    fn defer_transfer(&mut self, from: Address, to: Address, asset: AssetId) -> RequestId {
        let request_index = self.transfers.append(TransferRequest::new(from, to, asset));
        self.emit(GateEvent::TransferRequestCreated {
            from,
            to,
            asset_id: asset,
            request_index,
        });

        debug!(%from, %to, %asset, request_index, "Transfer request recorded");
        request_index
    }

    fn execute_transfer(
        &mut self,
        operator: Address,
        from: Address,
        to: Address,
        asset: AssetId,
    ) -> Result<(), ValidationError> {
        if !self.ledger.is_approved_or_owner(&operator, asset)? {
            return Err(ValidationError::CallerNotApproved {
                caller: operator,
                asset,
            });
        }

        self.ledger.raw_transfer(from, to, asset)?;
        self.emit(GateEvent::TransferExecuted {
            operator,
            from,
            to,
            asset_id: asset,
        });

        info!(%operator, %from, %to, %asset, "Operator transfer executed without validation");
        Ok(())
    }

    /// Submit a single-asset permission grant
    pub fn submit_approval(
        &mut self,
        owner: Address,
        grantee: Address,
        asset: AssetId,
    ) -> Result<RequestId, ValidationError> {
        let actual = self.ledger.owner_of(asset)?;
        if actual != owner {
            return Err(ValidationError::InvalidApprovalRequest {
                owner,
                asset,
                actual,
            });
        }
        if grantee == owner {
            return Err(ValidationError::SelfApprovalRejected(owner));
        }

        let request_index = self
            .approvals
            .append(ApprovalRequest::single(owner, grantee, asset));
        self.emit(GateEvent::ApprovalRequestCreated {
            owner,
            grantee,
            asset_id: Some(asset),
            approve_all: false,
            request_index,
        });

        debug!(%owner, %grantee, %asset, request_index, "Approval request recorded");
        Ok(request_index)
    }

    /// Submit a blanket permission change for `operator` over `owner`'s assets
    pub fn submit_approval_for_all(
        &mut self,
        owner: Address,
        operator: Address,
        grant: bool,
    ) -> Result<ApprovalOutcome, ValidationError> {
        if owner == operator {
            return Err(ValidationError::SelfApprovalRejected(owner));
        }

        if !grant {
            self.ledger.raw_approve_for_all(owner, operator, false)?;
            self.emit(GateEvent::OperatorRevoked { owner, operator });

            info!(%owner, %operator, "Operator revoked");
            return Ok(ApprovalOutcome::Revoked);
        }

        let request_index = self.approvals.append(ApprovalRequest::all(owner, operator));
        self.emit(GateEvent::ApprovalRequestCreated {
            owner,
            grantee: operator,
            asset_id: None,
            approve_all: true,
            request_index,
        });

        debug!(%owner, %operator, request_index, "Blanket approval request recorded");
        Ok(ApprovalOutcome::Deferred(request_index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::AllowAll;
    use custodian_registry::AssetRegistry;

    const ALICE: Address = Address::from_low_u8(0xa1);
    const BOB: Address = Address::from_low_u8(0xb0);
    const CAROL: Address = Address::from_low_u8(0xc0);

    fn engine_with_asset(owner: Address, asset: u64) -> ValidationEngine<AssetRegistry> {
        let mut registry = AssetRegistry::new();
        registry.mint(owner, AssetId::new(asset)).unwrap();
        ValidationEngine::new(registry, Box::new(AllowAll))
    }

    #[test]
    fn test_should_defer() {
        assert!(should_defer(&ALICE, &ALICE));
        assert!(!should_defer(&CAROL, &ALICE));
    }

    #[test]
    fn test_owner_transfer_is_deferred() {
        let mut engine = engine_with_asset(ALICE, 7);

        let outcome = engine
            .submit_transfer(ALICE, ALICE, BOB, AssetId::new(7))
            .unwrap();

        assert_eq!(outcome, TransferOutcome::Deferred(0));
        assert_eq!(engine.ledger().owner_of(AssetId::new(7)).unwrap(), ALICE);
        assert!(!engine.request_by_id(0).unwrap().is_valid());
        assert_eq!(
            engine.drain_events(),
            vec![GateEvent::TransferRequestCreated {
                from: ALICE,
                to: BOB,
                asset_id: AssetId::new(7),
                request_index: 0,
            }]
        );
    }

    #[test]
    fn test_wrong_owner_rejected() {
        let mut engine = engine_with_asset(ALICE, 7);

        let result = engine.submit_transfer(BOB, BOB, CAROL, AssetId::new(7));
        assert_eq!(
            result,
            Err(ValidationError::InvalidTransferRequest {
                from: BOB,
                asset: AssetId::new(7),
                owner: ALICE,
            })
        );
        assert_eq!(engine.total_transfer_requests(), 0);
        assert!(engine.drain_events().is_empty());
    }

    #[test]
    fn test_null_recipient_rejected() {
        let mut engine = engine_with_asset(ALICE, 7);

        let result = engine.submit_transfer(ALICE, ALICE, Address::NULL, AssetId::new(7));
        assert_eq!(result, Err(ValidationError::InvalidRecipient));
        assert_eq!(engine.total_transfer_requests(), 0);
    }

    #[test]
    fn test_unknown_asset_propagates_ledger_error() {
        let mut engine = engine_with_asset(ALICE, 7);

        let result = engine.submit_transfer(ALICE, ALICE, BOB, AssetId::new(8));
        assert_eq!(
            result,
            Err(ValidationError::Ledger(
                custodian_registry::RegistryError::UnknownAsset(AssetId::new(8))
            ))
        );
    }

    #[test]
    fn test_unapproved_operator_cannot_bypass() {
        let mut engine = engine_with_asset(ALICE, 7);

        let result = engine.submit_transfer(CAROL, ALICE, BOB, AssetId::new(7));
        assert_eq!(
            result,
            Err(ValidationError::CallerNotApproved {
                caller: CAROL,
                asset: AssetId::new(7),
            })
        );
        assert_eq!(engine.ledger().owner_of(AssetId::new(7)).unwrap(), ALICE);
        assert!(engine.drain_events().is_empty());
    }

    #[test]
    fn test_single_approval_request() {
        let mut engine = engine_with_asset(ALICE, 7);

        let id = engine.submit_approval(ALICE, BOB, AssetId::new(7)).unwrap();
        assert_eq!(id, 0);

        let request = engine.approval_by_id(0).unwrap();
        assert!(!request.approve_all());
        assert_eq!(request.asset_id(), Some(AssetId::new(7)));
        assert_eq!(engine.ledger().get_approved(AssetId::new(7)).unwrap(), None);
    }

    #[test]
    fn test_approval_by_non_owner_rejected() {
        let mut engine = engine_with_asset(ALICE, 7);

        assert!(matches!(
            engine.submit_approval(BOB, CAROL, AssetId::new(7)),
            Err(ValidationError::InvalidApprovalRequest { .. })
        ));
        assert_eq!(
            engine.submit_approval(ALICE, ALICE, AssetId::new(7)),
            Err(ValidationError::SelfApprovalRejected(ALICE))
        );
        assert_eq!(engine.total_approval_requests(), 0);
    }

    #[test]
    fn test_approval_for_all_grant_is_deferred() {
        let mut engine = engine_with_asset(ALICE, 7);

        let outcome = engine.submit_approval_for_all(ALICE, CAROL, true).unwrap();
        assert_eq!(outcome, ApprovalOutcome::Deferred(0));
        assert!(engine.approval_by_id(0).unwrap().approve_all());
        assert!(!engine.ledger().is_approved_for_all(&ALICE, &CAROL));
    }

    #[test]
    fn test_self_approval_for_all_rejected() {
        let mut engine = engine_with_asset(ALICE, 7);

        assert_eq!(
            engine.submit_approval_for_all(ALICE, ALICE, true),
            Err(ValidationError::SelfApprovalRejected(ALICE))
        );
        assert_eq!(
            engine.submit_approval_for_all(ALICE, ALICE, false),
            Err(ValidationError::SelfApprovalRejected(ALICE))
        );
    }

    #[test]
    fn test_revocation_is_immediate() {
        let mut engine = engine_with_asset(ALICE, 7);
        engine.ledger_mut().raw_approve_for_all(ALICE, CAROL, true).unwrap();

        let outcome = engine.submit_approval_for_all(ALICE, CAROL, false).unwrap();

        assert_eq!(outcome, ApprovalOutcome::Revoked);
        assert!(!engine.ledger().is_approved_for_all(&ALICE, &CAROL));
        assert_eq!(engine.total_approval_requests(), 0);
        assert_eq!(
            engine.drain_events(),
            vec![GateEvent::OperatorRevoked {
                owner: ALICE,
                operator: CAROL,
            }]
        );
    }
}

//! Request confirmation
//!
//! The only place where a deferred ownership change or permission grant
//! reaches the ledger. Every check runs before the ledger call and the
//! record's state flips only after the ledger accepted the mutation.

use crate::engine::ValidationEngine;
use crate::error::ValidationError;
use crate::event::GateEvent;
use crate::request::{ApprovalRequest, ApprovalScope, RequestId, RequestKind, TransferRequest};
use custodian_core::Address;
use custodian_registry::AssetLedger;
use tracing::{info, warn};

impl<L: AssetLedger> ValidationEngine<L> {
    /// Confirm a pending transfer request and apply it
    ///
    /// Current ownership is not re-checked here, unlike single-asset
    /// approvals. If the asset moved since the request was filed, the
    /// ledger's own rejection propagates and the request stays pending.
    pub fn confirm_transfer(
        &mut self,
        validator: Address,
        id: RequestId,
    ) -> Result<TransferRequest, ValidationError> {
        self.authorize(&validator)?;

        let request = self.transfers.get(id)?;
        if request.is_valid() {
            warn!(%validator, request_index = id, "Transfer request already validated");
            return Err(ValidationError::AlreadyValidated {
                kind: RequestKind::Transfer,
                id,
            });
        }
        let (from, to, asset) = (request.from, request.to, request.asset_id);

        self.ledger.raw_transfer(from, to, asset)?;

        let request = self.transfers.get_mut(id)?;
        request.confirm();
        let confirmed = request.clone();
        self.emit(GateEvent::TransferConfirmed {
            request_index: id,
            validator,
        });

        info!(%validator, request_index = id, %from, %to, %asset, "Transfer confirmed");
        Ok(confirmed)
    }

    /// Confirm a pending approval request and apply it
    pub fn confirm_approval(
        &mut self,
        validator: Address,
        id: RequestId,
    ) -> Result<ApprovalRequest, ValidationError> {
        self.authorize(&validator)?;

        let request = self.approvals.get(id)?;
        if request.is_valid() {
            warn!(%validator, request_index = id, "Approval request already validated");
            return Err(ValidationError::AlreadyValidated {
                kind: RequestKind::Approval,
                id,
            });
        }
        let (owner, grantee, scope) = (request.owner, request.grantee, request.scope);

        match scope {
            ApprovalScope::Single(asset) => {
                let actual = self.ledger.owner_of(asset)?;
                if actual != owner {
                    warn!(request_index = id, %asset, expected = %owner, %actual,
                        "Ownership changed since approval was requested");
                    return Err(ValidationError::OwnershipChanged {
                        asset,
                        expected: owner,
                        actual,
                    });
                }
                self.ledger.raw_approve(grantee, asset)?;
            }
            ApprovalScope::All => {
                self.ledger.raw_approve_for_all(owner, grantee, true)?;
            }
        }

        let request = self.approvals.get_mut(id)?;
        request.confirm();
        let confirmed = request.clone();
        self.emit(GateEvent::ApprovalConfirmed {
            request_index: id,
            validator,
        });

        info!(%validator, request_index = id, %owner, %grantee, "Approval confirmed");
        Ok(confirmed)
    }

    fn authorize(&self, validator: &Address) -> Result<(), ValidationError> {
        if self.policy.is_authorized_validator(validator) {
            Ok(())
        } else {
            warn!(%validator, policy = self.policy.name(), "Confirmation by unauthorized caller");
            Err(ValidationError::UnauthorizedValidator(*validator))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::AllowList;
    use custodian_core::AssetId;
    use custodian_registry::{AssetRegistry, RegistryError};

    const ALICE: Address = Address::from_low_u8(0xa1);
    const BOB: Address = Address::from_low_u8(0xb0);
    const CAROL: Address = Address::from_low_u8(0xc0);
    const VALIDATOR: Address = Address::from_low_u8(0x99);

    fn setup() -> ValidationEngine<AssetRegistry> {
        let mut registry = AssetRegistry::new();
        registry.mint(ALICE, AssetId::new(7)).unwrap();
        ValidationEngine::new(registry, Box::new(AllowList::new([VALIDATOR])))
    }

    #[test]
    fn test_confirm_transfer_applies_once() {
        let mut engine = setup();
        engine.submit_transfer(ALICE, ALICE, BOB, AssetId::new(7)).unwrap();

        let confirmed = engine.confirm_transfer(VALIDATOR, 0).unwrap();
        assert!(confirmed.is_valid());
        assert_eq!(engine.ledger().owner_of(AssetId::new(7)).unwrap(), BOB);

        let again = engine.confirm_transfer(VALIDATOR, 0);
        assert_eq!(
            again,
            Err(ValidationError::AlreadyValidated {
                kind: RequestKind::Transfer,
                id: 0,
            })
        );
        assert!(engine.request_by_id(0).unwrap().is_valid());
    }

    #[test]
    fn test_unauthorized_validator() {
        let mut engine = setup();
        engine.submit_transfer(ALICE, ALICE, BOB, AssetId::new(7)).unwrap();
        engine.drain_events();

        // The owner cannot validate its own request
        assert_eq!(
            engine.confirm_transfer(ALICE, 0),
            Err(ValidationError::UnauthorizedValidator(ALICE))
        );
        assert!(!engine.request_by_id(0).unwrap().is_valid());
        assert_eq!(engine.ledger().owner_of(AssetId::new(7)).unwrap(), ALICE);
        assert!(engine.drain_events().is_empty());
    }

    #[test]
    fn test_confirm_out_of_range() {
        let mut engine = setup();
        assert!(matches!(
            engine.confirm_transfer(VALIDATOR, 3),
            Err(ValidationError::OutOfRange { id: 3, total: 0, .. })
        ));
        assert!(matches!(
            engine.confirm_approval(VALIDATOR, 0),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_stale_transfer_surfaces_ledger_error() {
        let mut engine = setup();
        engine.submit_transfer(ALICE, ALICE, BOB, AssetId::new(7)).unwrap();

        // Asset leaves Alice through an operator while the request is pending
        engine.ledger_mut().raw_approve_for_all(ALICE, CAROL, true).unwrap();
        engine
            .submit_transfer(CAROL, ALICE, CAROL, AssetId::new(7))
            .unwrap();

        let result = engine.confirm_transfer(VALIDATOR, 0);
        assert_eq!(
            result,
            Err(ValidationError::Ledger(RegistryError::IncorrectOwner {
                asset: AssetId::new(7),
                expected: ALICE,
                actual: CAROL,
            }))
        );
        assert!(!engine.request_by_id(0).unwrap().is_valid());
    }

    #[test]
    fn test_confirm_single_approval() {
        let mut engine = setup();
        engine.submit_approval(ALICE, BOB, AssetId::new(7)).unwrap();

        let confirmed = engine.confirm_approval(VALIDATOR, 0).unwrap();
        assert!(confirmed.is_valid());
        assert_eq!(engine.ledger().get_approved(AssetId::new(7)).unwrap(), Some(BOB));
    }

    #[test]
    fn test_approval_ownership_changed() {
        let mut engine = setup();
        engine.submit_approval(ALICE, BOB, AssetId::new(7)).unwrap();
        engine.ledger_mut().raw_transfer(ALICE, CAROL, AssetId::new(7)).unwrap();

        let result = engine.confirm_approval(VALIDATOR, 0);
        assert_eq!(
            result,
            Err(ValidationError::OwnershipChanged {
                asset: AssetId::new(7),
                expected: ALICE,
                actual: CAROL,
            })
        );
        assert!(!engine.approval_by_id(0).unwrap().is_valid());
        assert_eq!(engine.ledger().get_approved(AssetId::new(7)).unwrap(), None);

        // Stale requests stay confirmable once the original owner is back
        engine.ledger_mut().raw_transfer(CAROL, ALICE, AssetId::new(7)).unwrap();
        assert!(engine.confirm_approval(VALIDATOR, 0).unwrap().is_valid());
    }

    #[test]
    fn test_confirm_blanket_approval() {
        let mut engine = setup();
        engine.submit_approval_for_all(ALICE, CAROL, true).unwrap();
        engine.drain_events();

        engine.confirm_approval(VALIDATOR, 0).unwrap();

        assert!(engine.ledger().is_approved_for_all(&ALICE, &CAROL));
        assert_eq!(
            engine.drain_events(),
            vec![GateEvent::ApprovalConfirmed {
                request_index: 0,
                validator: VALIDATOR,
            }]
        );
        assert!(matches!(
            engine.confirm_approval(VALIDATOR, 0),
            Err(ValidationError::AlreadyValidated {
                kind: RequestKind::Approval,
                id: 0,
            })
        ));
    }
}

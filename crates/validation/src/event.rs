//! Notifications emitted by the validation engine

use crate::request::RequestId;
use custodian_core::{Address, AssetId};
use serde::{Deserialize, Serialize};
use strum_macros::IntoStaticStr;

/// Observable outcome of a successful operation
///
/// Events are queued only after the operation that produced them has fully
/// applied, so an observer never sees an event for a rejected call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, IntoStaticStr)]
#[serde(tag = "event_type", rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GateEvent {
    /// Owner-initiated transfer recorded for validation
    TransferRequestCreated {
        from: Address,
        to: Address,
        asset_id: AssetId,
        request_index: RequestId,
    },

    /// Approval recorded for validation
    ApprovalRequestCreated {
        owner: Address,
        grantee: Address,
        asset_id: Option<AssetId>,
        approve_all: bool,
        request_index: RequestId,
    },

    /// Operator transfer applied without validation
    TransferExecuted {
        operator: Address,
        from: Address,
        to: Address,
        asset_id: AssetId,
    },

    /// Blanket approval cleared immediately
    OperatorRevoked { owner: Address, operator: Address },

    TransferConfirmed {
        request_index: RequestId,
        validator: Address,
    },

    ApprovalConfirmed {
        request_index: RequestId,
        validator: Address,
    },
}

impl GateEvent {
    /// Event name for logging
    pub fn name(&self) -> &'static str {
        self.into()
    }

    /// Request index carried by the event, if any
    pub fn request_index(&self) -> Option<RequestId> {
        match self {
            GateEvent::TransferRequestCreated { request_index, .. }
            | GateEvent::ApprovalRequestCreated { request_index, .. }
            | GateEvent::TransferConfirmed { request_index, .. }
            | GateEvent::ApprovalConfirmed { request_index, .. } => Some(*request_index),
            GateEvent::TransferExecuted { .. } | GateEvent::OperatorRevoked { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        let event = GateEvent::TransferRequestCreated {
            from: Address::from_low_u8(1),
            to: Address::from_low_u8(2),
            asset_id: AssetId::new(7),
            request_index: 0,
        };
        assert_eq!(event.name(), "transfer_request_created");
        assert_eq!(event.request_index(), Some(0));

        let revoked = GateEvent::OperatorRevoked {
            owner: Address::from_low_u8(1),
            operator: Address::from_low_u8(3),
        };
        assert_eq!(revoked.name(), "operator_revoked");
        assert_eq!(revoked.request_index(), None);
    }

    #[test]
    fn test_event_json_tag() {
        let event = GateEvent::ApprovalConfirmed {
            request_index: 4,
            validator: Address::from_low_u8(9),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event_type"], "approval_confirmed");
        assert_eq!(json["request_index"], 4);
    }
}

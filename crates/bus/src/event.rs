//! Notifications as delivered on the bus

use chrono::{DateTime, Utc};
use custodian_validation::GateEvent;
use serde::{Deserialize, Serialize};

/// A notification tagged with the journal record that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusEvent {
    /// Journal sequence of the originating action
    pub sequence: u64,
    pub correlation_id: String,
    pub event: GateEvent,
    pub timestamp: DateTime<Utc>,
}

impl BusEvent {
    pub fn new(sequence: u64, correlation_id: impl Into<String>, event: GateEvent) -> Self {
        Self {
            sequence,
            correlation_id: correlation_id.into(),
            event,
            timestamp: Utc::now(),
        }
    }
}

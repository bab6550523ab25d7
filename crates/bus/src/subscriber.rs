//! Event subscriber trait for async event handling

use crate::error::BusError;
use crate::event::BusEvent;
use async_trait::async_trait;

/// Trait for event subscribers
///
/// Each subscriber should be idempotent (handle duplicate events gracefully).
#[async_trait]
pub trait EventSubscriber: Send + Sync {
    /// Get the subscriber name (for logging)
    fn name(&self) -> &str;

    /// Handle one notification
    async fn handle(&self, event: &BusEvent) -> Result<(), BusError>;
}

/// Writes every notification to the tracing log
pub struct LoggingSubscriber;

#[async_trait]
impl EventSubscriber for LoggingSubscriber {
    fn name(&self) -> &str {
        "logging"
    }

    async fn handle(&self, event: &BusEvent) -> Result<(), BusError> {
        tracing::info!(
            sequence = event.sequence,
            correlation_id = %event.correlation_id,
            event = event.event.name(),
            request_index = ?event.event.request_index(),
            "Notification"
        );
        Ok(())
    }
}

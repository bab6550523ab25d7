//! Broadcast channel distribution

use crate::event::BusEvent;
use crate::subscriber::EventSubscriber;
use std::sync::Arc;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;

/// Default channel capacity
pub const DEFAULT_CAPACITY: usize = 1024;

/// Event bus for distributing notifications
///
/// Publishing never blocks. Slow subscribers that fall more than the
/// channel capacity behind skip the missed events and log a warning.
pub struct EventBus {
    sender: broadcast::Sender<BusEvent>,
}

impl EventBus {
    /// Create a new event bus
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publish an event, returning how many subscribers received it
    pub fn publish(&self, event: BusEvent) -> usize {
        // No receivers is not an error: nobody is listening yet
        self.sender.send(event).unwrap_or(0)
    }

    /// Raw receiver for callers that drive their own loop
    pub fn subscribe(&self) -> broadcast::Receiver<BusEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Run `subscriber` on its own task until the bus is dropped
    pub fn spawn_subscriber(&self, subscriber: Arc<dyn EventSubscriber>) -> JoinHandle<()> {
        let mut receiver = self.sender.subscribe();

        tokio::spawn(async move {
            loop {
                match receiver.recv().await {
                    Ok(event) => {
                        if let Err(e) = subscriber.handle(&event).await {
                            tracing::error!(subscriber = subscriber.name(), error = %e, "Subscriber failed");
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(subscriber = subscriber.name(), skipped, "Subscriber lagged");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
            tracing::debug!(subscriber = subscriber.name(), "Subscriber stopped");
        })
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

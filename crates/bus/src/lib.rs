//! Custodian Event Bus - In-process async notification distribution
//!
//! Delivers notifications of committed actions to observers.
//!
//! - Async pub/sub with tokio broadcast channel
//! - `EventSubscriber` trait for custom handlers
//! - No retention in bus - history lives in the JSONL journal

pub mod channel;
pub mod error;
pub mod event;
pub mod subscriber;

pub use channel::EventBus;
pub use error::BusError;
pub use event::BusEvent;
pub use subscriber::{EventSubscriber, LoggingSubscriber};

//! Tablehost event bus.
//!
//! - [`EventBus`]: in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`DomainEvent`]: the typed change notification, carrying only public ids.
//! - [`Topic`]: the subscription keys an event fans out to.

pub mod bus;
pub mod topic;

pub use bus::{DomainEvent, EventBus, EventKind};
pub use topic::{Topic, TopicParseError};

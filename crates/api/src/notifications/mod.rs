//! Realtime notification fan-out.
//!
//! The [`NotificationRouter`] subscribes to the event bus and pushes each
//! event to the WebSocket connections subscribed to any of its topics.

pub mod router;

pub use router::NotificationRouter;

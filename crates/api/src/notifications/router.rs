//! Event-to-WebSocket routing.

use std::sync::Arc;

use axum::extract::ws::Message;
use serde::Serialize;
use tablehost_events::DomainEvent;
use tokio::sync::broadcast;

use crate::ws::WsManager;

/// Outbound frame: `{"type":"event", "event": ..., ids..., "timestamp": ...}`.
#[derive(Debug, Serialize)]
pub struct EventFrame<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(flatten)]
    pub event: &'a DomainEvent,
}

impl<'a> EventFrame<'a> {
    pub fn new(event: &'a DomainEvent) -> Self {
        Self { kind: "event", event }
    }
}

/// Routes domain events to WebSocket subscribers.
pub struct NotificationRouter {
    ws_manager: Arc<WsManager>,
}

impl NotificationRouter {
    pub fn new(ws_manager: Arc<WsManager>) -> Self {
        Self { ws_manager }
    }

    /// Run the routing loop.
    ///
    /// Exits when the channel is closed (i.e. the
    /// [`EventBus`](tablehost_events::EventBus) is dropped).
    pub async fn run(self, mut receiver: broadcast::Receiver<DomainEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    self.route_event(&event).await;
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Notification router lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, notification router shutting down");
                    break;
                }
            }
        }
    }

    /// Push one event to every connection subscribed to any of its topics.
    pub async fn route_event(&self, event: &DomainEvent) -> usize {
        let payload = match serde_json::to_string(&EventFrame::new(event)) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!(error = %e, event = ?event.event, "Failed to serialize event");
                return 0;
            }
        };

        let delivered = self
            .ws_manager
            .send_to_topics(&event.topics(), Message::Text(payload.into()))
            .await;
        tracing::debug!(event = ?event.event, delivered, "Event routed");
        delivered
    }
}

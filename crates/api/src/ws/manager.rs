use std::collections::{HashMap, HashSet};

use axum::body::Bytes;
use axum::extract::ws::Message;
use tablehost_core::types::Timestamp;
use tablehost_events::Topic;
use tokio::sync::{mpsc, RwLock};

/// Channel sender half for pushing messages to a WebSocket connection.
pub type WsSender = mpsc::UnboundedSender<Message>;

/// Metadata for a single WebSocket connection.
pub struct WsConnection {
    /// Channel sender for outbound messages to this connection.
    pub sender: WsSender,
    /// Topics this connection receives events for.
    pub topics: HashSet<Topic>,
    /// When this connection was established.
    pub connected_at: Timestamp,
}

/// Manages all active WebSocket connections and their topic subscriptions.
///
/// Thread-safe via interior `RwLock`; wrapped in `Arc` and shared across the
/// application.
pub struct WsManager {
    connections: RwLock<HashMap<String, WsConnection>>,
}

impl WsManager {
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
        }
    }

    /// Register a new connection, subscribed to [`Topic::All`].
    ///
    /// Returns the receiver half of the message channel so the caller can
    /// forward messages to the WebSocket sink.
    pub async fn add(&self, conn_id: String) -> mpsc::UnboundedReceiver<Message> {
        let (tx, rx) = mpsc::unbounded_channel();
        let conn = WsConnection {
            sender: tx,
            topics: HashSet::from([Topic::All]),
            connected_at: chrono::Utc::now(),
        };
        self.connections.write().await.insert(conn_id, conn);
        rx
    }

    pub async fn remove(&self, conn_id: &str) {
        self.connections.write().await.remove(conn_id);
    }

    /// Add a topic to a connection. Returns `false` for an unknown connection.
    pub async fn subscribe(&self, conn_id: &str, topic: Topic) -> bool {
        match self.connections.write().await.get_mut(conn_id) {
            Some(conn) => {
                conn.topics.insert(topic);
                true
            }
            None => false,
        }
    }

    /// Drop a topic from a connection. Returns `false` for an unknown
    /// connection.
    pub async fn unsubscribe(&self, conn_id: &str, topic: Topic) -> bool {
        match self.connections.write().await.get_mut(conn_id) {
            Some(conn) => {
                conn.topics.remove(&topic);
                true
            }
            None => false,
        }
    }

    /// A connection's current topics, sorted.
    pub async fn topics(&self, conn_id: &str) -> Option<Vec<Topic>> {
        self.connections.read().await.get(conn_id).map(|conn| {
            let mut topics: Vec<Topic> = conn.topics.iter().copied().collect();
            topics.sort();
            topics
        })
    }

    /// Send a message to one connection.
    pub async fn send_to(&self, conn_id: &str, message: Message) -> bool {
        match self.connections.read().await.get(conn_id) {
            Some(conn) => conn.sender.send(message).is_ok(),
            None => false,
        }
    }

    /// Send a message once to every connection subscribed to any of `topics`.
    ///
    /// Returns the number of connections that accepted the message.
    pub async fn send_to_topics(&self, topics: &[Topic], message: Message) -> usize {
        let conns = self.connections.read().await;
        let mut count = 0;
        for conn in conns.values() {
            if topics.iter().any(|t| conn.topics.contains(t)) && conn.sender.send(message.clone()).is_ok() {
                count += 1;
            }
        }
        count
    }

    pub async fn connection_count(&self) -> usize {
        self.connections.read().await.len()
    }

    /// Send a Close frame to every connection, then clear the map.
    pub async fn shutdown_all(&self) {
        let mut conns = self.connections.write().await;
        let count = conns.len();
        for conn in conns.values() {
            let _ = conn.sender.send(Message::Close(None));
        }
        conns.clear();
        tracing::info!(count, "Closed all WebSocket connections");
    }

    /// Ping every connection and drop the ones whose outbound channel has
    /// closed. Returns the ids that were dropped.
    pub async fn ping_all(&self) -> Vec<String> {
        let mut conns = self.connections.write().await;
        let stale: Vec<String> = conns
            .iter()
            .filter(|(_, conn)| conn.sender.send(Message::Ping(Bytes::new())).is_err())
            .map(|(id, _)| id.clone())
            .collect();
        for id in &stale {
            conns.remove(id);
        }
        stale
    }
}

impl Default for WsManager {
    fn default() -> Self {
        Self::new()
    }
}

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use serde_json::json;
use tablehost_events::Topic;

use crate::state::AppState;
use crate::ws::manager::WsManager;

/// Inbound control frame.
#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
enum ClientCommand {
    Subscribe { topic: String },
    Unsubscribe { topic: String },
}

/// GET /api/v1/ws
///
/// Upgrades the connection to WebSocket. New connections receive every
/// event (`all`) until they unsubscribe from it.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state.ws_manager))
}

/// Manage a single WebSocket connection after upgrade.
///
/// Splits the socket into a sink (outbound) and stream (inbound), then:
///   1. Registers the connection with `WsManager`.
///   2. Spawns a sender task that forwards messages from the manager channel.
///   3. Processes subscribe / unsubscribe frames on the current task.
///   4. Cleans up on disconnect.
async fn handle_socket(socket: WebSocket, ws_manager: Arc<WsManager>) {
    let conn_id = uuid::Uuid::new_v4().to_string();
    tracing::info!(conn_id = %conn_id, "WebSocket connected");

    let mut rx = ws_manager.add(conn_id.clone()).await;

    let (mut sink, mut stream) = socket.split();

    let sender_conn_id = conn_id.clone();
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sink.send(msg).await.is_err() {
                tracing::debug!(conn_id = %sender_conn_id, "WebSocket sink closed");
                break;
            }
        }
    });

    while let Some(result) = stream.next().await {
        match result {
            Ok(Message::Close(_)) => break,
            Ok(Message::Pong(_)) => {
                tracing::trace!(conn_id = %conn_id, "Pong received");
            }
            Ok(Message::Text(text)) => {
                let reply = handle_command(&ws_manager, &conn_id, text.as_str()).await;
                ws_manager
                    .send_to(&conn_id, Message::Text(reply.to_string().into()))
                    .await;
            }
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(conn_id = %conn_id, error = %e, "WebSocket receive error");
                break;
            }
        }
    }

    ws_manager.remove(&conn_id).await;
    send_task.abort();
    tracing::info!(conn_id = %conn_id, "WebSocket disconnected");
}

/// Apply one control frame and build the acknowledgement (or error) frame.
async fn handle_command(ws_manager: &WsManager, conn_id: &str, text: &str) -> serde_json::Value {
    let command = match serde_json::from_str::<ClientCommand>(text) {
        Ok(command) => command,
        Err(e) => return json!({ "type": "error", "message": format!("Invalid command: {e}") }),
    };

    let (action, raw_topic) = match &command {
        ClientCommand::Subscribe { topic } => ("subscribed", topic),
        ClientCommand::Unsubscribe { topic } => ("unsubscribed", topic),
    };

    let topic: Topic = match raw_topic.parse() {
        Ok(topic) => topic,
        Err(e) => return json!({ "type": "error", "message": e.to_string() }),
    };

    match command {
        ClientCommand::Subscribe { .. } => ws_manager.subscribe(conn_id, topic).await,
        ClientCommand::Unsubscribe { .. } => ws_manager.unsubscribe(conn_id, topic).await,
    };
    tracing::debug!(conn_id, %topic, action, "WebSocket subscription changed");

    json!({ "type": action, "topic": topic.to_string() })
}

use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;

use crate::ws::manager::WsManager;

const PING_EVERY: Duration = Duration::from_secs(30);

/// Ping subscribers on a fixed cadence and forget the ones that went away
/// without a close frame. Aborted by `main` on shutdown.
pub fn start_heartbeat(ws_manager: Arc<WsManager>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(PING_EVERY);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            let stale = ws_manager.ping_all().await;
            if !stale.is_empty() {
                tracing::info!(dropped = stale.len(), "Dropped stale WebSocket subscribers");
            }
            let open = ws_manager.connection_count().await;
            tracing::trace!(open, "Heartbeat sent");
        }
    })
}

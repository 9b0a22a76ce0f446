use std::sync::Arc;

use chrono::NaiveDate;
use tablehost_core::time::today_in;

use crate::config::ServerConfig;
use crate::media::MediaUploader;
use crate::ws::WsManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: tablehost_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// WebSocket connection manager.
    pub ws_manager: Arc<WsManager>,
    /// Event bus for publishing change notifications.
    pub event_bus: Arc<tablehost_events::EventBus>,
    /// Image uploader; `None` when media is not configured.
    pub media: Option<Arc<dyn MediaUploader>>,
}

impl AppState {
    /// Today's date in the restaurant time zone.
    pub fn today(&self) -> NaiveDate {
        today_in(self.config.timezone)
    }
}

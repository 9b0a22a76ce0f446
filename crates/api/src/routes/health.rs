//! Liveness check, mounted at the root and exempt from the API key.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use chrono::NaiveDate;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    /// `ok`, or `degraded` when the database does not answer.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    pub ws_connections: usize,
    /// IANA name of the restaurant time zone.
    pub timezone: String,
    /// The date bookings and blocks are measured against.
    pub today: NaiveDate,
}

/// GET /health
async fn health(State(state): State<AppState>) -> Json<HealthReport> {
    let db_healthy = tablehost_db::health_check(&state.pool).await.is_ok();
    if !db_healthy {
        tracing::warn!("Health check could not reach the database");
    }

    Json(HealthReport {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        ws_connections: state.ws_manager.connection_count().await,
        timezone: state.config.timezone.name().to_string(),
        today: state.today(),
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

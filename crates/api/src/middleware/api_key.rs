//! Shared API key check for every `/api/v1` route.

use axum::extract::{Query, Request, State};
use axum::http::Method;
use axum::middleware::Next;
use axum::response::Response;
use serde::Deserialize;
use tablehost_core::api_keys::{verify_api_key, API_KEY_HEADER};
use tablehost_core::error::CoreError;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ApiKeyQuery {
    #[serde(rename = "apiKey")]
    pub api_key: Option<String>,
}

/// Require the `X-Api-Key` header. WebSocket upgrades, which cannot set
/// headers from a browser, may pass `?apiKey=` instead.
pub async fn require_api_key(
    State(state): State<AppState>,
    Query(query): Query<ApiKeyQuery>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if req.method() == Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let from_header = req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let from_query = if req.uri().path().ends_with("/ws") {
        query.api_key
    } else {
        None
    };

    let Some(presented) = from_header.or(from_query) else {
        tracing::warn!(uri = %req.uri(), "Missing API key");
        return Err(CoreError::Unauthorized("Missing API key".into()).into());
    };

    if !verify_api_key(&presented, &state.config.api_key_hash) {
        tracing::warn!(uri = %req.uri(), "Invalid API key");
        return Err(CoreError::Unauthorized("Invalid API key".into()).into());
    }

    Ok(next.run(req).await)
}

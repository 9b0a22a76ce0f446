//! Route definitions for the `/blocks` resource.

use axum::routing::delete;
use axum::Router;

use crate::handlers::block_table;
use crate::state::AppState;

/// Routes mounted at `/blocks`.
///
/// ```text
/// DELETE /{id}      -> delete (unblock)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}", delete(block_table::delete))
}

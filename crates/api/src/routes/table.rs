//! Route definitions for the `/tables` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::{block_table, table};
use crate::state::AppState;

/// Routes mounted at `/tables`.
///
/// ```text
/// GET    /{id}              -> get_by_id
/// PUT    /{id}              -> update
/// DELETE /{id}              -> delete
/// GET    /{id}/blocks       -> block_table::list_by_table
/// POST   /{id}/blocks       -> block_table::create
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}",
            get(table::get_by_id).put(table::update).delete(table::delete),
        )
        .route(
            "/{id}/blocks",
            get(block_table::list_by_table).post(block_table::create),
        )
}

//! Route definitions for the `/reservations` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::reservation;
use crate::state::AppState;

/// Routes mounted at `/reservations`.
///
/// ```text
/// GET    /{id}              -> get_by_id
/// PUT    /{id}              -> update
/// DELETE /{id}              -> delete
/// PUT    /{id}/status       -> update_status
/// PUT    /{id}/table        -> assign_table
/// DELETE /{id}/table        -> unassign_table
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}",
            get(reservation::get_by_id)
                .put(reservation::update)
                .delete(reservation::delete),
        )
        .route("/{id}/status", put(reservation::update_status))
        .route(
            "/{id}/table",
            put(reservation::assign_table).delete(reservation::unassign_table),
        )
}

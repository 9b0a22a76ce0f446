//! Route definitions for the `/combined-tables` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::combined_table;
use crate::state::AppState;

/// Routes mounted at `/combined-tables`.
///
/// ```text
/// GET    /{id}      -> get_by_id
/// PUT    /{id}      -> update
/// DELETE /{id}      -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{id}",
        get(combined_table::get_by_id)
            .put(combined_table::update)
            .delete(combined_table::delete),
    )
}

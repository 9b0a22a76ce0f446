//! Route definitions for the `/floorplans` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::{combined_table, floorplan};
use crate::state::AppState;

/// Routes mounted at `/floorplans`.
///
/// ```text
/// GET    /{id}                      -> get_by_id (layout)
/// PUT    /{id}                      -> update
/// DELETE /{id}                      -> delete
/// GET    /{id}/tables               -> list_tables
/// POST   /{id}/tables               -> create_table
/// GET    /{id}/combined-tables      -> combined_table::list_by_floorplan
/// POST   /{id}/combined-tables      -> combined_table::create
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}",
            get(floorplan::get_by_id)
                .put(floorplan::update)
                .delete(floorplan::delete),
        )
        .route(
            "/{id}/tables",
            get(floorplan::list_tables).post(floorplan::create_table),
        )
        .route(
            "/{id}/combined-tables",
            get(combined_table::list_by_floorplan).post(combined_table::create),
        )
}

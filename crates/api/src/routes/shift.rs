//! Route definitions for the `/shifts` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::shift;
use crate::state::AppState;

/// Routes mounted at `/shifts`.
///
/// ```text
/// GET    /          -> list
/// POST   /          -> create
/// GET    /{id}      -> get_by_id
/// PUT    /{id}      -> update
/// DELETE /{id}      -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(shift::list).post(shift::create))
        .route(
            "/{id}",
            get(shift::get_by_id).put(shift::update).delete(shift::delete),
        )
}

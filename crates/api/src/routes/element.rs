//! Route definitions for the `/elements` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::element;
use crate::state::AppState;

/// Routes mounted at `/elements`.
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
        .route("/", get(element::list).post(element::create))
        .route(
            "/{id}",
            get(element::get_by_id).put(element::update).delete(element::delete),
        )
}

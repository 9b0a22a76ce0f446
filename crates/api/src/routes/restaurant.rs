//! Route definitions for the `/restaurants` resource.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::{black_list, floorplan, reservation, restaurant};
use crate::state::AppState;

/// Routes mounted at `/restaurants`.
///
/// ```text
/// GET    /                                -> list
/// POST   /                                -> create
/// GET    /{id}                            -> get_by_id
/// PUT    /{id}                            -> update
/// DELETE /{id}                            -> delete
/// GET    /{id}/shifts                     -> list_shifts
/// POST   /{id}/shifts                     -> attach_shift
/// DELETE /{id}/shifts/{shift_id}          -> detach_shift
/// GET    /{id}/floorplans                 -> floorplan::list_by_restaurant
/// POST   /{id}/floorplans                 -> floorplan::create
/// GET    /{id}/reservations               -> reservation::list_by_restaurant
/// POST   /{id}/reservations               -> reservation::create
/// GET    /{id}/blacklist                  -> black_list::list_by_restaurant
/// POST   /{id}/blacklist                  -> black_list::block
/// DELETE /{id}/blacklist/{client_id}      -> black_list::unblock
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(restaurant::list).post(restaurant::create))
        .route(
            "/{id}",
            get(restaurant::get_by_id)
                .put(restaurant::update)
                .delete(restaurant::delete),
        )
        .route(
            "/{id}/shifts",
            get(restaurant::list_shifts).post(restaurant::attach_shift),
        )
        .route("/{id}/shifts/{shift_id}", delete(restaurant::detach_shift))
        .route(
            "/{id}/floorplans",
            get(floorplan::list_by_restaurant).post(floorplan::create),
        )
        .route(
            "/{id}/reservations",
            get(reservation::list_by_restaurant).post(reservation::create),
        )
        .route(
            "/{id}/blacklist",
            get(black_list::list_by_restaurant).post(black_list::block),
        )
        .route("/{id}/blacklist/{client_id}", delete(black_list::unblock))
}

pub mod block_table;
pub mod client;
pub mod combined_table;
pub mod element;
pub mod floorplan;
pub mod health;
pub mod reservation;
pub mod restaurant;
pub mod shift;
pub mod table;
pub mod upload;

use axum::middleware;
use axum::routing::get;
use axum::Router;

use crate::middleware::api_key::require_api_key;
use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree. Every route requires the shared API key.
///
/// Route hierarchy:
///
/// ```text
/// /ws                                              WebSocket (?apiKey= allowed)
///
/// /restaurants                                     list, create
/// /restaurants/{id}                                get, update, delete
/// /restaurants/{id}/shifts                         list offered, attach
/// /restaurants/{id}/shifts/{shift_id}              detach
/// /restaurants/{id}/floorplans                     list, create
/// /restaurants/{id}/reservations                   list (?date, ?status, ?shiftId), create
/// /restaurants/{id}/blacklist                      list, block client
/// /restaurants/{id}/blacklist/{client_id}          unblock client
///
/// /shifts                                          list, create
/// /shifts/{id}                                     get, update, delete
///
/// /elements                                        list, create
/// /elements/{id}                                   get, update, delete
///
/// /floorplans/{id}                                 get (with tables), update, delete
/// /floorplans/{id}/tables                          list, place table
/// /floorplans/{id}/combined-tables                 list, create
///
/// /tables/{id}                                     get, update, delete
/// /tables/{id}/blocks                              list, block
/// /blocks/{id}                                     unblock
///
/// /combined-tables/{id}                            get, update, delete
///
/// /reservations/{id}                               get, update, delete
/// /reservations/{id}/status                        update status (PUT)
/// /reservations/{id}/table                         assign (PUT), unassign (DELETE)
///
/// /clients                                         list / search (?search), create
/// /clients/{id}                                    get, update, delete
///
/// /uploads                                         upload image (POST, multipart)
/// ```
pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // WebSocket notifications.
        .route("/ws", get(ws::ws_handler))
        // Restaurants and their nested collections.
        .nest("/restaurants", restaurant::router())
        .nest("/shifts", shift::router())
        .nest("/elements", element::router())
        // Floorplan layout: floorplans, placed tables, blocks, combined tables.
        .nest("/floorplans", floorplan::router())
        .nest("/tables", table::router())
        .nest("/blocks", block_table::router())
        .nest("/combined-tables", combined_table::router())
        .nest("/reservations", reservation::router())
        .nest("/clients", client::router())
        .nest("/uploads", upload::router())
        .route_layer(middleware::from_fn_with_state(state, require_api_key))
}

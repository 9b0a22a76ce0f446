//! Request handlers, one submodule per resource.
//!
//! Handlers resolve public ids through the repositories in `tablehost_db`,
//! run the pure rules from `tablehost_core`, write, publish a
//! [`DomainEvent`](tablehost_events::DomainEvent) and wrap the result in an
//! [`ApiResponse`](crate::response::ApiResponse).

pub mod black_list;
pub mod block_table;
pub mod client;
pub mod combined_table;
pub mod element;
pub mod floorplan;
pub mod reservation;
pub mod restaurant;
pub mod shift;
pub mod table;
pub mod upload;

use sqlx::PgPool;
use tablehost_core::error::CoreError;
use tablehost_core::types::PublicId;
use tablehost_db::models::client::Client;
use tablehost_db::models::floorplan::Floorplan;
use tablehost_db::models::reservation::Reservation;
use tablehost_db::models::restaurant::Restaurant;
use tablehost_db::models::shift::Shift;
use tablehost_db::models::table::TableInstance;
use tablehost_db::repositories::{
    ClientRepo, FloorplanRepo, ReservationRepo, RestaurantRepo, ShiftRepo, TableRepo,
};

use crate::error::AppResult;

// ---------------------------------------------------------------------------
// Shared lookups
// ---------------------------------------------------------------------------

pub(crate) async fn find_restaurant(pool: &PgPool, id: PublicId) -> AppResult<Restaurant> {
    RestaurantRepo::find_by_public_id(pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Restaurant", id).into())
}

pub(crate) async fn find_shift(pool: &PgPool, id: PublicId) -> AppResult<Shift> {
    ShiftRepo::find_by_public_id(pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Shift", id).into())
}

pub(crate) async fn find_floorplan(pool: &PgPool, id: PublicId) -> AppResult<Floorplan> {
    FloorplanRepo::find_by_public_id(pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Floorplan", id).into())
}

pub(crate) async fn find_table(pool: &PgPool, id: PublicId) -> AppResult<TableInstance> {
    TableRepo::find_by_public_id(pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Table", id).into())
}

pub(crate) async fn find_client(pool: &PgPool, id: PublicId) -> AppResult<Client> {
    ClientRepo::find_by_public_id(pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Client", id).into())
}

pub(crate) async fn find_reservation(pool: &PgPool, id: PublicId) -> AppResult<Reservation> {
    ReservationRepo::find_by_public_id(pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Reservation", id).into())
}

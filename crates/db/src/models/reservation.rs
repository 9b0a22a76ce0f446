//! Reservation model and DTOs.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tablehost_core::table_block::ReservationSlot;
use tablehost_core::types::{DbId, PublicId, Timestamp};
use validator::Validate;

use crate::models::status::{ReservationStatus, ReservationType};

/// Default sitting length when the caller does not give one.
pub const DEFAULT_DURATION_MINUTES: i32 = 90;

/// A row from `reservations`, joined with the public ids and labels of the
/// restaurant, shift, client and assigned table / combined table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    #[serde(skip)]
    pub id: DbId,
    #[serde(rename = "id")]
    pub public_id: PublicId,
    #[serde(skip)]
    pub restaurant_id: DbId,
    pub restaurant_public_id: PublicId,
    #[serde(skip)]
    pub client_id: Option<DbId>,
    pub client_public_id: Option<PublicId>,
    pub client_name: Option<String>,
    #[serde(skip)]
    pub shift_id: DbId,
    pub shift_public_id: PublicId,
    pub shift_name: String,
    pub reservation_date: NaiveDate,
    pub reservation_time: NaiveTime,
    pub party_size: i32,
    #[sqlx(rename = "status_id")]
    pub status: Option<ReservationStatus>,
    #[sqlx(rename = "type_id")]
    pub reservation_type: ReservationType,
    pub tags: Vec<String>,
    pub notes: Option<String>,
    pub duration_minutes: i32,
    #[serde(skip)]
    pub table_id: Option<DbId>,
    pub table_public_id: Option<PublicId>,
    pub table_name: Option<String>,
    #[serde(skip)]
    pub combined_table_member_id: Option<DbId>,
    pub combined_table_public_id: Option<PublicId>,
    pub combined_table_name: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&Reservation> for ReservationSlot {
    fn from(r: &Reservation) -> Self {
        ReservationSlot {
            date: r.reservation_date,
            time: r.reservation_time,
        }
    }
}

/// DTO for creating a reservation under a restaurant.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservation {
    pub client_id: Option<PublicId>,
    pub shift_id: PublicId,
    pub reservation_date: NaiveDate,
    pub reservation_time: NaiveTime,
    #[validate(range(min = 1, message = "partySize must be at least 1"))]
    pub party_size: i32,
    pub status: Option<ReservationStatus>,
    #[serde(default)]
    pub reservation_type: ReservationType,
    #[serde(default)]
    pub tags: Vec<String>,
    #[validate(length(max = 2000, message = "notes must be at most 2000 characters"))]
    pub notes: Option<String>,
    #[validate(range(min = 1, message = "durationMinutes must be at least 1"))]
    pub duration_minutes: Option<i32>,
}

/// DTO for editing reservation details. Status and table assignment have
/// their own commands.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReservation {
    pub client_id: Option<PublicId>,
    pub shift_id: Option<PublicId>,
    pub reservation_date: Option<NaiveDate>,
    pub reservation_time: Option<NaiveTime>,
    #[validate(range(min = 1, message = "partySize must be at least 1"))]
    pub party_size: Option<i32>,
    pub reservation_type: Option<ReservationType>,
    pub tags: Option<Vec<String>>,
    #[validate(length(max = 2000, message = "notes must be at most 2000 characters"))]
    pub notes: Option<String>,
    #[validate(range(min = 1, message = "durationMinutes must be at least 1"))]
    pub duration_minutes: Option<i32>,
}

/// Body of `PUT /reservations/{id}/status`. `null` (or omitted) resets the
/// reservation to unset / waitlist.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReservationStatus {
    #[serde(default)]
    pub status: Option<ReservationStatus>,
}

/// Body of `PUT /reservations/{id}/table`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignTable {
    pub table_id: Option<PublicId>,
    pub combined_table_id: Option<PublicId>,
}

/// Query string of `GET /restaurants/{id}/reservations`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationListParams {
    pub date: Option<NaiveDate>,
    pub status: Option<ReservationStatus>,
    pub shift_id: Option<PublicId>,
}

//! Handlers for reservations: booking, editing, status changes and table
//! assignment.

use axum::extract::{Path, Query, State};
use chrono::NaiveDate;
use sqlx::PgPool;
use tablehost_core::assignment::TableAssignment;
use tablehost_core::error::CoreError;
use tablehost_core::types::{DbId, PublicId};
use tablehost_db::models::reservation::{
    AssignTable, CreateReservation, Reservation, ReservationListParams, UpdateReservation,
    UpdateReservationStatus,
};
use tablehost_db::repositories::reservation_repo::ReservationFilter;
use tablehost_db::repositories::{BlackListRepo, CombinedTableRepo, ReservationRepo};
use tablehost_events::{DomainEvent, EventKind};

use crate::error::AppResult;
use crate::extract::{AppJson, ValidatedJson};
use crate::handlers::{find_client, find_reservation, find_restaurant, find_shift, find_table};
use crate::response::ApiResponse;
use crate::state::AppState;

/// POST /api/v1/restaurants/{id}/reservations
pub async fn create(
    State(state): State<AppState>,
    Path(restaurant_id): Path<PublicId>,
    ValidatedJson(input): ValidatedJson<CreateReservation>,
) -> AppResult<ApiResponse<Reservation>> {
    let restaurant = find_restaurant(&state.pool, restaurant_id).await?;
    ensure_not_past(input.reservation_date, state.today())?;
    let shift = find_shift(&state.pool, input.shift_id).await?;

    let client_id = match input.client_id {
        Some(client_public_id) => {
            Some(bookable_client(&state.pool, client_public_id, restaurant.id).await?)
        }
        None => None,
    };

    let reservation =
        ReservationRepo::create(&state.pool, restaurant.id, client_id, shift.id, &input).await?;

    tracing::info!(
        restaurant_id = %restaurant_id,
        reservation_id = %reservation.public_id,
        date = %reservation.reservation_date,
        time = %reservation.reservation_time,
        party_size = reservation.party_size,
        "Reservation created",
    );
    state.event_bus.publish(reservation_event(EventKind::ReservationCreated, &reservation));

    Ok(ApiResponse::created(reservation, "Reservation created"))
}

/// GET /api/v1/restaurants/{id}/reservations
///
/// Optional filters: `?date=YYYY-MM-DD`, `?status=Upcoming`, `?shiftId=`.
pub async fn list_by_restaurant(
    State(state): State<AppState>,
    Path(restaurant_id): Path<PublicId>,
    Query(params): Query<ReservationListParams>,
) -> AppResult<ApiResponse<Vec<Reservation>>> {
    let restaurant = find_restaurant(&state.pool, restaurant_id).await?;
    let shift_id = match params.shift_id {
        Some(id) => Some(find_shift(&state.pool, id).await?.id),
        None => None,
    };

    let filter = ReservationFilter {
        date: params.date,
        status: params.status,
        shift_id,
    };
    let reservations = ReservationRepo::list_by_restaurant(&state.pool, restaurant.id, filter).await?;
    Ok(ApiResponse::ok(reservations, "Reservations retrieved"))
}

/// GET /api/v1/reservations/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<PublicId>,
) -> AppResult<ApiResponse<Reservation>> {
    let reservation = find_reservation(&state.pool, id).await?;
    Ok(ApiResponse::ok(reservation, "Reservation retrieved"))
}

/// PUT /api/v1/reservations/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<PublicId>,
    ValidatedJson(input): ValidatedJson<UpdateReservation>,
) -> AppResult<ApiResponse<Reservation>> {
    let existing = find_reservation(&state.pool, id).await?;

    if let Some(date) = input.reservation_date {
        ensure_not_past(date, state.today())?;
    }
    let shift_id = match input.shift_id {
        Some(shift_id) => Some(find_shift(&state.pool, shift_id).await?.id),
        None => None,
    };
    let client_id = match input.client_id {
        Some(client_public_id) => {
            Some(bookable_client(&state.pool, client_public_id, existing.restaurant_id).await?)
        }
        None => None,
    };

    let reservation = ReservationRepo::update(&state.pool, existing.id, client_id, shift_id, &input)
        .await?
        .ok_or_else(|| CoreError::not_found("Reservation", id))?;

    tracing::info!(reservation_id = %id, "Reservation updated");
    state.event_bus.publish(reservation_event(EventKind::ReservationUpdated, &reservation));

    Ok(ApiResponse::ok(reservation, "Reservation updated"))
}

/// PUT /api/v1/reservations/{id}/status
///
/// Any status may follow any other. `{"status": null}` or an omitted
/// status puts the reservation back on the waitlist.
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<PublicId>,
    AppJson(input): AppJson<UpdateReservationStatus>,
) -> AppResult<ApiResponse<Reservation>> {
    let existing = find_reservation(&state.pool, id).await?;
    let reservation = ReservationRepo::update_status(&state.pool, existing.id, input.status)
        .await?
        .ok_or_else(|| CoreError::not_found("Reservation", id))?;

    tracing::info!(
        reservation_id = %id,
        from = ?existing.status,
        to = ?reservation.status,
        "Reservation status changed",
    );
    state
        .event_bus
        .publish(reservation_event(EventKind::ReservationStatusChanged, &reservation));

    Ok(ApiResponse::ok(reservation, "Reservation status updated"))
}

/// PUT /api/v1/reservations/{id}/table
///
/// Body carries exactly one of `tableId` or `combinedTableId`. Assigning one
/// kind clears the other.
pub async fn assign_table(
    State(state): State<AppState>,
    Path(id): Path<PublicId>,
    AppJson(input): AppJson<AssignTable>,
) -> AppResult<ApiResponse<Reservation>> {
    let target = TableAssignment::from_parts(input.table_id, input.combined_table_id)?;
    let existing = find_reservation(&state.pool, id).await?;

    let updated = match target {
        TableAssignment::Table(table_id) => {
            let table = find_table(&state.pool, table_id).await?;
            if table.restaurant_id != existing.restaurant_id {
                return Err(CoreError::invalid(format!(
                    "Table '{}' belongs to a different restaurant",
                    table.table_name
                ))
                .into());
            }
            if !table.is_reservable() {
                return Err(CoreError::invalid(format!(
                    "Table '{}' is not reservable",
                    table.table_name
                ))
                .into());
            }
            ReservationRepo::assign_table(&state.pool, existing.id, table.id).await?
        }
        TableAssignment::Combined(combined_id) => {
            let combined = CombinedTableRepo::find_by_public_id(&state.pool, combined_id)
                .await?
                .ok_or_else(|| CoreError::not_found("CombinedTable", combined_id))?;
            let group = &combined.combined_table;
            if group.restaurant_id != existing.restaurant_id {
                return Err(CoreError::invalid(format!(
                    "Combined table '{}' belongs to a different restaurant",
                    group.name
                ))
                .into());
            }
            let anchor = CombinedTableRepo::anchor_member_id(&state.pool, group.id)
                .await?
                .ok_or_else(|| {
                    CoreError::invalid(format!("Combined table '{}' has no members", group.name))
                })?;
            ReservationRepo::assign_combined_table(&state.pool, existing.id, anchor).await?
        }
    };
    let reservation = updated.ok_or_else(|| CoreError::not_found("Reservation", id))?;

    tracing::info!(
        reservation_id = %id,
        table = ?reservation.table_public_id,
        combined_table = ?reservation.combined_table_public_id,
        "Reservation assigned",
    );
    state
        .event_bus
        .publish(reservation_event(EventKind::ReservationTableAssigned, &reservation));

    Ok(ApiResponse::ok(reservation, "Table assigned"))
}

/// DELETE /api/v1/reservations/{id}/table
pub async fn unassign_table(
    State(state): State<AppState>,
    Path(id): Path<PublicId>,
) -> AppResult<ApiResponse<Reservation>> {
    let existing = find_reservation(&state.pool, id).await?;
    let reservation = ReservationRepo::unassign_table(&state.pool, existing.id)
        .await?
        .ok_or_else(|| CoreError::not_found("Reservation", id))?;

    state
        .event_bus
        .publish(reservation_event(EventKind::ReservationTableUnassigned, &existing));

    Ok(ApiResponse::ok(reservation, "Table unassigned"))
}

/// DELETE /api/v1/reservations/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<PublicId>,
) -> AppResult<ApiResponse<()>> {
    let existing = find_reservation(&state.pool, id).await?;
    ReservationRepo::delete(&state.pool, existing.id).await?;

    tracing::info!(reservation_id = %id, "Reservation deleted");
    state
        .event_bus
        .publish(reservation_event(EventKind::ReservationDeleted, &existing));

    Ok(ApiResponse::empty("Reservation deleted"))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn ensure_not_past(date: NaiveDate, today: NaiveDate) -> Result<(), CoreError> {
    if date < today {
        return Err(CoreError::invalid(format!(
            "Reservation date {date} is in the past (today is {today})"
        )));
    }
    Ok(())
}

/// Resolve the client and refuse it when blacklisted at the restaurant.
async fn bookable_client(pool: &PgPool, client_id: PublicId, restaurant_id: DbId) -> AppResult<DbId> {
    let client = find_client(pool, client_id).await?;
    if BlackListRepo::is_blacklisted(pool, client.id, restaurant_id).await? {
        return Err(CoreError::conflict(format!(
            "Client '{}' is blacklisted at this restaurant",
            client.name
        ))
        .into());
    }
    Ok(client.id)
}

/// Event addressed to the reservation, its restaurant, its client, and the
/// table it sits on (if any).
fn reservation_event(kind: EventKind, reservation: &Reservation) -> DomainEvent {
    let mut event = DomainEvent::new(kind)
        .with_restaurant(reservation.restaurant_public_id)
        .with_reservation(reservation.public_id);
    if let Some(client_id) = reservation.client_public_id {
        event = event.with_client(client_id);
    }
    if let Some(table_id) = reservation.table_public_id {
        event = event.with_table(table_id);
    }
    if let Some(combined_id) = reservation.combined_table_public_id {
        event = event.with_entity(combined_id);
    }
    event
}

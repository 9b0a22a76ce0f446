//! Handlers for the `/shifts` resource.

use axum::extract::{Path, State};
use tablehost_core::error::CoreError;
use tablehost_core::types::PublicId;
use tablehost_db::models::shift::{CreateShift, Shift, UpdateShift};
use tablehost_db::repositories::ShiftRepo;
use tablehost_events::{DomainEvent, EventKind};

use crate::error::AppResult;
use crate::extract::ValidatedJson;
use crate::handlers::find_shift;
use crate::response::ApiResponse;
use crate::state::AppState;

/// POST /api/v1/shifts
///
/// An end time not after the start time describes a shift running past
/// midnight, so any pair of times is accepted.
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateShift>,
) -> AppResult<ApiResponse<Shift>> {
    if input.start_time == input.end_time {
        return Err(CoreError::invalid("Shift start and end times must differ").into());
    }
    let shift = ShiftRepo::create(&state.pool, &input).await?;

    tracing::info!(shift_id = %shift.public_id, name = %shift.name, "Shift created");
    state
        .event_bus
        .publish(DomainEvent::new(EventKind::ShiftCreated).with_entity(shift.public_id));

    Ok(ApiResponse::created(shift, "Shift created"))
}

/// GET /api/v1/shifts
pub async fn list(State(state): State<AppState>) -> AppResult<ApiResponse<Vec<Shift>>> {
    let shifts = ShiftRepo::list(&state.pool).await?;
    Ok(ApiResponse::ok(shifts, "Shifts retrieved"))
}

/// GET /api/v1/shifts/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<PublicId>,
) -> AppResult<ApiResponse<Shift>> {
    let shift = find_shift(&state.pool, id).await?;
    Ok(ApiResponse::ok(shift, "Shift retrieved"))
}

/// PUT /api/v1/shifts/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<PublicId>,
    ValidatedJson(input): ValidatedJson<UpdateShift>,
) -> AppResult<ApiResponse<Shift>> {
    let existing = find_shift(&state.pool, id).await?;
    let start = input.start_time.unwrap_or(existing.start_time);
    let end = input.end_time.unwrap_or(existing.end_time);
    if start == end {
        return Err(CoreError::invalid("Shift start and end times must differ").into());
    }

    let shift = ShiftRepo::update(&state.pool, existing.id, &input)
        .await?
        .ok_or_else(|| CoreError::not_found("Shift", id))?;

    state
        .event_bus
        .publish(DomainEvent::new(EventKind::ShiftUpdated).with_entity(id));

    Ok(ApiResponse::ok(shift, "Shift updated"))
}

/// DELETE /api/v1/shifts/{id}
///
/// A shift still referenced by reservations cannot be deleted (400 from the
/// foreign key).
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<PublicId>,
) -> AppResult<ApiResponse<()>> {
    let existing = find_shift(&state.pool, id).await?;
    ShiftRepo::delete(&state.pool, existing.id).await?;

    tracing::info!(shift_id = %id, "Shift deleted");
    state
        .event_bus
        .publish(DomainEvent::new(EventKind::ShiftDeleted).with_entity(id));

    Ok(ApiResponse::empty("Shift deleted"))
}

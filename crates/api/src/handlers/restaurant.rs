//! Handlers for the `/restaurants` resource and its offered shifts.

use axum::extract::{Path, State};
use tablehost_core::error::CoreError;
use tablehost_core::types::PublicId;
use tablehost_db::models::restaurant::{AttachShift, CreateRestaurant, Restaurant, UpdateRestaurant};
use tablehost_db::models::shift::Shift;
use tablehost_db::repositories::{RestaurantRepo, ShiftRepo};
use tablehost_events::{DomainEvent, EventKind};

use crate::error::AppResult;
use crate::extract::{AppJson, ValidatedJson};
use crate::handlers::{find_restaurant, find_shift};
use crate::response::ApiResponse;
use crate::state::AppState;

/// POST /api/v1/restaurants
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateRestaurant>,
) -> AppResult<ApiResponse<Restaurant>> {
    let restaurant = RestaurantRepo::create(&state.pool, &input).await?;

    tracing::info!(restaurant_id = %restaurant.public_id, "Restaurant created");
    state.event_bus.publish(
        DomainEvent::new(EventKind::RestaurantCreated).with_restaurant(restaurant.public_id),
    );

    Ok(ApiResponse::created(restaurant, "Restaurant created"))
}

/// GET /api/v1/restaurants
pub async fn list(State(state): State<AppState>) -> AppResult<ApiResponse<Vec<Restaurant>>> {
    let restaurants = RestaurantRepo::list(&state.pool).await?;
    Ok(ApiResponse::ok(restaurants, "Restaurants retrieved"))
}

/// GET /api/v1/restaurants/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<PublicId>,
) -> AppResult<ApiResponse<Restaurant>> {
    let restaurant = find_restaurant(&state.pool, id).await?;
    Ok(ApiResponse::ok(restaurant, "Restaurant retrieved"))
}

/// PUT /api/v1/restaurants/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<PublicId>,
    ValidatedJson(input): ValidatedJson<UpdateRestaurant>,
) -> AppResult<ApiResponse<Restaurant>> {
    let existing = find_restaurant(&state.pool, id).await?;
    let restaurant = RestaurantRepo::update(&state.pool, existing.id, &input)
        .await?
        .ok_or_else(|| CoreError::not_found("Restaurant", id))?;

    state
        .event_bus
        .publish(DomainEvent::new(EventKind::RestaurantUpdated).with_restaurant(id));

    Ok(ApiResponse::ok(restaurant, "Restaurant updated"))
}

/// DELETE /api/v1/restaurants/{id}
///
/// Cascades to floorplans, reservations, blacklist rows and shift links.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<PublicId>,
) -> AppResult<ApiResponse<()>> {
    let existing = find_restaurant(&state.pool, id).await?;
    RestaurantRepo::delete(&state.pool, existing.id).await?;

    tracing::info!(restaurant_id = %id, "Restaurant deleted");
    state
        .event_bus
        .publish(DomainEvent::new(EventKind::RestaurantDeleted).with_restaurant(id));

    Ok(ApiResponse::empty("Restaurant deleted"))
}

// ---------------------------------------------------------------------------
// Offered shifts
// ---------------------------------------------------------------------------

/// GET /api/v1/restaurants/{id}/shifts
pub async fn list_shifts(
    State(state): State<AppState>,
    Path(id): Path<PublicId>,
) -> AppResult<ApiResponse<Vec<Shift>>> {
    let restaurant = find_restaurant(&state.pool, id).await?;
    let shifts = ShiftRepo::list_for_restaurant(&state.pool, restaurant.id).await?;
    Ok(ApiResponse::ok(shifts, "Shifts retrieved"))
}

/// POST /api/v1/restaurants/{id}/shifts
///
/// Attaching an already-offered shift is a no-op and answers 200.
pub async fn attach_shift(
    State(state): State<AppState>,
    Path(id): Path<PublicId>,
    AppJson(input): AppJson<AttachShift>,
) -> AppResult<ApiResponse<Shift>> {
    let restaurant = find_restaurant(&state.pool, id).await?;
    let shift = find_shift(&state.pool, input.shift_id).await?;

    let attached = ShiftRepo::attach(&state.pool, restaurant.id, shift.id).await?;
    if !attached {
        return Ok(ApiResponse::ok(shift, "Shift already offered"));
    }

    tracing::info!(restaurant_id = %id, shift_id = %shift.public_id, "Shift attached");
    state.event_bus.publish(
        DomainEvent::new(EventKind::RestaurantShiftAttached)
            .with_restaurant(id)
            .with_entity(shift.public_id),
    );

    Ok(ApiResponse::created(shift, "Shift attached"))
}

/// DELETE /api/v1/restaurants/{id}/shifts/{shift_id}
pub async fn detach_shift(
    State(state): State<AppState>,
    Path((id, shift_id)): Path<(PublicId, PublicId)>,
) -> AppResult<ApiResponse<()>> {
    let restaurant = find_restaurant(&state.pool, id).await?;
    let shift = find_shift(&state.pool, shift_id).await?;

    if !ShiftRepo::detach(&state.pool, restaurant.id, shift.id).await? {
        return Err(CoreError::not_found("RestaurantShift", shift_id).into());
    }

    tracing::info!(restaurant_id = %id, shift_id = %shift_id, "Shift detached");
    state.event_bus.publish(
        DomainEvent::new(EventKind::RestaurantShiftDetached)
            .with_restaurant(id)
            .with_entity(shift_id),
    );

    Ok(ApiResponse::empty("Shift detached"))
}

//! Handlers for floorplans and the tables placed on them.

use axum::extract::{Path, State};
use tablehost_core::capacity;
use tablehost_core::error::CoreError;
use tablehost_core::types::PublicId;
use tablehost_db::models::floorplan::{CreateFloorplan, Floorplan, FloorplanLayout, UpdateFloorplan};
use tablehost_db::models::status::ElementPurpose;
use tablehost_db::models::table::{CreateTable, TableInstance};
use tablehost_db::repositories::table_repo::Capacity;
use tablehost_db::repositories::{ElementRepo, FloorplanRepo, TableRepo};
use tablehost_events::{DomainEvent, EventKind};

use crate::error::AppResult;
use crate::extract::ValidatedJson;
use crate::handlers::{find_floorplan, find_restaurant};
use crate::response::ApiResponse;
use crate::state::AppState;

/// POST /api/v1/restaurants/{id}/floorplans
pub async fn create(
    State(state): State<AppState>,
    Path(restaurant_id): Path<PublicId>,
    ValidatedJson(input): ValidatedJson<CreateFloorplan>,
) -> AppResult<ApiResponse<Floorplan>> {
    let restaurant = find_restaurant(&state.pool, restaurant_id).await?;
    let floorplan = FloorplanRepo::create(&state.pool, restaurant.id, &input).await?;

    tracing::info!(
        restaurant_id = %restaurant_id,
        floorplan_id = %floorplan.public_id,
        "Floorplan created",
    );
    state.event_bus.publish(
        DomainEvent::new(EventKind::FloorplanCreated)
            .with_restaurant(restaurant_id)
            .with_floorplan(floorplan.public_id),
    );

    Ok(ApiResponse::created(floorplan, "Floorplan created"))
}

/// GET /api/v1/restaurants/{id}/floorplans
pub async fn list_by_restaurant(
    State(state): State<AppState>,
    Path(restaurant_id): Path<PublicId>,
) -> AppResult<ApiResponse<Vec<Floorplan>>> {
    let restaurant = find_restaurant(&state.pool, restaurant_id).await?;
    let floorplans = FloorplanRepo::list_by_restaurant(&state.pool, restaurant.id).await?;
    Ok(ApiResponse::ok(floorplans, "Floorplans retrieved"))
}

/// GET /api/v1/floorplans/{id}
///
/// Returns the floorplan with its placed tables and combined tables.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<PublicId>,
) -> AppResult<ApiResponse<FloorplanLayout>> {
    let layout = FloorplanRepo::find_layout(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Floorplan", id))?;
    Ok(ApiResponse::ok(layout, "Floorplan retrieved"))
}

/// PUT /api/v1/floorplans/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<PublicId>,
    ValidatedJson(input): ValidatedJson<UpdateFloorplan>,
) -> AppResult<ApiResponse<Floorplan>> {
    let existing = find_floorplan(&state.pool, id).await?;
    let floorplan = FloorplanRepo::update(&state.pool, existing.id, &input)
        .await?
        .ok_or_else(|| CoreError::not_found("Floorplan", id))?;

    state.event_bus.publish(
        DomainEvent::new(EventKind::FloorplanUpdated)
            .with_restaurant(floorplan.restaurant_public_id)
            .with_floorplan(id),
    );

    Ok(ApiResponse::ok(floorplan, "Floorplan updated"))
}

/// DELETE /api/v1/floorplans/{id}
///
/// Removes the floorplan's tables and combined tables with it.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<PublicId>,
) -> AppResult<ApiResponse<()>> {
    let existing = find_floorplan(&state.pool, id).await?;
    FloorplanRepo::delete(&state.pool, existing.id).await?;

    tracing::info!(floorplan_id = %id, "Floorplan deleted");
    state.event_bus.publish(
        DomainEvent::new(EventKind::FloorplanDeleted)
            .with_restaurant(existing.restaurant_public_id)
            .with_floorplan(id),
    );

    Ok(ApiResponse::empty("Floorplan deleted"))
}

// ---------------------------------------------------------------------------
// Placed tables
// ---------------------------------------------------------------------------

/// POST /api/v1/floorplans/{id}/tables
///
/// Place an element on the floorplan under a label unique to the floorplan.
pub async fn create_table(
    State(state): State<AppState>,
    Path(floorplan_id): Path<PublicId>,
    ValidatedJson(input): ValidatedJson<CreateTable>,
) -> AppResult<ApiResponse<TableInstance>> {
    let floorplan = find_floorplan(&state.pool, floorplan_id).await?;
    let element = ElementRepo::find_by_public_id(&state.pool, input.element_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Element", input.element_id))?;

    let table_name = input.table_name.trim();
    if table_name.is_empty() {
        return Err(CoreError::invalid("Table name must not be empty").into());
    }
    if TableRepo::name_taken(&state.pool, floorplan.id, table_name, None).await? {
        return Err(CoreError::invalid(format!(
            "Table name '{table_name}' is already used on floorplan '{}'",
            floorplan.name
        ))
        .into());
    }

    let reservable = element.purpose == ElementPurpose::Reservable;
    let (min, max) = capacity::resolve(reservable, input.min_capacity, input.max_capacity)?;

    let table = TableRepo::create(&state.pool, floorplan.id, element.id, &input, Capacity { min, max }).await?;

    tracing::info!(
        floorplan_id = %floorplan_id,
        table_id = %table.public_id,
        table_name = %table.table_name,
        "Table placed",
    );
    state.event_bus.publish(
        DomainEvent::new(EventKind::TableCreated)
            .with_restaurant(table.restaurant_public_id)
            .with_floorplan(floorplan_id)
            .with_table(table.public_id),
    );

    Ok(ApiResponse::created(table, "Table created"))
}

/// GET /api/v1/floorplans/{id}/tables
pub async fn list_tables(
    State(state): State<AppState>,
    Path(floorplan_id): Path<PublicId>,
) -> AppResult<ApiResponse<Vec<TableInstance>>> {
    let floorplan = find_floorplan(&state.pool, floorplan_id).await?;
    let tables = TableRepo::list_by_floorplan(&state.pool, floorplan.id).await?;
    Ok(ApiResponse::ok(tables, "Tables retrieved"))
}

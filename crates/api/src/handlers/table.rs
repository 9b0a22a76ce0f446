//! Handlers for the `/tables` resource (elements placed on a floorplan).

use axum::extract::{Path, State};
use tablehost_core::capacity;
use tablehost_core::error::CoreError;
use tablehost_core::types::PublicId;
use tablehost_db::models::table::{TableInstance, UpdateTable};
use tablehost_db::repositories::table_repo::Capacity;
use tablehost_db::repositories::TableRepo;
use tablehost_events::{DomainEvent, EventKind};

use crate::error::AppResult;
use crate::extract::ValidatedJson;
use crate::handlers::find_table;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/tables/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<PublicId>,
) -> AppResult<ApiResponse<TableInstance>> {
    let table = find_table(&state.pool, id).await?;
    Ok(ApiResponse::ok(table, "Table retrieved"))
}

/// PUT /api/v1/tables/{id}
///
/// Omitted capacity bounds keep their current value; the merged pair must
/// still satisfy the capacity rule for the table's element purpose.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<PublicId>,
    ValidatedJson(input): ValidatedJson<UpdateTable>,
) -> AppResult<ApiResponse<TableInstance>> {
    let existing = find_table(&state.pool, id).await?;

    if let Some(name) = input.table_name.as_deref().map(str::trim) {
        if name.is_empty() {
            return Err(CoreError::invalid("Table name must not be empty").into());
        }
        if TableRepo::name_taken(&state.pool, existing.floorplan_id, name, Some(existing.id)).await? {
            return Err(CoreError::invalid(format!(
                "Table name '{name}' is already used on this floorplan"
            ))
            .into());
        }
    }

    let (min, max) = capacity::resolve(
        existing.is_reservable(),
        Some(input.min_capacity.unwrap_or(existing.min_capacity)),
        Some(input.max_capacity.unwrap_or(existing.max_capacity)),
    )?;

    let table = TableRepo::update(&state.pool, existing.id, &input, Capacity { min, max })
        .await?
        .ok_or_else(|| CoreError::not_found("Table", id))?;

    tracing::info!(table_id = %id, table_name = %table.table_name, "Table updated");
    state.event_bus.publish(
        DomainEvent::new(EventKind::TableUpdated)
            .with_restaurant(table.restaurant_public_id)
            .with_floorplan(table.floorplan_public_id)
            .with_table(id),
    );

    Ok(ApiResponse::ok(table, "Table updated"))
}

/// DELETE /api/v1/tables/{id}
///
/// Blocks and combined-table memberships go with the table; reservations
/// seated on it become unassigned.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<PublicId>,
) -> AppResult<ApiResponse<()>> {
    let existing = find_table(&state.pool, id).await?;
    TableRepo::delete(&state.pool, existing.id).await?;

    tracing::info!(table_id = %id, table_name = %existing.table_name, "Table removed");
    state.event_bus.publish(
        DomainEvent::new(EventKind::TableDeleted)
            .with_restaurant(existing.restaurant_public_id)
            .with_floorplan(existing.floorplan_public_id)
            .with_table(id),
    );

    Ok(ApiResponse::empty("Table deleted"))
}

//! Handlers for blocking tables over a time window.
//!
//! Creating a block runs the admission checks in
//! [`tablehost_core::table_block`] in order and writes nothing until all of
//! them pass.

use axum::extract::{Path, State};
use tablehost_core::error::CoreError;
use tablehost_core::table_block::{BlockWindow, ShiftHours};
use tablehost_core::types::PublicId;
use tablehost_db::models::block_table::{BlockTable, BlockedTable, CreateBlockTable};
use tablehost_db::repositories::{BlockTableRepo, ReservationRepo, ShiftRepo, TableRepo};
use tablehost_events::{DomainEvent, EventKind};

use crate::error::AppResult;
use crate::extract::ValidatedJson;
use crate::handlers::find_table;
use crate::response::ApiResponse;
use crate::state::AppState;

/// POST /api/v1/tables/{id}/blocks
pub async fn create(
    State(state): State<AppState>,
    Path(table_id): Path<PublicId>,
    ValidatedJson(input): ValidatedJson<CreateBlockTable>,
) -> AppResult<ApiResponse<BlockedTable>> {
    let table = find_table(&state.pool, table_id).await?;
    if !table.is_reservable() {
        return Err(CoreError::invalid(format!(
            "Table '{}' is not reservable and cannot be blocked",
            table.table_name
        ))
        .into());
    }

    let window = BlockWindow::new(
        input.start_date,
        input.start_time,
        input.end_date,
        input.end_time,
        state.today(),
    )?;

    let shifts = ShiftRepo::list_block_candidates(&state.pool, table.restaurant_id).await?;
    let hours: Vec<ShiftHours> = shifts.iter().map(ShiftHours::from).collect();
    let shift = window.ensure_within_shift(&hours)?;
    tracing::debug!(table_id = %table_id, shift = %shift.name, "Block fits shift");

    let upcoming =
        ReservationRepo::upcoming_slots_for_table(&state.pool, table.id, window.start_date, window.end_date)
            .await?;
    window.ensure_no_reservation_conflict(&upcoming)?;

    let block = BlockTableRepo::create(&state.pool, table.id, &window, input.notes.as_deref()).await?;

    tracing::info!(
        table_id = %table_id,
        block_id = %block.public_id,
        start = %window.start_at(),
        end = %window.end_at(),
        "Table blocked",
    );
    state.event_bus.publish(
        DomainEvent::new(EventKind::TableBlocked)
            .with_restaurant(table.restaurant_public_id)
            .with_floorplan(table.floorplan_public_id)
            .with_table(table_id)
            .with_entity(block.public_id),
    );

    Ok(ApiResponse::created(BlockedTable { block, table }, "Table blocked"))
}

/// GET /api/v1/tables/{id}/blocks
pub async fn list_by_table(
    State(state): State<AppState>,
    Path(table_id): Path<PublicId>,
) -> AppResult<ApiResponse<Vec<BlockTable>>> {
    let table = find_table(&state.pool, table_id).await?;
    let blocks = BlockTableRepo::list_by_table(&state.pool, table.id).await?;
    Ok(ApiResponse::ok(blocks, "Blocks retrieved"))
}

/// DELETE /api/v1/blocks/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<PublicId>,
) -> AppResult<ApiResponse<()>> {
    let block = BlockTableRepo::find_by_public_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("BlockTable", id))?;

    let table = TableRepo::find_by_id(&state.pool, block.table_id).await?;
    BlockTableRepo::delete(&state.pool, block.id).await?;

    let event = DomainEvent::new(EventKind::TableUnblocked).with_entity(id);
    let event = match table {
        Some(table) => event
            .with_restaurant(table.restaurant_public_id)
            .with_floorplan(table.floorplan_public_id)
            .with_table(table.public_id),
        None => event,
    };

    tracing::info!(block_id = %id, "Table unblocked");
    state.event_bus.publish(event);

    Ok(ApiResponse::empty("Block removed"))
}

//! Handlers for combined tables: groups of tables on one floorplan that are
//! seated together.

use std::collections::BTreeSet;

use axum::extract::{Path, State};
use sqlx::PgPool;
use tablehost_core::combined_table::{plan_assembly, CapacityOverride, MemberCandidate, MIN_MEMBERS};
use tablehost_core::error::CoreError;
use tablehost_core::types::PublicId;
use tablehost_db::models::combined_table::{
    CombinedTableWithMembers, CreateCombinedTable, UpdateCombinedTable,
};
use tablehost_db::repositories::{CombinedTableRepo, TableRepo};
use tablehost_events::{DomainEvent, EventKind};

use crate::error::AppResult;
use crate::extract::ValidatedJson;
use crate::handlers::find_floorplan;
use crate::response::ApiResponse;
use crate::state::AppState;

/// POST /api/v1/floorplans/{id}/combined-tables
pub async fn create(
    State(state): State<AppState>,
    Path(floorplan_id): Path<PublicId>,
    ValidatedJson(input): ValidatedJson<CreateCombinedTable>,
) -> AppResult<ApiResponse<CombinedTableWithMembers>> {
    let floorplan = find_floorplan(&state.pool, floorplan_id).await?;
    let members = resolve_members(&state.pool, &input.table_ids).await?;
    let existing = CombinedTableRepo::existing_groups(&state.pool, floorplan.id).await?;

    let plan = plan_assembly(
        floorplan.id,
        &input.name,
        &members,
        &existing,
        CapacityOverride {
            min_capacity: input.min_capacity,
            max_capacity: input.max_capacity,
        },
        None,
    )?;

    let combined = CombinedTableRepo::create(&state.pool, floorplan.id, &input.name, &plan).await?;

    tracing::info!(
        floorplan_id = %floorplan_id,
        combined_table_id = %combined.combined_table.public_id,
        members = plan.member_ids.len(),
        "Combined table created",
    );
    state.event_bus.publish(
        DomainEvent::new(EventKind::CombinedTableCreated)
            .with_restaurant(floorplan.restaurant_public_id)
            .with_floorplan(floorplan_id)
            .with_entity(combined.combined_table.public_id),
    );

    Ok(ApiResponse::created(combined, "Combined table created"))
}

/// GET /api/v1/floorplans/{id}/combined-tables
pub async fn list_by_floorplan(
    State(state): State<AppState>,
    Path(floorplan_id): Path<PublicId>,
) -> AppResult<ApiResponse<Vec<CombinedTableWithMembers>>> {
    let floorplan = find_floorplan(&state.pool, floorplan_id).await?;
    let combined = CombinedTableRepo::list_by_floorplan(&state.pool, floorplan.id).await?;
    Ok(ApiResponse::ok(combined, "Combined tables retrieved"))
}

/// GET /api/v1/combined-tables/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<PublicId>,
) -> AppResult<ApiResponse<CombinedTableWithMembers>> {
    let combined = find_combined(&state.pool, id).await?;
    Ok(ApiResponse::ok(combined, "Combined table retrieved"))
}

/// PUT /api/v1/combined-tables/{id}
///
/// Re-runs the assembly rules against the merged state. When the member
/// set is left alone, capacities not given in the request keep their
/// current values instead of reverting to member sums.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<PublicId>,
    ValidatedJson(input): ValidatedJson<UpdateCombinedTable>,
) -> AppResult<ApiResponse<CombinedTableWithMembers>> {
    let current = find_combined(&state.pool, id).await?;
    let group = &current.combined_table;

    let (members, capacity) = match &input.table_ids {
        Some(table_ids) => (
            resolve_members(&state.pool, table_ids).await?,
            CapacityOverride {
                min_capacity: input.min_capacity,
                max_capacity: input.max_capacity,
            },
        ),
        None => {
            let ids: Vec<PublicId> = current.members.iter().map(|m| m.table_public_id).collect();
            (
                resolve_members(&state.pool, &ids).await?,
                CapacityOverride {
                    min_capacity: input.min_capacity.or(Some(group.min_capacity)),
                    max_capacity: input.max_capacity.or(Some(group.max_capacity)),
                },
            )
        }
    };

    let name = input.name.as_deref().unwrap_or(&group.name);
    let existing = CombinedTableRepo::existing_groups(&state.pool, group.floorplan_id).await?;
    let plan = plan_assembly(group.floorplan_id, name, &members, &existing, capacity, Some(group.id))?;

    let combined = CombinedTableRepo::update(&state.pool, group.id, input.name.as_deref(), &plan)
        .await?
        .ok_or_else(|| CoreError::not_found("CombinedTable", id))?;

    tracing::info!(
        combined_table_id = %id,
        members = combined.members.len(),
        "Combined table updated",
    );
    state.event_bus.publish(
        DomainEvent::new(EventKind::CombinedTableUpdated)
            .with_restaurant(group.restaurant_public_id)
            .with_floorplan(group.floorplan_public_id)
            .with_entity(id),
    );

    Ok(ApiResponse::ok(combined, "Combined table updated"))
}

/// DELETE /api/v1/combined-tables/{id}
///
/// Reservations seated on the group become unassigned.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<PublicId>,
) -> AppResult<ApiResponse<()>> {
    let current = find_combined(&state.pool, id).await?;
    let group = current.combined_table;
    CombinedTableRepo::delete(&state.pool, group.id).await?;

    tracing::info!(combined_table_id = %id, "Combined table deleted");
    state.event_bus.publish(
        DomainEvent::new(EventKind::CombinedTableDeleted)
            .with_restaurant(group.restaurant_public_id)
            .with_floorplan(group.floorplan_public_id)
            .with_entity(id),
    );

    Ok(ApiResponse::empty("Combined table deleted"))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_combined(pool: &PgPool, id: PublicId) -> AppResult<CombinedTableWithMembers> {
    CombinedTableRepo::find_by_public_id(pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("CombinedTable", id).into())
}

/// De-duplicate the requested ids and load them. Fewer than two distinct
/// ids is rejected before any lookup; the first unknown id is a `NotFound`.
async fn resolve_members(pool: &PgPool, table_ids: &[PublicId]) -> AppResult<Vec<MemberCandidate>> {
    let distinct: BTreeSet<PublicId> = table_ids.iter().copied().collect();
    if distinct.len() < MIN_MEMBERS {
        return Err(CoreError::invalid(format!(
            "A combined table needs at least {MIN_MEMBERS} distinct tables"
        ))
        .into());
    }

    let ids: Vec<PublicId> = distinct.into_iter().collect();
    let tables = TableRepo::find_by_public_ids(pool, &ids).await?;

    if let Some(missing) = ids.iter().find(|id| !tables.iter().any(|t| t.public_id == **id)) {
        return Err(CoreError::not_found("Table", missing).into());
    }

    Ok(tables.iter().map(MemberCandidate::from).collect())
}

//! Handlers for the `/elements` resource (table templates).

use axum::extract::{Path, State};
use tablehost_core::error::CoreError;
use tablehost_core::types::PublicId;
use tablehost_db::models::element::{CreateElement, Element, UpdateElement};
use tablehost_db::repositories::ElementRepo;
use tablehost_events::{DomainEvent, EventKind};

use crate::error::AppResult;
use crate::extract::ValidatedJson;
use crate::response::ApiResponse;
use crate::state::AppState;

async fn find_element(state: &AppState, id: PublicId) -> AppResult<Element> {
    ElementRepo::find_by_public_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::not_found("Element", id).into())
}

/// POST /api/v1/elements
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateElement>,
) -> AppResult<ApiResponse<Element>> {
    let element = ElementRepo::create(&state.pool, &input).await?;

    tracing::info!(element_id = %element.public_id, purpose = %element.purpose, "Element created");
    state
        .event_bus
        .publish(DomainEvent::new(EventKind::ElementCreated).with_entity(element.public_id));

    Ok(ApiResponse::created(element, "Element created"))
}

/// GET /api/v1/elements
pub async fn list(State(state): State<AppState>) -> AppResult<ApiResponse<Vec<Element>>> {
    let elements = ElementRepo::list(&state.pool).await?;
    Ok(ApiResponse::ok(elements, "Elements retrieved"))
}

/// GET /api/v1/elements/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<PublicId>,
) -> AppResult<ApiResponse<Element>> {
    let element = find_element(&state, id).await?;
    Ok(ApiResponse::ok(element, "Element retrieved"))
}

/// PUT /api/v1/elements/{id}
///
/// Changing the purpose of an element already placed on floorplans is
/// refused: it would silently turn seated tables decorative or vice versa.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<PublicId>,
    ValidatedJson(input): ValidatedJson<UpdateElement>,
) -> AppResult<ApiResponse<Element>> {
    let existing = find_element(&state, id).await?;

    if let Some(purpose) = input.purpose {
        if purpose != existing.purpose && ElementRepo::usage_count(&state.pool, existing.id).await? > 0 {
            return Err(CoreError::conflict(format!(
                "Element '{}' is placed on floorplans; its purpose cannot change",
                existing.name
            ))
            .into());
        }
    }

    let element = ElementRepo::update(&state.pool, existing.id, &input)
        .await?
        .ok_or_else(|| CoreError::not_found("Element", id))?;

    state
        .event_bus
        .publish(DomainEvent::new(EventKind::ElementUpdated).with_entity(id));

    Ok(ApiResponse::ok(element, "Element updated"))
}

/// DELETE /api/v1/elements/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<PublicId>,
) -> AppResult<ApiResponse<()>> {
    let existing = find_element(&state, id).await?;

    let placed = ElementRepo::usage_count(&state.pool, existing.id).await?;
    if placed > 0 {
        return Err(CoreError::conflict(format!(
            "Element '{}' is placed {placed} time(s) on floorplans",
            existing.name
        ))
        .into());
    }

    ElementRepo::delete(&state.pool, existing.id).await?;

    tracing::info!(element_id = %id, "Element deleted");
    state
        .event_bus
        .publish(DomainEvent::new(EventKind::ElementDeleted).with_entity(id));

    Ok(ApiResponse::empty("Element deleted"))
}

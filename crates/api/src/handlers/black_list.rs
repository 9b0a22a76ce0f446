//! Handlers for a restaurant's client blacklist.

use axum::extract::{Path, State};
use tablehost_core::error::CoreError;
use tablehost_core::types::PublicId;
use tablehost_db::models::black_list::{BlackList, BlockClient};
use tablehost_db::repositories::BlackListRepo;
use tablehost_events::{DomainEvent, EventKind};

use crate::error::AppResult;
use crate::extract::ValidatedJson;
use crate::handlers::{find_client, find_restaurant};
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/restaurants/{id}/blacklist
pub async fn list_by_restaurant(
    State(state): State<AppState>,
    Path(restaurant_id): Path<PublicId>,
) -> AppResult<ApiResponse<Vec<BlackList>>> {
    let restaurant = find_restaurant(&state.pool, restaurant_id).await?;
    let entries = BlackListRepo::list_by_restaurant(&state.pool, restaurant.id).await?;
    Ok(ApiResponse::ok(entries, "Blacklist retrieved"))
}

/// POST /api/v1/restaurants/{id}/blacklist
///
/// Idempotent: 201 with the new row, or 200 with the existing row (its
/// original reason untouched).
pub async fn block(
    State(state): State<AppState>,
    Path(restaurant_id): Path<PublicId>,
    ValidatedJson(input): ValidatedJson<BlockClient>,
) -> AppResult<ApiResponse<BlackList>> {
    let restaurant = find_restaurant(&state.pool, restaurant_id).await?;
    let client = find_client(&state.pool, input.client_id).await?;

    let (entry, created) =
        BlackListRepo::block(&state.pool, client.id, restaurant.id, input.reason.as_deref()).await?;

    if !created {
        return Ok(ApiResponse::ok(entry, "Client already blacklisted"));
    }

    tracing::info!(restaurant_id = %restaurant_id, client_id = %client.public_id, "Client blacklisted");
    state.event_bus.publish(
        DomainEvent::new(EventKind::ClientBlacklisted)
            .with_restaurant(restaurant_id)
            .with_client(client.public_id),
    );

    Ok(ApiResponse::created(entry, "Client blacklisted"))
}

/// DELETE /api/v1/restaurants/{id}/blacklist/{client_id}
pub async fn unblock(
    State(state): State<AppState>,
    Path((restaurant_id, client_id)): Path<(PublicId, PublicId)>,
) -> AppResult<ApiResponse<()>> {
    let restaurant = find_restaurant(&state.pool, restaurant_id).await?;
    let client = find_client(&state.pool, client_id).await?;

    if !BlackListRepo::unblock(&state.pool, client.id, restaurant.id).await? {
        return Err(CoreError::not_found("BlackList", client_id).into());
    }

    tracing::info!(restaurant_id = %restaurant_id, client_id = %client_id, "Client unblacklisted");
    state.event_bus.publish(
        DomainEvent::new(EventKind::ClientUnblacklisted)
            .with_restaurant(restaurant_id)
            .with_client(client_id),
    );

    Ok(ApiResponse::empty("Client removed from blacklist"))
}

//! Handlers for the `/clients` resource.

use axum::extract::{Path, Query, State};
use tablehost_core::error::CoreError;
use tablehost_core::types::PublicId;
use tablehost_db::models::client::{Client, ClientSearchParams, CreateClient, UpdateClient};
use tablehost_db::repositories::ClientRepo;
use tablehost_events::{DomainEvent, EventKind};

use crate::error::AppResult;
use crate::extract::ValidatedJson;
use crate::handlers::find_client;
use crate::response::ApiResponse;
use crate::state::AppState;

/// POST /api/v1/clients
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateClient>,
) -> AppResult<ApiResponse<Client>> {
    if input.name.trim().is_empty() {
        return Err(CoreError::invalid("Client name must not be empty").into());
    }
    let client = ClientRepo::create(&state.pool, &input).await?;

    tracing::info!(client_id = %client.public_id, "Client created");
    state
        .event_bus
        .publish(DomainEvent::new(EventKind::ClientCreated).with_client(client.public_id));

    Ok(ApiResponse::created(client, "Client created"))
}

/// GET /api/v1/clients
///
/// `?search=` filters by name, phone or email (case-insensitive substring).
/// Paged with `?limit=` (default 50, max 200) and `?offset=`.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ClientSearchParams>,
) -> AppResult<ApiResponse<Vec<Client>>> {
    let clients =
        ClientRepo::search(&state.pool, params.search.as_deref(), params.limit, params.offset).await?;
    Ok(ApiResponse::ok(clients, "Clients retrieved"))
}

/// GET /api/v1/clients/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<PublicId>,
) -> AppResult<ApiResponse<Client>> {
    let client = find_client(&state.pool, id).await?;
    Ok(ApiResponse::ok(client, "Client retrieved"))
}

/// PUT /api/v1/clients/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<PublicId>,
    ValidatedJson(input): ValidatedJson<UpdateClient>,
) -> AppResult<ApiResponse<Client>> {
    let existing = find_client(&state.pool, id).await?;
    if input.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
        return Err(CoreError::invalid("Client name must not be empty").into());
    }

    let client = ClientRepo::update(&state.pool, existing.id, &input)
        .await?
        .ok_or_else(|| CoreError::not_found("Client", id))?;

    state
        .event_bus
        .publish(DomainEvent::new(EventKind::ClientUpdated).with_client(id));

    Ok(ApiResponse::ok(client, "Client updated"))
}

/// DELETE /api/v1/clients/{id}
///
/// The client's reservations stay, without a client.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<PublicId>,
) -> AppResult<ApiResponse<()>> {
    let existing = find_client(&state.pool, id).await?;
    ClientRepo::delete(&state.pool, existing.id).await?;

    tracing::info!(client_id = %id, "Client deleted");
    state
        .event_bus
        .publish(DomainEvent::new(EventKind::ClientDeleted).with_client(id));

    Ok(ApiResponse::empty("Client deleted"))
}

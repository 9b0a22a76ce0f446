//! Per-restaurant client blacklist.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tablehost_core::types::{DbId, PublicId, Timestamp};
use validator::Validate;

/// A row from `black_lists`, joined with client and restaurant public ids.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlackList {
    #[serde(skip)]
    pub id: DbId,
    #[serde(rename = "id")]
    pub public_id: PublicId,
    #[serde(skip)]
    pub client_id: DbId,
    pub client_public_id: PublicId,
    pub client_name: String,
    #[serde(skip)]
    pub restaurant_id: DbId,
    pub restaurant_public_id: PublicId,
    pub reason: Option<String>,
    pub blocked_date: Timestamp,
}

/// Body of `POST /restaurants/{id}/blacklist`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BlockClient {
    pub client_id: PublicId,
    #[validate(length(max = 1000, message = "reason must be at most 1000 characters"))]
    pub reason: Option<String>,
}

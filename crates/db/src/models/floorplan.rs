//! Floorplan model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tablehost_core::types::{DbId, PublicId, Timestamp};
use validator::Validate;

use crate::models::combined_table::CombinedTableWithMembers;
use crate::models::table::TableInstance;

/// A row from `floorplans`, joined with its restaurant's public id.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Floorplan {
    #[serde(skip)]
    pub id: DbId,
    #[serde(rename = "id")]
    pub public_id: PublicId,
    #[serde(skip)]
    pub restaurant_id: DbId,
    pub restaurant_public_id: PublicId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A floorplan with everything placed on it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorplanLayout {
    #[serde(flatten)]
    pub floorplan: Floorplan,
    pub tables: Vec<TableInstance>,
    pub combined_tables: Vec<CombinedTableWithMembers>,
}

/// DTO for creating a floorplan under a restaurant.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFloorplan {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,
}

/// DTO for renaming a floorplan.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFloorplan {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: Option<String>,
}

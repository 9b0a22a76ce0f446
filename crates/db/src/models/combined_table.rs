//! Combined tables and their memberships.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tablehost_core::types::{DbId, PublicId, Timestamp};
use validator::Validate;

/// A row from `combined_tables`, joined with its floorplan's public id.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedTable {
    #[serde(skip)]
    pub id: DbId,
    #[serde(rename = "id")]
    pub public_id: PublicId,
    #[serde(skip)]
    pub floorplan_id: DbId,
    pub floorplan_public_id: PublicId,
    #[serde(skip)]
    pub restaurant_id: DbId,
    pub restaurant_public_id: PublicId,
    pub name: String,
    pub min_capacity: i32,
    pub max_capacity: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// One membership row joined with the member table's label and capacity.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedTableMember {
    #[serde(skip)]
    pub id: DbId,
    #[serde(rename = "id")]
    pub public_id: PublicId,
    #[serde(skip)]
    pub combined_table_id: DbId,
    #[serde(skip)]
    pub table_id: DbId,
    pub table_public_id: PublicId,
    pub table_name: String,
    pub min_capacity: i32,
    pub max_capacity: i32,
}

/// A combined table with its members, ordered by membership id.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedTableWithMembers {
    #[serde(flatten)]
    pub combined_table: CombinedTable,
    pub members: Vec<CombinedTableMember>,
}

/// DTO for combining tables on a floorplan.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCombinedTable {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,
    pub table_ids: Vec<PublicId>,
    #[validate(range(min = 1, max = 10000, message = "minCapacity must be 1-10000"))]
    pub min_capacity: Option<i32>,
    #[validate(range(min = 1, max = 10000, message = "maxCapacity must be 1-10000"))]
    pub max_capacity: Option<i32>,
}

/// DTO for editing a combined table. `table_ids`, when present, replaces the
/// member set.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCombinedTable {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: Option<String>,
    pub table_ids: Option<Vec<PublicId>>,
    #[validate(range(min = 1, max = 10000, message = "minCapacity must be 1-10000"))]
    pub min_capacity: Option<i32>,
    #[validate(range(min = 1, max = 10000, message = "maxCapacity must be 1-10000"))]
    pub max_capacity: Option<i32>,
}

//! Placed tables (floorplan element instances).

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tablehost_core::combined_table::MemberCandidate;
use tablehost_core::types::{DbId, PublicId, Timestamp};
use validator::Validate;

use crate::models::status::ElementPurpose;

/// A row from `floorplan_element_instances`, joined with its element
/// template's display attributes and its owning floorplan / restaurant.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableInstance {
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
    #[serde(skip)]
    pub element_id: DbId,
    pub element_public_id: PublicId,
    pub element_name: String,
    pub image_url: Option<String>,
    pub table_type: String,
    #[sqlx(rename = "purpose_id")]
    pub purpose: ElementPurpose,
    pub table_name: String,
    pub min_capacity: i32,
    pub max_capacity: i32,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rotation: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TableInstance {
    pub fn is_reservable(&self) -> bool {
        self.purpose == ElementPurpose::Reservable
    }
}

impl From<&TableInstance> for MemberCandidate {
    fn from(table: &TableInstance) -> Self {
        MemberCandidate {
            id: table.id,
            floorplan_id: table.floorplan_id,
            table_name: table.table_name.clone(),
            reservable: table.is_reservable(),
            min_capacity: table.min_capacity,
            max_capacity: table.max_capacity,
        }
    }
}

/// DTO for placing an element on a floorplan.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTable {
    pub element_id: PublicId,
    #[validate(length(min = 1, max = 50, message = "tableName must be 1-50 characters"))]
    pub table_name: String,
    #[validate(range(min = 0, max = 1000, message = "minCapacity must be 0-1000"))]
    pub min_capacity: Option<i32>,
    #[validate(range(min = 0, max = 1000, message = "maxCapacity must be 0-1000"))]
    pub max_capacity: Option<i32>,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    #[serde(default)]
    pub rotation: f64,
}

/// DTO for moving, resizing, relabelling or re-sizing the capacity of a
/// placed table. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTable {
    #[validate(length(min = 1, max = 50, message = "tableName must be 1-50 characters"))]
    pub table_name: Option<String>,
    #[validate(range(min = 0, max = 1000, message = "minCapacity must be 0-1000"))]
    pub min_capacity: Option<i32>,
    #[validate(range(min = 0, max = 1000, message = "maxCapacity must be 0-1000"))]
    pub max_capacity: Option<i32>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub rotation: Option<f64>,
}

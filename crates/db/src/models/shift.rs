//! Shift entity model and DTOs.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tablehost_core::table_block::ShiftHours;
use tablehost_core::types::{DbId, PublicId, Timestamp};
use validator::Validate;

/// A row from the `shifts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Shift {
    #[serde(skip)]
    pub id: DbId,
    #[serde(rename = "id")]
    pub public_id: PublicId,
    pub name: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&Shift> for ShiftHours {
    fn from(shift: &Shift) -> Self {
        ShiftHours {
            name: shift.name.clone(),
            start_time: shift.start_time,
            end_time: shift.end_time,
        }
    }
}

/// DTO for creating a shift. An end time at or before the start time means
/// the shift runs past midnight.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateShift {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

/// DTO for updating a shift. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateShift {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: Option<String>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
}

//! Administrative table blocks.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tablehost_core::types::{DbId, PublicId, Timestamp};
use validator::Validate;

use crate::models::table::TableInstance;

/// A row from `block_tables`.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockTable {
    #[serde(skip)]
    pub id: DbId,
    #[serde(rename = "id")]
    pub public_id: PublicId,
    #[serde(skip)]
    pub table_id: DbId,
    pub start_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_date: NaiveDate,
    pub end_time: NaiveTime,
    pub notes: Option<String>,
    pub created_at: Timestamp,
}

/// A block together with the table it applies to.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockedTable {
    #[serde(flatten)]
    pub block: BlockTable,
    pub table: TableInstance,
}

/// DTO for blocking a table.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBlockTable {
    pub start_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_date: NaiveDate,
    pub end_time: NaiveTime,
    #[validate(length(max = 1000, message = "notes must be at most 1000 characters"))]
    pub notes: Option<String>,
}

//! Element (table template) model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tablehost_core::types::{DbId, PublicId, Timestamp};
use validator::Validate;

use crate::models::status::ElementPurpose;

/// A row from the `elements` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    #[serde(skip)]
    pub id: DbId,
    #[serde(rename = "id")]
    pub public_id: PublicId,
    pub name: String,
    pub image_url: Option<String>,
    pub table_type: String,
    #[sqlx(rename = "purpose_id")]
    pub purpose: ElementPurpose,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an element.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateElement {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,
    #[validate(url(message = "imageUrl must be a valid URL"))]
    pub image_url: Option<String>,
    #[validate(length(min = 1, max = 50, message = "tableType must be 1-50 characters"))]
    pub table_type: String,
    pub purpose: ElementPurpose,
}

/// DTO for updating an element. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateElement {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: Option<String>,
    #[validate(url(message = "imageUrl must be a valid URL"))]
    pub image_url: Option<String>,
    #[validate(length(min = 1, max = 50, message = "tableType must be 1-50 characters"))]
    pub table_type: Option<String>,
    pub purpose: Option<ElementPurpose>,
}

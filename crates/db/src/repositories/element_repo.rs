//! Repository for the `elements` table (table templates).

use sqlx::PgPool;
use tablehost_core::types::{DbId, PublicId};

use crate::models::element::{CreateElement, Element, UpdateElement};
use crate::models::status::LookupId;

const COLUMNS: &str = "id, public_id, name, image_url, table_type, purpose_id, created_at, updated_at";

pub struct ElementRepo;

impl ElementRepo {
    pub async fn create(pool: &PgPool, input: &CreateElement) -> Result<Element, sqlx::Error> {
        let query = format!(
            "INSERT INTO elements (name, image_url, table_type, purpose_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Element>(&query)
            .bind(input.name.trim())
            .bind(&input.image_url)
            .bind(input.table_type.trim())
            .bind(input.purpose)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_public_id(
        pool: &PgPool,
        public_id: PublicId,
    ) -> Result<Option<Element>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM elements WHERE public_id = $1");
        sqlx::query_as::<_, Element>(&query)
            .bind(public_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Element>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM elements ORDER BY name ASC, id ASC");
        sqlx::query_as::<_, Element>(&query).fetch_all(pool).await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateElement,
    ) -> Result<Option<Element>, sqlx::Error> {
        let query = format!(
            "UPDATE elements SET
                name = COALESCE($2, name),
                image_url = COALESCE($3, image_url),
                table_type = COALESCE($4, table_type),
                purpose_id = COALESCE($5, purpose_id)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Element>(&query)
            .bind(id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(&input.image_url)
            .bind(input.table_type.as_deref().map(str::trim))
            .bind(input.purpose.map(LookupId::from))
            .fetch_optional(pool)
            .await
    }

    /// Number of placed tables using this element.
    pub async fn usage_count(pool: &PgPool, id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM floorplan_element_instances WHERE element_id = $1",
        )
        .bind(id)
        .fetch_one(pool)
        .await
    }

    /// Delete an element. Fails with a foreign-key violation while it is
    /// placed on any floorplan.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM elements WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

//! Repository for the `floorplans` table.

use sqlx::PgPool;
use tablehost_core::types::{DbId, PublicId};

use crate::models::floorplan::{CreateFloorplan, Floorplan, FloorplanLayout, UpdateFloorplan};
use crate::repositories::{CombinedTableRepo, TableRepo};

const COLUMNS: &str = "f.id, f.public_id, f.restaurant_id, r.public_id AS restaurant_public_id, \
     f.name, f.created_at, f.updated_at";

const JOINS: &str = "JOIN restaurants r ON r.id = f.restaurant_id";

pub struct FloorplanRepo;

impl FloorplanRepo {
    pub async fn create(
        pool: &PgPool,
        restaurant_id: DbId,
        input: &CreateFloorplan,
    ) -> Result<Floorplan, sqlx::Error> {
        let query = format!(
            "WITH f AS (
                INSERT INTO floorplans (restaurant_id, name) VALUES ($1, $2)
                RETURNING *
             )
             SELECT {COLUMNS} FROM f {JOINS}"
        );
        sqlx::query_as::<_, Floorplan>(&query)
            .bind(restaurant_id)
            .bind(input.name.trim())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_public_id(
        pool: &PgPool,
        public_id: PublicId,
    ) -> Result<Option<Floorplan>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM floorplans f {JOINS} WHERE f.public_id = $1");
        sqlx::query_as::<_, Floorplan>(&query)
            .bind(public_id)
            .fetch_optional(pool)
            .await
    }

    /// Load a floorplan with its placed tables and combined tables.
    pub async fn find_layout(
        pool: &PgPool,
        public_id: PublicId,
    ) -> Result<Option<FloorplanLayout>, sqlx::Error> {
        let Some(floorplan) = Self::find_by_public_id(pool, public_id).await? else {
            return Ok(None);
        };
        let tables = TableRepo::list_by_floorplan(pool, floorplan.id).await?;
        let combined_tables = CombinedTableRepo::list_by_floorplan(pool, floorplan.id).await?;

        Ok(Some(FloorplanLayout {
            floorplan,
            tables,
            combined_tables,
        }))
    }

    pub async fn list_by_restaurant(
        pool: &PgPool,
        restaurant_id: DbId,
    ) -> Result<Vec<Floorplan>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM floorplans f {JOINS}
             WHERE f.restaurant_id = $1
             ORDER BY f.name ASC, f.id ASC"
        );
        sqlx::query_as::<_, Floorplan>(&query)
            .bind(restaurant_id)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateFloorplan,
    ) -> Result<Option<Floorplan>, sqlx::Error> {
        let query = format!(
            "WITH f AS (
                UPDATE floorplans SET name = COALESCE($2, name)
                WHERE id = $1
                RETURNING *
             )
             SELECT {COLUMNS} FROM f {JOINS}"
        );
        sqlx::query_as::<_, Floorplan>(&query)
            .bind(id)
            .bind(input.name.as_deref().map(str::trim))
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM floorplans WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

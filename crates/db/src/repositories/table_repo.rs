//! Repository for `floorplan_element_instances` (placed tables).

use sqlx::PgPool;
use tablehost_core::types::{DbId, PublicId};

use crate::models::table::{CreateTable, TableInstance, UpdateTable};

/// Joined column list; the instance row is aliased `fei`.
const COLUMNS: &str = "fei.id, fei.public_id, fei.floorplan_id, f.public_id AS floorplan_public_id, \
     f.restaurant_id, r.public_id AS restaurant_public_id, \
     fei.element_id, e.public_id AS element_public_id, e.name AS element_name, \
     e.image_url, e.table_type, e.purpose_id, \
     fei.table_name, fei.min_capacity, fei.max_capacity, \
     fei.x, fei.y, fei.width, fei.height, fei.rotation, fei.created_at, fei.updated_at";

const JOINS: &str = "JOIN floorplans f ON f.id = fei.floorplan_id \
     JOIN restaurants r ON r.id = f.restaurant_id \
     JOIN elements e ON e.id = fei.element_id";

/// Resolved capacity bounds written alongside a create or update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capacity {
    pub min: i32,
    pub max: i32,
}

pub struct TableRepo;

impl TableRepo {
    /// Place an element on a floorplan, returning the joined row.
    pub async fn create(
        pool: &PgPool,
        floorplan_id: DbId,
        element_id: DbId,
        input: &CreateTable,
        capacity: Capacity,
    ) -> Result<TableInstance, sqlx::Error> {
        let query = format!(
            "WITH fei AS (
                INSERT INTO floorplan_element_instances
                    (floorplan_id, element_id, table_name, min_capacity, max_capacity,
                     x, y, width, height, rotation)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                RETURNING *
             )
             SELECT {COLUMNS} FROM fei {JOINS}"
        );
        sqlx::query_as::<_, TableInstance>(&query)
            .bind(floorplan_id)
            .bind(element_id)
            .bind(input.table_name.trim())
            .bind(capacity.min)
            .bind(capacity.max)
            .bind(input.x)
            .bind(input.y)
            .bind(input.width)
            .bind(input.height)
            .bind(input.rotation)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<TableInstance>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM floorplan_element_instances fei {JOINS}
             WHERE fei.id = $1"
        );
        sqlx::query_as::<_, TableInstance>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_public_id(
        pool: &PgPool,
        public_id: PublicId,
    ) -> Result<Option<TableInstance>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM floorplan_element_instances fei {JOINS}
             WHERE fei.public_id = $1"
        );
        sqlx::query_as::<_, TableInstance>(&query)
            .bind(public_id)
            .fetch_optional(pool)
            .await
    }

    /// Resolve many tables at once. Unknown ids are simply absent from the
    /// result.
    pub async fn find_by_public_ids(
        pool: &PgPool,
        public_ids: &[PublicId],
    ) -> Result<Vec<TableInstance>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM floorplan_element_instances fei {JOINS}
             WHERE fei.public_id = ANY($1)
             ORDER BY fei.id ASC"
        );
        sqlx::query_as::<_, TableInstance>(&query)
            .bind(public_ids)
            .fetch_all(pool)
            .await
    }

    pub async fn list_by_floorplan(
        pool: &PgPool,
        floorplan_id: DbId,
    ) -> Result<Vec<TableInstance>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM floorplan_element_instances fei {JOINS}
             WHERE fei.floorplan_id = $1
             ORDER BY fei.table_name ASC, fei.id ASC"
        );
        sqlx::query_as::<_, TableInstance>(&query)
            .bind(floorplan_id)
            .fetch_all(pool)
            .await
    }

    /// Whether `table_name` is already used on the floorplan, ignoring
    /// `except` (the table being renamed).
    pub async fn name_taken(
        pool: &PgPool,
        floorplan_id: DbId,
        table_name: &str,
        except: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (
                SELECT 1 FROM floorplan_element_instances
                WHERE floorplan_id = $1 AND table_name = $2
                  AND ($3::BIGINT IS NULL OR id <> $3)
             )",
        )
        .bind(floorplan_id)
        .bind(table_name.trim())
        .bind(except)
        .fetch_one(pool)
        .await
    }

    /// Update geometry, label or capacity. Capacity is always written as the
    /// already-merged pair.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTable,
        capacity: Capacity,
    ) -> Result<Option<TableInstance>, sqlx::Error> {
        let query = format!(
            "WITH fei AS (
                UPDATE floorplan_element_instances SET
                    table_name = COALESCE($2, table_name),
                    min_capacity = $3,
                    max_capacity = $4,
                    x = COALESCE($5, x),
                    y = COALESCE($6, y),
                    width = COALESCE($7, width),
                    height = COALESCE($8, height),
                    rotation = COALESCE($9, rotation)
                WHERE id = $1
                RETURNING *
             )
             SELECT {COLUMNS} FROM fei {JOINS}"
        );
        sqlx::query_as::<_, TableInstance>(&query)
            .bind(id)
            .bind(input.table_name.as_deref().map(str::trim))
            .bind(capacity.min)
            .bind(capacity.max)
            .bind(input.x)
            .bind(input.y)
            .bind(input.width)
            .bind(input.height)
            .bind(input.rotation)
            .fetch_optional(pool)
            .await
    }

    /// Remove a table. Blocks and memberships cascade; reservations keep
    /// their row with the table reference cleared.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM floorplan_element_instances WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

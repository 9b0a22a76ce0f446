//! Repository for the `block_tables` table.

use sqlx::PgPool;
use tablehost_core::table_block::BlockWindow;
use tablehost_core::types::{DbId, PublicId};

use crate::models::block_table::BlockTable;

const COLUMNS: &str = "id, public_id, floorplan_element_instance_id AS table_id, \
     start_date, start_time, end_date, end_time, notes, created_at";

pub struct BlockTableRepo;

impl BlockTableRepo {
    /// Insert a block for an already-validated window.
    pub async fn create(
        pool: &PgPool,
        table_id: DbId,
        window: &BlockWindow,
        notes: Option<&str>,
    ) -> Result<BlockTable, sqlx::Error> {
        let query = format!(
            "INSERT INTO block_tables
                (floorplan_element_instance_id, start_date, start_time, end_date, end_time, notes)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BlockTable>(&query)
            .bind(table_id)
            .bind(window.start_date)
            .bind(window.start_time)
            .bind(window.end_date)
            .bind(window.end_time)
            .bind(notes)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_public_id(
        pool: &PgPool,
        public_id: PublicId,
    ) -> Result<Option<BlockTable>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM block_tables WHERE public_id = $1");
        sqlx::query_as::<_, BlockTable>(&query)
            .bind(public_id)
            .fetch_optional(pool)
            .await
    }

    /// Blocks on a table, earliest first.
    pub async fn list_by_table(pool: &PgPool, table_id: DbId) -> Result<Vec<BlockTable>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM block_tables
             WHERE floorplan_element_instance_id = $1
             ORDER BY start_date ASC, start_time ASC, id ASC"
        );
        sqlx::query_as::<_, BlockTable>(&query)
            .bind(table_id)
            .fetch_all(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM block_tables WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

//! Repository for `shifts` and the `restaurant_shifts` link table.

use sqlx::PgPool;
use tablehost_core::types::{DbId, PublicId};

use crate::models::shift::{CreateShift, Shift, UpdateShift};

const COLUMNS: &str = "id, public_id, name, start_time, end_time, created_at, updated_at";

pub struct ShiftRepo;

impl ShiftRepo {
    pub async fn create(pool: &PgPool, input: &CreateShift) -> Result<Shift, sqlx::Error> {
        let query = format!(
            "INSERT INTO shifts (name, start_time, end_time)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Shift>(&query)
            .bind(input.name.trim())
            .bind(input.start_time)
            .bind(input.end_time)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_public_id(
        pool: &PgPool,
        public_id: PublicId,
    ) -> Result<Option<Shift>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM shifts WHERE public_id = $1");
        sqlx::query_as::<_, Shift>(&query)
            .bind(public_id)
            .fetch_optional(pool)
            .await
    }

    /// List every shift ordered by start time.
    pub async fn list(pool: &PgPool) -> Result<Vec<Shift>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM shifts ORDER BY start_time ASC, id ASC");
        sqlx::query_as::<_, Shift>(&query).fetch_all(pool).await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateShift,
    ) -> Result<Option<Shift>, sqlx::Error> {
        let query = format!(
            "UPDATE shifts SET
                name = COALESCE($2, name),
                start_time = COALESCE($3, start_time),
                end_time = COALESCE($4, end_time)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Shift>(&query)
            .bind(id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(input.start_time)
            .bind(input.end_time)
            .fetch_optional(pool)
            .await
    }

    /// Delete a shift. Fails with a foreign-key violation while reservations
    /// still reference it.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM shifts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // ------------------------------------------------------------------
    // Restaurant links
    // ------------------------------------------------------------------

    /// Shifts a restaurant is configured to offer.
    pub async fn list_for_restaurant(
        pool: &PgPool,
        restaurant_id: DbId,
    ) -> Result<Vec<Shift>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM shifts
             WHERE id IN (SELECT shift_id FROM restaurant_shifts WHERE restaurant_id = $1)
             ORDER BY start_time ASC, id ASC"
        );
        sqlx::query_as::<_, Shift>(&query)
            .bind(restaurant_id)
            .fetch_all(pool)
            .await
    }

    /// Shifts a table block may fall into: those referenced by any of the
    /// restaurant's reservations plus those the restaurant offers.
    pub async fn list_block_candidates(
        pool: &PgPool,
        restaurant_id: DbId,
    ) -> Result<Vec<Shift>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM shifts
             WHERE id IN (
                 SELECT shift_id FROM reservations WHERE restaurant_id = $1
                 UNION
                 SELECT shift_id FROM restaurant_shifts WHERE restaurant_id = $1
             )
             ORDER BY start_time ASC, id ASC"
        );
        sqlx::query_as::<_, Shift>(&query)
            .bind(restaurant_id)
            .fetch_all(pool)
            .await
    }

    /// Link a shift to a restaurant. Returns `false` if it was already linked.
    pub async fn attach(pool: &PgPool, restaurant_id: DbId, shift_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO restaurant_shifts (restaurant_id, shift_id) VALUES ($1, $2)
             ON CONFLICT (restaurant_id, shift_id) DO NOTHING",
        )
        .bind(restaurant_id)
        .bind(shift_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Unlink a shift from a restaurant. Returns `true` if a link was removed.
    pub async fn detach(pool: &PgPool, restaurant_id: DbId, shift_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM restaurant_shifts WHERE restaurant_id = $1 AND shift_id = $2")
            .bind(restaurant_id)
            .bind(shift_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

//! Repository for the `restaurants` table.

use sqlx::PgPool;
use tablehost_core::types::{DbId, PublicId};

use crate::models::restaurant::{CreateRestaurant, Restaurant, UpdateRestaurant};

const COLUMNS: &str = "id, public_id, name, created_at, updated_at";

pub struct RestaurantRepo;

impl RestaurantRepo {
    pub async fn create(pool: &PgPool, input: &CreateRestaurant) -> Result<Restaurant, sqlx::Error> {
        let query = format!("INSERT INTO restaurants (name) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Restaurant>(&query)
            .bind(input.name.trim())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_public_id(
        pool: &PgPool,
        public_id: PublicId,
    ) -> Result<Option<Restaurant>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM restaurants WHERE public_id = $1");
        sqlx::query_as::<_, Restaurant>(&query)
            .bind(public_id)
            .fetch_optional(pool)
            .await
    }

    /// List all restaurants ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Restaurant>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM restaurants ORDER BY name ASC, id ASC");
        sqlx::query_as::<_, Restaurant>(&query).fetch_all(pool).await
    }

    /// Update a restaurant. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateRestaurant,
    ) -> Result<Option<Restaurant>, sqlx::Error> {
        let query = format!(
            "UPDATE restaurants SET name = COALESCE($2, name)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Restaurant>(&query)
            .bind(id)
            .bind(input.name.as_deref().map(str::trim))
            .fetch_optional(pool)
            .await
    }

    /// Delete a restaurant and, by cascade, everything it owns.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM restaurants WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

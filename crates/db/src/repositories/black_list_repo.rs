//! Repository for the `black_lists` table.

use sqlx::PgPool;
use tablehost_core::types::DbId;

use crate::models::black_list::BlackList;

const COLUMNS: &str = "b.id, b.public_id, b.client_id, c.public_id AS client_public_id, \
     c.name AS client_name, b.restaurant_id, r.public_id AS restaurant_public_id, \
     b.reason, b.blocked_date";

const JOINS: &str = "JOIN clients c ON c.id = b.client_id \
     JOIN restaurants r ON r.id = b.restaurant_id";

pub struct BlackListRepo;

impl BlackListRepo {
    /// Blacklist a client at a restaurant.
    ///
    /// Returns the row and whether it was newly created. An existing row is
    /// returned unchanged, reason included.
    pub async fn block(
        pool: &PgPool,
        client_id: DbId,
        restaurant_id: DbId,
        reason: Option<&str>,
    ) -> Result<(BlackList, bool), sqlx::Error> {
        let inserted = sqlx::query_scalar::<_, DbId>(
            "INSERT INTO black_lists (client_id, restaurant_id, reason)
             VALUES ($1, $2, $3)
             ON CONFLICT ON CONSTRAINT uq_black_lists_client_restaurant DO NOTHING
             RETURNING id",
        )
        .bind(client_id)
        .bind(restaurant_id)
        .bind(reason)
        .fetch_optional(pool)
        .await?;

        let row = Self::find(pool, client_id, restaurant_id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;
        Ok((row, inserted.is_some()))
    }

    pub async fn find(
        pool: &PgPool,
        client_id: DbId,
        restaurant_id: DbId,
    ) -> Result<Option<BlackList>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM black_lists b {JOINS}
             WHERE b.client_id = $1 AND b.restaurant_id = $2"
        );
        sqlx::query_as::<_, BlackList>(&query)
            .bind(client_id)
            .bind(restaurant_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn is_blacklisted(pool: &PgPool, client_id: DbId, restaurant_id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM black_lists WHERE client_id = $1 AND restaurant_id = $2)",
        )
        .bind(client_id)
        .bind(restaurant_id)
        .fetch_one(pool)
        .await
    }

    /// Everyone blacklisted at a restaurant, most recent first.
    pub async fn list_by_restaurant(pool: &PgPool, restaurant_id: DbId) -> Result<Vec<BlackList>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM black_lists b {JOINS}
             WHERE b.restaurant_id = $1
             ORDER BY b.blocked_date DESC, b.id DESC"
        );
        sqlx::query_as::<_, BlackList>(&query)
            .bind(restaurant_id)
            .fetch_all(pool)
            .await
    }

    /// Remove a blacklist entry. Returns `false` if the client was not
    /// blacklisted there.
    pub async fn unblock(pool: &PgPool, client_id: DbId, restaurant_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM black_lists WHERE client_id = $1 AND restaurant_id = $2")
            .bind(client_id)
            .bind(restaurant_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

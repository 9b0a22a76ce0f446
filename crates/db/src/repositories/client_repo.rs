//! Repository for the `clients` table.

use sqlx::PgPool;
use tablehost_core::types::{DbId, PublicId};

use crate::models::client::{Client, CreateClient, UpdateClient};

const COLUMNS: &str =
    "id, public_id, name, phone, email, birthday, source, tags, notes, created_at, updated_at";

/// Page size when the caller does not ask for one.
pub const DEFAULT_LIMIT: i64 = 50;
pub const MAX_LIMIT: i64 = 200;

pub struct ClientRepo;

impl ClientRepo {
    pub async fn create(pool: &PgPool, input: &CreateClient) -> Result<Client, sqlx::Error> {
        let query = format!(
            "INSERT INTO clients (name, phone, email, birthday, source, tags, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Client>(&query)
            .bind(input.name.trim())
            .bind(&input.phone)
            .bind(&input.email)
            .bind(input.birthday)
            .bind(&input.source)
            .bind(&input.tags)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_public_id(
        pool: &PgPool,
        public_id: PublicId,
    ) -> Result<Option<Client>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clients WHERE public_id = $1");
        sqlx::query_as::<_, Client>(&query)
            .bind(public_id)
            .fetch_optional(pool)
            .await
    }

    /// List clients by name. `search` matches name, phone or email as a
    /// case-insensitive substring.
    pub async fn search(
        pool: &PgPool,
        search: Option<&str>,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Client>, sqlx::Error> {
        let pattern = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{}%", escape_like(s)));
        let limit = limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let offset = offset.unwrap_or(0).max(0);

        let query = format!(
            "SELECT {COLUMNS} FROM clients
             WHERE $1::TEXT IS NULL
                OR name ILIKE $1
                OR phone ILIKE $1
                OR email ILIKE $1
             ORDER BY name ASC, id ASC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Client>(&query)
            .bind(pattern)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateClient,
    ) -> Result<Option<Client>, sqlx::Error> {
        let query = format!(
            "UPDATE clients SET
                name = COALESCE($2, name),
                phone = COALESCE($3, phone),
                email = COALESCE($4, email),
                birthday = COALESCE($5, birthday),
                source = COALESCE($6, source),
                tags = COALESCE($7, tags),
                notes = COALESCE($8, notes)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Client>(&query)
            .bind(id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(&input.phone)
            .bind(&input.email)
            .bind(input.birthday)
            .bind(&input.source)
            .bind(&input.tags)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    /// Delete a client. Blacklist rows cascade; reservations keep their row
    /// with the client cleared.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Escape `LIKE` metacharacters so user input matches literally.
fn escape_like(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

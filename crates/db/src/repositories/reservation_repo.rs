//! Repository for the `reservations` table.

use chrono::NaiveDate;
use sqlx::PgPool;
use tablehost_core::table_block::ReservationSlot;
use tablehost_core::types::{DbId, PublicId};

use crate::models::reservation::{CreateReservation, Reservation, UpdateReservation, DEFAULT_DURATION_MINUTES};
use crate::models::status::{LookupId, ReservationStatus};

/// Joined column list; the reservation row is aliased `res`.
const COLUMNS: &str = "res.id, res.public_id, res.restaurant_id, r.public_id AS restaurant_public_id, \
     res.client_id, c.public_id AS client_public_id, c.name AS client_name, \
     res.shift_id, s.public_id AS shift_public_id, s.name AS shift_name, \
     res.reservation_date, res.reservation_time, res.party_size, res.status_id, res.type_id, \
     res.tags, res.notes, res.duration_minutes, \
     res.floorplan_element_instance_id AS table_id, fei.public_id AS table_public_id, fei.table_name, \
     res.combined_table_member_id, ct.public_id AS combined_table_public_id, \
     ct.name AS combined_table_name, res.created_at, res.updated_at";

const JOINS: &str = "JOIN restaurants r ON r.id = res.restaurant_id \
     JOIN shifts s ON s.id = res.shift_id \
     LEFT JOIN clients c ON c.id = res.client_id \
     LEFT JOIN floorplan_element_instances fei ON fei.id = res.floorplan_element_instance_id \
     LEFT JOIN combined_table_members ctm ON ctm.id = res.combined_table_member_id \
     LEFT JOIN combined_tables ct ON ct.id = ctm.combined_table_id";

/// Optional filters for listing a restaurant's reservations.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReservationFilter {
    pub date: Option<NaiveDate>,
    pub status: Option<ReservationStatus>,
    pub shift_id: Option<DbId>,
}

pub struct ReservationRepo;

impl ReservationRepo {
    pub async fn create(
        pool: &PgPool,
        restaurant_id: DbId,
        client_id: Option<DbId>,
        shift_id: DbId,
        input: &CreateReservation,
    ) -> Result<Reservation, sqlx::Error> {
        let query = format!(
            "WITH res AS (
                INSERT INTO reservations
                    (restaurant_id, client_id, shift_id, reservation_date, reservation_time,
                     party_size, status_id, type_id, tags, notes, duration_minutes)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
                RETURNING *
             )
             SELECT {COLUMNS} FROM res {JOINS}"
        );
        sqlx::query_as::<_, Reservation>(&query)
            .bind(restaurant_id)
            .bind(client_id)
            .bind(shift_id)
            .bind(input.reservation_date)
            .bind(input.reservation_time)
            .bind(input.party_size)
            .bind(input.status.map(LookupId::from))
            .bind(input.reservation_type.id())
            .bind(&input.tags)
            .bind(&input.notes)
            .bind(input.duration_minutes.unwrap_or(DEFAULT_DURATION_MINUTES))
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_public_id(
        pool: &PgPool,
        public_id: PublicId,
    ) -> Result<Option<Reservation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reservations res {JOINS} WHERE res.public_id = $1");
        sqlx::query_as::<_, Reservation>(&query)
            .bind(public_id)
            .fetch_optional(pool)
            .await
    }

    /// A restaurant's reservations, by date and time.
    pub async fn list_by_restaurant(
        pool: &PgPool,
        restaurant_id: DbId,
        filter: ReservationFilter,
    ) -> Result<Vec<Reservation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reservations res {JOINS}
             WHERE res.restaurant_id = $1
               AND ($2::DATE IS NULL OR res.reservation_date = $2)
               AND ($3::SMALLINT IS NULL OR res.status_id = $3)
               AND ($4::BIGINT IS NULL OR res.shift_id = $4)
             ORDER BY res.reservation_date ASC, res.reservation_time ASC, res.id ASC"
        );
        sqlx::query_as::<_, Reservation>(&query)
            .bind(restaurant_id)
            .bind(filter.date)
            .bind(filter.status.map(LookupId::from))
            .bind(filter.shift_id)
            .fetch_all(pool)
            .await
    }

    /// Date and time of every `Upcoming` reservation seated directly on the
    /// table with a date in `[from, to]`.
    pub async fn upcoming_slots_for_table(
        pool: &PgPool,
        table_id: DbId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<ReservationSlot>, sqlx::Error> {
        let rows = sqlx::query_as::<_, (NaiveDate, chrono::NaiveTime)>(
            "SELECT reservation_date, reservation_time FROM reservations
             WHERE floorplan_element_instance_id = $1
               AND status_id = $2
               AND reservation_date BETWEEN $3 AND $4
             ORDER BY reservation_date ASC, reservation_time ASC",
        )
        .bind(table_id)
        .bind(ReservationStatus::Upcoming.id())
        .bind(from)
        .bind(to)
        .fetch_all(pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(date, time)| ReservationSlot { date, time })
            .collect())
    }

    /// Edit details. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        client_id: Option<DbId>,
        shift_id: Option<DbId>,
        input: &UpdateReservation,
    ) -> Result<Option<Reservation>, sqlx::Error> {
        let query = format!(
            "WITH res AS (
                UPDATE reservations SET
                    client_id = COALESCE($2, client_id),
                    shift_id = COALESCE($3, shift_id),
                    reservation_date = COALESCE($4, reservation_date),
                    reservation_time = COALESCE($5, reservation_time),
                    party_size = COALESCE($6, party_size),
                    type_id = COALESCE($7, type_id),
                    tags = COALESCE($8, tags),
                    notes = COALESCE($9, notes),
                    duration_minutes = COALESCE($10, duration_minutes)
                WHERE id = $1
                RETURNING *
             )
             SELECT {COLUMNS} FROM res {JOINS}"
        );
        sqlx::query_as::<_, Reservation>(&query)
            .bind(id)
            .bind(client_id)
            .bind(shift_id)
            .bind(input.reservation_date)
            .bind(input.reservation_time)
            .bind(input.party_size)
            .bind(input.reservation_type.map(LookupId::from))
            .bind(&input.tags)
            .bind(&input.notes)
            .bind(input.duration_minutes)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite the status. `None` resets to unset / waitlist.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: Option<ReservationStatus>,
    ) -> Result<Option<Reservation>, sqlx::Error> {
        let query = format!(
            "WITH res AS (
                UPDATE reservations SET status_id = $2 WHERE id = $1
                RETURNING *
             )
             SELECT {COLUMNS} FROM res {JOINS}"
        );
        sqlx::query_as::<_, Reservation>(&query)
            .bind(id)
            .bind(status.map(LookupId::from))
            .fetch_optional(pool)
            .await
    }

    /// Seat the reservation on a single table, clearing any combined table.
    pub async fn assign_table(
        pool: &PgPool,
        id: DbId,
        table_id: DbId,
    ) -> Result<Option<Reservation>, sqlx::Error> {
        Self::set_target(pool, id, Some(table_id), None).await
    }

    /// Seat the reservation on a combined table through its anchor
    /// membership, clearing any single table.
    pub async fn assign_combined_table(
        pool: &PgPool,
        id: DbId,
        member_id: DbId,
    ) -> Result<Option<Reservation>, sqlx::Error> {
        Self::set_target(pool, id, None, Some(member_id)).await
    }

    /// Clear both table references.
    pub async fn unassign_table(pool: &PgPool, id: DbId) -> Result<Option<Reservation>, sqlx::Error> {
        Self::set_target(pool, id, None, None).await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM reservations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn set_target(
        pool: &PgPool,
        id: DbId,
        table_id: Option<DbId>,
        member_id: Option<DbId>,
    ) -> Result<Option<Reservation>, sqlx::Error> {
        let query = format!(
            "WITH res AS (
                UPDATE reservations SET
                    floorplan_element_instance_id = $2,
                    combined_table_member_id = $3
                WHERE id = $1
                RETURNING *
             )
             SELECT {COLUMNS} FROM res {JOINS}"
        );
        sqlx::query_as::<_, Reservation>(&query)
            .bind(id)
            .bind(table_id)
            .bind(member_id)
            .fetch_optional(pool)
            .await
    }
}

//! Repository for `combined_tables` and `combined_table_members`.

use std::collections::HashMap;

use sqlx::PgPool;
use tablehost_core::combined_table::{AssemblyPlan, ExistingGroup};
use tablehost_core::types::{DbId, PublicId};

use crate::models::combined_table::{CombinedTable, CombinedTableMember, CombinedTableWithMembers};

const COLUMNS: &str = "ct.id, ct.public_id, ct.floorplan_id, f.public_id AS floorplan_public_id, \
     f.restaurant_id, r.public_id AS restaurant_public_id, \
     ct.name, ct.min_capacity, ct.max_capacity, ct.created_at, ct.updated_at";

const JOINS: &str = "JOIN floorplans f ON f.id = ct.floorplan_id \
     JOIN restaurants r ON r.id = f.restaurant_id";

const MEMBER_COLUMNS: &str = "m.id, m.public_id, m.combined_table_id, \
     m.floorplan_element_instance_id AS table_id, fei.public_id AS table_public_id, \
     fei.table_name, fei.min_capacity, fei.max_capacity";

pub struct CombinedTableRepo;

impl CombinedTableRepo {
    /// Insert the combined table and its members in one transaction.
    pub async fn create(
        pool: &PgPool,
        floorplan_id: DbId,
        name: &str,
        plan: &AssemblyPlan,
    ) -> Result<CombinedTableWithMembers, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let id = sqlx::query_scalar::<_, DbId>(
            "INSERT INTO combined_tables (floorplan_id, name, min_capacity, max_capacity)
             VALUES ($1, $2, $3, $4)
             RETURNING id",
        )
        .bind(floorplan_id)
        .bind(name.trim())
        .bind(plan.min_capacity)
        .bind(plan.max_capacity)
        .fetch_one(&mut *tx)
        .await?;

        Self::add_members_inner(&mut tx, id, &plan.member_ids).await?;

        tx.commit().await?;
        Self::find_by_id(pool, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Apply a name and a re-validated plan. Memberships that survive the
    /// edit keep their rows; reservations on dropped rows are re-anchored.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        name: Option<&str>,
        plan: &AssemblyPlan,
    ) -> Result<Option<CombinedTableWithMembers>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let updated = sqlx::query(
            "UPDATE combined_tables SET
                name = COALESCE($2, name),
                min_capacity = $3,
                max_capacity = $4
             WHERE id = $1",
        )
        .bind(id)
        .bind(name.map(str::trim))
        .bind(plan.min_capacity)
        .bind(plan.max_capacity)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            return Ok(None);
        }

        Self::add_members_inner(&mut tx, id, &plan.member_ids).await?;

        // Reservations seated on a dropped membership move to the surviving
        // anchor before the row goes away.
        sqlx::query(
            "UPDATE reservations SET combined_table_member_id = (
                 SELECT MIN(id) FROM combined_table_members
                 WHERE combined_table_id = $1 AND floorplan_element_instance_id = ANY($2)
             )
             WHERE combined_table_member_id IN (
                 SELECT id FROM combined_table_members
                 WHERE combined_table_id = $1 AND NOT (floorplan_element_instance_id = ANY($2))
             )",
        )
        .bind(id)
        .bind(&plan.member_ids)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "DELETE FROM combined_table_members
             WHERE combined_table_id = $1 AND NOT (floorplan_element_instance_id = ANY($2))",
        )
        .bind(id)
        .bind(&plan.member_ids)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Self::find_by_id(pool, id).await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<CombinedTableWithMembers>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM combined_tables ct {JOINS} WHERE ct.id = $1");
        let row = sqlx::query_as::<_, CombinedTable>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        match row {
            Some(row) => Ok(Self::with_members(pool, vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    pub async fn find_by_public_id(
        pool: &PgPool,
        public_id: PublicId,
    ) -> Result<Option<CombinedTableWithMembers>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM combined_tables ct {JOINS} WHERE ct.public_id = $1");
        let row = sqlx::query_as::<_, CombinedTable>(&query)
            .bind(public_id)
            .fetch_optional(pool)
            .await?;
        match row {
            Some(row) => Ok(Self::with_members(pool, vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    /// All combined tables on a floorplan with their members.
    pub async fn list_by_floorplan(
        pool: &PgPool,
        floorplan_id: DbId,
    ) -> Result<Vec<CombinedTableWithMembers>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM combined_tables ct {JOINS}
             WHERE ct.floorplan_id = $1
             ORDER BY ct.name ASC, ct.id ASC"
        );
        let rows = sqlx::query_as::<_, CombinedTable>(&query)
            .bind(floorplan_id)
            .fetch_all(pool)
            .await?;
        Self::with_members(pool, rows).await
    }

    /// The floorplan's groups in the shape the assembly rules compare against.
    pub async fn existing_groups(pool: &PgPool, floorplan_id: DbId) -> Result<Vec<ExistingGroup>, sqlx::Error> {
        let groups = Self::list_by_floorplan(pool, floorplan_id).await?;
        Ok(groups
            .into_iter()
            .map(|g| ExistingGroup {
                id: g.combined_table.id,
                name: g.combined_table.name,
                member_ids: g.members.iter().map(|m| m.table_id).collect(),
                table_names: g.members.into_iter().map(|m| m.table_name).collect(),
            })
            .collect())
    }

    /// The membership row reservations point at: the lowest member id.
    pub async fn anchor_member_id(pool: &PgPool, combined_table_id: DbId) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, Option<DbId>>(
            "SELECT MIN(id) FROM combined_table_members WHERE combined_table_id = $1",
        )
        .bind(combined_table_id)
        .fetch_one(pool)
        .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM combined_tables WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn with_members(
        pool: &PgPool,
        rows: Vec<CombinedTable>,
    ) -> Result<Vec<CombinedTableWithMembers>, sqlx::Error> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<DbId> = rows.iter().map(|r| r.id).collect();
        let query = format!(
            "SELECT {MEMBER_COLUMNS} FROM combined_table_members m
             JOIN floorplan_element_instances fei ON fei.id = m.floorplan_element_instance_id
             WHERE m.combined_table_id = ANY($1)
             ORDER BY m.id ASC"
        );
        let members = sqlx::query_as::<_, CombinedTableMember>(&query)
            .bind(&ids)
            .fetch_all(pool)
            .await?;

        let mut by_group: HashMap<DbId, Vec<CombinedTableMember>> = HashMap::new();
        for member in members {
            by_group.entry(member.combined_table_id).or_default().push(member);
        }

        Ok(rows
            .into_iter()
            .map(|combined_table| CombinedTableWithMembers {
                members: by_group.remove(&combined_table.id).unwrap_or_default(),
                combined_table,
            })
            .collect())
    }

    async fn add_members_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        combined_table_id: DbId,
        table_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        for &table_id in table_ids {
            sqlx::query(
                "INSERT INTO combined_table_members (combined_table_id, floorplan_element_instance_id)
                 VALUES ($1, $2)
                 ON CONFLICT ON CONSTRAINT uq_combined_table_members_member DO NOTHING",
            )
            .bind(combined_table_id)
            .bind(table_id)
            .execute(&mut **tx)
            .await?;
        }
        Ok(())
    }
}

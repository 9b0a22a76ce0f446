//! Rules for grouping tables on one floorplan into a combined table.

use std::collections::BTreeSet;

use crate::error::CoreError;
use crate::types::DbId;

/// Minimum number of distinct tables in a combined table.
pub const MIN_MEMBERS: usize = 2;

/// A table that was requested as a member, as loaded from the store.
#[derive(Debug, Clone)]
pub struct MemberCandidate {
    pub id: DbId,
    pub floorplan_id: DbId,
    pub table_name: String,
    pub reservable: bool,
    pub min_capacity: i32,
    pub max_capacity: i32,
}

/// An already-existing combined table on the same floorplan.
#[derive(Debug, Clone)]
pub struct ExistingGroup {
    pub id: DbId,
    pub name: String,
    pub member_ids: BTreeSet<DbId>,
    pub table_names: Vec<String>,
}

/// Caller-supplied capacity overrides.
#[derive(Debug, Clone, Copy, Default)]
pub struct CapacityOverride {
    pub min_capacity: Option<i32>,
    pub max_capacity: Option<i32>,
}

/// Validated result: what to write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblyPlan {
    pub member_ids: Vec<DbId>,
    pub min_capacity: i32,
    pub max_capacity: i32,
}

/// Validate a combined-table request against the floorplan's current groups.
///
/// `members` must already be de-duplicated and resolved (unknown ids are a
/// `NotFound` raised by the caller). `skip_group` excludes the group being
/// edited from the duplicate comparison.
pub fn plan_assembly(
    floorplan_id: DbId,
    requested_name: &str,
    members: &[MemberCandidate],
    existing: &[ExistingGroup],
    capacity: CapacityOverride,
    skip_group: Option<DbId>,
) -> Result<AssemblyPlan, CoreError> {
    if requested_name.trim().is_empty() {
        return Err(CoreError::invalid("Combined table name must not be empty"));
    }

    let member_ids: BTreeSet<DbId> = members.iter().map(|m| m.id).collect();
    if member_ids.len() < MIN_MEMBERS {
        return Err(CoreError::invalid(format!(
            "A combined table needs at least {MIN_MEMBERS} distinct tables"
        )));
    }

    if let Some(stray) = members.iter().find(|m| m.floorplan_id != floorplan_id) {
        return Err(CoreError::invalid(format!(
            "Table '{}' belongs to a different floorplan",
            stray.table_name
        )));
    }

    if let Some(decor) = members.iter().find(|m| !m.reservable) {
        return Err(CoreError::invalid(format!(
            "Table '{}' is not reservable and cannot be combined",
            decor.table_name
        )));
    }

    if let Some(dup) = existing
        .iter()
        .filter(|g| Some(g.id) != skip_group)
        .find(|g| g.member_ids == member_ids)
    {
        let requested: Vec<&str> = members.iter().map(|m| m.table_name.as_str()).collect();
        return Err(CoreError::conflict(format!(
            "Combined table '{}' ({}) duplicates existing combined table '{}' ({})",
            requested_name,
            requested.join(", "),
            dup.name,
            dup.table_names.join(", "),
        )));
    }

    let min_capacity = match capacity.min_capacity {
        Some(min) => min,
        None => summed(members, "minimum", |m| m.min_capacity)?,
    };
    let max_capacity = match capacity.max_capacity {
        Some(max) => max,
        None => summed(members, "maximum", |m| m.max_capacity)?,
    };

    if min_capacity < 1 || max_capacity < 1 {
        return Err(CoreError::invalid("Capacities must be at least 1"));
    }
    if min_capacity > max_capacity {
        return Err(CoreError::invalid(format!(
            "Minimum capacity {min_capacity} exceeds maximum capacity {max_capacity}"
        )));
    }

    Ok(AssemblyPlan {
        member_ids: member_ids.into_iter().collect(),
        min_capacity,
        max_capacity,
    })
}

/// Sum one capacity bound over the members, refusing totals that do not
/// fit the column.
fn summed(
    members: &[MemberCandidate],
    bound: &str,
    pick: impl Fn(&MemberCandidate) -> i32,
) -> Result<i32, CoreError> {
    members
        .iter()
        .try_fold(0i32, |acc, m| acc.checked_add(pick(m)))
        .ok_or_else(|| CoreError::invalid(format!("Combined {bound} capacity is too large")))
}

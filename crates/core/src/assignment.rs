//! A reservation sits on at most one table target: a single table or a
//! combined table, never both.

use crate::error::CoreError;
use crate::types::PublicId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableAssignment {
    Table(PublicId),
    Combined(PublicId),
}

impl TableAssignment {
    /// Build from the two optional request fields; exactly one must be set.
    pub fn from_parts(
        table_id: Option<PublicId>,
        combined_table_id: Option<PublicId>,
    ) -> Result<Self, CoreError> {
        match (table_id, combined_table_id) {
            (Some(id), None) => Ok(Self::Table(id)),
            (None, Some(id)) => Ok(Self::Combined(id)),
            (Some(_), Some(_)) => Err(CoreError::invalid(
                "Assign either a table or a combined table, not both",
            )),
            (None, None) => Err(CoreError::invalid(
                "Either tableId or combinedTableId is required",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use uuid::Uuid;

    use super::*;

    #[test]
    fn single_table() {
        let id = Uuid::new_v4();
        assert_eq!(
            TableAssignment::from_parts(Some(id), None).unwrap(),
            TableAssignment::Table(id)
        );
    }

    #[test]
    fn combined_table() {
        let id = Uuid::new_v4();
        assert_eq!(
            TableAssignment::from_parts(None, Some(id)).unwrap(),
            TableAssignment::Combined(id)
        );
    }

    #[test]
    fn both_rejected() {
        let err = TableAssignment::from_parts(Some(Uuid::new_v4()), Some(Uuid::new_v4())).unwrap_err();
        assert_matches!(err, CoreError::InvalidArgument(_));
    }

    #[test]
    fn neither_rejected() {
        assert!(TableAssignment::from_parts(None, None).is_err());
    }
}

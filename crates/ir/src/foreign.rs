//! Foreign keys for incremental "add foreign key" migrations
//!
//! This model is independent of the column model: incremental mode only
//! needs the local column and what it references.

use crate::rows::ForeignRow;
use serde::Serialize;

/// One foreign key to add to (and drop from) an existing table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForeignKeyDelta {
    pub table: String,
    pub column: String,
    pub referenced_table: String,
    pub referenced_column: String,
}

impl ForeignKeyDelta {
    /// Name the schema builder gives a single-column foreign key by default
    pub fn default_constraint_name(&self) -> String {
        format!("{}_{}_foreign", self.table, self.column)
    }
}

impl From<ForeignRow> for ForeignKeyDelta {
    fn from(row: ForeignRow) -> Self {
        Self {
            table: row.table,
            column: row.column,
            referenced_table: row.referenced_table,
            referenced_column: row.referenced_column,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constraint_name() {
        let delta = ForeignKeyDelta {
            table: "posts".into(),
            column: "user_id".into(),
            referenced_table: "users".into(),
            referenced_column: "id".into(),
        };
        assert_eq!(delta.default_constraint_name(), "posts_user_id_foreign");
    }
}

//! Foreign key constraints

use migrant_core::ReferentialAction;
use serde::Serialize;

/// One column of a (possibly composite) foreign key
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForeignKeyColumn {
    pub column: String,
    pub referenced_table: String,
    pub referenced_column: String,
    pub on_update: ReferentialAction,
    pub on_delete: ReferentialAction,
}

/// A named foreign key constraint and its columns in row order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstraintSpec {
    pub name: String,
    pub columns: Vec<ForeignKeyColumn>,
}

impl ConstraintSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
        }
    }

    pub fn push(&mut self, column: ForeignKeyColumn) {
        self.columns.push(column);
    }

    /// Local column names
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.column.as_str()).collect()
    }

    /// Referenced column names
    pub fn referenced_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .map(|c| c.referenced_column.as_str())
            .collect()
    }

    /// The first column; a composite key references a single table, so
    /// its table and rules stand for the whole constraint
    pub fn head(&self) -> Option<&ForeignKeyColumn> {
        self.columns.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fk(column: &str, referenced: &str) -> ForeignKeyColumn {
        ForeignKeyColumn {
            column: column.to_string(),
            referenced_table: "orders".to_string(),
            referenced_column: referenced.to_string(),
            on_update: ReferentialAction::Restrict,
            on_delete: ReferentialAction::Cascade,
        }
    }

    #[test]
    fn test_composite_constraint() {
        let mut c = ConstraintSpec::new("fk_order_line");
        c.push(fk("order_id", "id"));
        c.push(fk("order_region", "region"));

        assert_eq!(c.column_names(), vec!["order_id", "order_region"]);
        assert_eq!(c.referenced_columns(), vec!["id", "region"]);
        assert_eq!(c.head().map(|h| h.referenced_table.as_str()), Some("orders"));
    }

    #[test]
    fn test_empty_constraint_has_no_head() {
        assert!(ConstraintSpec::new("x").head().is_none());
    }
}

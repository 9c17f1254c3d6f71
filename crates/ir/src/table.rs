//! The table model
//!
//! [`TableModel`] is the root container the generator builds and
//! renders: ordered columns, index buckets, constraints, and table-level
//! charset/collation. Every collection keeps first-seen order, which is
//! also emission order.

use crate::column::ColumnSpec;
use crate::constraint::ConstraintSpec;
use crate::index::IndexSpec;
use serde::Serialize;

// ============================================================================
// TableMeta
// ============================================================================

/// Table-level charset and collation
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TableMeta {
    pub charset: Option<String>,
    pub collation: Option<String>,
}

impl TableMeta {
    pub fn new(charset: Option<String>, collation: Option<String>) -> Self {
        Self { charset, collation }
    }

    /// A column charset worth emitting: present and different from the table's
    pub fn divergent_charset(&self, charset: Option<&str>) -> Option<String> {
        divergent(charset, self.charset.as_deref())
    }

    /// A column collation worth emitting: present and different from the table's
    pub fn divergent_collation(&self, collation: Option<&str>) -> Option<String> {
        divergent(collation, self.collation.as_deref())
    }
}

fn divergent(column: Option<&str>, table: Option<&str>) -> Option<String> {
    match column {
        Some(value) if Some(value) != table => Some(value.to_string()),
        _ => None,
    }
}

// ============================================================================
// TableModel
// ============================================================================

/// Everything known about one table
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TableModel {
    pub table: String,
    pub meta: TableMeta,
    pub columns: Vec<ColumnSpec>,
    pub keys: Vec<IndexSpec>,
    pub fulltext: Vec<IndexSpec>,
    pub constraints: Vec<ConstraintSpec>,
}

impl TableModel {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Self::default()
        }
    }

    // ========================================================================
    // Columns
    // ========================================================================

    /// Look up a column by its source name
    pub fn column(&self, name: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|c| c.column == name)
    }

    pub fn column_mut(&mut self, name: &str) -> Option<&mut ColumnSpec> {
        self.columns.iter_mut().find(|c| c.column == name)
    }

    /// Add a column; a repeated name replaces the earlier one in place
    pub fn upsert_column(&mut self, column: ColumnSpec) {
        match self.columns.iter_mut().find(|c| c.column == column.column) {
            Some(existing) => *existing = column,
            None => self.columns.push(column),
        }
    }

    /// Remove a column by source name
    pub fn remove_column(&mut self, name: &str) -> Option<ColumnSpec> {
        let pos = self.columns.iter().position(|c| c.column == name)?;
        Some(self.columns.remove(pos))
    }

    // ========================================================================
    // Keys
    // ========================================================================

    pub fn key(&self, name: &str) -> Option<&IndexSpec> {
        self.keys.iter().find(|k| k.name == name)
    }

    /// Remove a regular index bucket by key name
    pub fn remove_key(&mut self, name: &str) -> Option<IndexSpec> {
        let pos = self.keys.iter().position(|k| k.name == name)?;
        Some(self.keys.remove(pos))
    }

    // ========================================================================
    // Constraints
    // ========================================================================

    pub fn constraint_mut(&mut self, name: &str) -> Option<&mut ConstraintSpec> {
        self.constraints.iter_mut().find(|c| c.name == name)
    }
}

// ============================================================================
// Tests
// ============================================================================

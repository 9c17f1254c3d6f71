//! Index definitions
//!
//! Regular indexes (`index`, `unique`, `primary`) and FULLTEXT indexes
//! share one shape but live in separate buckets of the table model:
//! the schema builder has no native fulltext call, so those are emitted
//! as raw SQL.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Key name MySQL reports for the primary key
pub const PRIMARY_KEY_NAME: &str = "PRIMARY";

// ============================================================================
// IndexMethod
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexMethod {
    Index,
    Unique,
    Primary,
    Fulltext,
}

impl IndexMethod {
    /// Builder method name (`$table->unique(...)`)
    pub fn as_str(&self) -> &'static str {
        match self {
            IndexMethod::Index => "index",
            IndexMethod::Unique => "unique",
            IndexMethod::Primary => "primary",
            IndexMethod::Fulltext => "fulltext",
        }
    }
}

impl fmt::Display for IndexMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// IndexSpec
// ============================================================================

/// One named index and its columns in sequence order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexSpec {
    /// Key name (`PRIMARY`, `users_email_unique`, ...)
    pub name: String,

    pub method: IndexMethod,

    /// Owning table as reported by the key rows
    pub table: String,

    /// Sequence number → column name
    pub columns: BTreeMap<u32, String>,
}

impl IndexSpec {
    pub fn new(name: impl Into<String>, method: IndexMethod, table: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            method,
            table: table.into(),
            columns: BTreeMap::new(),
        }
    }

    /// Place a column at its sequence position
    ///
    /// Without a usable sequence number the column goes after the
    /// current last one.
    pub fn add_column(&mut self, seq: Option<u32>, column: impl Into<String>) {
        let seq = seq.unwrap_or_else(|| self.next_seq());
        self.columns.insert(seq, column.into());
    }

    /// One past the last sequence number; past `u32::MAX` the lowest free
    /// number is used instead
    fn next_seq(&self) -> u32 {
        match self.columns.keys().next_back() {
            None => 1,
            Some(last) => last.checked_add(1).unwrap_or_else(|| {
                (1..u32::MAX)
                    .find(|n| !self.columns.contains_key(n))
                    .unwrap_or(u32::MAX)
            }),
        }
    }

    /// Column names in sequence order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.values().map(String::as_str).collect()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_follow_sequence() {
        let mut idx = IndexSpec::new("idx_name", IndexMethod::Index, "users");
        idx.add_column(Some(2), "last_name");
        idx.add_column(Some(1), "first_name");
        assert_eq!(idx.column_names(), vec!["first_name", "last_name"]);
    }

    #[test]
    fn test_missing_sequence_appends() {
        let mut idx = IndexSpec::new("idx", IndexMethod::Unique, "t");
        idx.add_column(None, "a");
        idx.add_column(Some(5), "b");
        idx.add_column(None, "c");
        assert_eq!(idx.column_names(), vec!["a", "b", "c"]);
        assert_eq!(idx.column_count(), 3);
    }

    #[test]
    fn test_missing_sequence_after_max_does_not_overflow() {
        let mut idx = IndexSpec::new("idx", IndexMethod::Index, "t");
        idx.add_column(Some(u32::MAX), "a");
        idx.add_column(None, "b");
        idx.add_column(None, "c");
        assert_eq!(idx.column_count(), 3);
        assert_eq!(idx.columns.get(&u32::MAX).map(String::as_str), Some("a"));
        assert_eq!(idx.columns.get(&1).map(String::as_str), Some("b"));
        assert_eq!(idx.columns.get(&2).map(String::as_str), Some("c"));
    }

    #[test]
    fn test_method_names() {
        assert_eq!(IndexMethod::Unique.to_string(), "unique");
        assert_eq!(IndexMethod::Primary.as_str(), PRIMARY_KEY_NAME.to_lowercase());
    }
}

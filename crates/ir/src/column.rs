//! Column definitions
//!
//! A [`ColumnSpec`] is created once per structure row by the classifier
//! and then rewritten in place by the normalizers.

use migrant_core::BuilderMethod;
use serde::Serialize;

// ============================================================================
// ColumnArgs
// ============================================================================

/// Arguments from the parenthesized part of a type expression
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(untagged)]
pub enum ColumnArgs {
    #[default]
    None,
    /// `varchar(191)` → `191`
    Scalar(String),
    /// `decimal(8,2)` → `8`, `2`; `enum('a','b')` → `'a'`, `'b'`
    List(Vec<String>),
}

impl ColumnArgs {
    /// Build from split argument values (none, one, or many)
    pub fn from_values(mut values: Vec<String>) -> Self {
        match values.len() {
            0 => ColumnArgs::None,
            1 => ColumnArgs::Scalar(values.remove(0)),
            _ => ColumnArgs::List(values),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, ColumnArgs::None)
    }

    /// The single argument, if there is exactly one
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            ColumnArgs::Scalar(value) => Some(value),
            _ => None,
        }
    }

    /// All argument values in order
    pub fn values(&self) -> Vec<&str> {
        match self {
            ColumnArgs::None => Vec::new(),
            ColumnArgs::Scalar(value) => vec![value.as_str()],
            ColumnArgs::List(values) => values.iter().map(String::as_str).collect(),
        }
    }
}

// ============================================================================
// ColumnSpec
// ============================================================================

/// One table column, classified into a builder method
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSpec {
    /// Source column name; stable, used for lookups
    pub column: String,

    /// Name passed to the builder call; `None` once the column collapses
    /// into a bare shorthand call such as `$table->timestamps()`
    pub name: Option<String>,

    /// Builder method chosen by the classifier / normalizers
    pub method: BuilderMethod,

    /// Arguments after the column name
    pub args: ColumnArgs,

    pub nullable: bool,

    /// Raw default value as reported (`None` for SQL NULL)
    pub default: Option<String>,

    pub auto_increment: bool,

    pub unsigned: bool,

    /// `ON UPDATE CURRENT_TIMESTAMP` was present in the extra field
    pub on_update_current_timestamp: bool,

    /// Column charset, only when it differs from the table's
    pub charset: Option<String>,

    /// Column collation, only when it differs from the table's
    pub collation: Option<String>,

    /// Comment with line breaks removed; `None` when empty
    pub comment: Option<String>,

    /// The original type expression, kept for diagnostics
    pub source_type: String,
}

impl ColumnSpec {
    /// Create a column with the given method and no modifiers
    pub fn new(column: impl Into<String>, method: BuilderMethod) -> Self {
        let column = column.into();
        Self {
            name: Some(column.clone()),
            column,
            method,
            args: ColumnArgs::None,
            nullable: false,
            default: None,
            auto_increment: false,
            unsigned: false,
            on_update_current_timestamp: false,
            charset: None,
            collation: None,
            comment: None,
            source_type: String::new(),
        }
    }

    /// Whether the builder call carries the column name
    pub fn is_named(&self) -> bool {
        self.name.is_some()
    }

    /// Whether the column is an auto-incrementing identity column
    pub fn is_identity(&self) -> bool {
        self.auto_increment || self.method == BuilderMethod::Id
    }

    /// Rewrite into a bare shorthand call (`softDeletes()`, `rememberToken()`, ...)
    ///
    /// Arguments and the default are dropped, `nullable` is forced off
    /// (the shorthand decides nullability itself) and the name is cleared.
    pub fn collapse_to(&mut self, method: BuilderMethod) {
        self.method = method;
        self.args = ColumnArgs::None;
        self.default = None;
        self.nullable = false;
        self.on_update_current_timestamp = false;
        self.name = None;
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    pub fn with_args(mut self, args: ColumnArgs) -> Self {
        self.args = args;
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }

    pub fn unsigned(mut self) -> Self {
        self.unsigned = true;
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_args_from_values() {
        assert_eq!(ColumnArgs::from_values(vec![]), ColumnArgs::None);
        assert_eq!(
            ColumnArgs::from_values(vec!["100".into()]),
            ColumnArgs::Scalar("100".into())
        );
        assert_eq!(
            ColumnArgs::from_values(vec!["8".into(), "2".into()]).values(),
            vec!["8", "2"]
        );
    }

    #[test]
    fn test_new_column_is_named() {
        let col = ColumnSpec::new("email", BuilderMethod::String);
        assert!(col.is_named());
        assert_eq!(col.name.as_deref(), Some("email"));
        assert!(!col.is_identity());
    }

    #[test]
    fn test_collapse_to_clears_everything() {
        let mut col = ColumnSpec::new("deleted_at", BuilderMethod::Timestamp)
            .nullable()
            .with_default("CURRENT_TIMESTAMP")
            .with_args(ColumnArgs::Scalar("6".into()));

        col.collapse_to(BuilderMethod::SoftDeletes);

        assert_eq!(col.method, BuilderMethod::SoftDeletes);
        assert!(col.args.is_none());
        assert_eq!(col.default, None);
        assert!(!col.nullable);
        assert!(!col.is_named());
        assert_eq!(col.column, "deleted_at");
    }

    #[test]
    fn test_identity_detection() {
        let col = ColumnSpec::new("id", BuilderMethod::Integer).auto_increment();
        assert!(col.is_identity());
        let col = ColumnSpec::new("id", BuilderMethod::Id);
        assert!(col.is_identity());
    }
}

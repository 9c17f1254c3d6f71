//! # Column Normalizers
//!
//! Pattern recognizers that turn raw schema facts back into the shorthand
//! builder calls a hand-written migration would use. They run once per
//! table, after every column is classified, in this order:
//!
//! 1. `deleted_at` timestamp → `softDeletes()`
//! 2. `created_at` + `updated_at` timestamps → `timestamps()` /
//!    `nullableTimestamps()`
//! 3. nullable `remember_token` varchar(100) → `rememberToken()`
//! 4. auto-increment `bigint` → `id()`
//!
//! Each recognizer only fires on the raw method it rewrites, so running
//! the whole pass again over a normalized model changes nothing.

use migrant_core::BuilderMethod;
use migrant_ir::TableModel;

/// A recognizer; returns whether it rewrote anything
pub type Normalizer = fn(&mut TableModel) -> bool;

/// The recognizers, in application order
pub const NORMALIZERS: &[(&str, Normalizer)] = &[
    ("soft_deletes", soft_deletes),
    ("timestamps", timestamps),
    ("remember_token", remember_token),
    ("identity", identity),
];

/// Run every recognizer over the model; returns the names of those that fired
pub fn normalize(model: &mut TableModel) -> Vec<&'static str> {
    let mut applied = Vec::new();
    for (name, normalizer) in NORMALIZERS {
        if normalizer(model) {
            tracing::debug!(table = %model.table, normalizer = *name, "normalizer applied");
            applied.push(*name);
        }
    }
    applied
}

fn has_method(model: &TableModel, column: &str, method: &BuilderMethod) -> bool {
    model.column(column).is_some_and(|c| &c.method == method)
}

/// `deleted_at` timestamp → `$table->softDeletes();`
pub fn soft_deletes(model: &mut TableModel) -> bool {
    match model.column_mut("deleted_at") {
        Some(col) if col.method == BuilderMethod::Timestamp => {
            col.collapse_to(BuilderMethod::SoftDeletes);
            true
        }
        _ => false,
    }
}

/// `created_at` + `updated_at` timestamps → `$table->timestamps();`
///
/// `updated_at` is removed; `created_at` takes its place in column order.
pub fn timestamps(model: &mut TableModel) -> bool {
    if !has_method(model, "created_at", &BuilderMethod::Timestamp)
        || !has_method(model, "updated_at", &BuilderMethod::Timestamp)
    {
        return false;
    }

    model.remove_column("updated_at");
    match model.column_mut("created_at") {
        Some(col) => {
            let method = if col.nullable {
                BuilderMethod::NullableTimestamps
            } else {
                BuilderMethod::Timestamps
            };
            col.collapse_to(method);
            true
        }
        None => false,
    }
}

/// Nullable `remember_token` string of size 100 → `$table->rememberToken();`
pub fn remember_token(model: &mut TableModel) -> bool {
    match model.column_mut("remember_token") {
        Some(col)
            if col.method == BuilderMethod::String
                && col.nullable
                && col.args.as_scalar() == Some("100") =>
        {
            col.collapse_to(BuilderMethod::RememberToken);
            true
        }
        _ => false,
    }
}

/// Auto-increment `bigInteger` without size arguments → `id`
///
/// The call stays named unless the column is literally `id`
/// (`$table->id();` vs `$table->id('user_key');`).
pub fn identity(model: &mut TableModel) -> bool {
    let mut applied = false;
    for col in model.columns.iter_mut() {
        if col.method == BuilderMethod::BigInteger && col.auto_increment && col.args.is_none() {
            col.method = BuilderMethod::Id;
            col.default = None;
            col.nullable = false;
            col.auto_increment = false;
            col.unsigned = false;
            if col.column == "id" {
                col.name = None;
            }
            applied = true;
        }
    }
    applied
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use migrant_ir::{ColumnArgs, ColumnSpec};

    fn model(columns: Vec<ColumnSpec>) -> TableModel {
        let mut model = TableModel::new("users");
        for c in columns {
            model.upsert_column(c);
        }
        model
    }

    #[test]
    fn test_soft_deletes() {
        let mut m = model(vec![ColumnSpec::new("deleted_at", BuilderMethod::Timestamp).nullable()]);
        assert!(soft_deletes(&mut m));

        let col = m.column("deleted_at").unwrap();
        assert_eq!(col.method, BuilderMethod::SoftDeletes);
        assert!(!col.nullable);
        assert!(!col.is_named());
    }

    #[test]
    fn test_soft_deletes_requires_timestamp() {
        let mut m = model(vec![ColumnSpec::new("deleted_at", BuilderMethod::DateTime)]);
        assert!(!soft_deletes(&mut m));
        assert_eq!(m.column("deleted_at").unwrap().method, BuilderMethod::DateTime);
    }

    #[test]
    fn test_timestamps_pair() {
        let mut m = model(vec![
            ColumnSpec::new("id", BuilderMethod::Integer),
            ColumnSpec::new("created_at", BuilderMethod::Timestamp),
            ColumnSpec::new("updated_at", BuilderMethod::Timestamp),
            ColumnSpec::new("name", BuilderMethod::String),
        ]);
        assert!(timestamps(&mut m));

        let names: Vec<_> = m.columns.iter().map(|c| c.column.as_str()).collect();
        assert_eq!(names, vec!["id", "created_at", "name"]);
        assert_eq!(m.column("created_at").unwrap().method, BuilderMethod::Timestamps);
    }

    #[test]
    fn test_nullable_timestamps_pair() {
        let mut m = model(vec![
            ColumnSpec::new("created_at", BuilderMethod::Timestamp).nullable(),
            ColumnSpec::new("updated_at", BuilderMethod::Timestamp).nullable(),
        ]);
        assert!(timestamps(&mut m));
        let col = m.column("created_at").unwrap();
        assert_eq!(col.method, BuilderMethod::NullableTimestamps);
        assert!(!col.nullable);
    }

    #[test]
    fn test_timestamps_needs_both() {
        let mut m = model(vec![ColumnSpec::new("created_at", BuilderMethod::Timestamp)]);
        assert!(!timestamps(&mut m));
        assert_eq!(m.column("created_at").unwrap().method, BuilderMethod::Timestamp);
    }

    #[test]
    fn test_remember_token() {
        let mut m = model(vec![
            ColumnSpec::new("remember_token", BuilderMethod::String)
                .nullable()
                .with_args(ColumnArgs::Scalar("100".into())),
        ]);
        assert!(remember_token(&mut m));
        assert_eq!(
            m.column("remember_token").unwrap().method,
            BuilderMethod::RememberToken
        );
    }

    #[test]
    fn test_remember_token_wrong_size_is_kept() {
        let mut m = model(vec![
            ColumnSpec::new("remember_token", BuilderMethod::String)
                .nullable()
                .with_args(ColumnArgs::Scalar("60".into())),
        ]);
        assert!(!remember_token(&mut m));
    }

    #[test]
    fn test_identity_named_id() {
        let mut m = model(vec![
            ColumnSpec::new("id", BuilderMethod::BigInteger)
                .auto_increment()
                .unsigned(),
        ]);
        assert!(identity(&mut m));

        let col = m.column("id").unwrap();
        assert_eq!(col.method, BuilderMethod::Id);
        assert!(!col.is_named());
        assert!(!col.unsigned);
        assert!(!col.auto_increment);
        assert!(col.is_identity());
    }

    #[test]
    fn test_identity_other_name_stays_named() {
        let mut m = model(vec![ColumnSpec::new("user_key", BuilderMethod::BigInteger).auto_increment()]);
        assert!(identity(&mut m));
        let col = m.column("user_key").unwrap();
        assert_eq!(col.method, BuilderMethod::Id);
        assert_eq!(col.name.as_deref(), Some("user_key"));
    }

    #[test]
    fn test_identity_ignores_plain_integer() {
        let mut m = model(vec![ColumnSpec::new("id", BuilderMethod::Integer).auto_increment()]);
        assert!(!identity(&mut m));
        assert_eq!(m.column("id").unwrap().method, BuilderMethod::Integer);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let mut m = model(vec![
            ColumnSpec::new("id", BuilderMethod::BigInteger).auto_increment(),
            ColumnSpec::new("remember_token", BuilderMethod::String)
                .nullable()
                .with_args(ColumnArgs::Scalar("100".into())),
            ColumnSpec::new("created_at", BuilderMethod::Timestamp),
            ColumnSpec::new("updated_at", BuilderMethod::Timestamp),
            ColumnSpec::new("deleted_at", BuilderMethod::Timestamp),
        ]);

        let applied = normalize(&mut m);
        assert_eq!(
            applied,
            vec!["soft_deletes", "timestamps", "remember_token", "identity"]
        );

        let once = m.clone();
        assert!(normalize(&mut m).is_empty());
        assert_eq!(m, once);
    }
}

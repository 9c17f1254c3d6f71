//! Index and key declarations
//!
//! Key rows arrive one per (index, column) pair. They are grouped by key
//! name into [`IndexSpec`] buckets; FULLTEXT indexes go to their own
//! bucket because the schema builder has no native call for them.

use migrant_core::quote::{quote, quote_list};
use migrant_ir::{IndexMethod, IndexSpec, KeyRow, PRIMARY_KEY_NAME, TableModel};

// ============================================================================
// Building
// ============================================================================

/// Group key rows into the model's index buckets
pub fn build_keys(model: &mut TableModel, rows: &[KeyRow]) {
    for row in rows {
        if row.is_fulltext() {
            bucket(&mut model.fulltext, &row.key_name, IndexMethod::Fulltext, &row.table)
                .add_column(row.seq, row.column.as_str());
            continue;
        }

        let method = if row.key_name == PRIMARY_KEY_NAME {
            IndexMethod::Primary
        } else if row.non_unique {
            IndexMethod::Index
        } else {
            IndexMethod::Unique
        };
        bucket(&mut model.keys, &row.key_name, method, &row.table)
            .add_column(row.seq, row.column.as_str());
    }

    elide_identity_primary(model);
}

/// Find the bucket for `name`, creating it on first sight
///
/// The first row seen for a name decides its method and table.
fn bucket<'a>(
    buckets: &'a mut Vec<IndexSpec>,
    name: &str,
    method: IndexMethod,
    table: &str,
) -> &'a mut IndexSpec {
    let pos = match buckets.iter().position(|k| k.name == name) {
        Some(pos) => pos,
        None => {
            buckets.push(IndexSpec::new(name, method, table));
            buckets.len() - 1
        }
    };
    &mut buckets[pos]
}

/// Drop a single-column primary key on an identity column
///
/// `id()` and the `*Increments` methods already declare the primary key.
fn elide_identity_primary(model: &mut TableModel) -> bool {
    let implied = model.key(PRIMARY_KEY_NAME).is_some_and(|key| {
        key.column_count() == 1
            && key
                .column_names()
                .first()
                .and_then(|name| model.column(name))
                .is_some_and(|col| col.is_identity())
    });

    if implied {
        tracing::debug!(table = %model.table, "primary key implied by identity column");
        model.remove_key(PRIMARY_KEY_NAME);
    }
    implied
}

// ============================================================================
// Rendering
// ============================================================================

/// Render the regular (non-fulltext) indexes
pub fn render_keys(model: &TableModel) -> Vec<String> {
    model.keys.iter().map(render_key).collect()
}

pub fn render_key(key: &IndexSpec) -> String {
    let columns = quote_list(&key.column_names());
    match key.method {
        IndexMethod::Primary => format!("$table->primary({});", columns),
        method => format!("$table->{}({}, {});", method, columns, quote(&key.name)),
    }
}

/// Render the FULLTEXT indexes as raw `ALTER TABLE` statements
///
/// The table comes from the key rows; a blank one falls back to the
/// migration's table.
pub fn render_fulltext(model: &TableModel) -> Vec<String> {
    model
        .fulltext
        .iter()
        .map(|key| {
            let table = if key.table.is_empty() { &model.table } else { &key.table };
            render_fulltext_index(table, key)
        })
        .collect()
}

pub fn render_fulltext_index(table: &str, key: &IndexSpec) -> String {
    let columns: Vec<String> = key.column_names().into_iter().map(identifier).collect();
    format!(
        "\\DB::statement(\"ALTER TABLE {} ADD FULLTEXT INDEX {} ({})\");",
        identifier(table),
        identifier(&key.name),
        columns.join(", ")
    )
}

/// A backtick-quoted SQL identifier, safe inside a double-quoted PHP string
fn identifier(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    out.push('`');
    for ch in name.chars() {
        match ch {
            '`' => out.push_str("``"),
            '"' | '\\' | '$' => {
                out.push('\\');
                out.push(ch);
            }
            other => out.push(other),
        }
    }
    out.push('`');
    out
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use migrant_core::BuilderMethod;
    use migrant_ir::ColumnSpec;
    use pretty_assertions::assert_eq;

    fn key_row(name: &str, non_unique: bool, seq: u32, column: &str, index_type: &str) -> KeyRow {
        KeyRow {
            table: "users".into(),
            non_unique,
            key_name: name.into(),
            seq: Some(seq),
            column: column.into(),
            index_type: index_type.into(),
        }
    }

    fn model_with(columns: Vec<ColumnSpec>) -> TableModel {
        let mut model = TableModel::new("users");
        for c in columns {
            model.upsert_column(c);
        }
        model
    }

    #[test]
    fn test_unique_and_plain_index() {
        let mut model = model_with(vec![]);
        build_keys(
            &mut model,
            &[
                key_row("idx_email", false, 1, "email", "BTREE"),
                key_row("idx_name", true, 1, "name", "BTREE"),
            ],
        );
        assert_eq!(
            render_keys(&model),
            vec![
                "$table->unique('email', 'idx_email');",
                "$table->index('name', 'idx_name');",
            ]
        );
    }

    #[test]
    fn test_composite_key_follows_sequence() {
        let mut model = model_with(vec![]);
        build_keys(
            &mut model,
            &[
                key_row("idx_pair", true, 2, "last", "BTREE"),
                key_row("idx_pair", true, 1, "first", "BTREE"),
            ],
        );
        assert_eq!(
            render_keys(&model),
            vec!["$table->index(['first', 'last'], 'idx_pair');"]
        );
    }

    #[test]
    fn test_identity_primary_is_elided() {
        let mut id = ColumnSpec::new("id", BuilderMethod::Id);
        id.name = None;
        let mut model = model_with(vec![id]);
        build_keys(&mut model, &[key_row("PRIMARY", false, 1, "id", "BTREE")]);
        assert!(model.keys.is_empty());
    }

    #[test]
    fn test_increments_primary_is_elided() {
        let mut model = model_with(vec![
            ColumnSpec::new("id", BuilderMethod::Integer).auto_increment(),
        ]);
        build_keys(&mut model, &[key_row("PRIMARY", false, 1, "id", "BTREE")]);
        assert!(model.keys.is_empty());
    }

    #[test]
    fn test_natural_primary_is_rendered() {
        let mut model = model_with(vec![ColumnSpec::new("code", BuilderMethod::String)]);
        build_keys(&mut model, &[key_row("PRIMARY", false, 1, "code", "BTREE")]);
        assert_eq!(render_keys(&model), vec!["$table->primary('code');"]);
    }

    #[test]
    fn test_composite_primary_is_kept_even_with_identity() {
        let mut model = model_with(vec![
            ColumnSpec::new("id", BuilderMethod::Integer).auto_increment(),
            ColumnSpec::new("tenant", BuilderMethod::Integer),
        ]);
        build_keys(
            &mut model,
            &[
                key_row("PRIMARY", false, 1, "id", "BTREE"),
                key_row("PRIMARY", false, 2, "tenant", "BTREE"),
            ],
        );
        assert_eq!(render_keys(&model), vec!["$table->primary(['id', 'tenant']);"]);
    }

    #[test]
    fn test_fulltext_goes_to_its_own_bucket() {
        let mut model = model_with(vec![]);
        build_keys(
            &mut model,
            &[
                key_row("ft_body", true, 1, "title", "FULLTEXT"),
                key_row("ft_body", true, 2, "body", "FULLTEXT"),
            ],
        );
        assert!(model.keys.is_empty());
        assert_eq!(
            render_fulltext(&model),
            vec!["\\DB::statement(\"ALTER TABLE `users` ADD FULLTEXT INDEX `ft_body` (`title`, `body`)\");"]
        );
    }

    #[test]
    fn test_fulltext_table_comes_from_key_rows() {
        let mut model = TableModel::new("posts_v2");
        let mut row = key_row("ft_title", true, 1, "title", "FULLTEXT");
        row.table = "posts".into();
        build_keys(&mut model, &[row]);

        assert_eq!(model.fulltext[0].table, "posts");
        assert_eq!(
            render_fulltext(&model),
            vec!["\\DB::statement(\"ALTER TABLE `posts` ADD FULLTEXT INDEX `ft_title` (`title`)\");"]
        );

        model.fulltext[0].table.clear();
        assert!(render_fulltext(&model)[0].contains("ALTER TABLE `posts_v2`"));
    }

    #[test]
    fn test_fulltext_identifiers_are_escaped() {
        assert_eq!(identifier("we`ird$\"x"), "`we``ird\\$\\\"x`");
    }
}

//! Incremental "add foreign key" statements
//!
//! Runs off the foreign-structure extract alone; the column model is not
//! consulted.

use migrant_core::quote::quote;
use migrant_ir::{ForeignKeyDelta, ForeignRow};

/// Statements for the `up()` and `down()` halves of the migration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForeignSections {
    pub add: Vec<String>,
    pub drop: Vec<String>,
}

pub fn build_deltas(rows: Vec<ForeignRow>) -> Vec<ForeignKeyDelta> {
    rows.into_iter().map(ForeignKeyDelta::from).collect()
}

pub fn render_foreign(deltas: &[ForeignKeyDelta]) -> ForeignSections {
    ForeignSections {
        add: deltas.iter().map(render_add).collect(),
        drop: deltas.iter().map(render_drop).collect(),
    }
}

/// `$table->foreign('col')->references('ref')->on('table');`
pub fn render_add(delta: &ForeignKeyDelta) -> String {
    format!(
        "$table->foreign({})->references({})->on({});",
        quote(&delta.column),
        quote(&delta.referenced_column),
        quote(&delta.referenced_table)
    )
}

/// `$table->dropForeign('table_col_foreign');`
pub fn render_drop(delta: &ForeignKeyDelta) -> String {
    format!("$table->dropForeign({});", quote(&delta.default_constraint_name()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_add_and_drop_pair() {
        let deltas = build_deltas(vec![ForeignRow {
            table: "posts".into(),
            column: "user_id".into(),
            constraint: "posts_user_id_foreign".into(),
            referenced_table: "users".into(),
            referenced_column: "id".into(),
        }]);

        let sections = render_foreign(&deltas);
        assert_eq!(
            sections.add,
            vec!["$table->foreign('user_id')->references('id')->on('users');"]
        );
        assert_eq!(
            sections.drop,
            vec!["$table->dropForeign('posts_user_id_foreign');"]
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(render_foreign(&[]), ForeignSections::default());
    }
}

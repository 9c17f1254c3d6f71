//! Foreign key constraint declarations for the create-table migration

use migrant_core::ReferentialAction;
use migrant_core::quote::{quote, quote_list};
use migrant_ir::{ConstraintRow, ConstraintSpec, ForeignKeyColumn, TableModel};

/// Group constraint rows by name
///
/// An index bucket with the same name as a constraint is dropped, since
/// declaring the foreign key creates that index.
pub fn build_constraints(model: &mut TableModel, rows: &[ConstraintRow]) {
    for row in rows {
        if model.remove_key(&row.constraint).is_some() {
            tracing::debug!(
                table = %model.table,
                constraint = %row.constraint,
                "index covered by foreign key"
            );
        }

        let column = ForeignKeyColumn {
            column: row.column.clone(),
            referenced_table: row.referenced_table.clone(),
            referenced_column: row.referenced_column.clone(),
            on_update: ReferentialAction::parse(&row.update_rule),
            on_delete: ReferentialAction::parse(&row.delete_rule),
        };

        match model.constraint_mut(&row.constraint) {
            Some(existing) => existing.push(column),
            None => {
                let mut spec = ConstraintSpec::new(row.constraint.as_str());
                spec.push(column);
                model.constraints.push(spec);
            }
        }
    }
}

pub fn render_constraints(model: &TableModel) -> Vec<String> {
    model
        .constraints
        .iter()
        .filter_map(render_constraint)
        .collect()
}

/// `$table->foreign(cols, name)->references(cols)->on(table)->onDelete(..)->onUpdate(..);`
pub fn render_constraint(spec: &ConstraintSpec) -> Option<String> {
    let head = spec.head()?;
    Some(format!(
        "$table->foreign({}, {})->references({})->on({})->onDelete({})->onUpdate({});",
        quote_list(&spec.column_names()),
        quote(&spec.name),
        quote_list(&spec.referenced_columns()),
        quote(&head.referenced_table),
        quote(head.on_delete.as_sql()),
        quote(head.on_update.as_sql()),
    ))
}

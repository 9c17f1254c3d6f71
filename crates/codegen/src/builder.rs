//! # Model Builder
//!
//! Reads every artifact the create-table migration needs from a
//! [`RowSource`] and assembles the [`TableModel`]:
//!
//! ```text
//! charset row ──► TableMeta
//! structure rows ──► classify ──► normalize ──► columns
//! key rows ──► index buckets (identity primary elided)
//! constraint rows ──► constraints (same-named buckets dropped)
//! ```
//!
//! Malformed input is never fatal here. Short rows, unparseable type
//! expressions and unknown types end up in [`BuiltModel::warnings`].

use migrant_core::{Artifact, MigrantResult, RowSource};
use migrant_ir::{
    CharsetRow, ConstraintRow, ForeignKeyDelta, ForeignRow, KeyRow, ParsedRows, StructureRow,
    TableModel, TsvRecord, optional_lines, parse_rows, required_lines,
};
use serde::Serialize;

use crate::classifier::classify;
use crate::constraints::build_constraints;
use crate::foreign::build_deltas;
use crate::keys::build_keys;
use crate::normalize::normalize;
use crate::options::build_meta;

/// A model plus whatever was worth telling the user about while building it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuiltModel<T> {
    pub model: T,
    pub warnings: Vec<String>,
}

// ============================================================================
// Create-table model
// ============================================================================

/// Build the full table model for a create-table migration
///
/// The structure artifact is required; the others read as empty when
/// absent.
pub fn build_table_model(table: &str, source: &dyn RowSource) -> MigrantResult<BuiltModel<TableModel>> {
    let mut warnings = Vec::new();
    let mut model = TableModel::new(table);

    let charset: Vec<CharsetRow> = read_optional(source, &mut warnings)?;
    model.meta = build_meta(&charset);

    let structure: Vec<StructureRow> = collect(
        parse_rows(&required_lines(source, Artifact::Structure)?),
        &mut warnings,
    );
    for row in &structure {
        match classify(row, &model.meta) {
            Some(column) => {
                if column.method.is_unknown() {
                    tracing::warn!(column = %column.column, source_type = %column.source_type, "unknown column type");
                    warnings.push(format!(
                        "column '{}' has unknown type '{}'",
                        column.column, column.source_type
                    ));
                }
                tracing::debug!(column = %column.column, method = %column.method, "classified column");
                model.upsert_column(column);
            }
            None => {
                tracing::warn!(column = %row.field, source_type = %row.column_type, "malformed type expression");
                warnings.push(format!(
                    "column '{}' skipped: cannot parse type '{}'",
                    row.field, row.column_type
                ));
            }
        }
    }
    normalize(&mut model);

    let keys: Vec<KeyRow> = read_optional(source, &mut warnings)?;
    build_keys(&mut model, &keys);

    let constraints: Vec<ConstraintRow> = read_optional(source, &mut warnings)?;
    build_constraints(&mut model, &constraints);

    Ok(BuiltModel { model, warnings })
}

// ============================================================================
// Incremental foreign keys
// ============================================================================

/// Read the foreign-structure artifact for an add-foreign-key migration
pub fn build_foreign_deltas(source: &dyn RowSource) -> MigrantResult<BuiltModel<Vec<ForeignKeyDelta>>> {
    let mut warnings = Vec::new();
    let rows: Vec<ForeignRow> = collect(
        parse_rows(&required_lines(source, Artifact::ForeignStructure)?),
        &mut warnings,
    );
    Ok(BuiltModel {
        model: build_deltas(rows),
        warnings,
    })
}

// ============================================================================
// Helpers
// ============================================================================

fn read_optional<T: TsvRecord>(
    source: &dyn RowSource,
    warnings: &mut Vec<String>,
) -> MigrantResult<Vec<T>> {
    let lines = optional_lines(source, T::ARTIFACT)?;
    Ok(collect(parse_rows(&lines), warnings))
}

/// Keep the rows; turn skipped lines into warnings
fn collect<T: TsvRecord>(parsed: ParsedRows<T>, warnings: &mut Vec<String>) -> Vec<T> {
    warnings.extend(parsed.skipped.iter().map(|skip| {
        format!(
            "{} line {} skipped: {}",
            T::ARTIFACT.default_file_name(),
            skip.line,
            skip.reason
        )
    }));
    parsed.rows
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use migrant_core::BuilderMethod;
    use migrant_ir::MemorySource;

    const STRUCTURE: &str = "Field\tType\tNull\tKey\tDefault\tCharset\tCollation\tExtra\tComment\n\
        id\tbigint(20) unsigned\tNO\tPRI\tNULL\t\t\tauto_increment\t\n\
        email\tvarchar(191)\tNO\tUNI\tNULL\tutf8mb4\tutf8mb4_unicode_ci\t\t\n\
        location\tpoint\tYES\t\tNULL\t\t\t\t\n\
        broken\t(11)\tNO\t\tNULL\t\t\t\t\n\
        short\n";

    const KEYS: &str = "Table\tNon_unique\tKey_name\tSeq_in_index\tColumn_name\n\
        users\t0\tPRIMARY\t1\tid\n\
        users\t0\tidx_email\t1\temail\n";

    const CHARSET: &str = "Charset\tCollation\nutf8mb4\tutf8mb4_unicode_ci\n";

    fn source() -> MemorySource {
        MemorySource::new()
            .with_text(Artifact::Structure, STRUCTURE)
            .with_text(Artifact::Keys, KEYS)
            .with_text(Artifact::TableCharsetAndCollation, CHARSET)
    }

    #[test]
    fn test_builds_columns_and_keys() {
        let built = build_table_model("users", &source()).unwrap();
        let model = &built.model;

        let id = model.column("id").unwrap();
        assert_eq!(id.method, BuilderMethod::Id);
        assert!(!id.is_named());

        // Same as the table charset, so not repeated on the column
        let email = model.column("email").unwrap();
        assert_eq!(email.charset, None);

        // PRIMARY on the identity column is implied
        let names: Vec<_> = model.keys.iter().map(|k| k.name.as_str()).collect();
        assert_eq!(names, vec!["idx_email"]);
        assert_eq!(model.meta.charset.as_deref(), Some("utf8mb4"));
    }

    #[test]
    fn test_collects_warnings() {
        let built = build_table_model("users", &source()).unwrap();
        assert!(built.model.column("location").is_some());
        assert!(built.model.column("broken").is_none());

        assert_eq!(built.warnings.len(), 3, "{:?}", built.warnings);
        assert!(built.warnings.iter().any(|w| w.contains("unknown type 'point'")));
        assert!(built.warnings.iter().any(|w| w.contains("cannot parse type '(11)'")));
        assert!(built.warnings.iter().any(|w| w.starts_with("rowsStructure.tsv line 6")));
    }

    #[test]
    fn test_missing_structure_is_an_error() {
        let err = build_table_model("users", &MemorySource::new()).unwrap_err();
        assert!(err.is_input());
    }

    #[test]
    fn test_optional_artifacts_may_be_absent() {
        let source = MemorySource::new().with_text(Artifact::Structure, STRUCTURE);
        let built = build_table_model("users", &source).unwrap();
        assert!(built.model.keys.is_empty());
        assert!(built.model.constraints.is_empty());
        assert_eq!(built.model.meta.charset, None);
    }

    #[test]
    fn test_foreign_deltas() {
        let source = MemorySource::new().with_text(
            Artifact::ForeignStructure,
            "t\tc\tn\trt\trc\nposts\tuser_id\tfk\tusers\tid\n",
        );
        let built = build_foreign_deltas(&source).unwrap();
        assert_eq!(built.model.len(), 1);
        assert_eq!(built.model[0].referenced_table, "users");
        assert!(built.warnings.is_empty());
    }
}

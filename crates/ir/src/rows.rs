//! Named-field input rows
//!
//! Each input artifact is a tab-separated extract whose first line is a
//! header. This module is the only place that knows the column positions:
//! lines are split once, fields are assigned by position into named
//! records, and everything downstream works with those records.
//!
//! Lines with too few fields are skipped with a warning instead of
//! failing the whole run.

use migrant_core::Artifact;
use serde::Serialize;

// ============================================================================
// TsvRecord Trait
// ============================================================================

/// A record populated positionally from one tab-separated line
pub trait TsvRecord: Sized {
    /// The artifact this record is read from
    const ARTIFACT: Artifact;

    /// Minimum number of fields a line must carry
    const MIN_FIELDS: usize;

    /// Build the record; `fields` has at least `MIN_FIELDS` entries
    fn from_fields(fields: &[&str]) -> Self;
}

/// Field at `idx`, or an empty string when the line is short
fn field<'a>(fields: &[&'a str], idx: usize) -> &'a str {
    fields.get(idx).copied().unwrap_or("")
}

/// `NULL` and empty fields become `None`
fn nullable_field(fields: &[&str], idx: usize) -> Option<String> {
    match field(fields, idx) {
        "" | "NULL" => None,
        value => Some(value.to_string()),
    }
}

// ============================================================================
// Parsing
// ============================================================================

/// A line that could not be turned into a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedLine {
    /// 1-based line number in the artifact (header is line 1)
    pub line: usize,
    /// Why the line was skipped
    pub reason: String,
}

/// Records read from one artifact, plus the lines that were skipped
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRows<T> {
    pub rows: Vec<T>,
    pub skipped: Vec<SkippedLine>,
}

impl<T> Default for ParsedRows<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            skipped: Vec::new(),
        }
    }
}

/// Parse all data lines of an artifact (the header line is discarded)
pub fn parse_rows<T: TsvRecord, S: AsRef<str>>(lines: &[S]) -> ParsedRows<T> {
    let mut parsed = ParsedRows::default();

    for (idx, raw) in lines.iter().enumerate().skip(1) {
        let line = raw.as_ref().trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < T::MIN_FIELDS {
            tracing::warn!(
                artifact = %T::ARTIFACT,
                line = idx + 1,
                fields = fields.len(),
                expected = T::MIN_FIELDS,
                "skipping short row",
            );
            parsed.skipped.push(SkippedLine {
                line: idx + 1,
                reason: format!(
                    "{} row has {} field(s), expected at least {}",
                    T::ARTIFACT,
                    fields.len(),
                    T::MIN_FIELDS
                ),
            });
            continue;
        }

        parsed.rows.push(T::from_fields(&fields));
    }

    parsed
}

// ============================================================================
// Structure rows
// ============================================================================

/// One column as reported by `SHOW FULL COLUMNS`-style introspection
///
/// Positions: name, type, null, key, default, character set, collation,
/// extra, comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructureRow {
    pub field: String,
    pub column_type: String,
    pub nullable: bool,
    pub key: String,
    pub default: Option<String>,
    pub character_set: Option<String>,
    pub collation: Option<String>,
    pub extra: String,
    pub comment: String,
}

impl TsvRecord for StructureRow {
    const ARTIFACT: Artifact = Artifact::Structure;
    const MIN_FIELDS: usize = 2;

    fn from_fields(fields: &[&str]) -> Self {
        Self {
            field: field(fields, 0).trim().to_string(),
            column_type: field(fields, 1).trim().to_string(),
            nullable: field(fields, 2).trim() == "YES",
            key: field(fields, 3).trim().to_string(),
            // an empty default is a real (empty string) default, only NULL means none
            default: match field(fields, 4) {
                "NULL" => None,
                value if fields.len() > 4 => Some(value.to_string()),
                _ => None,
            },
            character_set: nullable_field(fields, 5),
            collation: nullable_field(fields, 6),
            extra: field(fields, 7).trim().to_string(),
            comment: field(fields, 8).to_string(),
        }
    }
}

// ============================================================================
// Key rows
// ============================================================================

/// One column's participation in one index (`SHOW KEYS` layout)
///
/// Positions: table, non-unique, key name, sequence, column, collation,
/// cardinality, sub-part, packed, null, index type, extra.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyRow {
    pub table: String,
    pub non_unique: bool,
    pub key_name: String,
    pub seq: Option<u32>,
    pub column: String,
    pub index_type: String,
}

impl TsvRecord for KeyRow {
    const ARTIFACT: Artifact = Artifact::Keys;
    const MIN_FIELDS: usize = 5;

    fn from_fields(fields: &[&str]) -> Self {
        let non_unique = match field(fields, 1).trim() {
            "0" => false,
            "1" => true,
            other => other.parse::<i64>().map(|v| v != 0).unwrap_or(true),
        };

        Self {
            table: field(fields, 0).trim().to_string(),
            non_unique,
            key_name: field(fields, 2).trim().to_string(),
            seq: field(fields, 3).trim().parse().ok(),
            column: field(fields, 4).trim().to_string(),
            index_type: field(fields, 10).trim().to_string(),
        }
    }
}

impl KeyRow {
    /// Whether the row belongs to a FULLTEXT index
    pub fn is_fulltext(&self) -> bool {
        self.index_type.eq_ignore_ascii_case("FULLTEXT")
    }
}

// ============================================================================
// Constraint rows
// ============================================================================

/// One column of one foreign key constraint
///
/// Positions: constraint name, column, referenced table, referenced
/// column, update rule, delete rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstraintRow {
    pub constraint: String,
    pub column: String,
    pub referenced_table: String,
    pub referenced_column: String,
    pub update_rule: String,
    pub delete_rule: String,
}

impl TsvRecord for ConstraintRow {
    const ARTIFACT: Artifact = Artifact::Constraints;
    const MIN_FIELDS: usize = 4;

    fn from_fields(fields: &[&str]) -> Self {
        Self {
            constraint: field(fields, 0).trim().to_string(),
            column: field(fields, 1).trim().to_string(),
            referenced_table: field(fields, 2).trim().to_string(),
            referenced_column: field(fields, 3).trim().to_string(),
            update_rule: field(fields, 4).trim().to_string(),
            delete_rule: field(fields, 5).trim().to_string(),
        }
    }
}

// ============================================================================
// Table charset / collation row
// ============================================================================

/// The single table-level charset/collation row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CharsetRow {
    pub charset: Option<String>,
    pub collation: Option<String>,
}

impl TsvRecord for CharsetRow {
    const ARTIFACT: Artifact = Artifact::TableCharsetAndCollation;
    const MIN_FIELDS: usize = 1;

    fn from_fields(fields: &[&str]) -> Self {
        let trimmed: Vec<&str> = fields.iter().map(|f| f.trim()).collect();
        Self {
            charset: nullable_field(&trimmed, 0),
            collation: nullable_field(&trimmed, 1),
        }
    }
}

// ============================================================================
// Foreign structure rows
// ============================================================================

/// One foreign key for incremental mode
///
/// Positions: table, column, constraint name, referenced table,
/// referenced column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForeignRow {
    pub table: String,
    pub column: String,
    pub constraint: String,
    pub referenced_table: String,
    pub referenced_column: String,
}

impl TsvRecord for ForeignRow {
    const ARTIFACT: Artifact = Artifact::ForeignStructure;
    const MIN_FIELDS: usize = 5;

    fn from_fields(fields: &[&str]) -> Self {
        Self {
            table: field(fields, 0).trim().to_string(),
            column: field(fields, 1).trim().to_string(),
            constraint: field(fields, 2).trim().to_string(),
            referenced_table: field(fields, 3).trim().to_string(),
            referenced_column: field(fields, 4).trim().to_string(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

//! # Column Type Classifier
//!
//! Decodes a raw column type expression (`TYPE`, `TYPE(ARG[,ARG...])`,
//! optionally followed by modifier text such as `unsigned`) and maps it
//! to a schema builder method through a fixed handler table.
//!
//! ## Handler table
//!
//! | source type                         | builder method                |
//! |-------------------------------------|-------------------------------|
//! | `int` / `bigint` / `mediumint` / `smallint` | `integer` family      |
//! | `tinyint`                           | `tinyInteger`, `boolean` for `tinyint(1)` |
//! | `decimal` / `numeric` / `fixed`     | `decimal`                     |
//! | `double` / `double precision` / `real` | `double`                   |
//! | `float`                             | `float`                       |
//! | `char` / `varchar`                  | `char` / `string`             |
//! | `text` / `tinytext` / `mediumtext` / `longtext` | text family       |
//! | `blob`                              | `binary`                      |
//! | `date` / `datetime` / `time` / `timestamp` | date/time family       |
//! | `enum` / `set`                      | `enum` / `set`                |
//! | `json`                              | `json`                        |
//!
//! Anything else becomes `UNKNOWN:<type>` and is still emitted, so the
//! reviewer of the generated file can fix it by hand. A type expression
//! that does not parse at all yields no column.

use migrant_core::BuilderMethod;
use migrant_core::quote::quote;
use migrant_ir::{ColumnArgs, ColumnSpec, StructureRow, TableMeta};
use regex::Regex;
use std::sync::LazyLock;

/// Marker in the extra field for timestamps refreshed on every update
pub const ON_UPDATE_CURRENT_TIMESTAMP: &str = "ON UPDATE CURRENT_TIMESTAMP";

static TYPE_EXPRESSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\w+)(\((.*?)\))?(.*?)?$").expect("type expression pattern is valid")
});

// ============================================================================
// Type expressions
// ============================================================================

/// A decoded type expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeExpr {
    /// Lower-cased type name (`varchar`)
    pub type_name: String,
    /// Parenthesized arguments, split on top-level commas
    pub args: Vec<String>,
    /// Trailing modifier text (`unsigned zerofill`), trimmed
    pub type_extra: String,
}

impl TypeExpr {
    /// Decode `TYPE(ARGS) EXTRA`; `None` when the expression does not match
    pub fn parse(expression: &str) -> Option<Self> {
        let caps = TYPE_EXPRESSION.captures(expression.trim())?;

        let type_name = caps.get(1)?.as_str().to_ascii_lowercase();
        let args = caps
            .get(3)
            .map(|m| split_args(m.as_str()))
            .unwrap_or_default();
        let type_extra = caps
            .get(4)
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default();

        Some(Self {
            type_name,
            args,
            type_extra,
        })
    }

    fn first_arg(&self) -> Option<&str> {
        match self.args.as_slice() {
            [only] => Some(only.as_str()),
            _ => None,
        }
    }

    fn is_unsigned(&self) -> bool {
        self.type_extra.to_ascii_lowercase().contains("unsigned")
    }
}

/// Split an argument list on commas outside single-quoted literals
///
/// `''` inside a literal is an escaped quote and does not end it.
pub fn split_args(raw: &str) -> Vec<String> {
    if raw.trim().is_empty() {
        return Vec::new();
    }

    let mut values = Vec::new();
    let mut current = String::new();
    let mut in_quote = false;
    let mut chars = raw.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\'' if in_quote && chars.peek() == Some(&'\'') => {
                current.push_str("''");
                chars.next();
            }
            '\'' => {
                in_quote = !in_quote;
                current.push(ch);
            }
            ',' if !in_quote => {
                values.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    values.push(current.trim().to_string());

    values
}

/// Turn a SQL string literal (`'it''s'`) into a PHP one (`'it\'s'`)
fn php_literal(sql_literal: &str) -> String {
    let inner = sql_literal
        .strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .unwrap_or(sql_literal);
    quote(&inner.replace("''", "'"))
}

// ============================================================================
// Handlers
// ============================================================================

/// What a handler decides about one column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub method: BuilderMethod,
    pub args: ColumnArgs,
    pub auto_increment: bool,
    pub unsigned: bool,
    pub on_update_current_timestamp: bool,
}

impl Classification {
    fn plain(method: BuilderMethod, args: ColumnArgs) -> Self {
        Self {
            method,
            args,
            auto_increment: false,
            unsigned: false,
            on_update_current_timestamp: false,
        }
    }
}

/// A pure handler: type expression + the row's extra field → classification
pub type Handler = fn(&TypeExpr, &str) -> Classification;

/// Handler lookup table, keyed by lower-cased type name
pub const HANDLERS: &[(&str, Handler)] = &[
    ("int", int),
    ("bigint", bigint),
    ("mediumint", mediumint),
    ("smallint", smallint),
    ("tinyint", tinyint),
    ("decimal", decimal),
    ("numeric", decimal),
    ("fixed", decimal),
    ("double", double),
    ("real", double),
    ("float", float),
    ("char", fixed_char),
    ("varchar", varchar),
    ("text", text),
    ("tinytext", tinytext),
    ("mediumtext", mediumtext),
    ("longtext", longtext),
    ("blob", blob),
    ("date", date),
    ("datetime", datetime),
    ("time", time),
    ("timestamp", timestamp),
    ("enum", enum_options),
    ("set", set_options),
    ("json", json),
];

/// Find the handler for a lower-cased type name
pub fn handler_for(type_name: &str) -> Option<Handler> {
    HANDLERS
        .iter()
        .find(|(name, _)| *name == type_name)
        .map(|(_, handler)| *handler)
}

fn integer(method: BuilderMethod, ty: &TypeExpr, extra: &str) -> Classification {
    // display width carries no meaning for the builder
    Classification {
        method,
        args: ColumnArgs::None,
        auto_increment: extra.to_ascii_lowercase().contains("auto_increment"),
        unsigned: ty.is_unsigned(),
        on_update_current_timestamp: false,
    }
}

fn signed_numeric(method: BuilderMethod, ty: &TypeExpr) -> Classification {
    Classification {
        unsigned: ty.is_unsigned(),
        ..with_args(method, ty)
    }
}

fn with_args(method: BuilderMethod, ty: &TypeExpr) -> Classification {
    Classification::plain(method, ColumnArgs::from_values(ty.args.clone()))
}

fn enumeration(method: BuilderMethod, ty: &TypeExpr) -> Classification {
    let options = ty.args.iter().map(|arg| php_literal(arg)).collect();
    Classification::plain(method, ColumnArgs::from_values(options))
}

fn int(ty: &TypeExpr, extra: &str) -> Classification {
    integer(BuilderMethod::Integer, ty, extra)
}

fn bigint(ty: &TypeExpr, extra: &str) -> Classification {
    integer(BuilderMethod::BigInteger, ty, extra)
}

fn mediumint(ty: &TypeExpr, extra: &str) -> Classification {
    integer(BuilderMethod::MediumInteger, ty, extra)
}

fn smallint(ty: &TypeExpr, extra: &str) -> Classification {
    integer(BuilderMethod::SmallInteger, ty, extra)
}

fn tinyint(ty: &TypeExpr, extra: &str) -> Classification {
    if ty.first_arg() == Some("1") {
        return Classification::plain(BuilderMethod::Boolean, ColumnArgs::None);
    }
    integer(BuilderMethod::TinyInteger, ty, extra)
}

fn decimal(ty: &TypeExpr, _extra: &str) -> Classification {
    signed_numeric(BuilderMethod::Decimal, ty)
}

fn double(ty: &TypeExpr, _extra: &str) -> Classification {
    signed_numeric(BuilderMethod::Double, ty)
}

fn float(ty: &TypeExpr, _extra: &str) -> Classification {
    signed_numeric(BuilderMethod::Float, ty)
}

fn fixed_char(ty: &TypeExpr, _extra: &str) -> Classification {
    with_args(BuilderMethod::Char, ty)
}

fn varchar(ty: &TypeExpr, _extra: &str) -> Classification {
    with_args(BuilderMethod::String, ty)
}

fn text(ty: &TypeExpr, _extra: &str) -> Classification {
    with_args(BuilderMethod::Text, ty)
}

fn tinytext(ty: &TypeExpr, _extra: &str) -> Classification {
    with_args(BuilderMethod::TinyText, ty)
}

fn mediumtext(ty: &TypeExpr, _extra: &str) -> Classification {
    with_args(BuilderMethod::MediumText, ty)
}

fn longtext(ty: &TypeExpr, _extra: &str) -> Classification {
    with_args(BuilderMethod::LongText, ty)
}

fn blob(ty: &TypeExpr, _extra: &str) -> Classification {
    with_args(BuilderMethod::Binary, ty)
}

fn date(_ty: &TypeExpr, _extra: &str) -> Classification {
    Classification::plain(BuilderMethod::Date, ColumnArgs::None)
}

fn datetime(ty: &TypeExpr, _extra: &str) -> Classification {
    with_args(BuilderMethod::DateTime, ty)
}

fn time(ty: &TypeExpr, _extra: &str) -> Classification {
    with_args(BuilderMethod::Time, ty)
}

fn timestamp(ty: &TypeExpr, extra: &str) -> Classification {
    Classification {
        on_update_current_timestamp: extra
            .to_ascii_uppercase()
            .contains(ON_UPDATE_CURRENT_TIMESTAMP),
        ..with_args(BuilderMethod::Timestamp, ty)
    }
}

fn enum_options(ty: &TypeExpr, _extra: &str) -> Classification {
    enumeration(BuilderMethod::Enum, ty)
}

fn set_options(ty: &TypeExpr, _extra: &str) -> Classification {
    enumeration(BuilderMethod::Set, ty)
}

fn json(_ty: &TypeExpr, _extra: &str) -> Classification {
    Classification::plain(BuilderMethod::Json, ColumnArgs::None)
}

fn unknown(ty: &TypeExpr) -> Classification {
    Classification::plain(
        BuilderMethod::Unknown(ty.type_name.clone()),
        ColumnArgs::from_values(ty.args.clone()),
    )
}

// ============================================================================
// Public API
// ============================================================================

/// Classify a type expression and the row's extra field
///
/// Returns `None` when the type expression is malformed.
pub fn classify_type(expression: &str, extra: &str) -> Option<Classification> {
    let ty = TypeExpr::parse(expression)?;
    Some(match handler_for(&ty.type_name) {
        Some(handler) => handler(&ty, extra),
        None => unknown(&ty),
    })
}

/// Build a column from a structure row
///
/// Charset and collation are kept only when they differ from the
/// table-level values. Returns `None` when the type expression is
/// malformed; the caller decides how to report it.
pub fn classify(row: &StructureRow, meta: &TableMeta) -> Option<ColumnSpec> {
    let classification = classify_type(&row.column_type, &row.extra)?;

    let comment = row.comment.replace(['\r', '\n'], "");
    let comment = comment.trim();

    let mut column = ColumnSpec::new(&row.field, classification.method);
    column.args = classification.args;
    column.auto_increment = classification.auto_increment;
    column.unsigned = classification.unsigned;
    column.on_update_current_timestamp = classification.on_update_current_timestamp;
    column.nullable = row.nullable;
    column.default = row.default.clone();
    column.charset = meta.divergent_charset(row.character_set.as_deref());
    column.collation = meta.divergent_collation(row.collation.as_deref());
    column.comment = (!comment.is_empty()).then(|| comment.to_string());
    column.source_type = row.column_type.clone();

    Some(column)
}

// ============================================================================
// Tests
// ============================================================================

//! # Structure Renderer
//!
//! Renders one `$table->...;` statement per surviving column, in column
//! order. Modifiers are chained in a fixed order:
//!
//! ```text
//! $table->method('name', args)->autoIncrement()->unsigned()
//!     ->nullable()->charset(..)->collation(..)->default(..)->comment(..);
//! ```
//!
//! `autoIncrement()` / `unsigned()` only appear on non-integer methods;
//! for the integer family those flags select the method name instead
//! (`increments`, `unsignedBigInteger`, ...).

use migrant_core::BuilderMethod;
use migrant_core::quote::{escape_single_quoted, is_numeric_literal, quote, trim_string_quotes};
use migrant_ir::{ColumnSpec, TableModel};

use crate::classifier::ON_UPDATE_CURRENT_TIMESTAMP;

/// Marker that switches a default to a raw SQL expression
const CURRENT_TIMESTAMP: &str = "CURRENT_TIMESTAMP";

// ============================================================================
// Public API
// ============================================================================

/// Render every column of the model
pub fn render_structure(model: &TableModel) -> Vec<String> {
    model.columns.iter().map(render_column).collect()
}

/// Render a single column statement
pub fn render_column(col: &ColumnSpec) -> String {
    let mut out = format!("$table->{}", method_name(col));

    match &col.name {
        Some(name) => {
            out.push('(');
            out.push_str(&quote(name));
            out.push_str(&render_args(col));
            out.push(')');
        }
        None => out.push_str("()"),
    }

    if !col.method.is_integer() {
        if col.auto_increment {
            out.push_str("->autoIncrement()");
        }
        if col.unsigned {
            out.push_str("->unsigned()");
        }
    }

    if col.nullable {
        out.push_str("->nullable()");
    }
    if let Some(charset) = &col.charset {
        out.push_str(&format!("->charset({})", quote(charset)));
    }
    if let Some(collation) = &col.collation {
        out.push_str(&format!("->collation({})", quote(collation)));
    }
    if let Some(default) = render_default(col) {
        out.push_str(&default);
    }
    if let Some(comment) = &col.comment {
        out.push_str(&format!("->comment({})", quote(comment)));
    }

    out.push(';');
    out
}

// ============================================================================
// Pieces
// ============================================================================

/// Builder method name, with the integer-family rewrites applied
fn method_name(col: &ColumnSpec) -> String {
    let rewritten = if col.auto_increment {
        col.method.increments_name()
    } else if col.unsigned {
        col.method.unsigned_name()
    } else {
        None
    };

    rewritten.map_or_else(|| col.method.to_string(), str::to_string)
}

/// Arguments after the column name, including the leading `, `
fn render_args(col: &ColumnSpec) -> String {
    let values = col.args.values();
    if col.method.is_enumeration() {
        format!(", [{}]", values.join(", "))
    } else if values.is_empty() {
        String::new()
    } else {
        format!(", {}", values.join(", "))
    }
}

/// The `->default(...)` modifier, if the column has a default to render
fn render_default(col: &ColumnSpec) -> Option<String> {
    let on_update =
        col.method == BuilderMethod::Timestamp && col.on_update_current_timestamp;

    let value = match (&col.default, on_update) {
        (Some(default), true) => format!("{} {}", default.trim(), ON_UPDATE_CURRENT_TIMESTAMP),
        (None, true) if col.nullable => format!("NULL {}", ON_UPDATE_CURRENT_TIMESTAMP),
        (None, true) => return Some("->useCurrentOnUpdate()".to_string()),
        (Some(default), false) => default.clone(),
        (None, false) => return None,
    };

    let unquoted = trim_string_quotes(&value);

    if col.method.is_numeric() || (col.method.is_enumeration() && is_numeric_literal(unquoted)) {
        if unquoted.is_empty() {
            return None;
        }
        return Some(format!("->default({})", unquoted));
    }

    if col.method == BuilderMethod::Boolean {
        return Some(format!("->default({})", boolean_literal(unquoted)));
    }

    if value.to_ascii_uppercase().contains(CURRENT_TIMESTAMP) {
        return Some(format!(
            "->default(DB::raw('{}'))",
            escape_single_quoted(value.trim())
        ));
    }

    Some(format!("->default({})", quote(unquoted)))
}

fn boolean_literal(value: &str) -> &'static str {
    match value.to_ascii_lowercase().as_str() {
        "" | "0" | "false" | "b'0" => "false",
        _ => "true",
    }
}

// ============================================================================
// Tests
// ============================================================================

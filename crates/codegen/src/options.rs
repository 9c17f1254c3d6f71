//! Table-level charset and collation

use migrant_core::quote::quote;
use migrant_ir::{CharsetRow, TableMeta};

/// Table metadata from the first charset/collation row, if any
pub fn build_meta(rows: &[CharsetRow]) -> TableMeta {
    rows.first()
        .map(|row| TableMeta::new(row.charset.clone(), row.collation.clone()))
        .unwrap_or_default()
}

pub fn render_table_options(meta: &TableMeta) -> Vec<String> {
    let mut out = Vec::new();
    if let Some(charset) = &meta.charset {
        out.push(format!("$table->charset = {};", quote(charset)));
    }
    if let Some(collation) = &meta.collation {
        out.push(format!("$table->collation = {};", quote(collation)));
    }
    out
}

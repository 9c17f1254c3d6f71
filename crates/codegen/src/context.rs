//! # Generation Context
//!
//! The `GenerationContext` holds what every stage needs to know about the
//! migration being produced:
//!
//! - the table name (validated once, up front)
//! - the generation mode (create table / add foreign keys)
//! - derived names: class name and migration file name
//!

use chrono::{DateTime, Local};
use heck::ToSnakeCase;
use migrant_core::quote::studly;
use migrant_core::{GenerationMode, MigrantError, MigrantResult};

/// Directory Laravel keeps migrations in, relative to the project root
pub const MIGRATIONS_DIR: &str = "database/migrations";

/// Timestamp prefix format of migration file names
pub const TIMESTAMP_FORMAT: &str = "%Y_%m_%d_%H%M%S";

// ============================================================================
// GenerationContext
// ============================================================================

#[derive(Debug, Clone)]
pub struct GenerationContext {
    table: String,
    mode: GenerationMode,
}

impl GenerationContext {
    /// Build a context, rejecting table names that cannot be emitted
    pub fn new(table: impl Into<String>, mode: GenerationMode) -> MigrantResult<Self> {
        let table = table.into();
        validate_table_name(&table)?;
        Ok(Self { table, mode })
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    // ====================================================================
    // Derived names
    // ====================================================================

    /// `Create<Studly>Table` or `AddForeignKeyTo<Studly>Table`
    ///
    /// Characters PHP does not allow in a class name are dropped.
    pub fn class_name(&self) -> String {
        let studly: String = studly(&self.table)
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
            .collect();
        match self.mode {
            GenerationMode::CreateTable => format!("Create{}Table", studly),
            GenerationMode::AddForeignKeys => format!("AddForeignKeyTo{}Table", studly),
        }
    }

    /// Migration file name for the given moment, relative to the project root
    pub fn migration_file_name_at(&self, at: DateTime<Local>) -> String {
        let action = match self.mode {
            GenerationMode::CreateTable => "create",
            GenerationMode::AddForeignKeys => "add_foreign_key_to",
        };
        format!(
            "{}/{}_{}_{}_table.php",
            MIGRATIONS_DIR,
            at.format(TIMESTAMP_FORMAT),
            action,
            self.table.to_snake_case()
        )
    }

    /// Migration file name stamped with the current local time
    pub fn migration_file_name(&self) -> String {
        self.migration_file_name_at(Local::now())
    }
}

/// A table name must be non-empty and usable inside a file name
fn validate_table_name(table: &str) -> MigrantResult<()> {
    if table.trim().is_empty() {
        return Err(MigrantError::InvalidTableName("table name is empty".into()));
    }
    if let Some(bad) = table
        .chars()
        .find(|c| c.is_control() || matches!(c, '/' | '\\'))
    {
        return Err(MigrantError::InvalidTableName(format!(
            "'{}' contains {:?}",
            table.escape_debug(),
            bad
        )));
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

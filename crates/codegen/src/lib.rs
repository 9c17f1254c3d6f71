//! # Migrant Codegen
//!
//! The translator: turns the tab-separated schema extracts into a Laravel
//! migration.
//!
//! ## Stages
//!
//! - **Classifier**: source type expression → schema builder method
//! - **Normalizers**: shorthand recognition (`id()`, `timestamps()`, ...)
//! - **Structure / keys / constraints**: statement rendering
//! - **Foreign**: the incremental add-foreign-key statements
//! - **Template**: stub loading and placeholder substitution
//! - **Generator**: orchestrates the above
//!

// ============================================================================
// Modules
// ============================================================================

pub mod builder;
pub mod classifier;
pub mod constraints;
pub mod context;
pub mod foreign;
pub mod generator;
pub mod keys;
pub mod normalize;
pub mod options;
pub mod structure;
pub mod template;

// ============================================================================
// Re-exports
// ============================================================================

pub use builder::{BuiltModel, build_foreign_deltas, build_table_model};
pub use context::GenerationContext;
pub use generator::Generator;
pub use template::{DirectoryTemplates, EmbeddedTemplates};

use migrant_core::{GenerationMode, MigrantError, MigrantResult};
use std::path::{Path, PathBuf};

// ============================================================================
// GeneratorConfig
// ============================================================================

/// Configuration for the migration generator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Version tag written into the generated file
    pub version: String,

    /// Indentation of statements inside the `Schema` closure
    pub indent: usize,

    /// Indentation of statements after the closure (raw SQL extras)
    pub extras_indent: usize,

    /// Directory whose stubs override the embedded ones
    pub stubs_dir: Option<PathBuf>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            version: migrant_core::VERSION.to_string(),
            indent: 12,
            extras_indent: 8,
            stubs_dir: None,
        }
    }
}

impl GeneratorConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the version tag
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Set the statement indentation, in spaces
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Set the extras indentation, in spaces
    pub fn with_extras_indent(mut self, indent: usize) -> Self {
        self.extras_indent = indent;
        self
    }

    /// Load stubs from a directory before falling back to the embedded ones
    pub fn with_stubs_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.stubs_dir = Some(dir.into());
        self
    }

    /// Reject configurations that cannot work
    pub fn validate(&self) -> MigrantResult<()> {
        if let Some(dir) = &self.stubs_dir {
            if !dir.is_dir() {
                return Err(MigrantError::config(format!(
                    "stubs directory '{}' does not exist",
                    dir.display()
                )));
            }
        }
        if self.version.contains('\n') {
            return Err(MigrantError::config("version tag must be a single line"));
        }
        Ok(())
    }

    pub(crate) fn indent_str(&self) -> String {
        " ".repeat(self.indent)
    }

    pub(crate) fn extras_indent_str(&self) -> String {
        " ".repeat(self.extras_indent)
    }
}

// ============================================================================
// GeneratedMigration
// ============================================================================

/// One rendered migration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedMigration {
    pub table: String,
    pub mode: GenerationMode,
    pub class_name: String,

    /// Path relative to the project root (`database/migrations/...`)
    pub file_name: String,

    pub content: String,

    /// Non-fatal problems met while reading the input
    pub warnings: Vec<String>,
}

impl GeneratedMigration {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Write the migration under `base_dir`, creating directories as needed
    ///
    /// Returns the full path written.
    pub fn write_to_dir(&self, base_dir: impl AsRef<Path>) -> MigrantResult<PathBuf> {
        let full_path = base_dir.as_ref().join(&self.file_name);

        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| MigrantError::DirectoryCreate {
                path: parent.to_path_buf(),
                message: e.to_string(),
            })?;
        }

        std::fs::write(&full_path, &self.content).map_err(|e| MigrantError::FileWrite {
            path: full_path.clone(),
            message: e.to_string(),
        })?;

        Ok(full_path)
    }
}

// ============================================================================
// Tests
// ============================================================================

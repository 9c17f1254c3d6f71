//! # Migration Generator
//!
//! The `Generator` is the top-level entry point. It takes a table name, a
//! [`GenerationMode`] and a [`RowSource`], and produces a complete
//! [`GeneratedMigration`].
//!
//! ## Pipeline
//!
//! ```text
//! table + mode + RowSource
//!         │
//!         ▼
//!   GenerationContext::new()          (table name validated)
//!         │
//!         ├──► CreateTable:    build_table_model() → structure/keys/constraints/options/extras
//!         ├──► AddForeignKeys: build_foreign_deltas() → foreign/foreignDrop
//!         │
//!         ▼
//!   template::render(stub, sections)
//!         │
//!         ▼
//!   GeneratedMigration { content, file_name, warnings }
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use migrant_codegen::{Generator, GeneratorConfig};
//! use migrant_core::GenerationMode;
//! use migrant_ir::DirectorySource;
//!
//! let source = DirectorySource::new(".");
//! let migration = Generator::new(GeneratorConfig::default())
//!     .generate("users", GenerationMode::CreateTable, &source)?;
//!
//! print!("{}", migration.content);
//! ```

use std::fmt;

use migrant_core::quote::escape_single_quoted;
use migrant_core::{GenerationMode, MigrantResult, RowSource, TemplateStore};

use crate::builder::{build_foreign_deltas, build_table_model};
use crate::constraints::render_constraints;
use crate::context::GenerationContext;
use crate::foreign::render_foreign;
use crate::keys::{render_fulltext, render_keys};
use crate::options::render_table_options;
use crate::structure::render_structure;
use crate::template::{self, DirectoryTemplates, EmbeddedTemplates, join_section};
use crate::{GeneratedMigration, GeneratorConfig};

// ============================================================================
// Generator
// ============================================================================

/// Top-level migration generator.
///
/// Stateless aside from its configuration and template store; one
/// generator can produce any number of migrations.
pub struct Generator {
    config: GeneratorConfig,
    templates: Box<dyn TemplateStore + Send + Sync>,
}

impl fmt::Debug for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Generator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Generator {
    // ====================================================================
    // Construction
    // ====================================================================

    /// Create a generator; stubs come from `config.stubs_dir` when set,
    /// otherwise from the embedded copies.
    pub fn new(config: GeneratorConfig) -> Self {
        let templates: Box<dyn TemplateStore + Send + Sync> = match &config.stubs_dir {
            Some(dir) => Box::new(DirectoryTemplates::new(dir)),
            None => Box::new(EmbeddedTemplates),
        };
        Self { config, templates }
    }

    /// Create a generator with an explicit template store
    pub fn with_templates(
        config: GeneratorConfig,
        templates: impl TemplateStore + Send + Sync + 'static,
    ) -> Self {
        Self {
            config,
            templates: Box::new(templates),
        }
    }

    // ====================================================================
    // Generation
    // ====================================================================

    /// Generate one migration.
    ///
    /// # Errors
    ///
    /// Fails on an unusable table name, a missing required artifact, an
    /// unreadable file, or a stub without the placeholders it needs.
    /// Malformed rows and unknown types are reported as warnings on the
    /// result instead.
    pub fn generate(
        &self,
        table: &str,
        mode: GenerationMode,
        source: &dyn RowSource,
    ) -> MigrantResult<GeneratedMigration> {
        let ctx = GenerationContext::new(table, mode)?;

        let (substitutions, warnings) = match mode {
            GenerationMode::CreateTable => self.create_sections(&ctx, source)?,
            GenerationMode::AddForeignKeys => self.foreign_sections(source)?,
        };

        let kind = mode.template();
        let stub = self.templates.template(kind)?;

        let mut all = vec![
            (template::VERSION, self.config.version.clone()),
            (template::CLASS_NAME, ctx.class_name()),
            (template::TABLE_NAME, escape_single_quoted(ctx.table())),
        ];
        all.extend(substitutions);

        let content = template::render(kind, &stub, &all)?;

        let migration = GeneratedMigration {
            table: ctx.table().to_string(),
            mode,
            class_name: ctx.class_name(),
            file_name: ctx.migration_file_name(),
            content,
            warnings,
        };

        tracing::info!(
            table = %migration.table,
            mode = ?mode,
            class = %migration.class_name,
            bytes = migration.content.len(),
            warnings = migration.warnings.len(),
            "migration generated"
        );

        Ok(migration)
    }

    /// The intermediate model as pretty JSON, without rendering
    pub fn dump_model(
        &self,
        table: &str,
        mode: GenerationMode,
        source: &dyn RowSource,
    ) -> MigrantResult<String> {
        let ctx = GenerationContext::new(table, mode)?;
        let json = match mode {
            GenerationMode::CreateTable => {
                serde_json::to_string_pretty(&build_table_model(ctx.table(), source)?)?
            }
            GenerationMode::AddForeignKeys => {
                serde_json::to_string_pretty(&build_foreign_deltas(source)?)?
            }
        };
        Ok(json)
    }

    fn create_sections(
        &self,
        ctx: &GenerationContext,
        source: &dyn RowSource,
    ) -> MigrantResult<(Vec<(&'static str, String)>, Vec<String>)> {
        let built = build_table_model(ctx.table(), source)?;
        let model = &built.model;
        let indent = self.config.indent_str();

        tracing::debug!(
            table = %model.table,
            columns = model.columns.len(),
            keys = model.keys.len(),
            fulltext = model.fulltext.len(),
            constraints = model.constraints.len(),
            "table model built"
        );

        let sections = vec![
            (template::STRUCTURE, join_section(&render_structure(model), &indent)),
            (template::KEYS, join_section(&render_keys(model), &indent)),
            (template::CONSTRAINTS, join_section(&render_constraints(model), &indent)),
            (
                template::TABLE_OPTIONS,
                join_section(&render_table_options(&model.meta), &indent),
            ),
            (
                template::EXTRAS,
                join_section(&render_fulltext(model), &self.config.extras_indent_str()),
            ),
        ];

        Ok((sections, built.warnings))
    }

    fn foreign_sections(
        &self,
        source: &dyn RowSource,
    ) -> MigrantResult<(Vec<(&'static str, String)>, Vec<String>)> {
        let built = build_foreign_deltas(source)?;
        let rendered = render_foreign(&built.model);
        let indent = self.config.indent_str();

        tracing::debug!(foreign_keys = built.model.len(), "foreign keys read");

        let sections = vec![
            (template::FOREIGN, join_section(&rendered.add, &indent)),
            (template::FOREIGN_DROP, join_section(&rendered.drop, &indent)),
        ];

        Ok((sections, built.warnings))
    }
}

// ============================================================================
// Tests
// ============================================================================

//! # Migrant CLI
//!
//! Command-line interface for migrant.
//!
//! ```text
//! migrant <TABLE> [FOREIGN]
//! ```
//!
//! Reads the tab-separated extracts from the input directory and prints
//! the migration to stdout, or writes it under `--output-dir`. Any value
//! for `FOREIGN` (or `--foreign`) switches to the add-foreign-key
//! migration.
//!

pub mod sinks;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use colored::Colorize;
use migrant_codegen::{GeneratedMigration, Generator, GeneratorConfig};
use migrant_core::{GenerationMode, OutputSink, RowSource};
use migrant_ir::DirectorySource;

pub use sinks::{ClipboardSink, WriterSink};

/// Default clipboard command
pub const DEFAULT_CLIPBOARD_CMD: &str = "pbcopy";

// ============================================================================
// Arguments
// ============================================================================

#[derive(Debug, Clone, Parser)]
#[command(name = "migrant")]
#[command(about = "Generate a Laravel migration from tab-separated table structure extracts")]
#[command(version)]
pub struct Cli {
    /// Table to generate the migration for
    #[arg(value_name = "TABLE")]
    pub table: String,

    /// Any value generates an add-foreign-key migration instead
    #[arg(value_name = "FOREIGN")]
    pub foreign_arg: Option<String>,

    /// Generate an add-foreign-key migration
    #[arg(long)]
    pub foreign: bool,

    /// Directory holding the rows*.tsv extracts
    #[arg(long, env = "MIGRANT_INPUT_DIR", default_value = ".")]
    pub input_dir: PathBuf,

    /// Directory with create.stub / foreign_key.stub overrides
    #[arg(long, env = "MIGRANT_STUBS_DIR")]
    pub stubs_dir: Option<PathBuf>,

    /// Write database/migrations/<timestamp>_*.php under this directory
    /// instead of printing
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Also copy the migration to the clipboard
    #[arg(long)]
    pub clipboard: bool,

    /// Command the migration is piped into for --clipboard
    #[arg(long, env = "MIGRANT_CLIPBOARD_CMD", default_value = DEFAULT_CLIPBOARD_CMD)]
    pub clipboard_cmd: String,

    /// Print the parsed table model as JSON instead of the migration
    #[arg(long)]
    pub dump_model: bool,

    /// More logging on stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress warnings
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    /// Parse from the process arguments
    pub fn from_env() -> Self {
        Self::parse()
    }

    /// Which migration to generate
    pub fn mode(&self) -> GenerationMode {
        let flagged = self.foreign_arg.as_deref().is_some_and(is_truthy);
        if self.foreign || flagged {
            GenerationMode::AddForeignKeys
        } else {
            GenerationMode::CreateTable
        }
    }

    /// Default log filter when `RUST_LOG` is not set
    pub fn log_filter(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }

    pub fn generator_config(&self) -> GeneratorConfig {
        let config = GeneratorConfig::new();
        match &self.stubs_dir {
            Some(dir) => config.with_stubs_dir(dir),
            None => config,
        }
    }
}

/// `""`, `0` and `false` do not switch modes
fn is_truthy(value: &str) -> bool {
    !matches!(value.trim().to_ascii_lowercase().as_str(), "" | "0" | "false")
}

// ============================================================================
// Run
// ============================================================================

/// Run the CLI
pub fn run(cli: &Cli) -> Result<()> {
    let mode = cli.mode();
    let config = cli.generator_config();
    config.validate()?;

    let source = DirectorySource::new(&cli.input_dir);
    for artifact in mode.required_artifacts() {
        if !source.has(*artifact)? {
            bail!(
                "required {} file not found: {}",
                artifact.label(),
                source.path_of(*artifact).display()
            );
        }
    }

    tracing::info!(
        table = %cli.table,
        mode = ?mode,
        input_dir = %cli.input_dir.display(),
        "generating migration"
    );

    let generator = Generator::new(config);

    if cli.dump_model {
        let json = generator
            .dump_model(&cli.table, mode, &source)
            .with_context(|| format!("failed to build model for '{}'", cli.table))?;
        let mut out = WriterSink::stdout();
        out.emit(&json)?;
        out.emit("\n")?;
        return Ok(());
    }

    let migration = generator
        .generate(&cli.table, mode, &source)
        .with_context(|| format!("failed to generate migration for '{}'", cli.table))?;

    if !cli.quiet {
        print_warnings(&migration);
    }

    deliver(cli, &migration)
}

fn deliver(cli: &Cli, migration: &GeneratedMigration) -> Result<()> {
    match &cli.output_dir {
        Some(dir) => {
            let path = migration.write_to_dir(dir)?;
            eprintln!("{} {}", "Created:".green().bold(), path.display());
        }
        None => WriterSink::stdout().emit(&migration.content)?,
    }

    if cli.clipboard {
        let mut sink = ClipboardSink::new(cli.clipboard_cmd.as_str());
        sink.emit(&migration.content)?;
        tracing::info!(sink = sink.name(), command = %cli.clipboard_cmd, "migration copied");
        if !cli.quiet {
            eprintln!("{} {}", "Copied:".green().bold(), migration.class_name);
        }
    }

    Ok(())
}

fn print_warnings(migration: &GeneratedMigration) {
    for warning in &migration.warnings {
        eprintln!("{} {}", "warning:".yellow().bold(), warning);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["migrant"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_mode_selection() {
        assert_eq!(cli(&["users"]).mode(), GenerationMode::CreateTable);
        assert_eq!(cli(&["users", "1"]).mode(), GenerationMode::AddForeignKeys);
        assert_eq!(cli(&["users", "yes"]).mode(), GenerationMode::AddForeignKeys);
        assert_eq!(cli(&["users", "0"]).mode(), GenerationMode::CreateTable);
        assert_eq!(cli(&["users", "--foreign"]).mode(), GenerationMode::AddForeignKeys);
    }

    #[test]
    fn test_log_filter() {
        assert_eq!(cli(&["t"]).log_filter(), "warn");
        assert_eq!(cli(&["t", "-v"]).log_filter(), "info");
        assert_eq!(cli(&["t", "-vvv"]).log_filter(), "debug");
        assert_eq!(cli(&["t", "-q"]).log_filter(), "error");
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["migrant", "t", "-q", "-v"]).is_err());
    }

    #[test]
    fn test_table_is_required() {
        assert!(Cli::try_parse_from(["migrant"]).is_err());
    }

    #[test]
    fn test_run_writes_into_output_dir() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        std::fs::write(
            input.path().join("rowsStructure.tsv"),
            "Field\tType\nid\tbigint(20) unsigned\tNO\tPRI\tNULL\t\t\tauto_increment\t\n",
        )
        .unwrap();

        let args = cli(&[
            "users",
            "--input-dir",
            input.path().to_str().unwrap(),
            "--output-dir",
            output.path().to_str().unwrap(),
            "-q",
        ]);
        run(&args).unwrap();

        let dir = output.path().join("database/migrations");
        let files: Vec<_> = std::fs::read_dir(&dir).unwrap().collect();
        assert_eq!(files.len(), 1);
        let path = files[0].as_ref().unwrap().path();
        assert!(path.to_string_lossy().ends_with("_create_users_table.php"));
        assert!(std::fs::read_to_string(path).unwrap().contains("$table->id();"));
    }

    #[test]
    fn test_run_missing_structure() {
        let input = TempDir::new().unwrap();
        let args = cli(&["users", "--input-dir", input.path().to_str().unwrap()]);
        let err = run(&args).unwrap_err();
        assert!(err.to_string().contains("rowsStructure.tsv"));
    }

    #[test]
    fn test_run_rejects_missing_stubs_dir() {
        let input = TempDir::new().unwrap();
        let args = cli(&[
            "users",
            "--input-dir",
            input.path().to_str().unwrap(),
            "--stubs-dir",
            "/definitely/not/here",
        ]);
        assert!(run(&args).unwrap_err().to_string().contains("stubs directory"));
    }
}

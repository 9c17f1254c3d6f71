//! # Migrant Core
//!
//! Core types, traits, and error handling for migrant.
//!
//! This crate provides the foundational building blocks used throughout
//! the workspace, including:
//!
//! - **Types**: builder methods, referential actions, input artifacts
//! - **Traits**: the `RowSource`, `TemplateStore` and `OutputSink` seams
//! - **Quoting**: helpers for emitting single-quoted PHP literals
//! - **Errors**: unified error handling with `MigrantError` and `MigrantResult`
//!

pub mod error;
pub mod quote;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use error::{MigrantError, MigrantResult};
pub use traits::{OutputSink, RowSource, TemplateStore};
pub use types::{Artifact, BuilderMethod, GenerationMode, ReferentialAction, TemplateKind};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

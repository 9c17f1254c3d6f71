//! # Migrant IR (Intermediate Representation)
//!
//! This crate provides the intermediate representation the migration
//! generator builds from the tab-separated extracts and then renders.
//!
//! ## Core Concepts
//!
//! - **Rows**: named-field records parsed positionally from each artifact
//! - **ColumnSpec**: one column classified into a schema builder method
//! - **IndexSpec**: one named index (regular or FULLTEXT bucket)
//! - **ConstraintSpec**: one foreign key, possibly composite
//! - **TableModel**: the root container holding all of the above
//! - **ForeignKeyDelta**: the flat foreign-key list for incremental mode
//! - **Sources**: where the artifacts are read from
//!

// Module declarations
pub mod column;
pub mod constraint;
pub mod foreign;
pub mod index;
pub mod rows;
pub mod source;
pub mod table;

// Re-export commonly used types at crate root
pub use column::{ColumnArgs, ColumnSpec};
pub use constraint::{ConstraintSpec, ForeignKeyColumn};
pub use foreign::ForeignKeyDelta;
pub use index::{IndexMethod, IndexSpec, PRIMARY_KEY_NAME};
pub use rows::{
    CharsetRow, ConstraintRow, ForeignRow, KeyRow, ParsedRows, SkippedLine, StructureRow,
    TsvRecord, parse_rows,
};
pub use source::{DirectorySource, MemorySource, optional_lines, required_lines};
pub use table::{TableMeta, TableModel};

// Re-export core types that are commonly used with IR
pub use migrant_core::{
    Artifact, BuilderMethod, MigrantError, MigrantResult, ReferentialAction, RowSource,
};

//! Core traits for migrant
//!
//! The translator talks to the outside world through three seams: a
//! [`RowSource`] that supplies the tab-separated extracts, a
//! [`TemplateStore`] that supplies the stub templates, and an
//! [`OutputSink`] that receives the rendered migration.

use crate::error::MigrantResult;
use crate::types::{Artifact, TemplateKind};

// ============================================================================
// RowSource Trait
// ============================================================================

/// Supplies the raw lines of each input artifact
///
/// Implementations return every line of the artifact, header included;
/// header handling belongs to the parse boundary. A source that simply
/// does not have an optional artifact should return `Ok(None)` rather
/// than an error.
///
/// # Example
///
/// ```rust,ignore
/// use migrant_core::{Artifact, MigrantResult, RowSource};
///
/// struct Fixed(Vec<String>);
///
/// impl RowSource for Fixed {
///     fn lines(&self, artifact: Artifact) -> MigrantResult<Option<Vec<String>>> {
///         Ok(match artifact {
///             Artifact::Structure => Some(self.0.clone()),
///             _ => None,
///         })
///     }
/// }
/// ```
pub trait RowSource {
    /// All lines of an artifact, or `None` when the artifact is absent
    fn lines(&self, artifact: Artifact) -> MigrantResult<Option<Vec<String>>>;

    /// Whether the artifact is available from this source
    ///
    /// Errors while looking are reported, not read as absence.
    fn has(&self, artifact: Artifact) -> MigrantResult<bool> {
        Ok(self.lines(artifact)?.is_some())
    }
}

// ============================================================================
// TemplateStore Trait
// ============================================================================

/// Supplies the fixed stub templates
pub trait TemplateStore {
    /// Full text of a stub template
    fn template(&self, kind: TemplateKind) -> MigrantResult<String>;
}

// ============================================================================
// OutputSink Trait
// ============================================================================

/// Receives the final rendered migration text
pub trait OutputSink {
    /// Short name for logs ("stdout", "clipboard", ...)
    fn name(&self) -> &str;

    /// Deliver the rendered text
    fn emit(&mut self, text: &str) -> MigrantResult<()>;
}

// ============================================================================
// Tests
// ============================================================================

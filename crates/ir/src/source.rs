//! Row sources: where the tab-separated extracts come from
//!
//! [`DirectorySource`] reads one file per artifact from an input
//! directory (the layout the database client exports). [`MemorySource`]
//! holds the lines in memory and is what tests and embedders use.

use migrant_core::{Artifact, MigrantError, MigrantResult, RowSource};
use std::borrow::Cow;
use std::collections::HashMap;
use std::path::PathBuf;

// ============================================================================
// DirectorySource
// ============================================================================

/// Reads each artifact from `<dir>/<file name>`
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
    file_names: HashMap<Artifact, String>,
}

impl DirectorySource {
    /// Source reading the default file names from `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            file_names: HashMap::new(),
        }
    }

    /// Override the file name used for one artifact
    pub fn with_file_name(mut self, artifact: Artifact, name: impl Into<String>) -> Self {
        self.file_names.insert(artifact, name.into());
        self
    }

    /// Full path of an artifact's file
    pub fn path_of(&self, artifact: Artifact) -> PathBuf {
        let name = self
            .file_names
            .get(&artifact)
            .map(String::as_str)
            .unwrap_or_else(|| artifact.default_file_name());
        self.dir.join(name)
    }
}

impl RowSource for DirectorySource {
    fn lines(&self, artifact: Artifact) -> MigrantResult<Option<Vec<String>>> {
        let path = self.path_of(artifact);
        if !path.exists() {
            tracing::debug!(artifact = %artifact, path = %path.display(), "artifact not present");
            return Ok(None);
        }

        let bytes = std::fs::read(&path).map_err(|e| MigrantError::file_read(&path, e.to_string()))?;

        // exports from the database client are not always UTF-8
        let content = String::from_utf8_lossy(&bytes);
        if let Cow::Owned(_) = content {
            tracing::warn!(
                artifact = %artifact,
                path = %path.display(),
                "invalid UTF-8 replaced with U+FFFD",
            );
        }

        tracing::debug!(
            artifact = %artifact,
            path = %path.display(),
            bytes = content.len(),
            "artifact loaded",
        );

        Ok(Some(content.split('\n').map(str::to_string).collect()))
    }

    fn has(&self, artifact: Artifact) -> MigrantResult<bool> {
        Ok(self.path_of(artifact).is_file())
    }
}

// ============================================================================
// MemorySource
// ============================================================================

/// Holds artifact lines in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    artifacts: HashMap<Artifact, Vec<String>>,
}

impl MemorySource {
    /// Empty source (every artifact absent)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an artifact from its full text (header line included)
    pub fn with_text(mut self, artifact: Artifact, text: &str) -> Self {
        self.insert_text(artifact, text);
        self
    }

    /// Set an artifact from individual lines (header line included)
    pub fn with_lines<I, S>(mut self, artifact: Artifact, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.artifacts
            .insert(artifact, lines.into_iter().map(Into::into).collect());
        self
    }

    /// Set an artifact from its full text
    pub fn insert_text(&mut self, artifact: Artifact, text: &str) {
        self.artifacts
            .insert(artifact, text.split('\n').map(str::to_string).collect());
    }
}

impl RowSource for MemorySource {
    fn lines(&self, artifact: Artifact) -> MigrantResult<Option<Vec<String>>> {
        Ok(self.artifacts.get(&artifact).cloned())
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Lines of a required artifact; a missing one is an error
pub fn required_lines(source: &dyn RowSource, artifact: Artifact) -> MigrantResult<Vec<String>> {
    source
        .lines(artifact)?
        .ok_or_else(|| MigrantError::missing_artifact(artifact.label(), artifact.default_file_name()))
}

/// Lines of an optional artifact; a missing one reads as empty
pub fn optional_lines(source: &dyn RowSource, artifact: Artifact) -> MigrantResult<Vec<String>> {
    Ok(source.lines(artifact)?.unwrap_or_default())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_directory_source_reads_default_names() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("rowsStructure.tsv"),
            "Field\tType\nid\tint(10)\n",
        )
        .unwrap();

        let source = DirectorySource::new(dir.path());
        let lines = source.lines(Artifact::Structure).unwrap().unwrap();
        assert_eq!(lines, vec!["Field\tType", "id\tint(10)", ""]);
        assert!(source.lines(Artifact::Keys).unwrap().is_none());
    }

    #[test]
    fn test_directory_source_file_name_override() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("keys.txt"), "header\n").unwrap();

        let source = DirectorySource::new(dir.path()).with_file_name(Artifact::Keys, "keys.txt");
        assert_eq!(source.path_of(Artifact::Keys), dir.path().join("keys.txt"));
        assert!(source.has(Artifact::Keys).unwrap());
        assert!(!source.has(Artifact::Constraints).unwrap());
    }

    #[test]
    fn test_directory_source_tolerates_invalid_utf8() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("rowsStructure.tsv"),
            b"Field\tType\tNull\tKey\tDefault\tCharset\tCollation\tExtra\tComment\nname\tvarchar(20)\tNO\t\t\t\t\t\tcaf\xe9\n",
        )
        .unwrap();

        let source = DirectorySource::new(dir.path());
        assert!(source.has(Artifact::Structure).unwrap());
        let lines = source.lines(Artifact::Structure).unwrap().unwrap();
        assert_eq!(lines[1], "name\tvarchar(20)\tNO\t\t\t\t\t\tcaf\u{FFFD}");
    }

    #[test]
    fn test_required_lines_missing_is_error() {
        let source = MemorySource::new();
        let err = required_lines(&source, Artifact::Structure).unwrap_err();
        assert!(err.is_input());
    }

    #[test]
    fn test_optional_lines_missing_is_empty() {
        let source = MemorySource::new().with_lines(Artifact::Keys, ["header"]);
        assert!(optional_lines(&source, Artifact::Constraints).unwrap().is_empty());
        assert_eq!(optional_lines(&source, Artifact::Keys).unwrap(), vec!["header"]);
    }

    #[test]
    fn test_memory_source_text() {
        let source = MemorySource::new().with_text(Artifact::Structure, "a\nb");
        assert_eq!(
            source.lines(Artifact::Structure).unwrap(),
            Some(vec!["a".to_string(), "b".to_string()])
        );
    }
}

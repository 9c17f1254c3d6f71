//! Error types for migrant
//!
//! This module provides unified error handling across the workspace:
//! input artifact errors, template errors, configuration errors, output
//! errors, and serialization errors.
//!
//! Malformed rows and unknown column types are deliberately *not* errors.
//! The translator skips or flags them and carries on; only structural
//! problems (a required artifact is missing, a template cannot be read)
//! surface as a `MigrantError`.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for migrant
#[derive(Debug, Error)]
pub enum MigrantError {
    // ========================================================================
    // Input Errors
    // ========================================================================
    /// A required input artifact does not exist
    #[error("Required input artifact '{artifact}' not found at '{path}'")]
    MissingArtifact { artifact: String, path: PathBuf },

    /// An input artifact could not be read
    #[error("Failed to read file '{path}': {message}")]
    FileRead { path: PathBuf, message: String },

    /// The table name is unusable
    #[error("Invalid table name: {0}")]
    InvalidTableName(String),

    // ========================================================================
    // Template Errors
    // ========================================================================
    /// A stub template could not be loaded
    #[error("Failed to load template '{template}': {message}")]
    TemplateLoad { template: String, message: String },

    /// A stub template lacks a placeholder the renderer needs
    #[error("Template '{template}' is missing placeholder '{placeholder}'")]
    MissingPlaceholder {
        template: String,
        placeholder: String,
    },

    // ========================================================================
    // Output Errors
    // ========================================================================
    /// File write error
    #[error("Failed to write file '{path}': {message}")]
    FileWrite { path: PathBuf, message: String },

    /// Directory creation failed
    #[error("Failed to create directory '{path}': {message}")]
    DirectoryCreate { path: PathBuf, message: String },

    /// The clipboard command failed
    #[error("Clipboard command '{command}' failed: {message}")]
    Clipboard { command: String, message: String },

    // ========================================================================
    // IO / Serialization Errors
    // ========================================================================
    /// File IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ========================================================================
    // Generic Errors
    // ========================================================================
    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl MigrantError {
    /// Create a missing-artifact error
    pub fn missing_artifact(artifact: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        MigrantError::MissingArtifact {
            artifact: artifact.into(),
            path: path.into(),
        }
    }

    /// Create a file read error
    pub fn file_read(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        MigrantError::FileRead {
            path: path.into(),
            message: msg.into(),
        }
    }

    /// Create a template load error
    pub fn template_load(template: impl Into<String>, msg: impl Into<String>) -> Self {
        MigrantError::TemplateLoad {
            template: template.into(),
            message: msg.into(),
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        MigrantError::InvalidConfig(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        MigrantError::Internal(msg.into())
    }

    /// Check if this error was caused by the input artifacts or arguments
    pub fn is_input(&self) -> bool {
        matches!(
            self,
            MigrantError::MissingArtifact { .. }
                | MigrantError::FileRead { .. }
                | MigrantError::InvalidTableName(_)
        )
    }
}

/// Result type alias using MigrantError
pub type MigrantResult<T> = Result<T, MigrantError>;

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_artifact_error() {
        let err = MigrantError::missing_artifact("structure", "/tmp/rowsStructure.tsv");
        assert!(err.is_input());
        assert_eq!(
            err.to_string(),
            "Required input artifact 'structure' not found at '/tmp/rowsStructure.tsv'"
        );
    }

    #[test]
    fn test_template_errors() {
        let err = MigrantError::template_load("create.stub", "permission denied");
        assert!(!err.is_input());
        assert_eq!(
            err.to_string(),
            "Failed to load template 'create.stub': permission denied"
        );

        let err = MigrantError::MissingPlaceholder {
            template: "create.stub".to_string(),
            placeholder: "DummyClass".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Template 'create.stub' is missing placeholder 'DummyClass'"
        );
    }

    #[test]
    fn test_config_error() {
        let err = MigrantError::config("indent must not be empty");
        assert!(!err.is_input());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: indent must not be empty"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: MigrantError = io_err.into();
        assert!(matches!(err, MigrantError::Io(_)));
        assert!(!err.is_input());
    }
}

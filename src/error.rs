//! Error handling for the patterngen library.
//!
//! Every failure in the generation pipeline is fail-fast and non-retryable.
//! Each variant carries the language id, construct kind, pattern name or
//! placeholder name needed to diagnose it without looking at engine internals.
//!
//! # Examples
//!
//! ```
//! use patterngen::error::{GenerationError, Result};
//!
//! fn might_fail() -> Result<()> {
//!     Err(GenerationError::missing_field("return_type"))
//! }
//!
//! assert!(might_fail().is_err());
//! ```

use thiserror::Error;

/// Result type for patterngen operations
pub type Result<T> = std::result::Result<T, GenerationError>;

/// Errors that can occur while loading definitions or generating code
#[derive(Debug, Error)]
pub enum GenerationError {
    /// No definition source knows this language id
    #[error("No definition found for language '{language}'")]
    DefinitionNotFound { language: String },

    /// The definition exists but is missing required parts or is ill-typed
    #[error("Malformed definition for language '{language}': {reason}")]
    MalformedDefinition { language: String, reason: String },

    /// The request names a construct kind the definition does not declare
    #[error("Unknown construct kind '{kind}' for language '{language}'")]
    UnknownConstructKind { language: String, kind: String },

    /// The request applies a pattern the construct does not declare
    #[error("Unknown pattern '{pattern}' for construct kind '{kind}'")]
    UnknownPattern { kind: String, pattern: String },

    /// The template references a placeholder the request did not supply
    #[error("Missing field '{field}' required by template")]
    MissingField { field: String },

    /// A supplied value would expand into another placeholder
    #[error("Field '{field}' contains a raw placeholder token of the same template")]
    RecursiveTemplateError { field: String },

    /// A template placeholder names a case filter that does not exist
    #[error("Unknown placeholder filter '{filter}'")]
    UnknownFilter { filter: String },

    /// A caller asked for a `common_imports` group that does not exist
    #[error("Unknown import group '{group}' for language '{language}'")]
    UnknownImportGroup { language: String, group: String },

    /// The request itself is unusable (e.g. methods on a non-class construct)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// I/O error from a definition source
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl GenerationError {
    /// Create a new definition-not-found error
    pub fn not_found<S: Into<String>>(language: S) -> Self {
        Self::DefinitionNotFound {
            language: language.into(),
        }
    }

    /// Create a new malformed-definition error
    pub fn malformed<L: Into<String>, R: Into<String>>(language: L, reason: R) -> Self {
        Self::MalformedDefinition {
            language: language.into(),
            reason: reason.into(),
        }
    }

    /// Create a new missing-field error
    pub fn missing_field<S: Into<String>>(field: S) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_not_found_message() {
        let error = GenerationError::not_found("cobol");
        assert!(matches!(error, GenerationError::DefinitionNotFound { .. }));
        assert_eq!(error.to_string(), "No definition found for language 'cobol'");
    }

    #[test]
    fn test_malformed_message_carries_language_and_reason() {
        let error = GenerationError::malformed("python", "construct 'class' has no template");
        assert_eq!(
            error.to_string(),
            "Malformed definition for language 'python': construct 'class' has no template"
        );
    }

    #[test]
    fn test_missing_field_message() {
        let error = GenerationError::missing_field("return_type");
        assert!(
            matches!(error, GenerationError::MissingField { ref field } if field == "return_type")
        );
        assert_eq!(
            error.to_string(),
            "Missing field 'return_type' required by template"
        );
    }

    #[test]
    fn test_unknown_pattern_message() {
        let error = GenerationError::UnknownPattern {
            kind: "function".to_string(),
            pattern: "nonexistent".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Unknown pattern 'nonexistent' for construct kind 'function'"
        );
    }

    #[test]
    fn test_error_from_io_error() {
        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let error: GenerationError = io_error.into();
        assert!(matches!(error, GenerationError::Io(_)));
        assert!(error.to_string().contains("I/O error"));
        assert!(error.to_string().contains("denied"));
    }
}

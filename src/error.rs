//! Error types
//!
//! Two failure kinds cross the library boundary:
//! - `ValidationError`: a request field is missing or not a finite number.
//!   Surfaced to the caller, never fatal.
//! - `ArtifactLoadError`: trained files exist but cannot be used. Only raised
//!   at startup, where it switches the process into fallback mode.
//!
//! Everything else (unknown classifier index, catalogue miss, empty similarity
//! list, missing trend) is a degradation with a safe default, not an error.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing field: {field}")]
    MissingField { field: &'static str },

    #[error("Field '{field}' is not a valid number: {value}")]
    NotNumeric { field: &'static str, value: String },
}

impl ValidationError {
    /// Canonical name of the offending field
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingField { field } => field,
            ValidationError::NotNumeric { field, .. } => field,
        }
    }
}

#[derive(Debug, Error)]
pub enum ArtifactLoadError {
    #[error("Failed to read artifact {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse artifact {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to load reference dataset {path:?}: {message}")]
    Dataset { path: PathBuf, message: String },

    #[error("Artifact {path:?} has an unexpected shape: {message}")]
    Shape { path: PathBuf, message: String },
}

impl ArtifactLoadError {
    pub(crate) fn shape(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ArtifactLoadError::Shape {
            path: path.into(),
            message: message.into(),
        }
    }
}

//! Error types for template materialization.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for template operations.
pub type TemplateResult<T> = Result<T, TemplateError>;

/// Errors that can occur during template operations.
///
/// Only the variants raised before the tree walk starts (or after it ends)
/// abort a generation run. Failures while processing a single entry are
/// recorded in the [`MaterializeReport`](crate::MaterializeReport) instead.
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Template store not found: {0}")]
    NotFound(PathBuf),

    #[error("Template store unreadable at {path:?}: {source}")]
    StoreUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create target directory {path:?}: {source}")]
    TargetCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Template rendering failed: {0}")]
    RenderingFailed(String),

    #[error("Rendered path leaves the target directory: {0:?}")]
    UnsafePath(String),

    #[error("Invalid project options: {0}")]
    InvalidOptions(String),

    #[error("Package manifest was not generated at {0:?}")]
    MissingPackageManifest(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<handlebars::RenderError> for TemplateError {
    fn from(err: handlebars::RenderError) -> Self {
        Self::RenderingFailed(err.to_string())
    }
}

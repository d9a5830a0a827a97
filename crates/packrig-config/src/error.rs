//! Error types for settings loading and environment construction.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no extensions configured: list at least one extension to compile in packrig.yml")]
    NoExtensions,

    // Settings parsing/loading errors
    #[error("failed to load settings: {0}")]
    Settings(#[from] figment::Error),

    #[error("invalid config value for '{field}': {hint}")]
    InvalidValue { field: String, hint: String },

    #[error("unknown profile '{0}' (expected production, development or test)")]
    UnknownProfile(String),

    // Loader rule errors
    #[error("invalid pattern `{pattern}`: {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("invalid rule file {}: {message}", .path.display())]
    InvalidRule { path: PathBuf, message: String },

    // Filesystem and serialization errors
    #[error("failed to walk {}: {source}", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConfigError {
    pub(crate) fn walk(path: impl Into<PathBuf>, source: walkdir::Error) -> Self {
        ConfigError::Walk {
            path: path.into(),
            source,
        }
    }
}

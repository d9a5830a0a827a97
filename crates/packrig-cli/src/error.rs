//! Error handling for the packrig CLI.
//!
//! Commands return [`CliError`]; `main` renders it through miette.

use miette::Report;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// Settings, discovery or profile errors from the library
    #[error("Configuration error: {0}")]
    Config(#[from] packrig_config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convert a CLI error into a miette report, attaching a hint where one helps.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Config(packrig_config::ConfigError::NoExtensions) => miette::miette!(
            help = "Add an `extensions` list under `default:` in config/packrig.yml",
            "{}",
            packrig_config::ConfigError::NoExtensions
        ),
        CliError::Config(packrig_config::ConfigError::UnknownProfile(name)) => miette::miette!(
            help = "Pass --env production, development or test (or set NODE_ENV)",
            "unknown profile '{}'",
            name
        ),
        other => miette::miette!("{}", other),
    }
}

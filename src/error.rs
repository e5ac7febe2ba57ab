//! Error Types
//!
//! All fatal conditions surfaced by blasenv. Each variant ends the
//! process with a non-zero exit status and its display message.

use thiserror::Error;

/// Errors raised while managing or testing environments.
#[derive(Debug, Error)]
pub enum EnvError {
    #[error("Must provide an environment!")]
    MissingEnvironment,

    #[error("Unknown environment specified: {name}!\nKnown environments: {known}")]
    UnknownEnvironment { name: String, known: String },

    #[error("Error occurred during creation of environment '{0}'!")]
    Creation(String),

    #[error("Environment {0} must be activated for testing!")]
    NotActive(String),

    #[error("Test run failed ({})", exit_label(.0))]
    TestsFailed(Option<i32>),

    #[error("Failed to run `{command}`: {reason}")]
    Manager { command: String, reason: String },

    #[error("Invalid environment table: {0}")]
    InvalidTable(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to parse manager JSON output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse environment file: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, EnvError>;

/// Describes a process exit code; `None` means the process was killed.
pub(crate) fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}

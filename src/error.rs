//! Error types for the ezbx deploy/route orchestrator.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error for every stage of a run: argument handling, profile loading,
/// prompting, planning and step execution.
#[derive(Debug, Error)]
pub enum EzbxError {
    #[error("ArgumentError: {0}")]
    Argument(String),

    #[error("{0}")]
    UserAbort(String),

    #[error("ConfigKeyError: no profile named '{0}' in the config file")]
    ConfigKey(String),

    #[error("Failed to load config file {path}: {message}")]
    ProfileLoad { path: PathBuf, message: String },

    #[error("Invalid profile '{profile}': {message}")]
    ProfileInvalid { profile: String, message: String },

    #[error("Missing value for {0}")]
    MissingParameter(&'static str),

    #[error("Prompt failed: {0}")]
    Prompt(String),

    #[error("LaunchError: could not start {step} script {script}: {source}")]
    Launch {
        step: String,
        script: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("ShellError: {step} exited with code {} from signal {}", display_opt(.code), display_opt(.signal))]
    Shell {
        step: String,
        code: Option<i32>,
        signal: Option<i32>,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

fn display_opt(value: &Option<i32>) -> String {
    value.map_or_else(|| "null".to_string(), |v| v.to_string())
}

impl From<config::ConfigError> for EzbxError {
    fn from(err: config::ConfigError) -> Self {
        EzbxError::ConfigError(err.to_string())
    }
}

impl EzbxError {
    pub fn user_abort() -> Self {
        EzbxError::UserAbort("Bailing out...".to_string())
    }

    /// Operator-initiated stops are reported, not treated as crashes.
    pub fn is_user_abort(&self) -> bool {
        matches!(self, EzbxError::UserAbort(_))
    }

    /// Process exit status the binary should terminate with for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            EzbxError::UserAbort(_) => 0,
            EzbxError::Shell {
                code: Some(code), ..
            } if *code != 0 => *code,
            _ => 1,
        }
    }
}

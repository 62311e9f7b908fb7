//! Error types for Stagehand
//!
//! Uses `thiserror` for library errors; the binary wraps them in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Stagehand operations
pub type StagehandResult<T> = Result<T, StagehandError>;

/// Main error type for Stagehand operations
///
/// Every variant is fatal for the running workflow: nothing is retried and
/// remote changes applied before the failure are left in place.
#[derive(Error, Debug)]
pub enum StagehandError {
    /// Settings file missing, unreadable or malformed
    #[error("invalid configuration in {file}: {message}")]
    Config { file: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Stage name is not a key of the configured stage map
    #[error("stage name \"{name}\" is not a valid stage ({})", valid.join(","))]
    UnknownStage { name: String, valid: Vec<String> },

    /// One or more required settings are empty
    #[error("missing values in settings: {}", keys.join(", "))]
    IncompleteConfig { keys: Vec<String> },

    /// A remote operation was attempted before a stage was chosen
    #[error("no stage selected (run `development` or `stable` first)")]
    NoStageSelected,

    /// Command exited with a non-zero status
    #[error("command failed with exit code {code}: {command}")]
    RemoteCommandFailure {
        command: String,
        code: i32,
        stderr: String,
    },

    /// The command could not be started at all (ssh missing, broken pipe, ...)
    #[error("could not execute `{command}`: {source}")]
    Transport {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Local test suite failed under every settings profile
    #[error("tests failed. Use `deploy --tests no` to omit tests.")]
    TestFailure,

    /// A step decided to stop the workflow
    #[error("{0}")]
    Aborted(String),

    /// Ctrl-C was pressed; the running command was allowed to finish
    #[error("interrupted by user")]
    Interrupted,
}

impl StagehandError {
    /// Create a configuration error for `file`
    pub fn config(file: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Config {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Stderr captured from the failing command, when there is one
    pub fn remote_stderr(&self) -> Option<&str> {
        match self {
            Self::RemoteCommandFailure { stderr, .. } if !stderr.trim().is_empty() => {
                Some(stderr.trim())
            }
            _ => None,
        }
    }
}

//! Shell port - abstraction over command execution
//!
//! The session composes complete command lines; a shell only runs them.
//! Implementations:
//! - `SshShell` - runs on the target host through the system `ssh` binary
//! - `ProcessShell` - runs on the operator's machine
//! - `DryRunShell` - records commands without running them

use std::path::PathBuf;

use crate::domain::entities::CommandOutput;

/// A fully composed command line plus how to feed it
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShellRequest {
    /// Complete line handed to the shell
    pub line: String,
    /// Data written to the command's stdin (prompt answers, secrets)
    pub stdin: Option<String>,
    /// Working directory for local execution; remote shells ignore it
    pub cwd: Option<PathBuf>,
}

impl ShellRequest {
    pub fn new(line: impl Into<String>) -> Self {
        Self {
            line: line.into(),
            stdin: None,
            cwd: None,
        }
    }

    pub fn with_stdin(mut self, stdin: Option<String>) -> Self {
        self.stdin = stdin;
        self
    }

    pub fn with_cwd(mut self, cwd: Option<PathBuf>) -> Self {
        self.cwd = cwd;
        self
    }
}

/// Executes command lines somewhere
///
/// An `Err` means the command could not be run at all. A command that ran
/// and exited non-zero is an `Ok` with a failing [`CommandOutput`].
pub trait Shell: Send + Sync {
    /// Short label for progress output (`user@host`, `localhost`)
    fn target(&self) -> &str;

    fn execute(&self, request: &ShellRequest) -> std::io::Result<CommandOutput>;
}

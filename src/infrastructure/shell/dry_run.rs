//! Dry-run Shell
//!
//! Records every request instead of running it. Clones share one log, so a
//! caller can hand a clone to the session and
//! keep the first handle for assertions.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::domain::entities::CommandOutput;
use crate::domain::ports::{Shell, ShellRequest};

/// A request seen by a [`DryRunShell`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCommand {
    pub target: String,
    pub line: String,
    pub stdin: Option<String>,
    pub cwd: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct DryRunShell {
    target: String,
    fail_on: Vec<String>,
    log: Arc<Mutex<Vec<RecordedCommand>>>,
}

impl DryRunShell {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            fail_on: Vec::new(),
            log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Stand-in for the operator's machine
    pub fn local() -> Self {
        Self::new("localhost")
    }

    /// Exit with code 1 for any line containing `pattern`
    pub fn fail_on(mut self, pattern: impl Into<String>) -> Self {
        self.fail_on.push(pattern.into());
        self
    }

    pub fn commands(&self) -> Vec<RecordedCommand> {
        self.log
            .lock()
            .map(|log| log.clone())
            .unwrap_or_default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.commands().into_iter().map(|c| c.line).collect()
    }
}

impl Shell for DryRunShell {
    fn target(&self) -> &str {
        &self.target
    }

    fn execute(&self, request: &ShellRequest) -> std::io::Result<CommandOutput> {
        if let Ok(mut log) = self.log.lock() {
            log.push(RecordedCommand {
                target: self.target.clone(),
                line: request.line.clone(),
                stdin: request.stdin.clone(),
                cwd: request.cwd.clone(),
            });
        }

        if let Some(pattern) = self.fail_on.iter().find(|p| request.line.contains(p.as_str())) {
            return Ok(CommandOutput::failure(
                1,
                format!("dry run: simulated failure ({})", pattern),
            ));
        }
        Ok(CommandOutput::default())
    }
}

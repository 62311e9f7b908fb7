//! Remote Session
//!
//! Runs commands as the connecting user or through sudo, inside the
//! currently active scopes. Every `with_*` helper restores the previous
//! scope when its body returns, whether it succeeded or failed, so scopes
//! nest freely.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::entities::CommandOutput;
use crate::domain::ports::{Shell, ShellRequest, WorkflowEvent, WorkflowEventSink};
use crate::domain::value_objects::{join_remote_path, OutputStream, ShellCommand, StreamSet};
use crate::error::{StagehandError, StagehandResult};

/// Execution context that scopes push and pop
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Scope {
    cwd: Option<String>,
    venv: Option<String>,
    local_cwd: Option<PathBuf>,
    hidden: StreamSet,
    warn_only: bool,
}

#[derive(Debug, Clone, Copy)]
enum Privilege<'u> {
    User,
    Sudo { as_user: Option<&'u str> },
}

pub struct Session {
    remote: Box<dyn Shell>,
    local: Box<dyn Shell>,
    events: Arc<dyn WorkflowEventSink>,
    prompt_responses: Option<String>,
    show_hidden: bool,
    scope: Scope,
}

impl Session {
    pub fn new(
        remote: Box<dyn Shell>,
        local: Box<dyn Shell>,
        events: Arc<dyn WorkflowEventSink>,
    ) -> Self {
        Self {
            remote,
            local,
            events,
            prompt_responses: None,
            show_hidden: false,
            scope: Scope::default(),
        }
    }

    /// Canned answers fed to interactive prompts, one per line
    pub fn with_prompt_responses<I, S>(mut self, responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut joined = String::new();
        for response in responses {
            joined.push_str(response.as_ref());
            joined.push('\n');
        }
        self.prompt_responses = (!joined.is_empty()).then_some(joined);
        self
    }

    /// Echo streams even inside output-suppressing scopes (`-v`)
    pub fn with_show_hidden(mut self, show_hidden: bool) -> Self {
        self.show_hidden = show_hidden;
        self
    }

    pub fn remote_target(&self) -> &str {
        self.remote.target()
    }

    pub fn working_directory(&self) -> Option<&str> {
        self.scope.cwd.as_deref()
    }

    pub fn virtual_environment(&self) -> Option<&str> {
        self.scope.venv.as_deref()
    }

    pub fn local_directory(&self) -> Option<&Path> {
        self.scope.local_cwd.as_deref()
    }

    pub fn hidden_streams(&self) -> StreamSet {
        self.scope.hidden
    }

    pub fn is_warn_only(&self) -> bool {
        self.scope.warn_only
    }

    /// Run as the connecting user
    pub fn run(&self, command: &ShellCommand) -> StagehandResult<CommandOutput> {
        self.run_remote(command, Privilege::User, None)
    }

    /// Run through sudo, optionally as another account
    pub fn run_privileged(
        &self,
        command: &ShellCommand,
        as_user: Option<&str>,
    ) -> StagehandResult<CommandOutput> {
        self.run_remote(command, Privilege::Sudo { as_user }, None)
    }

    /// Write `content`, passed on stdin, to a file only root can read
    ///
    /// The umask applies when `tee` creates the file; an existing file keeps
    /// its mode.
    pub fn put_secret(&self, path: &str, content: &str) -> StagehandResult<CommandOutput> {
        let command = ShellCommand::new("umask").literal("077").chain(
            "&&",
            ShellCommand::new("tee").arg(path).literal(">").literal("/dev/null"),
        );
        self.run_remote(
            &command,
            Privilege::Sudo { as_user: None },
            Some(content.to_string()),
        )
    }

    /// Run on the operator's machine
    pub fn run_local(&self, command: &ShellCommand) -> StagehandResult<CommandOutput> {
        let request =
            ShellRequest::new(command.render()).with_cwd(self.scope.local_cwd.clone());
        self.dispatch(self.local.as_ref(), command.render(), request, false)
    }

    /// Commands in `body` run inside `path`; relative paths nest
    pub fn with_working_directory<T>(
        &mut self,
        path: &str,
        body: impl FnOnce(&mut Self) -> StagehandResult<T>,
    ) -> StagehandResult<T> {
        let cwd = match &self.scope.cwd {
            Some(current) => join_remote_path(current, path),
            None => path.to_string(),
        };
        self.scoped(|scope| scope.cwd = Some(cwd), body)
    }

    /// Commands in `body` run with the virtual environment at `path` activated
    pub fn with_virtual_environment<T>(
        &mut self,
        path: &str,
        body: impl FnOnce(&mut Self) -> StagehandResult<T>,
    ) -> StagehandResult<T> {
        let venv = path.to_string();
        self.scoped(|scope| scope.venv = Some(venv), body)
    }

    /// Local commands in `body` run inside `path`
    pub fn with_local_directory<T>(
        &mut self,
        path: impl Into<PathBuf>,
        body: impl FnOnce(&mut Self) -> StagehandResult<T>,
    ) -> StagehandResult<T> {
        let path = path.into();
        let local_cwd = match &self.scope.local_cwd {
            Some(current) => current.join(path),
            None => path,
        };
        self.scoped(|scope| scope.local_cwd = Some(local_cwd), body)
    }

    /// Hide `streams` while `body` runs
    pub fn with_output_suppressed<T>(
        &mut self,
        streams: StreamSet,
        body: impl FnOnce(&mut Self) -> StagehandResult<T>,
    ) -> StagehandResult<T> {
        self.scoped(|scope| scope.hidden = scope.hidden.union(streams), body)
    }

    /// Failing commands in `body` return their output instead of aborting
    pub fn with_warnings_only<T>(
        &mut self,
        body: impl FnOnce(&mut Self) -> StagehandResult<T>,
    ) -> StagehandResult<T> {
        self.scoped(|scope| scope.warn_only = true, body)
    }

    fn scoped<T>(
        &mut self,
        enter: impl FnOnce(&mut Scope),
        body: impl FnOnce(&mut Self) -> StagehandResult<T>,
    ) -> StagehandResult<T> {
        let saved = self.scope.clone();
        enter(&mut self.scope);
        let result = body(self);
        self.scope = saved;
        result
    }

    fn run_remote(
        &self,
        command: &ShellCommand,
        privilege: Privilege<'_>,
        stdin: Option<String>,
    ) -> StagehandResult<CommandOutput> {
        let line = self.compose(command);
        let request = ShellRequest::new(wrap(&line, privilege))
            .with_stdin(stdin.or_else(|| self.prompt_responses.clone()));
        let privileged = matches!(privilege, Privilege::Sudo { .. });
        self.dispatch(self.remote.as_ref(), line, request, privileged)
    }

    /// Prefix `command` with the active directory and virtual environment
    fn compose(&self, command: &ShellCommand) -> String {
        let mut parts = Vec::new();
        if let Some(cwd) = &self.scope.cwd {
            parts.push(ShellCommand::new("cd").arg(cwd).render());
        }
        if let Some(venv) = &self.scope.venv {
            parts.push(
                ShellCommand::new("source")
                    .arg(join_remote_path(venv, "bin/activate"))
                    .render(),
            );
        }
        parts.push(command.render());
        parts.join(" && ")
    }

    fn dispatch(
        &self,
        shell: &dyn Shell,
        display: String,
        request: ShellRequest,
        privileged: bool,
    ) -> StagehandResult<CommandOutput> {
        let target = shell.target().to_string();

        if self.shows(OutputStream::Running) {
            self.events.on_event(WorkflowEvent::CommandIssued {
                target: target.clone(),
                privileged,
                command: display.clone(),
            });
        }

        let output = shell
            .execute(&request)
            .map_err(|source| StagehandError::Transport {
                command: display.clone(),
                source,
            })?;

        for (stream, text) in [
            (OutputStream::Stdout, &output.stdout),
            (OutputStream::Stderr, &output.stderr),
        ] {
            if !text.trim().is_empty() && self.shows(stream) {
                self.events.on_event(WorkflowEvent::CommandOutput {
                    target: target.clone(),
                    stream,
                    text: text.trim_end().to_string(),
                });
            }
        }

        if output.succeeded() {
            return Ok(output);
        }

        if self.scope.warn_only {
            if self.shows(OutputStream::Warnings) {
                self.events.on_event(WorkflowEvent::Warning {
                    message: format!(
                        "command exited with code {} on {}: {}",
                        output.code, target, display
                    ),
                });
            }
            return Ok(output);
        }

        Err(StagehandError::RemoteCommandFailure {
            command: display,
            code: output.code,
            stderr: output.stderr,
        })
    }

    fn shows(&self, stream: OutputStream) -> bool {
        self.show_hidden || !self.scope.hidden.contains(stream)
    }
}

/// Run `line` in a login shell, through sudo when privileged
fn wrap(line: &str, privilege: Privilege<'_>) -> String {
    let shell = ShellCommand::new("/bin/bash")
        .literal("-l")
        .literal("-c")
        .arg(line);
    match privilege {
        Privilege::User => shell.render(),
        Privilege::Sudo { as_user } => {
            let mut sudo = ShellCommand::new("sudo").literal("-n").literal("-H");
            if let Some(user) = as_user {
                sudo = sudo.literal("-u").arg(user);
            }
            format!("{} {}", sudo.render(), shell.render())
        }
    }
}

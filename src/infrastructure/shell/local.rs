//! Local Shell Implementation
//!
//! Runs commands on the operator's machine through `sh -c`.

use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};

use crate::domain::entities::CommandOutput;
use crate::domain::ports::{Shell, ShellRequest};

use super::isolate_from_terminal_signals;

#[derive(Debug, Default)]
pub struct ProcessShell;

impl ProcessShell {
    pub fn new() -> Self {
        Self
    }
}

impl Shell for ProcessShell {
    fn target(&self) -> &str {
        "localhost"
    }

    fn execute(&self, request: &ShellRequest) -> std::io::Result<CommandOutput> {
        let mut command = Command::new("sh");
        command
            .arg("-c")
            .arg(&request.line)
            .stdin(if request.stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(cwd) = &request.cwd {
            command.current_dir(cwd);
        }
        isolate_from_terminal_signals(&mut command);

        let mut child = command.spawn()?;
        if let Some(input) = &request.stdin {
            if let Some(mut stdin) = child.stdin.take() {
                // Commands that never read stdin may exit first
                match stdin.write_all(input.as_bytes()) {
                    Err(err) if err.kind() != ErrorKind::BrokenPipe => return Err(err),
                    _ => {}
                }
            }
        }

        let output = child.wait_with_output()?;
        Ok(CommandOutput {
            code: output.status.code().unwrap_or(255),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

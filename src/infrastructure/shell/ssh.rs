//! SSH Shell Implementation
//!
//! Implements the Shell port for the target host via the system `ssh`
//! binary, so agent forwarding and `~/.ssh/config` behave as they do for the
//! operator.

use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};

use crate::domain::entities::{ActiveEnvironment, CommandOutput};
use crate::domain::ports::{Shell, ShellRequest};

use super::isolate_from_terminal_signals;

/// Runs commands on one host over SSH
pub struct SshShell {
    /// SSH destination (user@host)
    destination: String,
    port: Option<u16>,
    identity_file: Option<String>,
}

impl SshShell {
    pub fn new(destination: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            port: None,
            identity_file: None,
        }
    }

    /// Connection settings of the Active Environment
    pub fn for_environment(environment: &ActiveEnvironment) -> Self {
        let settings = environment.settings();
        Self {
            destination: environment.destination(),
            port: settings.port,
            identity_file: settings.identity_file.clone(),
        }
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// Arguments passed to `ssh` before the remote command
    fn ssh_args(&self) -> Vec<String> {
        // Never hang on a password or host-key prompt
        let mut args = vec!["-o".to_string(), "BatchMode=yes".to_string()];
        if let Some(port) = self.port {
            args.push("-p".to_string());
            args.push(port.to_string());
        }
        if let Some(identity) = &self.identity_file {
            args.push("-i".to_string());
            args.push(
                crate::config::expand_home(std::path::Path::new(identity))
                    .to_string_lossy()
                    .into_owned(),
            );
        }
        args.push(self.destination.clone());
        args
    }
}

impl Shell for SshShell {
    fn target(&self) -> &str {
        &self.destination
    }

    fn execute(&self, request: &ShellRequest) -> std::io::Result<CommandOutput> {
        let mut command = Command::new("ssh");
        let mut child = isolate_from_terminal_signals(&mut command)
            .args(self.ssh_args())
            .arg(&request.line)
            .stdin(if request.stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

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
            // Killed by a signal: report like a shell would
            code: output.status.code().unwrap_or(255),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

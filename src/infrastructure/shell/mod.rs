//! Shell implementations

mod dry_run;
mod local;
mod ssh;

use std::process::Command;

pub use dry_run::{DryRunShell, RecordedCommand};
pub use local::ProcessShell;
pub use ssh::SshShell;

/// Start the child in its own process group so a terminal Ctrl-C reaches
/// only stagehand and the running command can finish
fn isolate_from_terminal_signals(command: &mut Command) -> &mut Command {
    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        command.process_group(0);
    }
    command
}

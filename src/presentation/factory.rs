//! Session Factory
//!
//! Creates sessions and event sinks with infrastructure dependencies wired up.
//! This is the dependency injection point for the application.

use std::sync::Arc;

use crate::application::Session;
use crate::config::ProjectSettings;
use crate::domain::entities::ActiveEnvironment;
use crate::domain::ports::{Shell, WorkflowEventSink};
use crate::infrastructure::{ConsoleEventSink, DryRunShell, JsonEventSink, ProcessShell, SshShell};
use crate::ui::UiContext;

/// How a session reaches its hosts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    /// SSH to the stage host, local processes for tests
    Live,
    /// Record commands without running anything
    DryRun,
}

/// Create the event sink matching the requested output format
pub fn create_event_sink(ui: &UiContext) -> Arc<dyn WorkflowEventSink> {
    if ui.json {
        Arc::new(JsonEventSink::stdout())
    } else {
        Arc::new(ConsoleEventSink::stdout(ui.palette()))
    }
}

/// Create a session for the Active Environment
///
/// A dry run shows every command, including those a workflow would hide.
pub fn create_session(
    environment: &ActiveEnvironment,
    project: &ProjectSettings,
    transport: Transport,
    events: Arc<dyn WorkflowEventSink>,
    show_hidden: bool,
) -> Session {
    let (remote, local): (Box<dyn Shell>, Box<dyn Shell>) = match transport {
        Transport::Live => (
            Box::new(SshShell::for_environment(environment)),
            Box::new(ProcessShell::new()),
        ),
        Transport::DryRun => (
            Box::new(DryRunShell::new(environment.destination())),
            Box::new(DryRunShell::local()),
        ),
    };

    Session::new(remote, local, events)
        .with_prompt_responses(project.prompt_answers())
        .with_show_hidden(show_hidden || transport == Transport::DryRun)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StageSettings;
    use crate::domain::ports::NoopEventSink;

    #[test]
    fn session_targets_stage_destination() {
        let env = ActiveEnvironment::new(
            "development",
            StageSettings {
                user: "dev".to_string(),
                host: "10.0.0.5".to_string(),
                ..StageSettings::default()
            },
        );
        let project = ProjectSettings::default();

        for transport in [Transport::Live, Transport::DryRun] {
            let session = create_session(&env, &project, transport, Arc::new(NoopEventSink), false);
            assert_eq!(session.remote_target(), "dev@10.0.0.5");
        }
    }
}

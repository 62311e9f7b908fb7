//! Workflows
//!
//! Fixed step sequences run against the Active Environment. The first
//! failing step aborts the workflow; there is no rollback.

use std::fmt;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Instant;

use crate::config::expand_home;
use crate::domain::ports::{WorkflowEvent, WorkflowEventSink};
use crate::domain::value_objects::{StepId, StreamSet};
use crate::error::StagehandResult;

use super::runner::{StepContext, StepRunner};
use super::session::Session;
use super::steps::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Workflow {
    Install,
    Deploy { run_tests: bool },
    Start,
    Stop,
    Restart,
    Upgrade,
    Teardown,
}

impl Workflow {
    pub fn name(&self) -> &'static str {
        match self {
            Workflow::Install => "install",
            Workflow::Deploy { .. } => "deploy",
            Workflow::Start => "start",
            Workflow::Stop => "stop",
            Workflow::Restart => "restart",
            Workflow::Upgrade => "upgrade",
            Workflow::Teardown => "teardown",
        }
    }
}

impl fmt::Display for Workflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub struct Orchestrator<'a> {
    context: StepContext<'a>,
    runner: StepRunner,
    events: Arc<dyn WorkflowEventSink>,
}

impl<'a> Orchestrator<'a> {
    pub fn new(context: StepContext<'a>, events: Arc<dyn WorkflowEventSink>) -> Self {
        Self {
            context,
            runner: StepRunner::new(events.clone()),
            events,
        }
    }

    pub fn with_interrupt_flag(mut self, interrupted: Arc<AtomicBool>) -> Self {
        self.runner = self.runner.with_interrupt_flag(interrupted);
        self
    }

    /// Steps completed so far
    pub fn completed(&self) -> &[StepId] {
        self.runner.completed()
    }

    pub fn run(&mut self, workflow: Workflow, session: &mut Session) -> StagehandResult<()> {
        let environment = self.context.environment;
        self.events.on_event(WorkflowEvent::Started {
            workflow: workflow.name().to_string(),
            stage: environment.stage().to_string(),
            destination: environment.destination(),
        });
        let start = Instant::now();

        let context = self.context;
        let runner = &mut self.runner;
        let result = match workflow {
            Workflow::Install => install(runner, session, &context),
            Workflow::Deploy { run_tests } => deploy(runner, session, &context, run_tests),
            Workflow::Start => runner.run(&START_SERVICES, session, &context),
            Workflow::Stop => runner.run(&STOP_SERVICES, session, &context),
            Workflow::Restart => runner.run(&RESTART_SERVICES, session, &context),
            Workflow::Upgrade => runner.run(&UPGRADE_SYSTEM, session, &context),
            Workflow::Teardown => runner.run_all(
                &[REMOVE_KEY, REMOVE_VIRTUAL_ENVIRONMENT, REMOVE_SOFTWARE],
                session,
                &context,
            ),
        };

        match &result {
            Ok(()) => self.events.on_event(WorkflowEvent::Completed {
                workflow: workflow.name().to_string(),
                elapsed: start.elapsed(),
            }),
            Err(err) => self.events.on_event(WorkflowEvent::Aborted {
                workflow: workflow.name().to_string(),
                error: err.to_string(),
            }),
        }
        result
    }
}

fn install(runner: &mut StepRunner, session: &mut Session, context: &StepContext<'_>) -> StagehandResult<()> {
    let stage = context.environment.settings();

    runner.run(&INSTALL_SOFTWARE, session, context)?;
    session.with_output_suppressed(StreamSet::ALL, |session| {
        runner.run(&CLONE_REPOSITORY, session, context)?;
        runner.run(&CREATE_VIRTUAL_ENVIRONMENT, session, context)?;
        session.with_virtual_environment(&stage.venv_directory, |session| {
            session.with_working_directory(&stage.code_src_directory, |session| {
                runner.run_all(
                    &[
                        INSTALL_REQUIREMENTS,
                        CREATE_KEY,
                        CREATE_DATABASE,
                        DEPLOY_PROCESS_MANAGER,
                        MAKE_MIGRATIONS,
                        MIGRATE_MODELS,
                        COLLECT_STATIC_ASSETS,
                    ],
                    session,
                    context,
                )
            })?;
            runner.run_all(
                &[DEPLOY_INTRUSION_PREVENTION, DEPLOY_WEB_SERVER, DEPLOY_FIREWALL],
                session,
                context,
            )
        })?;
        runner.run(&RESTART_SERVICES, session, context)
    })
}

fn deploy(
    runner: &mut StepRunner,
    session: &mut Session,
    context: &StepContext<'_>,
    run_tests: bool,
) -> StagehandResult<()> {
    let stage = context.environment.settings();
    let local_code = expand_home(Path::new(&context.project.local.code_src_directory));

    session.with_output_suppressed(StreamSet::ALL, |session| {
        if run_tests {
            session.with_local_directory(local_code, |session| {
                runner.run(&RUN_TESTS_LOCALLY, session, context)
            })?;
        }
        session.with_working_directory(&stage.code_src_directory, |session| {
            runner.run(&PULL_REPOSITORY, session, context)
        })?;
        session.with_virtual_environment(&stage.venv_directory, |session| {
            session.with_working_directory(&stage.code_src_directory, |session| {
                runner.run_all(
                    &[COLLECT_STATIC_ASSETS, INSTALL_REQUIREMENTS, MIGRATE_MODELS],
                    session,
                    context,
                )
            })
        })?;
        runner.run(&RESTART_APPLICATION, session, context)
    })
}

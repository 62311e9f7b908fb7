//! Step execution
//!
//! Wraps every step with progress events and elapsed-time measurement, and
//! stops before the next step once an interrupt has been requested.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::config::{DatabaseSettings, ProjectSettings};
use crate::domain::entities::ActiveEnvironment;
use crate::domain::ports::{WorkflowEvent, WorkflowEventSink};
use crate::domain::value_objects::StepId;
use crate::error::{StagehandError, StagehandResult};

use super::session::Session;

/// Read-only inputs every step can see
#[derive(Debug, Clone, Copy)]
pub struct StepContext<'a> {
    pub project: &'a ProjectSettings,
    pub database: &'a DatabaseSettings,
    pub environment: &'a ActiveEnvironment,
}

pub type StepAction = fn(&mut Session, &StepContext<'_>) -> StagehandResult<()>;

/// A named provisioning action
#[derive(Clone, Copy)]
pub struct Step {
    pub id: StepId,
    /// Lower-case progress text, e.g. "installing software"
    pub description: &'static str,
    pub action: StepAction,
}

impl std::fmt::Debug for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Step")
            .field("id", &self.id)
            .field("description", &self.description)
            .finish()
    }
}

pub struct StepRunner {
    events: Arc<dyn WorkflowEventSink>,
    interrupted: Arc<AtomicBool>,
    completed: Vec<StepId>,
}

impl StepRunner {
    pub fn new(events: Arc<dyn WorkflowEventSink>) -> Self {
        Self {
            events,
            interrupted: Arc::new(AtomicBool::new(false)),
            completed: Vec::new(),
        }
    }

    /// Share a flag set by the Ctrl-C handler
    pub fn with_interrupt_flag(mut self, interrupted: Arc<AtomicBool>) -> Self {
        self.interrupted = interrupted;
        self
    }

    /// Steps that finished successfully, in order
    pub fn completed(&self) -> &[StepId] {
        &self.completed
    }

    pub fn run(
        &mut self,
        step: &Step,
        session: &mut Session,
        context: &StepContext<'_>,
    ) -> StagehandResult<()> {
        if self.interrupted.load(Ordering::SeqCst) {
            return Err(StagehandError::Interrupted);
        }

        self.events.on_event(WorkflowEvent::StepStarted {
            step: step.id,
            description: step.description.to_string(),
        });
        let start = Instant::now();

        (step.action)(session, context)?;

        self.events.on_event(WorkflowEvent::StepFinished {
            step: step.id,
            description: step.description.to_string(),
            elapsed: start.elapsed(),
        });
        self.completed.push(step.id);
        Ok(())
    }

    /// Run `steps` in order, stopping at the first failure
    pub fn run_all(
        &mut self,
        steps: &[Step],
        session: &mut Session,
        context: &StepContext<'_>,
    ) -> StagehandResult<()> {
        for step in steps {
            self.run(step, session, context)?;
        }
        Ok(())
    }
}

//! Workflow Event Port
//!
//! Provides an observable interface for workflow runs.
//! Drives the console progress lines and the `--json` event stream.

use std::time::Duration;

use crate::domain::value_objects::{OutputStream, StepId};

/// Event emitted while a workflow runs
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowEvent {
    /// Workflow started against a stage
    Started {
        workflow: String,
        stage: String,
        destination: String,
    },

    /// Step started
    StepStarted { step: StepId, description: String },

    /// Step finished successfully
    StepFinished {
        step: StepId,
        description: String,
        elapsed: Duration,
    },

    /// A command is about to run
    CommandIssued {
        target: String,
        privileged: bool,
        command: String,
    },

    /// Captured command output
    CommandOutput {
        target: String,
        stream: OutputStream,
        text: String,
    },

    /// A failure tolerated inside a warn-only scope
    Warning { message: String },

    /// Workflow completed
    Completed { workflow: String, elapsed: Duration },

    /// Workflow aborted by the first failure
    Aborted { workflow: String, error: String },
}

/// Trait for receiving workflow events
///
/// Implementations:
/// - ConsoleEventSink: timestamped progress lines in the terminal
/// - JsonEventSink: NDJSON event stream for CI
/// - NoopEventSink: silent operation
pub trait WorkflowEventSink: Send + Sync {
    /// Handle a workflow event
    fn on_event(&self, event: WorkflowEvent);
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl WorkflowEventSink for NoopEventSink {
    fn on_event(&self, _event: WorkflowEvent) {}
}

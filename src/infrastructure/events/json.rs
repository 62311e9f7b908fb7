//! JSON Event Sink
//!
//! Outputs workflow events as NDJSON for CI/automation consumption.

use crate::domain::ports::{WorkflowEvent, WorkflowEventSink};
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    /// Mutex to ensure thread-safe writes
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self {
            writer: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Create a JSON event sink writing to a custom writer (for testing)
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

impl WorkflowEventSink for JsonEventSink {
    fn on_event(&self, event: WorkflowEvent) {
        let json = match event {
            WorkflowEvent::Started {
                workflow,
                stage,
                destination,
            } => {
                serde_json::json!({
                    "event": "start",
                    "workflow": workflow,
                    "stage": stage,
                    "destination": destination,
                })
            }

            WorkflowEvent::StepStarted { step, description } => {
                serde_json::json!({
                    "event": "step_start",
                    "step": step.as_str(),
                    "description": description,
                })
            }

            WorkflowEvent::StepFinished {
                step,
                description,
                elapsed,
            } => {
                serde_json::json!({
                    "event": "step_finish",
                    "step": step.as_str(),
                    "description": description,
                    "elapsed_ms": elapsed.as_millis() as u64,
                })
            }

            WorkflowEvent::CommandIssued {
                target,
                privileged,
                command,
            } => {
                serde_json::json!({
                    "event": "command",
                    "target": target,
                    "privileged": privileged,
                    "command": command,
                })
            }

            WorkflowEvent::CommandOutput {
                target,
                stream,
                text,
            } => {
                serde_json::json!({
                    "event": "output",
                    "target": target,
                    "stream": stream.as_str(),
                    "text": text,
                })
            }

            WorkflowEvent::Warning { message } => {
                serde_json::json!({
                    "event": "warning",
                    "message": message,
                })
            }

            WorkflowEvent::Completed { workflow, elapsed } => {
                serde_json::json!({
                    "event": "complete",
                    "workflow": workflow,
                    "status": "success",
                    "elapsed_ms": elapsed.as_millis() as u64,
                })
            }

            WorkflowEvent::Aborted { workflow, error } => {
                serde_json::json!({
                    "event": "complete",
                    "workflow": workflow,
                    "status": "aborted",
                    "error": error,
                })
            }
        };

        self.write_event(json);
    }
}

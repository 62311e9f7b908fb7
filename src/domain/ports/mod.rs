//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod shell;
pub mod workflow_events;

pub use shell::{Shell, ShellRequest};
pub use workflow_events::{NoopEventSink, WorkflowEvent, WorkflowEventSink};

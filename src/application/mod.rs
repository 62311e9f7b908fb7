//! Application Layer
//!
//! Use cases that orchestrate the provisioning flow.
//! This layer:
//! - Depends on Domain layer (entities, value objects, ports)
//! - Talks to hosts only through the `Shell` port
//! - Reports progress only through the `WorkflowEventSink` port
//!
//! ## Components
//!
//! - `StageSelector` - Resolves a stage name into the Active Environment
//! - `Session` - Scoped command execution (cd, virtualenv, hide, warn-only)
//! - `StepRunner` - Progress events and interrupt checks around each step
//! - `steps` - The step library
//! - `Orchestrator` - Install, deploy and maintenance workflows

#[cfg(test)]
mod fixtures;
pub mod runner;
pub mod session;
pub mod stage_selector;
pub mod steps;
pub mod workflows;

pub use runner::{Step, StepAction, StepContext, StepRunner};
pub use session::Session;
pub use stage_selector::{resolve, StageSelector};
pub use workflows::{Orchestrator, Workflow};

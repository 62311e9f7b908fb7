//! Presentation Layer
//!
//! This layer handles:
//! - CLI argument parsing (via clap)
//! - Creating sessions with infrastructure dependencies
//! - Output formatting (text/JSON)
//!
//! ## Structure
//!
//! - `cli` - Stage and workflow subcommands plus global flags
//! - `commands` - Loads settings, selects the stage, runs the workflow
//! - `factory` - Creates sessions and event sinks (dependency injection)
//! - `output` - Text and NDJSON renderings

pub mod cli;
pub mod commands;
pub mod factory;
pub mod output;

pub use cli::{Cli, ColorWhen, StageCommand, WorkflowCommand, YesNo};
pub use commands::execute;

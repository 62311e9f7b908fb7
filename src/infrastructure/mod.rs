//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `shell/` - Shell implementations (SSH, local process, dry run)
//! - `events/` - Event sinks (console, NDJSON)

pub mod events;
pub mod shell;

// Re-export for convenience
pub use events::{ConsoleEventSink, JsonEventSink};
pub use shell::{DryRunShell, ProcessShell, SshShell};

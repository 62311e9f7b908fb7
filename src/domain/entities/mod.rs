//! Domain Entities

mod command_output;
mod environment;

pub use command_output::CommandOutput;
pub use environment::ActiveEnvironment;

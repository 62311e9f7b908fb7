//! Value Objects
//!
//! Immutable values with no identity: stages, step ids, shell commands,
//! secret keys and output stream selections.

mod output_stream;
mod secret_key;
mod shell_command;
mod stage;
mod step_id;

pub use output_stream::{OutputStream, StreamSet};
pub use secret_key::{SecretKey, SECRET_KEY_ALPHABET, SECRET_KEY_LENGTH};
pub use shell_command::{expand_remote_home, join_remote_path, shell_quote, ShellCommand};
pub use stage::Stage;
pub use step_id::StepId;

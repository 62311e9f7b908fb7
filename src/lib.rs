//! Stagehand - stage-based provisioning and deployment over SSH
//!
//! Stagehand provisions a Linux host for a Django project (system packages,
//! virtualenv, Postgres, nginx, gunicorn, fail2ban, iptables) and redeploys
//! it, against one of the stages named in `project_settings.json`.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;
pub mod ui;

// Re-exports for convenience
pub use application::{Orchestrator, Session, StageSelector, StepContext, Workflow};
pub use config::{DatabaseSettings, LoadedSettings, ProjectSettings, SettingsPaths, StageSettings};
pub use domain::entities::ActiveEnvironment;
pub use domain::value_objects::{SecretKey, ShellCommand, Stage, StepId};
pub use error::{StagehandError, StagehandResult};

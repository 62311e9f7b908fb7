//! Step Library
//!
//! Every provisioning action the workflows are assembled from. A step never
//! changes the session's scopes on its own; the workflow decides where it
//! runs.

mod project;
mod secrets;
mod services;
mod system;

use crate::domain::value_objects::{ShellCommand, StepId};
use crate::error::StagehandResult;

use super::runner::Step;
use super::session::Session;

pub use secrets::SECRET_KEY_PATH;

pub const UPGRADE_SYSTEM: Step = Step {
    id: StepId::UpgradeSystem,
    description: "upgrading system",
    action: system::upgrade_system,
};

pub const INSTALL_SOFTWARE: Step = Step {
    id: StepId::InstallSoftware,
    description: "installing software",
    action: system::install_software,
};

pub const REMOVE_SOFTWARE: Step = Step {
    id: StepId::RemoveSoftware,
    description: "removing software",
    action: system::remove_software,
};

pub const CREATE_VIRTUAL_ENVIRONMENT: Step = Step {
    id: StepId::CreateVirtualEnvironment,
    description: "creating virtual environment",
    action: system::create_virtual_environment,
};

pub const REMOVE_VIRTUAL_ENVIRONMENT: Step = Step {
    id: StepId::RemoveVirtualEnvironment,
    description: "removing virtual environment",
    action: system::remove_virtual_environment,
};

pub const INSTALL_REQUIREMENTS: Step = Step {
    id: StepId::InstallRequirements,
    description: "installing requirements",
    action: project::install_requirements,
};

pub const CREATE_KEY: Step = Step {
    id: StepId::CreateKey,
    description: "creating secret key",
    action: secrets::create_key,
};

pub const REMOVE_KEY: Step = Step {
    id: StepId::RemoveKey,
    description: "removing secret key",
    action: secrets::remove_key,
};

pub const CREATE_DATABASE: Step = Step {
    id: StepId::CreateDatabase,
    description: "creating database",
    action: secrets::create_database,
};

pub const DEPLOY_WEB_SERVER: Step = Step {
    id: StepId::DeployWebServer,
    description: "deploying nginx",
    action: services::deploy_web_server,
};

pub const DEPLOY_PROCESS_MANAGER: Step = Step {
    id: StepId::DeployProcessManager,
    description: "deploying gunicorn service",
    action: services::deploy_process_manager,
};

pub const DEPLOY_INTRUSION_PREVENTION: Step = Step {
    id: StepId::DeployIntrusionPrevention,
    description: "deploying fail2ban",
    action: services::deploy_intrusion_prevention,
};

pub const DEPLOY_FIREWALL: Step = Step {
    id: StepId::DeployFirewall,
    description: "deploying iptables",
    action: services::deploy_firewall,
};

pub const COLLECT_STATIC_ASSETS: Step = Step {
    id: StepId::CollectStaticAssets,
    description: "collecting static files",
    action: project::collect_static_assets,
};

pub const MAKE_MIGRATIONS: Step = Step {
    id: StepId::MakeMigrations,
    description: "making migrations",
    action: project::make_migrations,
};

pub const MIGRATE_MODELS: Step = Step {
    id: StepId::MigrateModels,
    description: "migrating models",
    action: project::migrate_models,
};

pub const CLONE_REPOSITORY: Step = Step {
    id: StepId::CloneRepository,
    description: "cloning git repository",
    action: project::clone_repository,
};

pub const PULL_REPOSITORY: Step = Step {
    id: StepId::PullRepository,
    description: "pulling git repository",
    action: project::pull_repository,
};

pub const RUN_TESTS_LOCALLY: Step = Step {
    id: StepId::RunTestsLocally,
    description: "running tests locally",
    action: project::run_tests_locally,
};

pub const RESTART_APPLICATION: Step = Step {
    id: StepId::RestartApplication,
    description: "restarting application",
    action: project::restart_application,
};

pub const START_SERVICES: Step = Step {
    id: StepId::StartServices,
    description: "starting services",
    action: services::start_services,
};

pub const STOP_SERVICES: Step = Step {
    id: StepId::StopServices,
    description: "stopping services",
    action: services::stop_services,
};

pub const RESTART_SERVICES: Step = Step {
    id: StepId::RestartServices,
    description: "restarting services",
    action: services::restart_services,
};

/// Append `line` to a remote file unless an identical line is already there
fn append_line(session: &Session, file: &str, line: &str) -> StagehandResult<()> {
    let command = ShellCommand::new("grep")
        .literal("-qxF")
        .literal("--")
        .arg(line)
        .arg(file)
        .chain(
            "||",
            ShellCommand::new("echo").arg(line).literal(">>").arg(file),
        );
    session.run(&command)?;
    Ok(())
}

/// `sudo systemctl <verb> <unit>`
fn systemctl(session: &Session, verb: &str, unit: &str) -> StagehandResult<()> {
    session.run_privileged(&ShellCommand::new("systemctl").arg(verb).arg(unit), None)?;
    Ok(())
}

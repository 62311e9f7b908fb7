//! Identifiers of the provisioning steps

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepId {
    UpgradeSystem,
    InstallSoftware,
    RemoveSoftware,
    CreateVirtualEnvironment,
    RemoveVirtualEnvironment,
    InstallRequirements,
    CreateKey,
    RemoveKey,
    CreateDatabase,
    DeployWebServer,
    DeployProcessManager,
    DeployIntrusionPrevention,
    DeployFirewall,
    CollectStaticAssets,
    MakeMigrations,
    MigrateModels,
    CloneRepository,
    PullRepository,
    RunTestsLocally,
    RestartApplication,
    StartServices,
    StopServices,
    RestartServices,
}

impl StepId {
    pub fn as_str(self) -> &'static str {
        match self {
            StepId::UpgradeSystem => "upgrade_system",
            StepId::InstallSoftware => "install_software",
            StepId::RemoveSoftware => "remove_software",
            StepId::CreateVirtualEnvironment => "create_virtual_environment",
            StepId::RemoveVirtualEnvironment => "remove_virtual_environment",
            StepId::InstallRequirements => "install_requirements",
            StepId::CreateKey => "create_key",
            StepId::RemoveKey => "remove_key",
            StepId::CreateDatabase => "create_database",
            StepId::DeployWebServer => "deploy_web_server",
            StepId::DeployProcessManager => "deploy_process_manager",
            StepId::DeployIntrusionPrevention => "deploy_intrusion_prevention",
            StepId::DeployFirewall => "deploy_firewall",
            StepId::CollectStaticAssets => "collect_static_assets",
            StepId::MakeMigrations => "make_migrations",
            StepId::MigrateModels => "migrate_models",
            StepId::CloneRepository => "clone_repository",
            StepId::PullRepository => "pull_repository",
            StepId::RunTestsLocally => "run_tests_locally",
            StepId::RestartApplication => "restart_application",
            StepId::StartServices => "start_services",
            StepId::StopServices => "stop_services",
            StepId::RestartServices => "restart_services",
        }
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

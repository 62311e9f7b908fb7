//! Shared settings and sessions for application-layer tests

use std::sync::Arc;

use crate::config::{
    services, DatabaseCredentials, DatabaseSettings, LocalSettings, ProjectSettings,
    ServiceConfig, StageSettings,
};
use crate::domain::entities::ActiveEnvironment;
use crate::domain::ports::NoopEventSink;
use crate::infrastructure::shell::DryRunShell;

use super::session::Session;
use super::stage_selector::resolve;

pub fn project() -> ProjectSettings {
    let mut project = ProjectSettings {
        project_name: "shop".to_string(),
        git_repository: "https://example.com/acme/shop.git".to_string(),
        local: LocalSettings {
            venv_python_executable: "/home/op/.virtualenvs/shop/bin/python".to_string(),
            code_src_directory: "/src/shop".to_string(),
            ..LocalSettings::default()
        },
        ..ProjectSettings::default()
    };
    project.stages.insert(
        "development".to_string(),
        StageSettings {
            user: "dev".to_string(),
            host: "10.0.0.5".to_string(),
            venv_directory: "/home/dev/.virtualenvs/shop".to_string(),
            code_src_directory: "/home/dev/shop".to_string(),
            requirements_file: "requirements/production.txt".to_string(),
            vcs_branch: "develop".to_string(),
            restart_command: "sudo systemctl restart gunicorn".to_string(),
            ..StageSettings::default()
        },
    );
    let dirs = [
        (services::WEB_SERVER, "/etc/nginx", "deploy/nginx/shop"),
        (services::PROCESS_MANAGER, "/etc/systemd/system", "deploy/gunicorn.service"),
        (services::INTRUSION_PREVENTION, "/etc/fail2ban", "deploy/jail.local"),
    ];
    for (name, config_directory, config_src) in dirs {
        project.configs.insert(
            name.to_string(),
            ServiceConfig {
                config_directory: config_directory.to_string(),
                config_src: config_src.to_string(),
            },
        );
    }
    project
}

pub fn database() -> DatabaseSettings {
    DatabaseSettings {
        database: DatabaseCredentials {
            name: "shop".to_string(),
            user: "shop".to_string(),
            password: "hunter2".to_string(),
        },
    }
}

pub fn loaded() -> (ProjectSettings, DatabaseSettings, ActiveEnvironment) {
    let project = project();
    let env = resolve(&project, "development").unwrap();
    (project, database(), env)
}

pub fn session(remote: &DryRunShell) -> Session {
    session_with(remote, &DryRunShell::local())
}

pub fn session_with(remote: &DryRunShell, local: &DryRunShell) -> Session {
    Session::new(
        Box::new(remote.clone()),
        Box::new(local.clone()),
        Arc::new(NoopEventSink),
    )
}

//! System packages and virtual environments

use crate::application::runner::StepContext;
use crate::application::session::Session;
use crate::domain::value_objects::{join_remote_path, ShellCommand};
use crate::error::StagehandResult;

use super::append_line;

const BASE_PACKAGES: &[&str] = &[
    "git",
    "iptables-persistent",
    "nginx",
    "libpq-dev",
    "postgresql",
    "postgresql-contrib",
    "fail2ban",
    "sendmail",
];

const PURGED_PACKAGES: &[&str] = &[
    "git",
    "nginx",
    "python-dev",
    "python-pip",
    "libpq-dev",
    "postgresql",
    "postgresql-contrib",
    "fail2ban",
    "sendmail",
    "iptables-persistent",
];

const VIRTUALENVWRAPPER_SCRIPT: &str = "/usr/local/bin/virtualenvwrapper.sh";

fn apt_get(action: &str) -> ShellCommand {
    ShellCommand::new("apt-get").arg(action).literal("-y")
}

fn profile_path(context: &StepContext<'_>) -> String {
    join_remote_path(&context.environment.home_directory(), ".bash_profile")
}

pub(super) fn upgrade_system(session: &mut Session, _context: &StepContext<'_>) -> StagehandResult<()> {
    session.run_privileged(&apt_get("update"), None)?;
    session.run_privileged(&apt_get("upgrade"), None)?;
    Ok(())
}

pub(super) fn install_software(session: &mut Session, context: &StepContext<'_>) -> StagehandResult<()> {
    session.run_privileged(&apt_get("install").arg("python-pip"), None)?;
    session.run(&ShellCommand::new("pip").arg("install").literal("--upgrade").arg("pip"))?;
    session.run_privileged(
        &ShellCommand::new("pip").arg("install").literal("-U").arg("virtualenvwrapper"),
        None,
    )?;
    session.run_privileged(&apt_get("install").args(BASE_PACKAGES), None)?;

    let profile = profile_path(context);
    let workon_home = join_remote_path(&context.environment.home_directory(), ".virtualenvs");
    append_line(session, &profile, &format!("export WORKON_HOME={}", workon_home))?;
    append_line(session, &profile, &format!("source {}", VIRTUALENVWRAPPER_SCRIPT))?;
    Ok(())
}

pub(super) fn remove_software(session: &mut Session, context: &StepContext<'_>) -> StagehandResult<()> {
    session.run(&ShellCommand::new("rm").literal("-rf").arg(profile_path(context)))?;
    session.run_privileged(
        &ShellCommand::new("pip").arg("uninstall").literal("-y").arg("virtualenvwrapper"),
        None,
    )?;
    session.run_privileged(&apt_get("purge").args(PURGED_PACKAGES), None)?;
    session.run_privileged(&apt_get("autoremove"), None)?;
    Ok(())
}

pub(super) fn create_virtual_environment(
    session: &mut Session,
    context: &StepContext<'_>,
) -> StagehandResult<()> {
    session.run(&ShellCommand::new("mkvirtualenv").arg(&context.project.project_name))?;
    Ok(())
}

pub(super) fn remove_virtual_environment(
    session: &mut Session,
    context: &StepContext<'_>,
) -> StagehandResult<()> {
    session.run(&ShellCommand::new("rmvirtualenv").arg(&context.project.project_name))?;
    Ok(())
}

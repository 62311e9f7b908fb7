//! The Django project itself: repository, requirements, migrations, static
//! files, local tests and the application restart

use std::path::Path;

use crate::application::runner::StepContext;
use crate::application::session::Session;
use crate::config::expand_home;
use crate::domain::value_objects::{shell_quote, ShellCommand};
use crate::error::{StagehandError, StagehandResult};

fn manage(subcommand: &str) -> ShellCommand {
    ShellCommand::new("python").arg("manage.py").arg(subcommand)
}

pub(super) fn install_requirements(session: &mut Session, context: &StepContext<'_>) -> StagehandResult<()> {
    let requirements = &context.environment.settings().requirements_file;
    session.run(&ShellCommand::new("pip").arg("install").literal("-r").arg(requirements))?;
    Ok(())
}

pub(super) fn collect_static_assets(session: &mut Session, _context: &StepContext<'_>) -> StagehandResult<()> {
    session.run(&manage("collectstatic"))?;
    Ok(())
}

pub(super) fn make_migrations(session: &mut Session, _context: &StepContext<'_>) -> StagehandResult<()> {
    session.run(&manage("makemigrations"))?;
    Ok(())
}

pub(super) fn migrate_models(session: &mut Session, _context: &StepContext<'_>) -> StagehandResult<()> {
    session.run(&manage("migrate"))?;
    Ok(())
}

pub(super) fn clone_repository(session: &mut Session, context: &StepContext<'_>) -> StagehandResult<()> {
    let stage = context.environment.settings();
    session.run(
        &ShellCommand::new("git")
            .arg("clone")
            .literal("-b")
            .arg(&stage.vcs_branch)
            .literal("--single-branch")
            .arg(&context.project.git_repository)
            .arg(&stage.code_src_directory),
    )?;
    Ok(())
}

pub(super) fn pull_repository(session: &mut Session, context: &StepContext<'_>) -> StagehandResult<()> {
    session.run(
        &ShellCommand::new("git")
            .arg("pull")
            .arg(&context.project.git_repository)
            .arg(&context.environment.settings().vcs_branch),
    )?;
    Ok(())
}

/// Run the test suite on the operator's machine, falling back to the
/// secondary settings profile when the primary one fails.
pub(super) fn run_tests_locally(session: &mut Session, context: &StepContext<'_>) -> StagehandResult<()> {
    let local = &context.project.local;
    let python = expand_home(Path::new(&local.venv_python_executable));
    let test_with = |profile: &str| {
        ShellCommand::new(shell_quote(&python.to_string_lossy()))
            .arg("manage.py")
            .arg("test")
            .arg(format!("--settings={}", profile))
    };

    let primary = session.with_warnings_only(|session| session.run_local(&test_with(&local.test_settings)))?;
    if primary.succeeded() {
        return Ok(());
    }

    let fallback =
        session.with_warnings_only(|session| session.run_local(&test_with(&local.fallback_test_settings)))?;
    if fallback.failed() {
        return Err(StagehandError::TestFailure);
    }
    Ok(())
}

pub(super) fn restart_application(session: &mut Session, context: &StepContext<'_>) -> StagehandResult<()> {
    let restart = ShellCommand::raw(&context.environment.settings().restart_command);
    let output = session.with_warnings_only(|session| session.run(&restart))?;
    if output.failed() {
        return Err(StagehandError::Aborted(
            "Could not restart application.".to_string(),
        ));
    }
    Ok(())
}

//! Output Rendering
//!
//! Text and NDJSON renderings of everything printed outside a workflow run:
//! the selected environment, settings warnings, and the final error.

use crate::config::ConfigWarning;
use crate::domain::entities::ActiveEnvironment;
use crate::error::StagehandError;
use crate::ui::theme::{colors, Palette};

/// Summary printed when a stage is selected without a workflow
pub fn render_environment(environment: &ActiveEnvironment, palette: Palette) -> String {
    let settings = environment.settings();
    let mut out = format!(
        "{} Stage {} {}\n",
        palette.paint(palette.success_icon(), colors::SUCCESS),
        palette.paint(environment.stage(), colors::INFO),
        palette.paint(&format!("({})", environment.destination()), colors::DIM),
    );
    let rows = [
        ("code", settings.code_src_directory.as_str()),
        ("virtualenv", settings.venv_directory.as_str()),
        ("branch", settings.vcs_branch.as_str()),
        ("requirements", settings.requirements_file.as_str()),
        ("settings", settings.settings_module.as_str()),
    ];
    for (label, value) in rows {
        out.push_str(&format!(
            "  {} {:<13}{}\n",
            palette.arrow_icon(),
            format!("{}:", label),
            value
        ));
    }
    out
}

pub fn environment_json(environment: &ActiveEnvironment) -> serde_json::Value {
    let settings = environment.settings();
    serde_json::json!({
        "event": "stage",
        "stage": environment.stage(),
        "destination": environment.destination(),
        "code_src_directory": settings.code_src_directory,
        "venv_directory": settings.venv_directory,
        "vcs_branch": settings.vcs_branch,
        "requirements_file": settings.requirements_file,
        "settings_module": settings.settings_module,
    })
}

pub fn render_warning(warning: &ConfigWarning, palette: Palette) -> String {
    let location = match warning.line {
        Some(line) => format!("{}:{}", warning.file.display(), line),
        None => warning.file.display().to_string(),
    };
    let mut out = format!(
        "{} {}",
        palette.paint(palette.warning_icon(), colors::WARNING),
        palette.paint(
            &format!("Unknown setting '{}' in {}", warning.key, location),
            colors::WARNING
        ),
    );
    if let Some(suggestion) = &warning.suggestion {
        out.push_str(&format!("\n  Did you mean '{}'?", suggestion));
    }
    out
}

pub fn warning_json(warning: &ConfigWarning) -> serde_json::Value {
    serde_json::json!({
        "event": "warning",
        "key": warning.key,
        "file": warning.file.display().to_string(),
        "line": warning.line,
        "suggestion": warning.suggestion,
    })
}

pub fn render_error(error: &StagehandError, palette: Palette) -> String {
    let mut out = format!(
        "{} {}",
        palette.paint(palette.error_icon(), colors::ERROR),
        palette.paint(&format!("Error: {}", error), colors::ERROR),
    );
    if let Some(stderr) = error.remote_stderr() {
        for line in stderr.lines().filter(|l| !l.trim().is_empty()) {
            out.push_str(&format!("\n  {}", palette.paint(line, colors::DIM)));
        }
    }
    if let Some(hint) = hint_for(error) {
        out.push_str(&format!("\n  {} {}", palette.arrow_icon(), hint));
    }
    out
}

pub fn error_json(error: &StagehandError) -> serde_json::Value {
    serde_json::json!({
        "event": "error",
        "message": error.to_string(),
        "stderr": error.remote_stderr(),
    })
}

fn hint_for(error: &StagehandError) -> Option<&'static str> {
    match error {
        StagehandError::IncompleteConfig { .. } => {
            Some("Fill in the listed keys in project_settings.json or database_settings.json.")
        }
        StagehandError::Transport { .. } => Some("Check that `ssh` is installed and the host is reachable."),
        StagehandError::Interrupted => Some("The last command finished; later steps did not run."),
        _ => None,
    }
}

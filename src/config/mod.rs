//! Settings for Stagehand
//!
//! Two documents are read once at startup and never change afterwards:
//! 1. Project settings (`project_settings.json`): stages, service configs, paths
//! 2. Database settings (`database_settings.json`): name, user, password
//!
//! File locations resolve in this order:
//! 1. `STAGEHAND_PROJECT_SETTINGS` / `STAGEHAND_DATABASE_SETTINGS`
//! 2. `<config-dir>/project_settings.json` / `<config-dir>/database_settings.json`

mod loader;
#[cfg(test)]
mod tests;
mod types;

use std::path::{Path, PathBuf};

pub use loader::{load_document, parse_document, ConfigWarning, DocumentFormat};
pub use types::{
    services, DatabaseCredentials, DatabaseSettings, FirewallSettings, LocalSettings,
    ProjectSettings, ServiceConfig, StageSettings,
};

pub const PROJECT_SETTINGS_FILE: &str = "project_settings.json";
pub const DATABASE_SETTINGS_FILE: &str = "database_settings.json";

pub const PROJECT_SETTINGS_ENV: &str = "STAGEHAND_PROJECT_SETTINGS";
pub const DATABASE_SETTINGS_ENV: &str = "STAGEHAND_DATABASE_SETTINGS";

/// Resolved locations of the two settings documents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsPaths {
    pub project: PathBuf,
    pub database: PathBuf,
}

impl SettingsPaths {
    /// Resolve both paths under `config_dir`, honouring environment overrides
    pub fn resolve(config_dir: &Path) -> Self {
        Self::resolve_with(config_dir, |key| std::env::var(key).ok())
    }

    fn resolve_with(config_dir: &Path, get_env: impl Fn(&str) -> Option<String>) -> Self {
        let config_dir = expand_home(config_dir);
        let pick = |env_key: &str, file: &str| {
            get_env(env_key)
                .filter(|value| !value.trim().is_empty())
                .map(|value| expand_home(Path::new(&value)))
                .unwrap_or_else(|| config_dir.join(file))
        };

        Self {
            project: pick(PROJECT_SETTINGS_ENV, PROJECT_SETTINGS_FILE),
            database: pick(DATABASE_SETTINGS_ENV, DATABASE_SETTINGS_FILE),
        }
    }
}

/// Expand a leading `~` to the operator's home directory
pub fn expand_home(path: &Path) -> PathBuf {
    let p = path.to_string_lossy();
    if p == "~" {
        return dirs::home_dir().unwrap_or_else(|| path.to_path_buf());
    }
    if let Some(rest) = p.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    path.to_path_buf()
}

/// Both settings documents plus the warnings raised while reading them
#[derive(Debug, Clone)]
pub struct LoadedSettings {
    pub project: ProjectSettings,
    pub database: DatabaseSettings,
    pub warnings: Vec<ConfigWarning>,
}

impl LoadedSettings {
    pub fn load(paths: &SettingsPaths) -> crate::error::StagehandResult<Self> {
        let (project, mut warnings) = ProjectSettings::load_with_warnings(&paths.project)?;
        let (database, database_warnings) = DatabaseSettings::load_with_warnings(&paths.database)?;
        warnings.extend(database_warnings);
        Ok(Self {
            project,
            database,
            warnings,
        })
    }
}

//! Stage Selection
//!
//! Resolves a stage name into the Active Environment. A failed selection
//! never replaces an environment chosen earlier.

use crate::config::ProjectSettings;
use crate::domain::entities::ActiveEnvironment;
use crate::domain::value_objects::Stage;
use crate::error::{StagehandError, StagehandResult};

pub struct StageSelector<'a> {
    settings: &'a ProjectSettings,
    active: Option<ActiveEnvironment>,
}

impl<'a> StageSelector<'a> {
    pub fn new(settings: &'a ProjectSettings) -> Self {
        Self {
            settings,
            active: None,
        }
    }

    /// Select a stage by name
    pub fn select(&mut self, name: &str) -> StagehandResult<&ActiveEnvironment> {
        let environment = resolve(self.settings, name)?;
        let active: &ActiveEnvironment = self.active.insert(environment);
        Ok(active)
    }

    /// Select one of the CLI presets
    pub fn select_preset(&mut self, stage: Stage) -> StagehandResult<&ActiveEnvironment> {
        self.select(stage.as_str())
    }

    pub fn development(&mut self) -> StagehandResult<&ActiveEnvironment> {
        self.select_preset(Stage::Development)
    }

    pub fn stable(&mut self) -> StagehandResult<&ActiveEnvironment> {
        self.select_preset(Stage::Stable)
    }

    /// The environment chosen by the last successful selection
    pub fn active(&self) -> StagehandResult<&ActiveEnvironment> {
        self.active.as_ref().ok_or(StagehandError::NoStageSelected)
    }

    /// Give up the selector and keep the environment
    pub fn into_active(self) -> StagehandResult<ActiveEnvironment> {
        self.active.ok_or(StagehandError::NoStageSelected)
    }
}

/// Validate settings for `name` and build its environment
pub fn resolve(settings: &ProjectSettings, name: &str) -> StagehandResult<ActiveEnvironment> {
    let Some(stage_settings) = settings.stages.get(name) else {
        return Err(StagehandError::UnknownStage {
            name: name.to_string(),
            valid: settings.stage_names(),
        });
    };

    let mut missing = settings.missing_top_level_keys();
    if missing.is_empty() {
        missing.extend(stage_settings.missing_keys(name));
        missing.extend(settings.missing_service_keys());
    }
    if !missing.is_empty() {
        return Err(StagehandError::IncompleteConfig { keys: missing });
    }

    Ok(ActiveEnvironment::new(name, stage_settings.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LocalSettings, ServiceConfig, StageSettings};

    fn stage(user: &str, host: &str) -> StageSettings {
        StageSettings {
            user: user.to_string(),
            host: host.to_string(),
            venv_directory: format!("/home/{}/.virtualenvs/shop", user),
            code_src_directory: format!("/home/{}/shop", user),
            requirements_file: "requirements.txt".to_string(),
            vcs_branch: "master".to_string(),
            restart_command: "sudo systemctl restart gunicorn".to_string(),
            ..StageSettings::default()
        }
    }

    fn settings() -> ProjectSettings {
        let mut settings = ProjectSettings {
            project_name: "shop".to_string(),
            git_repository: "https://example.com/shop.git".to_string(),
            local: LocalSettings {
                venv_python_executable: "python".to_string(),
                code_src_directory: "/src/shop".to_string(),
                ..LocalSettings::default()
            },
            ..ProjectSettings::default()
        };
        settings
            .stages
            .insert("development".to_string(), stage("dev", "10.0.0.5"));
        settings
            .stages
            .insert("stable".to_string(), stage("deploy", "shop.example.com"));
        for name in crate::config::services::REQUIRED {
            settings.configs.insert(
                name.to_string(),
                ServiceConfig {
                    config_directory: format!("/etc/{}", name),
                    config_src: format!("deploy/{}", name),
                },
            );
        }
        settings
    }

    #[test]
    fn select_returns_configured_stage() {
        let settings = settings();
        let mut selector = StageSelector::new(&settings);

        let env = selector.development().unwrap();
        assert_eq!(env.user(), "dev");
        assert_eq!(env.host(), "10.0.0.5");
        assert_eq!(env.settings().code_src_directory, "/home/dev/shop");

        let env = selector.stable().unwrap();
        assert_eq!(env.user(), "deploy");
        assert_eq!(env.host(), "shop.example.com");
    }

    #[test]
    fn unknown_stage_keeps_previous_environment() {
        let settings = settings();
        let mut selector = StageSelector::new(&settings);
        selector.select("development").unwrap();

        let err = selector.select("production").unwrap_err();
        match err {
            StagehandError::UnknownStage { name, valid } => {
                assert_eq!(name, "production");
                assert_eq!(valid, vec!["development".to_string(), "stable".to_string()]);
            }
            other => panic!("expected UnknownStage, got {other:?}"),
        }

        assert_eq!(selector.active().unwrap().stage(), "development");
        assert_eq!(selector.active().unwrap().host(), "10.0.0.5");
    }

    #[test]
    fn active_before_selection_is_an_error() {
        let settings = settings();
        let selector = StageSelector::new(&settings);
        assert!(matches!(
            selector.active().unwrap_err(),
            StagehandError::NoStageSelected
        ));
    }

    #[test]
    fn empty_top_level_setting_blocks_every_stage() {
        let mut settings = settings();
        settings.git_repository.clear();

        for stage in Stage::ALL {
            let mut selector = StageSelector::new(&settings);
            match selector.select_preset(stage).unwrap_err() {
                StagehandError::IncompleteConfig { keys } => {
                    assert_eq!(keys, vec!["git_repository".to_string()])
                }
                other => panic!("expected IncompleteConfig, got {other:?}"),
            }
            assert!(selector.active().is_err());
        }
    }

    #[test]
    fn empty_stage_field_is_reported_with_its_path() {
        let mut settings = settings();
        settings.stages.get_mut("stable").unwrap().vcs_branch.clear();

        assert!(resolve(&settings, "development").is_ok());
        match resolve(&settings, "stable").unwrap_err() {
            StagehandError::IncompleteConfig { keys } => {
                assert_eq!(keys, vec!["stages.stable.vcs_branch".to_string()])
            }
            other => panic!("expected IncompleteConfig, got {other:?}"),
        }
    }

    #[test]
    fn missing_service_descriptor_is_incomplete() {
        let mut settings = settings();
        settings.configs.remove("fail2ban");
        match resolve(&settings, "development").unwrap_err() {
            StagehandError::IncompleteConfig { keys } => {
                assert_eq!(keys, vec!["configs.fail2ban".to_string()])
            }
            other => panic!("expected IncompleteConfig, got {other:?}"),
        }
    }
}

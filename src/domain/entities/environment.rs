//! Active Environment
//!
//! The resolved stage settings and connection identity for one invocation.
//! Built by the stage selector and only read afterwards.

use crate::config::StageSettings;
use crate::domain::value_objects::expand_remote_home;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveEnvironment {
    stage: String,
    settings: StageSettings,
}

impl ActiveEnvironment {
    /// Remote paths starting with `~` are resolved against the user's home
    pub fn new(stage: impl Into<String>, mut settings: StageSettings) -> Self {
        let home = format!("/home/{}", settings.user);
        for path in [
            &mut settings.venv_directory,
            &mut settings.code_src_directory,
            &mut settings.requirements_file,
        ] {
            *path = expand_remote_home(path, &home);
        }
        Self {
            stage: stage.into(),
            settings,
        }
    }

    pub fn stage(&self) -> &str {
        &self.stage
    }

    pub fn settings(&self) -> &StageSettings {
        &self.settings
    }

    pub fn user(&self) -> &str {
        &self.settings.user
    }

    pub fn host(&self) -> &str {
        &self.settings.host
    }

    /// `user@host`
    pub fn destination(&self) -> String {
        self.settings.destination()
    }

    /// Remote home directory of the connecting user
    pub fn home_directory(&self) -> String {
        format!("/home/{}", self.settings.user)
    }
}

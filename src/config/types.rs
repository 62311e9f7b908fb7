//! Settings type definitions

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{StagehandError, StagehandResult};

use super::loader::{self, ConfigWarning};

/// Service names looked up in `configs`
pub mod services {
    pub const WEB_SERVER: &str = "nginx";
    pub const PROCESS_MANAGER: &str = "gunicorn";
    pub const INTRUSION_PREVENTION: &str = "fail2ban";

    pub const REQUIRED: &[&str] = &[WEB_SERVER, PROCESS_MANAGER, INTRUSION_PREVENTION];
}

/// Project settings (`project_settings.json`)
///
/// Every field defaults to empty so that missing values are reported by
/// stage selection rather than by the parser.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ProjectSettings {
    #[serde(default)]
    pub project_name: String,

    #[serde(default)]
    pub git_repository: String,

    #[serde(default)]
    pub stages: BTreeMap<String, StageSettings>,

    #[serde(default)]
    pub configs: BTreeMap<String, ServiceConfig>,

    #[serde(default)]
    pub local: LocalSettings,

    #[serde(default)]
    pub firewall: FirewallSettings,

    /// Interactive prompt text -> canned answer
    ///
    /// Prompt text is not matched against the output; answers go to stdin
    /// one per line, sorted by prompt text.
    #[serde(default = "default_prompts")]
    pub prompts: BTreeMap<String, String>,
}

/// Connection and path settings for one stage
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StageSettings {
    #[serde(default)]
    pub user: String,

    #[serde(default)]
    pub host: String,

    #[serde(default)]
    pub venv_directory: String,

    #[serde(default)]
    pub code_src_directory: String,

    #[serde(default)]
    pub requirements_file: String,

    #[serde(default)]
    pub vcs_branch: String,

    #[serde(default)]
    pub restart_command: String,

    /// SSH port (ssh default when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    /// SSH private key passed with `-i`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity_file: Option<String>,

    /// Exported as `DJANGO_SETTINGS_MODULE` in the remote profile
    #[serde(default = "default_settings_module")]
    pub settings_module: String,
}

impl Default for StageSettings {
    fn default() -> Self {
        Self {
            user: String::new(),
            host: String::new(),
            venv_directory: String::new(),
            code_src_directory: String::new(),
            requirements_file: String::new(),
            vcs_branch: String::new(),
            restart_command: String::new(),
            port: None,
            identity_file: None,
            settings_module: default_settings_module(),
        }
    }
}

/// Where a service's configuration lives remotely and where to copy it from
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ServiceConfig {
    #[serde(default)]
    pub config_directory: String,

    #[serde(default)]
    pub config_src: String,
}

/// Settings for commands run on the operator's machine
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocalSettings {
    #[serde(default)]
    pub venv_python_executable: String,

    #[serde(default)]
    pub code_src_directory: String,

    /// Settings profile tried first by the local test run
    #[serde(default = "default_test_settings")]
    pub test_settings: String,

    /// Settings profile tried when the first run fails
    #[serde(default = "default_fallback_test_settings")]
    pub fallback_test_settings: String,
}

impl Default for LocalSettings {
    fn default() -> Self {
        Self {
            venv_python_executable: String::new(),
            code_src_directory: String::new(),
            test_settings: default_test_settings(),
            fallback_test_settings: default_fallback_test_settings(),
        }
    }
}

impl LocalSettings {
    pub fn is_empty(&self) -> bool {
        self.venv_python_executable.is_empty() && self.code_src_directory.is_empty()
    }
}

/// iptables rules applied by the firewall step
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FirewallSettings {
    #[serde(default = "default_ssh_port")]
    pub ssh_port: u16,

    #[serde(default = "default_open_ports")]
    pub open_ports: Vec<u16>,
}

impl Default for FirewallSettings {
    fn default() -> Self {
        Self {
            ssh_port: default_ssh_port(),
            open_ports: default_open_ports(),
        }
    }
}

fn default_settings_module() -> String {
    "config.settings.production".to_string()
}

fn default_test_settings() -> String {
    "config.settings.local".to_string()
}

fn default_fallback_test_settings() -> String {
    "config.settings.staging".to_string()
}

fn default_ssh_port() -> u16 {
    25000
}

fn default_open_ports() -> Vec<u16> {
    vec![80, 443]
}

pub(crate) fn default_prompts() -> BTreeMap<String, String> {
    let mut prompts = BTreeMap::new();
    prompts.insert(
        "Type 'yes' to continue, or 'no' to cancel: ".to_string(),
        "yes".to_string(),
    );
    prompts
}

impl ProjectSettings {
    /// Canned answers in the order they are written to stdin
    pub fn prompt_answers(&self) -> impl Iterator<Item = &str> {
        self.prompts.values().map(String::as_str)
    }

    /// Load project settings from a JSON or TOML file
    pub fn load(path: &Path) -> StagehandResult<Self> {
        let (settings, _warnings) = Self::load_with_warnings(path)?;
        Ok(settings)
    }

    /// Load project settings and collect non-fatal warnings (e.g. unknown keys)
    pub fn load_with_warnings(path: &Path) -> StagehandResult<(Self, Vec<ConfigWarning>)> {
        loader::load_document(path)
    }

    /// Sorted names of all configured stages
    pub fn stage_names(&self) -> Vec<String> {
        self.stages.keys().cloned().collect()
    }

    /// Top-level settings whose value is empty.
    ///
    /// Blunt on purpose: an empty unrelated setting blocks every stage.
    pub fn missing_top_level_keys(&self) -> Vec<String> {
        let mut missing = Vec::new();
        if self.project_name.trim().is_empty() {
            missing.push("project_name".to_string());
        }
        if self.git_repository.trim().is_empty() {
            missing.push("git_repository".to_string());
        }
        if self.stages.is_empty() {
            missing.push("stages".to_string());
        }
        if self.configs.is_empty() {
            missing.push("configs".to_string());
        }
        if self.local.is_empty() {
            missing.push("local".to_string());
        }
        missing
    }

    /// Required service descriptors that are absent or have empty fields
    pub fn missing_service_keys(&self) -> Vec<String> {
        let mut missing = Vec::new();
        for name in services::REQUIRED {
            match self.configs.get(*name) {
                None => missing.push(format!("configs.{}", name)),
                Some(service) => {
                    if service.config_directory.trim().is_empty() {
                        missing.push(format!("configs.{}.config_directory", name));
                    }
                    if service.config_src.trim().is_empty() {
                        missing.push(format!("configs.{}.config_src", name));
                    }
                }
            }
        }
        missing
    }

    /// Look up a service descriptor, reporting it as missing configuration
    pub fn service(&self, name: &str) -> StagehandResult<&ServiceConfig> {
        self.configs
            .get(name)
            .ok_or_else(|| StagehandError::IncompleteConfig {
                keys: vec![format!("configs.{}", name)],
            })
    }
}

impl StageSettings {
    /// Required stage fields that are empty, prefixed with `stages.<stage>.`
    pub fn missing_keys(&self, stage: &str) -> Vec<String> {
        let fields = [
            ("user", &self.user),
            ("host", &self.host),
            ("venv_directory", &self.venv_directory),
            ("code_src_directory", &self.code_src_directory),
            ("requirements_file", &self.requirements_file),
            ("vcs_branch", &self.vcs_branch),
            ("restart_command", &self.restart_command),
        ];
        fields
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(key, _)| format!("stages.{}.{}", stage, key))
            .collect()
    }

    /// SSH destination in `user@host` form
    pub fn destination(&self) -> String {
        format!("{}@{}", self.user, self.host)
    }
}

/// Database settings (`database_settings.json`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DatabaseSettings {
    pub database: DatabaseCredentials,
}

/// Name and owner of the application database
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DatabaseCredentials {
    pub name: String,
    pub user: String,
    pub password: String,
}

impl std::fmt::Debug for DatabaseCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseCredentials")
            .field("name", &self.name)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl DatabaseSettings {
    /// Load database settings; every field must be present and non-empty
    pub fn load(path: &Path) -> StagehandResult<Self> {
        let (settings, _warnings) = Self::load_with_warnings(path)?;
        Ok(settings)
    }

    pub fn load_with_warnings(path: &Path) -> StagehandResult<(Self, Vec<ConfigWarning>)> {
        let (settings, warnings): (Self, _) = loader::load_document(path)?;
        let missing = settings.missing_keys();
        if !missing.is_empty() {
            return Err(StagehandError::IncompleteConfig { keys: missing });
        }
        Ok((settings, warnings))
    }

    pub fn missing_keys(&self) -> Vec<String> {
        let db = &self.database;
        [
            ("database.name", &db.name),
            ("database.user", &db.user),
            ("database.password", &db.password),
        ]
        .iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(key, _)| key.to_string())
        .collect()
    }
}

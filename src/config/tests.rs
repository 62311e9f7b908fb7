//! Tests for the config module

use super::*;
use crate::error::StagehandError;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

const PROJECT_JSON: &str = r#"{
    "project_name": "shop",
    "git_repository": "git@example.com:acme/shop.git",
    "stages": {
        "development": {
            "user": "dev",
            "host": "10.0.0.5",
            "venv_directory": "/home/dev/.virtualenvs/shop",
            "code_src_directory": "/home/dev/shop",
            "requirements_file": "requirements/dev.txt",
            "vcs_branch": "develop",
            "restart_command": "sudo systemctl restart gunicorn",
            "port": 25000
        }
    },
    "configs": {
        "nginx": {"config_directory": "/etc/nginx", "config_src": "/home/dev/shop/deploy/nginx"}
    },
    "local": {
        "venv_python_executable": "/home/me/.virtualenvs/shop/bin/python",
        "code_src_directory": "~/src/shop"
    }
}"#;

#[test]
fn test_project_settings_parse_json() {
    let (settings, warnings): (ProjectSettings, _) =
        parse_document(PROJECT_JSON, DocumentFormat::Json, Path::new("p.json")).unwrap();

    assert!(warnings.is_empty());
    assert_eq!(settings.project_name, "shop");
    let dev = &settings.stages["development"];
    assert_eq!(dev.host, "10.0.0.5");
    assert_eq!(dev.port, Some(25000));
    assert_eq!(dev.settings_module, "config.settings.production");
    assert_eq!(settings.local.test_settings, "config.settings.local");
    assert_eq!(settings.firewall.open_ports, vec![80, 443]);
    assert_eq!(
        settings.prompts.get("Type 'yes' to continue, or 'no' to cancel: "),
        Some(&"yes".to_string())
    );
}

#[test]
fn test_project_settings_parse_toml() {
    let toml = r#"
project_name = "shop"
git_repository = "https://example.com/shop.git"

[stages.stable]
user = "deploy"
host = "shop.example.com"
vcs_branch = "master"

[configs.nginx]
config_directory = "/etc/nginx"
config_src = "deploy/nginx.conf"

[firewall]
ssh_port = 22
"#;

    let (settings, _): (ProjectSettings, _) =
        parse_document(toml, DocumentFormat::Toml, Path::new("p.toml")).unwrap();

    assert_eq!(settings.stages["stable"].user, "deploy");
    assert_eq!(settings.firewall.ssh_port, 22);
    assert_eq!(settings.firewall.open_ports, vec![80, 443]);
}

#[test]
fn test_unknown_key_produces_warning_with_suggestion() {
    let json = r#"{"project_name": "shop", "git_repositry": "x"}"#;
    let (_, warnings): (ProjectSettings, _) =
        parse_document(json, DocumentFormat::Json, Path::new("p.json")).unwrap();

    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].key, "git_repositry");
    assert_eq!(warnings[0].line, Some(1));
    assert_eq!(warnings[0].suggestion.as_deref(), Some("git_repository"));
}

#[test]
fn test_malformed_document_is_config_error() {
    let err = parse_document::<ProjectSettings>("{ not json", DocumentFormat::Json, Path::new("p.json"))
        .unwrap_err();
    assert!(matches!(err, StagehandError::Config { .. }));
}

#[test]
fn test_missing_file_is_config_error() {
    let dir = tempdir().unwrap();
    let err = ProjectSettings::load(&dir.path().join("nope.json")).unwrap_err();
    match err {
        StagehandError::Config { file, .. } => assert!(file.ends_with("nope.json")),
        other => panic!("expected Config error, got {other:?}"),
    }
}

#[test]
fn test_database_settings_require_all_fields() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("database_settings.json");

    fs::write(&path, r#"{"database": {"name": "shop", "user": "shop"}}"#).unwrap();
    assert!(matches!(
        DatabaseSettings::load(&path).unwrap_err(),
        StagehandError::Config { .. }
    ));

    fs::write(
        &path,
        r#"{"database": {"name": "shop", "user": "", "password": "s3cret"}}"#,
    )
    .unwrap();
    match DatabaseSettings::load(&path).unwrap_err() {
        StagehandError::IncompleteConfig { keys } => assert_eq!(keys, vec!["database.user"]),
        other => panic!("expected IncompleteConfig, got {other:?}"),
    }
}

#[test]
fn test_database_password_is_redacted_in_debug() {
    let creds = DatabaseCredentials {
        name: "shop".to_string(),
        user: "shop".to_string(),
        password: "hunter2".to_string(),
    };
    let rendered = format!("{:?}", creds);
    assert!(!rendered.contains("hunter2"));
    assert!(rendered.contains("<redacted>"));
}

#[test]
fn test_missing_top_level_keys() {
    let mut settings: ProjectSettings =
        parse_document(PROJECT_JSON, DocumentFormat::Json, Path::new("p.json"))
            .unwrap()
            .0;
    assert!(settings.missing_top_level_keys().is_empty());

    settings.git_repository.clear();
    settings.configs.clear();
    assert_eq!(
        settings.missing_top_level_keys(),
        vec!["git_repository".to_string(), "configs".to_string()]
    );
}

#[test]
fn test_missing_service_keys_lists_absent_services() {
    let settings: ProjectSettings =
        parse_document(PROJECT_JSON, DocumentFormat::Json, Path::new("p.json"))
            .unwrap()
            .0;
    assert_eq!(
        settings.missing_service_keys(),
        vec!["configs.gunicorn".to_string(), "configs.fail2ban".to_string()]
    );
}

#[test]
fn test_stage_missing_keys_are_prefixed() {
    let stage = StageSettings {
        user: "dev".to_string(),
        host: "10.0.0.5".to_string(),
        ..StageSettings::default()
    };
    let missing = stage.missing_keys("development");
    assert!(missing.contains(&"stages.development.vcs_branch".to_string()));
    assert!(!missing.iter().any(|k| k.ends_with(".host")));
}

#[test]
fn test_settings_paths_default_to_config_dir() {
    let paths = SettingsPaths::resolve_with(Path::new("/srv/shop"), |_| None);
    assert_eq!(paths.project, PathBuf::from("/srv/shop/project_settings.json"));
    assert_eq!(paths.database, PathBuf::from("/srv/shop/database_settings.json"));
}

#[test]
fn test_settings_paths_env_override() {
    let paths = SettingsPaths::resolve_with(Path::new("/srv/shop"), |key| {
        (key == DATABASE_SETTINGS_ENV).then(|| "/secrets/db.toml".to_string())
    });
    assert_eq!(paths.project, PathBuf::from("/srv/shop/project_settings.json"));
    assert_eq!(paths.database, PathBuf::from("/secrets/db.toml"));
}

#[test]
fn test_expand_home_leaves_absolute_paths() {
    assert_eq!(expand_home(Path::new("/etc/nginx")), PathBuf::from("/etc/nginx"));
}

#[test]
fn test_prompt_answers_follow_prompt_text_order() {
    let json = r#"{
  "project_name": "shop",
  "git_repository": "https://example.com/shop.git",
  "prompts": {
    "Type 'yes' to continue, or 'no' to cancel: ": "yes",
    "Are you sure? [y/N] ": "y"
  }
}"#;
    let (settings, _): (ProjectSettings, _) =
        parse_document(json, DocumentFormat::Json, Path::new("p.json")).unwrap();

    assert_eq!(settings.prompt_answers().collect::<Vec<_>>(), vec!["y", "yes"]);
}

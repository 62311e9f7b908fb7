//! Test fixtures - settings documents reused across tests.

/// Project settings with a complete `development` stage and no `stable` stage
pub const PROJECT_SETTINGS: &str = r#"{
  "project_name": "shop",
  "git_repository": "https://example.com/acme/shop.git",
  "stages": {
    "development": {
      "user": "dev",
      "host": "10.0.0.5",
      "venv_directory": "/home/dev/.virtualenvs/shop",
      "code_src_directory": "/home/dev/shop",
      "requirements_file": "requirements.txt",
      "vcs_branch": "develop",
      "restart_command": "sudo systemctl restart gunicorn"
    }
  },
  "configs": {
    "nginx": {
      "config_directory": "/etc/nginx",
      "config_src": "deploy/nginx.conf"
    },
    "gunicorn": {
      "config_directory": "/etc/systemd/system",
      "config_src": "deploy/gunicorn.service"
    },
    "fail2ban": {
      "config_directory": "/etc/fail2ban",
      "config_src": "deploy/jail.local"
    }
  },
  "local": {
    "venv_python_executable": "python",
    "code_src_directory": "/src/shop"
  }
}
"#;

pub const DATABASE_SETTINGS: &str = r#"{
  "database": {
    "name": "shop",
    "user": "shop",
    "password": "hunter2"
  }
}
"#;

/// Same project with an empty repository URL
pub fn project_settings_without_repository() -> String {
    PROJECT_SETTINGS.replace("https://example.com/acme/shop.git", "")
}

/// Same project with a misspelled stage key
pub fn project_settings_with_typo() -> String {
    PROJECT_SETTINGS.replace("\"vcs_branch\": \"develop\",", "\"vcs_branch\": \"develop\",\n      \"hots\": \"10.0.0.6\",")
}

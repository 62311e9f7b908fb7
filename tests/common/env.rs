//! Test environment for isolated Stagehand runs.
//!
//! Provides `TestEnv` - a temp settings directory plus helpers to run the
//! Stagehand binary against it.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;

use super::fixtures::{DATABASE_SETTINGS, PROJECT_SETTINGS};

/// Result of running a Stagehand CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }

    /// Parse stdout as NDJSON, skipping blank lines
    pub fn events(&self) -> Vec<Value> {
        self.stdout
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                serde_json::from_str(line)
                    .unwrap_or_else(|e| panic!("not JSON: {line}: {e}"))
            })
            .collect()
    }

    /// Events whose `event` field equals `name`
    pub fn events_named(&self, name: &str) -> Vec<Value> {
        self.events()
            .into_iter()
            .filter(|event| event["event"] == name)
            .collect()
    }

    /// `step` fields of the `step_start` events, in order
    pub fn started_steps(&self) -> Vec<String> {
        self.events_named("step_start")
            .iter()
            .map(|event| event["step"].as_str().unwrap_or_default().to_string())
            .collect()
    }
}

/// Isolated settings directory
pub struct TestEnv {
    pub config_dir: TempDir,
    bin: PathBuf,
}

impl TestEnv {
    /// Directory holding the default project and database settings
    pub fn new() -> Self {
        Self::with_settings(PROJECT_SETTINGS, DATABASE_SETTINGS)
    }

    pub fn with_settings(project: &str, database: &str) -> Self {
        let env = Self::empty();
        env.write("project_settings.json", project);
        env.write("database_settings.json", database);
        env
    }

    /// Directory without any settings files
    pub fn empty() -> Self {
        Self {
            config_dir: TempDir::new().expect("Failed to create temp dir"),
            bin: PathBuf::from(env!("CARGO_BIN_EXE_stagehand")),
        }
    }

    pub fn path(&self) -> &Path {
        self.config_dir.path()
    }

    pub fn write(&self, name: &str, content: &str) {
        std::fs::write(self.path().join(name), content).expect("Failed to write settings");
    }

    /// Run stagehand with `--config-dir` pointing at this environment
    pub fn run(&self, args: &[&str]) -> TestResult {
        let output = Command::new(&self.bin)
            .arg("--config-dir")
            .arg(self.path())
            .args(args)
            .env_remove("STAGEHAND_PROJECT_SETTINGS")
            .env_remove("STAGEHAND_DATABASE_SETTINGS")
            .env("NO_COLOR", "1")
            .output()
            .expect("Failed to execute stagehand");
        output_to_result(output)
    }

    /// Run stagehand with extra environment variables
    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &Path)]) -> TestResult {
        let mut cmd = Command::new(&self.bin);
        cmd.arg("--config-dir")
            .arg(self.path())
            .args(args)
            .env_remove("STAGEHAND_PROJECT_SETTINGS")
            .env_remove("STAGEHAND_DATABASE_SETTINGS")
            .env("NO_COLOR", "1");
        for (key, value) in env_vars {
            cmd.env(key, value);
        }
        output_to_result(cmd.output().expect("Failed to execute stagehand"))
    }
}

fn output_to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}

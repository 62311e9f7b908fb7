//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! ## Design Notes
//!
//! - Global flags (--config-dir, --json, --dry-run, --color, --verbose) are
//!   inherited by every subcommand
//! - The stage comes first and the workflow second, so a workflow can never
//!   run without a selected stage

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::application::Workflow;
use crate::domain::value_objects::Stage;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum YesNo {
    #[default]
    Yes,
    No,
}

/// Stagehand - stage-based provisioning and deployment over SSH
#[derive(Parser, Debug)]
#[command(name = "stagehand")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Run 'stagehand <STAGE>' alone to validate settings and show the stage.")]
pub struct Cli {
    /// Directory holding project_settings.json and database_settings.json
    #[arg(long, global = true, default_value = ".")]
    pub config_dir: PathBuf,

    /// Output format for CI
    #[arg(long, global = true)]
    pub json: bool,

    /// Print commands instead of running them
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Color output mode
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorWhen>,

    /// Show output that workflows normally hide (-v)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub stage: StageCommand,
}

#[derive(Subcommand, Debug)]
pub enum StageCommand {
    /// Target the development stage
    Development {
        #[command(subcommand)]
        workflow: Option<WorkflowCommand>,
    },

    /// Target the stable stage
    Stable {
        #[command(subcommand)]
        workflow: Option<WorkflowCommand>,
    },
}

impl StageCommand {
    pub fn stage(&self) -> Stage {
        match self {
            StageCommand::Development { .. } => Stage::Development,
            StageCommand::Stable { .. } => Stage::Stable,
        }
    }

    pub fn workflow(&self) -> Option<Workflow> {
        match self {
            StageCommand::Development { workflow } | StageCommand::Stable { workflow } => {
                workflow.as_ref().map(WorkflowCommand::to_workflow)
            }
        }
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum WorkflowCommand {
    /// Provision the host and install the project
    Install,

    /// Test locally, then pull, migrate and restart the application
    Deploy {
        /// Run the local test suite first
        #[arg(long, value_enum, default_value_t = YesNo::Yes)]
        tests: YesNo,
    },

    /// Deploy without running local tests
    #[command(name = "deploy:tests=no", hide = true)]
    DeployWithoutTests,

    /// Deploy after running local tests
    #[command(name = "deploy:tests=yes", hide = true)]
    DeployWithTests,

    /// Start fail2ban, gunicorn and nginx
    Start,

    /// Stop nginx, gunicorn and fail2ban
    Stop,

    /// Restart all services
    Restart,

    /// Update and upgrade system packages
    Upgrade,

    /// Remove the secret key, virtual environment and installed software
    Teardown,
}

impl WorkflowCommand {
    pub fn to_workflow(&self) -> Workflow {
        match self {
            WorkflowCommand::Install => Workflow::Install,
            WorkflowCommand::Deploy { tests } => Workflow::Deploy {
                run_tests: *tests == YesNo::Yes,
            },
            WorkflowCommand::DeployWithoutTests => Workflow::Deploy { run_tests: false },
            WorkflowCommand::DeployWithTests => Workflow::Deploy { run_tests: true },
            WorkflowCommand::Start => Workflow::Start,
            WorkflowCommand::Stop => Workflow::Stop,
            WorkflowCommand::Restart => Workflow::Restart,
            WorkflowCommand::Upgrade => Workflow::Upgrade,
            WorkflowCommand::Teardown => Workflow::Teardown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_without_workflow() {
        let cli = Cli::try_parse_from(["stagehand", "development"]).unwrap();
        assert_eq!(cli.stage.stage(), Stage::Development);
        assert_eq!(cli.stage.workflow(), None);
    }

    #[test]
    fn deploy_runs_tests_by_default() {
        let cli = Cli::try_parse_from(["stagehand", "stable", "deploy"]).unwrap();
        assert_eq!(cli.stage.stage(), Stage::Stable);
        assert_eq!(cli.stage.workflow(), Some(Workflow::Deploy { run_tests: true }));
    }

    #[test]
    fn deploy_tests_flag() {
        let cli = Cli::try_parse_from(["stagehand", "stable", "deploy", "--tests", "no"]).unwrap();
        assert_eq!(cli.stage.workflow(), Some(Workflow::Deploy { run_tests: false }));
    }

    #[test]
    fn colon_style_deploy_alias() {
        let cli = Cli::try_parse_from(["stagehand", "development", "deploy:tests=no"]).unwrap();
        assert_eq!(cli.stage.workflow(), Some(Workflow::Deploy { run_tests: false }));
    }

    #[test]
    fn workflow_without_stage_is_usage_error() {
        let err = Cli::try_parse_from(["stagehand", "deploy"]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn global_flags_after_subcommands() {
        let cli = Cli::try_parse_from([
            "stagehand",
            "development",
            "install",
            "--dry-run",
            "--json",
            "-vv",
            "--config-dir",
            "deploy",
            "--color",
            "never",
        ])
        .unwrap();
        assert!(cli.dry_run);
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config_dir, PathBuf::from("deploy"));
        assert_eq!(cli.color, Some(ColorWhen::Never));
        assert_eq!(cli.stage.workflow(), Some(Workflow::Install));
    }

    #[test]
    fn maintenance_workflows_parse() {
        for (name, workflow) in [
            ("start", Workflow::Start),
            ("stop", Workflow::Stop),
            ("restart", Workflow::Restart),
            ("upgrade", Workflow::Upgrade),
            ("teardown", Workflow::Teardown),
        ] {
            let cli = Cli::try_parse_from(["stagehand", "stable", name]).unwrap();
            assert_eq!(cli.stage.workflow(), Some(workflow));
        }
    }
}

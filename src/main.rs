//! Stagehand CLI - stage-based provisioning and deployment over SSH
//!
//! Usage: stagehand [OPTIONS] <STAGE> [WORKFLOW]
//!
//! Stages:
//!   development  stable
//!
//! Workflows:
//!   install   Provision the host and install the project
//!   deploy    Test locally, then pull, migrate and restart
//!   start | stop | restart | upgrade | teardown

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use stagehand::presentation::{self, output, Cli};
use stagehand::ui::UiContext;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let ui = UiContext::new(cli.json, cli.verbose, cli.color);

    // The running command finishes; the next step sees the flag
    let interrupted = Arc::new(AtomicBool::new(false));
    let flag = interrupted.clone();
    ctrlc::set_handler(move || {
        flag.store(true, Ordering::SeqCst);
    })
    .context("Error setting Ctrl+C handler")?;

    if let Err(err) = presentation::execute(&cli, &ui, interrupted) {
        if ui.json {
            println!("{}", output::error_json(&err));
        } else {
            eprintln!("{}", output::render_error(&err, ui.palette()));
        }
        std::process::exit(1);
    }

    Ok(())
}

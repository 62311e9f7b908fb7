//! Command execution
//!
//! Loads settings, selects the stage and runs the requested workflow.

use std::io::Write;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crate::application::{Orchestrator, StageSelector, StepContext};
use crate::config::{LoadedSettings, SettingsPaths};
use crate::error::StagehandResult;
use crate::ui::UiContext;

use super::cli::Cli;
use super::factory::{self, Transport};
use super::output;

pub fn execute(cli: &Cli, ui: &UiContext, interrupted: Arc<AtomicBool>) -> StagehandResult<()> {
    let paths = SettingsPaths::resolve(&cli.config_dir);
    let settings = LoadedSettings::load(&paths)?;
    report_warnings(&settings, ui);

    let mut selector = StageSelector::new(&settings.project);
    selector.select_preset(cli.stage.stage())?;
    let environment = selector.into_active()?;

    let Some(workflow) = cli.stage.workflow() else {
        if ui.json {
            println!("{}", output::environment_json(&environment));
        } else {
            print!("{}", output::render_environment(&environment, ui.palette()));
        }
        return Ok(());
    };

    let events = factory::create_event_sink(ui);
    let transport = if cli.dry_run {
        Transport::DryRun
    } else {
        Transport::Live
    };
    let mut session = factory::create_session(
        &environment,
        &settings.project,
        transport,
        events.clone(),
        ui.show_hidden(),
    );

    let context = StepContext {
        project: &settings.project,
        database: &settings.database,
        environment: &environment,
    };
    Orchestrator::new(context, events)
        .with_interrupt_flag(interrupted)
        .run(workflow, &mut session)
}

fn report_warnings(settings: &LoadedSettings, ui: &UiContext) {
    if ui.json {
        let mut stdout = std::io::stdout().lock();
        for warning in &settings.warnings {
            let _ = writeln!(stdout, "{}", output::warning_json(warning));
        }
    } else {
        for warning in &settings.warnings {
            eprintln!("{}", output::render_warning(warning, ui.palette()));
        }
    }
}

//! Console Event Sink
//!
//! Human-readable progress: one timestamped line when a step starts and one
//! when it finishes, plus command echo and output for streams that are not
//! hidden.

use std::io::{self, Write};
use std::sync::Mutex;

use crate::domain::ports::{WorkflowEvent, WorkflowEventSink};
use crate::domain::value_objects::OutputStream;
use crate::ui::theme::{colors, Palette};

type Clock = Box<dyn Fn() -> String + Send + Sync>;

pub struct ConsoleEventSink {
    writer: Mutex<Box<dyn Write + Send>>,
    palette: Palette,
    clock: Clock,
}

impl ConsoleEventSink {
    pub fn stdout(palette: Palette) -> Self {
        Self::with_writer(io::stdout(), palette)
    }

    pub fn with_writer<W: Write + Send + 'static>(writer: W, palette: Palette) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
            palette,
            clock: Box::new(|| chrono::Local::now().format("%H:%M:%S").to_string()),
        }
    }

    /// Replace the wall clock (tests)
    pub fn with_clock(mut self, clock: impl Fn() -> String + Send + Sync + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    fn write_line(&self, line: &str) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }

    fn timestamp(&self) -> String {
        self.palette.paint(&format!("({})", (self.clock)()), colors::DIM)
    }

    fn format(&self, event: &WorkflowEvent) -> Option<String> {
        let p = &self.palette;
        match event {
            WorkflowEvent::Started {
                workflow,
                stage,
                destination,
            } => Some(format!(
                "{} {} {} {}",
                p.remote_icon(),
                p.paint(workflow, colors::INFO),
                stage,
                p.paint(&format!("({})", destination), colors::DIM)
            )),

            WorkflowEvent::StepStarted { description, .. } => Some(format!(
                "{} {}...",
                self.timestamp(),
                capitalize(description)
            )),

            WorkflowEvent::StepFinished { description, .. } => Some(format!(
                "{} ...finished {}.",
                self.timestamp(),
                description
            )),

            WorkflowEvent::CommandIssued {
                target,
                privileged,
                command,
            } => {
                let verb = if *privileged { "sudo" } else { "run" };
                Some(format!("[{}] {}: {}", target, verb, command))
            }

            WorkflowEvent::CommandOutput {
                target,
                stream,
                text,
            } => {
                let label = match stream {
                    OutputStream::Stderr => "err",
                    _ => "out",
                };
                let lines: Vec<String> = text
                    .lines()
                    .map(|line| format!("[{}] {}: {}", target, label, line))
                    .collect();
                Some(lines.join("\n"))
            }

            WorkflowEvent::Warning { message } => Some(format!(
                "{} {}",
                p.paint(p.warning_icon(), colors::WARNING),
                p.paint(&format!("Warning: {}", message), colors::WARNING)
            )),

            WorkflowEvent::Completed { workflow, elapsed } => Some(format!(
                "{} {} {}",
                p.paint(p.success_icon(), colors::SUCCESS),
                p.paint(&format!("{} finished.", capitalize(workflow)), colors::SUCCESS),
                p.paint(&format!("({:.1}s)", elapsed.as_secs_f64()), colors::DIM)
            )),

            // The error itself is printed by the caller
            WorkflowEvent::Aborted { .. } => None,
        }
    }
}

impl WorkflowEventSink for ConsoleEventSink {
    fn on_event(&self, event: WorkflowEvent) {
        if let Some(line) = self.format(&event) {
            self.write_line(&line);
        }
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

//! Event handling and progress display

use bankers_events::{AppEvent, EvaluationEvent, EventMessage, GeneralEvent};
use console::{style, Term};
use tracing::Level;

use crate::logging::log_event_with_tracing;

/// Event handler for progress display and user feedback
pub struct EventHandler {
    colors_enabled: bool,
    /// Most verbose level shown on stderr
    max_level: Level,
    /// Nothing but the final JSON may reach the terminal
    quiet: bool,
    term: Term,
}

impl EventHandler {
    /// Create new event handler
    pub fn new(colors_enabled: bool, debug_enabled: bool, quiet: bool) -> Self {
        Self {
            colors_enabled,
            max_level: if debug_enabled {
                Level::DEBUG
            } else {
                Level::WARN
            },
            quiet,
            term: Term::stderr(),
        }
    }

    /// Handle incoming event
    pub fn handle_event(&mut self, message: EventMessage) {
        log_event_with_tracing(&message);

        // tracing orders levels by verbosity, so "greater" means noisier
        if self.quiet || message.meta.tracing_level() > self.max_level {
            return;
        }

        match message.event {
            AppEvent::Evaluation(event) => self.handle_evaluation(event),
            AppEvent::General(event) => self.handle_general(event),
        }
    }

    fn handle_evaluation(&self, event: EvaluationEvent) {
        match event {
            EvaluationEvent::Started {
                processes,
                resources,
                order,
            } => {
                self.show_status(&format!(
                    "Checking {processes} processes over {resources} resources ({order} scan)"
                ));
            }
            EvaluationEvent::PassStarted { pass } => {
                self.show_status(&format!("Pass {pass}"));
            }
            EvaluationEvent::ProcessGranted {
                process,
                work_after,
                ..
            } => {
                self.show_status(&format!(
                    "  {process} finished, work is now {}",
                    join(&work_after)
                ));
            }
            EvaluationEvent::Stalled { pass, blocked } => {
                let blocked: Vec<String> = blocked.iter().map(ToString::to_string).collect();
                self.show_warning(&format!(
                    "Pass {pass} granted nothing; blocked: {}",
                    blocked.join(" ")
                ));
            }
            EvaluationEvent::SequenceRejected { failure } => {
                self.show_warning(&failure.message);
            }
            _ => {}
        }
    }

    fn handle_general(&self, event: GeneralEvent) {
        match event {
            GeneralEvent::Warning { message, .. } => self.show_warning(&message),
            GeneralEvent::Error { message, .. } => self.show_error(&message),
            GeneralEvent::DebugLog { message, .. } => {
                self.show_status(&message);
            }
            _ => {}
        }
    }

    fn show_status(&self, message: &str) {
        let _ = self.term.write_line(message);
    }

    fn show_warning(&self, message: &str) {
        let line = if self.colors_enabled {
            format!("{} {message}", style("warning:").yellow().bold())
        } else {
            format!("warning: {message}")
        };
        let _ = self.term.write_line(&line);
    }

    fn show_error(&self, message: &str) {
        let line = if self.colors_enabled {
            format!("{} {message}", style("error:").red().bold())
        } else {
            format!("error: {message}")
        };
        let _ = self.term.write_line(&line);
    }
}

fn join(values: &[u64]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

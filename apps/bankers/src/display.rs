//! Output rendering and formatting

use bankers_ops::{CheckReport, GrantStep, OperationResult, SafetyOutcome, VerifyReport};
use bankers_types::{ColorChoice, OutputFormat, ProcessId};
use comfy_table::{presets::UTF8_FULL, Attribute, Cell, ContentArrangement, Table};
use console::{Style, Term};
use std::io;

/// Output renderer for CLI results
#[derive(Clone)]
pub struct OutputRenderer {
    /// JSON document, boxed tables, or bare lines
    format: OutputFormat,
    /// Color configuration
    color_choice: ColorChoice,
    /// Terminal instance
    term: Term,
}

impl OutputRenderer {
    /// Create new output renderer
    pub fn new(format: OutputFormat, color_choice: ColorChoice) -> Self {
        Self {
            format,
            color_choice,
            term: Term::stdout(),
        }
    }

    /// Render operation result
    pub fn render_result(&self, result: &OperationResult) -> io::Result<()> {
        if self.format == OutputFormat::Json {
            self.render_json(result)
        } else {
            self.render_text(result)
        }
    }

    /// Whether ANSI styling should be applied to stdout
    pub fn colors_enabled(&self) -> bool {
        if self.format != OutputFormat::Tty {
            return false;
        }
        match self.color_choice {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => self.term.features().colors_supported(),
        }
    }

    fn render_json(&self, result: &OperationResult) -> io::Result<()> {
        let json = result.to_json().map_err(io::Error::other)?;
        self.term.write_line(&json)
    }

    fn render_text(&self, result: &OperationResult) -> io::Result<()> {
        match result {
            OperationResult::Check(report) => self.render_check(report),
            OperationResult::Verify(report) => self.render_verify(report),
            OperationResult::Template(toml) => self.term.write_str(toml),
        }
    }

    fn render_check(&self, report: &CheckReport) -> io::Result<()> {
        match &report.outcome {
            SafetyOutcome::Safe {
                sequence,
                final_resources,
            } => {
                self.term.write_line(&self.verdict(true))?;
                self.term.write_line("Safe sequence:")?;
                self.term.write_line(&processes(sequence))?;
                self.term.write_line("Final Available Resources:")?;
                self.term.write_line(&vector(final_resources))?;
            }
            SafetyOutcome::Unsafe { finished, blocked } => {
                self.term.write_line(&self.verdict(false))?;
                if !finished.is_empty() {
                    self.term
                        .write_line(&format!("Could finish: {}", processes(finished)))?;
                }
                self.term.write_line("Blocked processes:")?;
                self.render_blocked(report, blocked)?;
            }
        }

        if let Some(steps) = &report.steps {
            self.render_steps(steps)?;
        }
        Ok(())
    }

    fn render_blocked(&self, report: &CheckReport, blocked: &[ProcessId]) -> io::Result<()> {
        let need = |process: &ProcessId| {
            report
                .need
                .iter_rows()
                .nth(process.index())
                .map_or_else(|| "-".to_string(), vector)
        };

        if self.format == OutputFormat::Plain {
            for process in blocked {
                self.term
                    .write_line(&format!("{process} need: {}", need(process)))?;
            }
        } else {
            let mut table = self.table();
            table.set_header(vec![
                Cell::new("Process").add_attribute(Attribute::Bold),
                Cell::new("Need").add_attribute(Attribute::Bold),
            ]);
            for process in blocked {
                table.add_row(vec![Cell::new(process), Cell::new(need(process))]);
            }
            self.term.write_line(&table.to_string())?;
        }
        self.term.write_line(&format!(
            "Initially available: {}",
            vector(&report.available)
        ))
    }

    fn render_steps(&self, steps: &[GrantStep]) -> io::Result<()> {
        if self.format == OutputFormat::Plain {
            for step in steps {
                self.term.write_line(&format!(
                    "pass {} {}: need {}, work {} -> {}",
                    step.pass,
                    step.process,
                    vector(&step.need),
                    vector(&step.work_before),
                    vector(&step.work_after),
                ))?;
            }
            return Ok(());
        }

        let mut table = self.table();
        table.set_header(vec![
            Cell::new("Pass").add_attribute(Attribute::Bold),
            Cell::new("Process").add_attribute(Attribute::Bold),
            Cell::new("Need").add_attribute(Attribute::Bold),
            Cell::new("Work before").add_attribute(Attribute::Bold),
            Cell::new("Work after").add_attribute(Attribute::Bold),
        ]);
        for step in steps {
            table.add_row(vec![
                Cell::new(step.pass),
                Cell::new(step.process),
                Cell::new(vector(&step.need)),
                Cell::new(vector(&step.work_before)),
                Cell::new(vector(&step.work_after)),
            ]);
        }
        self.term.write_line(&table.to_string())
    }

    fn render_verify(&self, report: &VerifyReport) -> io::Result<()> {
        let sequence = processes(&report.sequence);
        match (&report.violation, &report.final_resources) {
            (None, Some(final_resources)) => {
                let ok = self.paint(Style::new().green().bold(), "[OK]");
                self.term
                    .write_line(&format!("{ok} {sequence} is a safe sequence."))?;
                self.term.write_line("Final Available Resources:")?;
                self.term.write_line(&vector(final_resources))
            }
            (Some(violation), _) => {
                let failed = self.paint(Style::new().red().bold(), "[FAILED]");
                self.term
                    .write_line(&format!("{failed} {sequence} is not a safe sequence."))?;
                self.term.write_line(&format!("  {violation}"))
            }
            (None, None) => Ok(()),
        }
    }

    fn verdict(&self, safe: bool) -> String {
        if safe {
            self.paint(Style::new().green(), "System is in a safe state.")
        } else {
            self.paint(Style::new().red(), "System is in an unsafe state.")
        }
    }

    fn paint(&self, style: Style, text: &str) -> String {
        if self.colors_enabled() {
            style.apply_to(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn table(&self) -> Table {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);
        if !self.colors_enabled() {
            table.force_no_tty();
        }
        table
    }
}

fn processes(sequence: &[ProcessId]) -> String {
    sequence
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn vector(values: &[u64]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

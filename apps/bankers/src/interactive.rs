//! Prompt-driven entry of a state on stdin

use bankers_errors::InputError;
use bankers_snapshot::StateSnapshot;
use std::collections::VecDeque;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::error::CliError;

/// Reads whitespace separated integers, pulling new lines from stdin on demand
struct Prompter {
    lines: Lines<BufReader<Stdin>>,
    pending: VecDeque<String>,
    position: usize,
    /// Prompts go to stderr when stdout is reserved for JSON
    to_stderr: bool,
}

impl Prompter {
    fn new(to_stderr: bool) -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
            pending: VecDeque::new(),
            position: 0,
            to_stderr,
        }
    }

    fn prompt(&self, text: &str, newline: bool) -> Result<(), CliError> {
        let sep = if newline { "\n" } else { "" };
        if self.to_stderr {
            let mut err = std::io::stderr().lock();
            write!(err, "{text}{sep}")?;
            err.flush()?;
        } else {
            let mut out = std::io::stdout().lock();
            write!(out, "{text}{sep}")?;
            out.flush()?;
        }
        Ok(())
    }

    async fn next_token(&mut self, expected: &str) -> Result<String, CliError> {
        while self.pending.is_empty() {
            let Some(line) = self.lines.next_line().await? else {
                return Err(InputError::UnexpectedEnd {
                    expected: expected.to_string(),
                }
                .into());
            };
            self.pending.extend(line.split_whitespace().map(str::to_string));
        }
        self.position += 1;
        Ok(self.pending.pop_front().unwrap_or_default())
    }

    async fn next_int<T: std::str::FromStr>(&mut self, expected: &str) -> Result<T, CliError> {
        let token = self.next_token(expected).await?;
        token.parse().map_err(|_| {
            InputError::InvalidToken {
                token,
                position: self.position,
            }
            .into()
        })
    }

    async fn count(&mut self, expected: &str) -> Result<usize, CliError> {
        let count = self.next_int(expected).await?;
        bankers_snapshot::check_dimension(count, self.position)?;
        Ok(count)
    }

    async fn matrix(
        &mut self,
        name: &str,
        rows: usize,
        cols: usize,
    ) -> Result<Vec<Vec<i64>>, CliError> {
        let mut matrix = Vec::new();
        for i in 0..rows {
            let mut row = Vec::new();
            for j in 0..cols {
                row.push(self.next_int(&format!("{name}[{i}][{j}]")).await?);
            }
            matrix.push(row);
        }
        Ok(matrix)
    }
}

/// Ask for counts, the maximum and allocation matrices, and the available
/// vector, in that order
pub async fn read_snapshot(to_stderr: bool) -> Result<StateSnapshot, CliError> {
    let mut prompter = Prompter::new(to_stderr);

    prompter.prompt("Enter number of processes: ", false)?;
    let processes = prompter.count("process count").await?;
    prompter.prompt("Enter number of resources: ", false)?;
    let resources = prompter.count("resource count").await?;

    prompter.prompt("Enter the Maximum resource matrix:", true)?;
    let maximum = prompter.matrix("maximum", processes, resources).await?;
    prompter.prompt("Enter the Allocation matrix:", true)?;
    let allocation = prompter.matrix("allocation", processes, resources).await?;

    prompter.prompt("Enter the Available resources:", true)?;
    let mut available = Vec::new();
    for j in 0..resources {
        available.push(prompter.next_int(&format!("available[{j}]")).await?);
    }

    Ok(StateSnapshot {
        processes: Some(processes),
        resources: Some(resources),
        maximum,
        allocation,
        available,
    })
}

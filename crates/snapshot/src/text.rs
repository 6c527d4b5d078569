//! Whitespace separated console format
//!
//! ```text
//! 5 3            processes, resources
//! 7 5 3 ...      maximum, row-major
//! 0 1 0 ...      allocation, row-major
//! 3 3 2          available
//! ```

use bankers_errors::InputError;
use bankers_types::ProcessId;
use std::str::FromStr;

use crate::StateSnapshot;

/// Largest process or resource count accepted from a text snapshot
///
/// Rows are materialised before the evaluator sees them, and a zero-width
/// row consumes no input, so the counts themselves must be bounded.
pub const MAX_DIMENSION: usize = 65_536;

struct Tokens<'a> {
    inner: std::iter::Enumerate<std::str::SplitWhitespace<'a>>,
}

impl<'a> Tokens<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            inner: input.split_whitespace().enumerate(),
        }
    }

    fn next<T: FromStr>(&mut self, expected: impl FnOnce() -> String) -> Result<T, InputError> {
        let (index, token) = self.inner.next().ok_or_else(|| InputError::UnexpectedEnd {
            expected: expected(),
        })?;
        token.parse().map_err(|_| InputError::InvalidToken {
            token: token.to_string(),
            position: index + 1,
        })
    }

    fn count(&mut self, what: &str) -> Result<usize, InputError> {
        let position = self.inner.clone().next().map_or(0, |(index, _)| index + 1);
        let count: usize = self.next(|| what.to_string())?;
        check_dimension(count, position)?;
        Ok(count)
    }

    fn matrix(
        &mut self,
        name: &str,
        rows: usize,
        cols: usize,
    ) -> Result<Vec<Vec<i64>>, InputError> {
        let mut matrix = Vec::new();
        for i in 0..rows {
            let mut row = Vec::new();
            for j in 0..cols {
                row.push(self.next(|| format!("{name}[{i}][{j}]"))?);
            }
            matrix.push(row);
        }
        Ok(matrix)
    }
}

/// Reject a process or resource count above [`MAX_DIMENSION`]
///
/// `position` is the 1-based token position reported in the error.
///
/// # Errors
///
/// Returns [`InputError::InvalidToken`] when `count` is too large.
pub fn check_dimension(count: usize, position: usize) -> Result<(), InputError> {
    if count > MAX_DIMENSION {
        return Err(InputError::InvalidToken {
            token: count.to_string(),
            position,
        });
    }
    Ok(())
}

/// Parse the console format into a snapshot
///
/// # Errors
///
/// Returns an [`InputError`] on non-integer tokens, negative counts or counts
/// above [`MAX_DIMENSION`], missing values, or tokens after the available
/// vector.
pub fn parse_text(input: &str) -> Result<StateSnapshot, InputError> {
    let mut tokens = Tokens::new(input);
    let processes = tokens.count("process count")?;
    let resources = tokens.count("resource count")?;
    let maximum = tokens.matrix("maximum", processes, resources)?;
    let allocation = tokens.matrix("allocation", processes, resources)?;
    let available = (0..resources)
        .map(|j| tokens.next(|| format!("available[{j}]")))
        .collect::<Result<Vec<_>, _>>()?;

    if let Some((index, _)) = tokens.inner.next() {
        return Err(InputError::TrailingInput {
            position: index + 1,
        });
    }

    Ok(StateSnapshot {
        processes: Some(processes),
        resources: Some(resources),
        maximum,
        allocation,
        available,
    })
}

/// Parse a process order such as `1,3,4,0,2` or `P1 P3 P4 P0 P2`
///
/// # Errors
///
/// Returns [`InputError::InvalidSequence`] if any entry is not a process
/// index.
pub fn parse_sequence(input: &str) -> Result<Vec<ProcessId>, InputError> {
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<ProcessId>()
                .map_err(|_| InputError::InvalidSequence {
                    input: input.to_string(),
                })
        })
        .collect()
}

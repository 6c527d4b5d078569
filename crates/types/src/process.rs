//! Process identifiers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Index of a process in the allocation state
///
/// Displays as `P<index>`, the way safe sequences are usually written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProcessId(usize);

impl ProcessId {
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for ProcessId {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

impl FromStr for ProcessId {
    type Err = std::num::ParseIntError;

    /// Accepts both `3` and `P3`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let digits = s
            .strip_prefix('P')
            .or_else(|| s.strip_prefix('p'))
            .unwrap_or(s);
        digits.parse().map(Self)
    }
}

//! Allocation state validation error types
//!
//! These are raised once, when a safety evaluator is constructed. A state
//! that passes construction can always be searched to completion.

use std::borrow::Cow;
use std::fmt;

use crate::UserFacingError;
use thiserror::Error;

/// Which input block an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MatrixKind {
    Maximum,
    Allocation,
    Available,
}

impl fmt::Display for MatrixKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Maximum => write!(f, "maximum matrix"),
            Self::Allocation => write!(f, "allocation matrix"),
            Self::Available => write!(f, "available vector"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum StateError {
    #[error("malformed {matrix}{}: expected {expected} entries, found {found}", row_suffix(.row))]
    MalformedDimensions {
        matrix: MatrixKind,
        row: Option<usize>,
        expected: usize,
        found: usize,
    },

    #[error("negative value {value} in {matrix}{}, column {column}", row_suffix(.row))]
    NegativeInput {
        matrix: MatrixKind,
        row: Option<usize>,
        column: usize,
        value: i64,
    },

    #[error(
        "process P{process} holds {allocated} units of resource {resource} but declares a maximum of {maximum}"
    )]
    InvalidAllocation {
        process: usize,
        resource: usize,
        allocated: i64,
        maximum: i64,
    },

    #[error("total supply of resource {resource} does not fit in 64 bits")]
    CapacityOverflow { resource: usize },
}

#[allow(clippy::ref_option)]
fn row_suffix(row: &Option<usize>) -> String {
    row.map(|r| format!(" row {r}")).unwrap_or_default()
}

impl UserFacingError for StateError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::MalformedDimensions { .. } => Some(
                "Every matrix needs one row per process and one column per resource type.",
            ),
            Self::NegativeInput { .. } => Some("Resource counts must be zero or greater."),
            Self::InvalidAllocation { .. } => {
                Some("A process cannot hold more than its declared maximum; fix the allocation or raise the maximum.")
            }
            Self::CapacityOverflow { .. } => None,
        }
    }

    fn user_code(&self) -> Option<&'static str> {
        Some(match self {
            Self::MalformedDimensions { .. } => "state.malformed_dimensions",
            Self::NegativeInput { .. } => "state.negative_input",
            Self::InvalidAllocation { .. } => "state.invalid_allocation",
            Self::CapacityOverflow { .. } => "state.capacity_overflow",
        })
    }
}

#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! High-level operations orchestration for bankers
//!
//! This crate sits between the CLI and the evaluator: it resolves where a
//! snapshot comes from, applies the configured scan order, forwards search
//! progress as events, and packages the results for rendering.

mod check;
mod context;
mod types;
mod verify;

pub use check::check;
pub use context::{OpsContextBuilder, OpsCtx};
pub use types::{CheckReport, SnapshotSource, VerifyReport};
pub use verify::verify;

pub use bankers_safety::{GrantStep, SafetyOutcome};

use bankers_errors::Error;

/// Operation result that can be serialized for CLI output
#[derive(Clone, Debug, serde::Serialize)]
#[serde(tag = "type", content = "data")]
pub enum OperationResult {
    /// Safety verdict for a snapshot
    Check(CheckReport),
    /// Replay of a proposed sequence
    Verify(VerifyReport),
    /// Sample snapshot, rendered as TOML
    Template(String),
}

impl OperationResult {
    /// Convert to JSON string
    ///
    /// # Errors
    ///
    /// Returns an error if the result cannot be serialized.
    pub fn to_json(&self) -> Result<String, Error> {
        serde_json::to_string_pretty(self).map_err(|e| {
            bankers_errors::OpsError::SerializationError {
                message: e.to_string(),
            }
            .into()
        })
    }

    /// Whether the checked state or sequence was found safe
    #[must_use]
    pub fn is_success(&self) -> bool {
        match self {
            OperationResult::Check(report) => report.outcome.is_safe(),
            OperationResult::Verify(report) => report.violation.is_none(),
            OperationResult::Template(_) => true,
        }
    }
}

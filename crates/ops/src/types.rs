//! Report types returned by operations

use bankers_errors::SequenceError;
use bankers_safety::{GrantStep, Matrix, ProcessId, SafetyOutcome, ScanOrder};
use bankers_snapshot::StateSnapshot;
use serde::Serialize;
use std::path::PathBuf;

/// Where an operation reads its snapshot from
#[derive(Debug, Clone)]
pub enum SnapshotSource {
    /// A file; `None` format means guess from the extension
    File {
        path: PathBuf,
        format: Option<bankers_types::InputFormat>,
    },
    /// Standard input, text format unless told otherwise
    Stdin {
        format: Option<bankers_types::InputFormat>,
    },
    /// Already parsed, e.g. from the interactive prompts
    Inline(StateSnapshot),
}

/// Result of `check`
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub processes: usize,
    pub resources: usize,
    pub order: ScanOrder,
    pub available: Vec<u64>,
    pub need: Matrix,
    pub outcome: SafetyOutcome,
    /// Grant-by-grant trajectory, when tracing was requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<GrantStep>>,
}

/// Result of `verify`
#[derive(Debug, Clone, Serialize)]
pub struct VerifyReport {
    pub sequence: Vec<ProcessId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_resources: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub violation: Option<SequenceError>,
}

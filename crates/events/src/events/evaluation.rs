use bankers_types::{ProcessId, ScanOrder};
use serde::{Deserialize, Serialize};

use super::FailureContext;

/// Progress of a safety evaluation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EvaluationEvent {
    /// Snapshot validated, search about to run
    Started {
        processes: usize,
        resources: usize,
        order: ScanOrder,
    },

    /// A new scan over unfinished processes
    PassStarted { pass: usize },

    /// A process was simulated to completion
    ProcessGranted {
        pass: usize,
        process: ProcessId,
        work_after: Vec<u64>,
    },

    /// A full scan granted nothing
    Stalled {
        pass: usize,
        blocked: Vec<ProcessId>,
    },

    /// Search finished
    Completed { safe: bool, granted: usize },

    /// Snapshot failed validation before any search ran
    Rejected { failure: FailureContext },

    /// A proposed sequence was replayed successfully
    SequenceAccepted { length: usize },

    /// A proposed sequence failed replay
    SequenceRejected { failure: FailureContext },
}

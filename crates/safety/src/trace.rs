//! Resource trajectory of a safety search

use bankers_types::{ProcessId, ScanOrder};
use serde::Serialize;

use crate::search::{SafetyOutcome, SearchObserver};
use crate::SafetyEvaluator;

/// One simulated completion
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GrantStep {
    /// Scan in which the grant happened (1-based)
    pub pass: usize,
    pub process: ProcessId,
    /// The process's remaining need at its turn
    pub need: Vec<u64>,
    pub work_before: Vec<u64>,
    /// `work_before` plus the process's allocation
    pub work_after: Vec<u64>,
}

/// Outcome of a search together with every grant it made
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SafetyTrace {
    pub order: ScanOrder,
    pub outcome: SafetyOutcome,
    pub steps: Vec<GrantStep>,
    pub passes: usize,
}

#[derive(Default)]
struct Recorder {
    steps: Vec<GrantStep>,
    passes: usize,
}

impl SearchObserver for Recorder {
    fn on_pass_started(&mut self, pass: usize) {
        self.passes = pass;
    }

    fn on_grant(&mut self, step: &GrantStep) {
        self.steps.push(step.clone());
    }
}

impl SafetyEvaluator {
    /// Run the search and keep the full resource trajectory
    #[must_use]
    pub fn trace(&self, order: ScanOrder) -> SafetyTrace {
        let mut recorder = Recorder::default();
        let outcome = self.evaluate_with(order, &mut recorder);
        SafetyTrace {
            order,
            outcome,
            steps: recorder.steps,
            passes: recorder.passes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_chain_work_vectors() {
        let e = SafetyEvaluator::new(
            3,
            2,
            &[vec![1, 1], vec![2, 1], vec![2, 3]],
            &[vec![1, 0], vec![1, 1], vec![0, 2]],
            &[0, 1],
        )
        .unwrap();
        let trace = e.trace(ScanOrder::Sweep);

        assert!(trace.outcome.is_safe());
        assert_eq!(trace.steps.len(), 3);
        assert_eq!(trace.steps[0].work_before, vec![0, 1]);
        for pair in trace.steps.windows(2) {
            assert_eq!(pair[0].work_after, pair[1].work_before);
        }
        assert_eq!(
            trace.steps.last().map(|s| s.work_after.clone()),
            trace.outcome.final_resources().map(<[u64]>::to_vec)
        );
    }

    #[test]
    fn test_unsafe_trace_keeps_partial_progress() {
        let e = SafetyEvaluator::new(2, 1, &[vec![1], vec![4]], &[vec![0], vec![1]], &[1])
            .unwrap();
        let trace = e.trace(ScanOrder::RestartAfterGrant);
        assert!(!trace.outcome.is_safe());
        assert_eq!(trace.steps.len(), 1);
        assert_eq!(trace.steps[0].process, ProcessId::new(0));
        assert_eq!(trace.passes, 2);
    }
}

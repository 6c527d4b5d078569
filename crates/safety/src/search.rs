//! The greedy safety search
//!
//! Work starts as a copy of the free resources. Any unfinished process whose
//! whole remaining need fits in work is allowed to run to completion and
//! hand its allocation back. The search ends when every process has
//! finished (safe) or a full scan grants nothing (unsafe).

use bankers_types::{ProcessId, ScanOrder};
use serde::Serialize;
use tracing::{debug, trace};

use crate::trace::GrantStep;
use crate::SafetyEvaluator;

/// Hooks into the progress of a safety search
///
/// All methods default to doing nothing.
pub trait SearchObserver {
    /// A new scan over the unfinished processes begins (1-based)
    fn on_pass_started(&mut self, _pass: usize) {}

    /// A process was found grantable and simulated to completion
    fn on_grant(&mut self, _step: &GrantStep) {}

    /// A full scan granted nothing; the state is unsafe
    fn on_stall(&mut self, _pass: usize, _blocked: &[ProcessId]) {}
}

/// Observer that ignores every callback
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {}

/// Result of a safety search
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum SafetyOutcome {
    /// Every process can finish in `sequence` order
    Safe {
        sequence: Vec<ProcessId>,
        final_resources: Vec<u64>,
    },
    /// The search stalled
    ///
    /// `finished` is the progress made before the stall. It is not a safe
    /// sequence; `blocked` lists the processes that could never be granted.
    Unsafe {
        finished: Vec<ProcessId>,
        blocked: Vec<ProcessId>,
    },
}

impl SafetyOutcome {
    #[must_use]
    pub fn is_safe(&self) -> bool {
        matches!(self, Self::Safe { .. })
    }

    /// The safe sequence, present only when the state is safe
    #[must_use]
    pub fn sequence(&self) -> Option<&[ProcessId]> {
        match self {
            Self::Safe { sequence, .. } => Some(sequence),
            Self::Unsafe { .. } => None,
        }
    }

    /// Work vector after every process has finished, present only when safe
    #[must_use]
    pub fn final_resources(&self) -> Option<&[u64]> {
        match self {
            Self::Safe {
                final_resources, ..
            } => Some(final_resources),
            Self::Unsafe { .. } => None,
        }
    }
}

impl SafetyEvaluator {
    /// Whether some completion order lets every process finish
    #[must_use]
    pub fn is_safe(&self) -> bool {
        self.evaluate().is_safe()
    }

    /// Run the search with the default scan order
    #[must_use]
    pub fn evaluate(&self) -> SafetyOutcome {
        self.evaluate_with(ScanOrder::default(), &mut NoopObserver)
    }

    /// Run the search, reporting progress to `observer`
    ///
    /// Scratch state lives in this call only, so repeated calls return
    /// identical results. Within a scan processes are visited in ascending
    /// index order; `order` decides whether a grant ends the scan.
    pub fn evaluate_with<O>(&self, order: ScanOrder, observer: &mut O) -> SafetyOutcome
    where
        O: SearchObserver + ?Sized,
    {
        let num_processes = self.num_processes();
        let mut work = self.available().to_vec();
        let mut finished = vec![false; num_processes];
        let mut sequence = Vec::with_capacity(num_processes);
        let mut pass = 0;

        while sequence.len() < num_processes {
            pass += 1;
            observer.on_pass_started(pass);
            let mut granted = false;

            for (i, done) in finished.iter_mut().enumerate() {
                if *done || !self.fits(i, &work) {
                    continue;
                }

                let work_before = work.clone();
                for (slot, held) in work.iter_mut().zip(self.allocation().row(i)) {
                    *slot += held;
                }
                *done = true;
                granted = true;

                let process = ProcessId::new(i);
                sequence.push(process);
                trace!(pass, %process, work = ?work, "process granted");
                observer.on_grant(&GrantStep {
                    pass,
                    process,
                    need: self.need().row(i).to_vec(),
                    work_before,
                    work_after: work.clone(),
                });

                if order == ScanOrder::RestartAfterGrant {
                    break;
                }
            }

            if !granted {
                let blocked: Vec<ProcessId> = finished
                    .iter()
                    .enumerate()
                    .filter(|(_, done)| !**done)
                    .map(|(i, _)| ProcessId::new(i))
                    .collect();
                debug!(
                    pass,
                    finished = sequence.len(),
                    blocked = blocked.len(),
                    "safety search stalled"
                );
                observer.on_stall(pass, &blocked);
                return SafetyOutcome::Unsafe {
                    finished: sequence,
                    blocked,
                };
            }
        }

        debug!(passes = pass, processes = num_processes, "safe sequence found");
        SafetyOutcome::Safe {
            sequence,
            final_resources: work,
        }
    }

    /// Whether process `i`'s whole remaining need fits in `work`
    pub(crate) fn fits(&self, i: usize, work: &[u64]) -> bool {
        self.need()
            .row(i)
            .iter()
            .zip(work)
            .all(|(need, free)| need <= free)
    }
}

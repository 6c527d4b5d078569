//! Replaying a caller-supplied completion order

use bankers_errors::SequenceError;
use bankers_types::ProcessId;

use crate::SafetyEvaluator;

impl SafetyEvaluator {
    /// Check that `sequence` is a valid safe sequence for this state
    ///
    /// Returns the work vector after the last process has finished.
    ///
    /// # Errors
    ///
    /// Returns a [`SequenceError`] if the sequence is not a permutation of
    /// all processes, or if some process's need exceeds the free resources
    /// at its turn.
    pub fn verify_sequence(&self, sequence: &[ProcessId]) -> Result<Vec<u64>, SequenceError> {
        let num_processes = self.num_processes();
        if sequence.len() != num_processes {
            return Err(SequenceError::WrongLength {
                expected: num_processes,
                found: sequence.len(),
            });
        }

        let mut seen = vec![false; num_processes];
        for (step, process) in sequence.iter().enumerate() {
            let i = process.index();
            match seen.get_mut(i) {
                None => return Err(SequenceError::UnknownProcess { step, process: i }),
                Some(true) => return Err(SequenceError::DuplicateProcess { step, process: i }),
                Some(flag) => *flag = true,
            }
        }

        let mut work = self.available().to_vec();
        for (step, process) in sequence.iter().enumerate() {
            let i = process.index();
            if let Some((resource, (&need, &free))) = self
                .need()
                .row(i)
                .iter()
                .zip(&work)
                .enumerate()
                .find(|(_, (need, free))| need > free)
            {
                return Err(SequenceError::NeedExceedsWork {
                    step,
                    process: i,
                    resource,
                    need,
                    work: free,
                });
            }
            for (slot, held) in work.iter_mut().zip(self.allocation().row(i)) {
                *slot += held;
            }
        }
        Ok(work)
    }
}

//! Integration tests for the safety evaluator

#[cfg(test)]
mod tests {
    use bankers_errors::StateError;
    use bankers_safety::*;

    fn classic_maximum() -> Vec<Vec<i64>> {
        vec![
            vec![7, 5, 3],
            vec![3, 2, 2],
            vec![9, 0, 2],
            vec![2, 2, 2],
            vec![4, 3, 3],
        ]
    }

    fn classic_allocation() -> Vec<Vec<i64>> {
        vec![
            vec![0, 1, 0],
            vec![2, 0, 0],
            vec![3, 0, 2],
            vec![2, 1, 1],
            vec![0, 0, 2],
        ]
    }

    fn classic(available: &[i64]) -> SafetyEvaluator {
        SafetyEvaluator::new(5, 3, &classic_maximum(), &classic_allocation(), available).unwrap()
    }

    fn indices(sequence: &[ProcessId]) -> Vec<usize> {
        sequence.iter().map(|p| p.index()).collect()
    }

    #[test]
    fn test_classic_state_is_safe() {
        let evaluator = classic(&[3, 3, 2]);
        assert!(evaluator.is_safe());

        let outcome = evaluator.evaluate();
        assert_eq!(indices(outcome.sequence().unwrap()), vec![1, 3, 4, 0, 2]);
        assert_eq!(outcome.final_resources(), Some(&[10, 5, 7][..]));
    }

    #[test]
    fn test_classic_state_restart_order() {
        let outcome = classic(&[3, 3, 2]).evaluate_with(ScanOrder::RestartAfterGrant, &mut NoopObserver);
        assert_eq!(indices(outcome.sequence().unwrap()), vec![1, 3, 0, 2, 4]);
        assert_eq!(outcome.final_resources(), Some(&[10, 5, 7][..]));
    }

    #[test]
    fn test_classic_state_without_free_resources_is_unsafe() {
        let evaluator = classic(&[0, 0, 0]);
        assert!(!evaluator.is_safe());

        let outcome = evaluator.evaluate();
        assert_eq!(outcome.sequence(), None);
        assert_eq!(outcome.final_resources(), None);
        match outcome {
            SafetyOutcome::Unsafe { finished, blocked } => {
                assert!(finished.is_empty());
                assert_eq!(indices(&blocked), vec![0, 1, 2, 3, 4]);
            }
            SafetyOutcome::Safe { .. } => panic!("expected an unsafe verdict"),
        }
    }

    #[test]
    fn test_repeated_queries_are_identical() {
        let evaluator = classic(&[3, 3, 2]);
        let first = evaluator.trace(ScanOrder::Sweep);
        for _ in 0..3 {
            assert_eq!(evaluator.trace(ScanOrder::Sweep), first);
        }
        assert_eq!(evaluator.available(), &[3, 3, 2]);
    }

    #[test]
    fn test_classic_trace() {
        let trace = classic(&[3, 3, 2]).trace(ScanOrder::Sweep);
        assert_eq!(trace.passes, 2);
        let first = &trace.steps[0];
        assert_eq!(first.process, ProcessId::new(1));
        assert_eq!(first.need, vec![1, 2, 2]);
        assert_eq!(first.work_before, vec![3, 3, 2]);
        assert_eq!(first.work_after, vec![5, 3, 2]);
        assert_eq!(
            trace.steps.iter().map(|s| s.pass).collect::<Vec<_>>(),
            vec![1, 1, 1, 2, 2]
        );
    }

    #[test]
    fn test_returned_sequence_verifies() {
        let evaluator = classic(&[3, 3, 2]);
        let outcome = evaluator.evaluate();
        let final_work = evaluator.verify_sequence(outcome.sequence().unwrap()).unwrap();
        assert_eq!(final_work, vec![10, 5, 7]);
    }

    #[test]
    fn test_over_allocation_is_rejected_not_masked() {
        let mut allocation = classic_allocation();
        allocation[0] = vec![8, 1, 0];
        let err = SafetyEvaluator::new(5, 3, &classic_maximum(), &allocation, &[3, 3, 2])
            .unwrap_err();
        assert!(matches!(
            err,
            StateError::InvalidAllocation {
                process: 0,
                resource: 0,
                ..
            }
        ));
    }

    #[test]
    fn test_evaluator_is_shareable_across_threads() {
        let evaluator = std::sync::Arc::new(classic(&[3, 3, 2]));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let evaluator = std::sync::Arc::clone(&evaluator);
                std::thread::spawn(move || evaluator.evaluate())
            })
            .collect();
        let expected = evaluator.evaluate();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    }
}

#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Deadlock-avoidance safety checks for bankers
//!
//! A [`SafetyEvaluator`] takes a snapshot of maximum claims, current
//! allocations and free resources, validates it once, and then answers
//! whether some completion order lets every process finish. Queries never
//! mutate the evaluator, so one instance can be shared across threads.
//!
//! ```
//! use bankers_safety::SafetyEvaluator;
//!
//! let maximum = vec![vec![7, 5, 3], vec![3, 2, 2], vec![9, 0, 2], vec![2, 2, 2], vec![4, 3, 3]];
//! let allocation = vec![vec![0, 1, 0], vec![2, 0, 0], vec![3, 0, 2], vec![2, 1, 1], vec![0, 0, 2]];
//! let evaluator = SafetyEvaluator::new(5, 3, &maximum, &allocation, &[3, 3, 2]).unwrap();
//!
//! let outcome = evaluator.evaluate();
//! let order: Vec<usize> = outcome.sequence().unwrap().iter().map(|p| p.index()).collect();
//! assert_eq!(order, vec![1, 3, 4, 0, 2]);
//! assert_eq!(outcome.final_resources(), Some(&[10, 5, 7][..]));
//! ```

mod evaluator;
mod search;
mod trace;
mod verify;

pub use evaluator::SafetyEvaluator;
pub use search::{NoopObserver, SafetyOutcome, SearchObserver};
pub use trace::{GrantStep, SafetyTrace};

pub use bankers_types::{Matrix, ProcessId, ScanOrder};

//! Construction and validation of allocation states

use bankers_errors::{MatrixKind, StateError};
use bankers_types::Matrix;
use tracing::debug;

/// Validated allocation state with its derived need matrix
///
/// All inputs are checked once in [`SafetyEvaluator::new`]; afterwards every
/// entry is a non-negative `u64`, every allocation is within its maximum, and
/// the total supply of each resource fits in a `u64`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafetyEvaluator {
    maximum: Matrix,
    allocation: Matrix,
    need: Matrix,
    available: Vec<u64>,
}

impl SafetyEvaluator {
    /// Validate a state and derive its need matrix
    ///
    /// # Errors
    ///
    /// - [`StateError::MalformedDimensions`] if a matrix or the available
    ///   vector does not match `num_processes` × `num_resources`
    /// - [`StateError::NegativeInput`] if any entry is negative
    /// - [`StateError::InvalidAllocation`] if a process holds more than its
    ///   declared maximum of some resource
    /// - [`StateError::CapacityOverflow`] if the total supply of a resource
    ///   does not fit in a `u64`
    pub fn new(
        num_processes: usize,
        num_resources: usize,
        maximum: &[Vec<i64>],
        allocation: &[Vec<i64>],
        available: &[i64],
    ) -> Result<Self, StateError> {
        check_shape(MatrixKind::Maximum, maximum, num_processes, num_resources)?;
        check_shape(
            MatrixKind::Allocation,
            allocation,
            num_processes,
            num_resources,
        )?;
        if available.len() != num_resources {
            return Err(StateError::MalformedDimensions {
                matrix: MatrixKind::Available,
                row: None,
                expected: num_resources,
                found: available.len(),
            });
        }

        let maximum = to_unsigned(MatrixKind::Maximum, maximum, num_resources)?;
        let allocation = to_unsigned(MatrixKind::Allocation, allocation, num_resources)?;
        let available = available
            .iter()
            .enumerate()
            .map(|(column, &value)| {
                u64::try_from(value).map_err(|_| StateError::NegativeInput {
                    matrix: MatrixKind::Available,
                    row: None,
                    column,
                    value,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        for i in 0..num_processes {
            for (j, (&held, &max)) in allocation.row(i).iter().zip(maximum.row(i)).enumerate() {
                if held > max {
                    return Err(StateError::InvalidAllocation {
                        process: i,
                        resource: j,
                        allocated: i64::try_from(held).unwrap_or(i64::MAX),
                        maximum: i64::try_from(max).unwrap_or(i64::MAX),
                    });
                }
            }
        }

        // Every process eventually hands its allocation back, so work never
        // exceeds this total; checking it here keeps the search overflow-free.
        for (j, &free) in available.iter().enumerate() {
            allocation
                .iter_rows()
                .try_fold(free, |acc, row| acc.checked_add(row[j]))
                .ok_or(StateError::CapacityOverflow { resource: j })?;
        }

        let need = Matrix::from_fn(num_processes, num_resources, |i, j| {
            maximum.row(i)[j] - allocation.row(i)[j]
        });

        debug!(
            processes = num_processes,
            resources = num_resources,
            "allocation state validated"
        );

        Ok(Self {
            maximum,
            allocation,
            need,
            available,
        })
    }

    /// Number of processes (P)
    #[must_use]
    pub fn num_processes(&self) -> usize {
        self.maximum.rows()
    }

    /// Number of resource types (R)
    #[must_use]
    pub fn num_resources(&self) -> usize {
        self.available.len()
    }

    #[must_use]
    pub fn maximum(&self) -> &Matrix {
        &self.maximum
    }

    #[must_use]
    pub fn allocation(&self) -> &Matrix {
        &self.allocation
    }

    /// Remaining claim of each process: `maximum - allocation`
    #[must_use]
    pub fn need(&self) -> &Matrix {
        &self.need
    }

    #[must_use]
    pub fn available(&self) -> &[u64] {
        &self.available
    }

    /// Free units plus everything currently allocated, per resource
    ///
    /// This is the work vector a safe search ends with.
    #[must_use]
    pub fn total_resources(&self) -> Vec<u64> {
        let mut total = self.available.clone();
        for row in self.allocation.iter_rows() {
            for (slot, held) in total.iter_mut().zip(row) {
                // bounded at construction
                *slot += held;
            }
        }
        total
    }
}

fn check_shape(
    matrix: MatrixKind,
    rows: &[Vec<i64>],
    num_processes: usize,
    num_resources: usize,
) -> Result<(), StateError> {
    if rows.len() != num_processes {
        return Err(StateError::MalformedDimensions {
            matrix,
            row: None,
            expected: num_processes,
            found: rows.len(),
        });
    }
    for (i, row) in rows.iter().enumerate() {
        if row.len() != num_resources {
            return Err(StateError::MalformedDimensions {
                matrix,
                row: Some(i),
                expected: num_resources,
                found: row.len(),
            });
        }
    }
    Ok(())
}

fn to_unsigned(
    matrix: MatrixKind,
    rows: &[Vec<i64>],
    num_resources: usize,
) -> Result<Matrix, StateError> {
    for (i, row) in rows.iter().enumerate() {
        if let Some((column, &value)) = row.iter().enumerate().find(|(_, v)| **v < 0) {
            return Err(StateError::NegativeInput {
                matrix,
                row: Some(i),
                column,
                value,
            });
        }
    }
    // sign checked above
    Ok(Matrix::from_fn(rows.len(), num_resources, |i, j| {
        rows[i][j].unsigned_abs()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classic() -> (Vec<Vec<i64>>, Vec<Vec<i64>>, Vec<i64>) {
        (
            vec![
                vec![7, 5, 3],
                vec![3, 2, 2],
                vec![9, 0, 2],
                vec![2, 2, 2],
                vec![4, 3, 3],
            ],
            vec![
                vec![0, 1, 0],
                vec![2, 0, 0],
                vec![3, 0, 2],
                vec![2, 1, 1],
                vec![0, 0, 2],
            ],
            vec![3, 3, 2],
        )
    }

    #[test]
    fn test_need_is_maximum_minus_allocation() {
        let (max, alloc, avail) = classic();
        let evaluator = SafetyEvaluator::new(5, 3, &max, &alloc, &avail).unwrap();
        assert_eq!(
            evaluator.need().to_rows(),
            vec![
                vec![7, 4, 3],
                vec![1, 2, 2],
                vec![6, 0, 0],
                vec![0, 1, 1],
                vec![4, 3, 1],
            ]
        );
        assert_eq!(evaluator.total_resources(), vec![10, 5, 7]);
    }

    #[test]
    fn test_rejects_wrong_process_count() {
        let (max, alloc, avail) = classic();
        let err = SafetyEvaluator::new(4, 3, &max, &alloc, &avail).unwrap_err();
        assert_eq!(
            err,
            StateError::MalformedDimensions {
                matrix: MatrixKind::Maximum,
                row: None,
                expected: 4,
                found: 5,
            }
        );
    }

    #[test]
    fn test_rejects_short_row() {
        let (max, mut alloc, avail) = classic();
        alloc[2].pop();
        let err = SafetyEvaluator::new(5, 3, &max, &alloc, &avail).unwrap_err();
        assert_eq!(
            err,
            StateError::MalformedDimensions {
                matrix: MatrixKind::Allocation,
                row: Some(2),
                expected: 3,
                found: 2,
            }
        );
    }

    #[test]
    fn test_rejects_wrong_available_length() {
        let (max, alloc, _) = classic();
        let err = SafetyEvaluator::new(5, 3, &max, &alloc, &[1, 2]).unwrap_err();
        assert!(matches!(
            err,
            StateError::MalformedDimensions {
                matrix: MatrixKind::Available,
                expected: 3,
                found: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_negative_entries() {
        let (mut max, alloc, avail) = classic();
        max[1][2] = -1;
        let err = SafetyEvaluator::new(5, 3, &max, &alloc, &avail).unwrap_err();
        assert_eq!(
            err,
            StateError::NegativeInput {
                matrix: MatrixKind::Maximum,
                row: Some(1),
                column: 2,
                value: -1,
            }
        );

        let (max, alloc, _) = classic();
        let err = SafetyEvaluator::new(5, 3, &max, &alloc, &[3, -3, 2]).unwrap_err();
        assert!(matches!(
            err,
            StateError::NegativeInput {
                matrix: MatrixKind::Available,
                row: None,
                column: 1,
                value: -3,
            }
        ));
    }

    #[test]
    fn test_rejects_allocation_above_maximum() {
        let (max, mut alloc, avail) = classic();
        alloc[3][0] = 3;
        let err = SafetyEvaluator::new(5, 3, &max, &alloc, &avail).unwrap_err();
        assert_eq!(
            err,
            StateError::InvalidAllocation {
                process: 3,
                resource: 0,
                allocated: 3,
                maximum: 2,
            }
        );
    }

    #[test]
    fn test_rejects_supply_overflow() {
        let max = vec![vec![i64::MAX], vec![i64::MAX], vec![i64::MAX]];
        let err = SafetyEvaluator::new(3, 1, &max, &max, &[i64::MAX]).unwrap_err();
        assert_eq!(err, StateError::CapacityOverflow { resource: 0 });
    }

    #[test]
    fn test_empty_state_is_valid() {
        let evaluator = SafetyEvaluator::new(0, 0, &[], &[], &[]).unwrap();
        assert_eq!(evaluator.num_processes(), 0);
        assert_eq!(evaluator.num_resources(), 0);
        assert!(evaluator.total_resources().is_empty());
    }
}

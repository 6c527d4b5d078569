//! Dense row-major matrix of resource unit counts
//!
//! Rows are processes, columns are resource types. The buffer is a single
//! `Vec<u64>` of `rows * cols` entries; a matrix with zero columns still
//! remembers how many rows it has.

use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};

/// Fixed-dimension matrix of unit counts
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<u64>,
}

impl Matrix {
    /// Create a zero-filled matrix
    #[must_use]
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0; rows * cols],
        }
    }

    /// Build a matrix by evaluating `f(row, col)` for every cell
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> u64) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for j in 0..cols {
                data.push(f(i, j));
            }
        }
        Self { rows, cols, data }
    }

    /// Number of rows (processes)
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (resource types)
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Borrow a single row
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of bounds.
    #[must_use]
    pub fn row(&self, row: usize) -> &[u64] {
        assert!(row < self.rows, "row {row} out of bounds ({})", self.rows);
        let start = row * self.cols;
        &self.data[start..start + self.cols]
    }

    /// Read a single cell
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<u64> {
        if row < self.rows && col < self.cols {
            Some(self.data[row * self.cols + col])
        } else {
            None
        }
    }

    /// Iterate over rows in index order
    pub fn iter_rows(&self) -> impl Iterator<Item = &[u64]> + '_ {
        (0..self.rows).map(move |i| self.row(i))
    }

    /// Copy the matrix out as nested vectors
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<u64>> {
        self.iter_rows().map(<[u64]>::to_vec).collect()
    }
}

impl Serialize for Matrix {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.rows))?;
        for row in self.iter_rows() {
            seq.serialize_element(row)?;
        }
        seq.end()
    }
}

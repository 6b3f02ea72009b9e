//! Compressed sparse row storage for feature blocks and the fused matrix.
//!
//! Every encoder output is stored as a [`SparseMatrix`]. Dense blocks
//! (standardized numeric columns) go through [`SparseMatrix::from_dense`],
//! which drops explicit zeros, so a single representation flows through
//! fusion and the index.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Row-major sparse matrix in CSR layout.
///
/// Within a row, column indices are strictly increasing and no stored value
/// is exactly `0.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SparseMatrix {
    n_cols: usize,
    indptr: Vec<usize>,
    indices: Vec<usize>,
    values: Vec<f64>,
}

/// Borrowed view of one matrix row.
#[derive(Debug, Clone, Copy)]
pub struct SparseRow<'a> {
    pub indices: &'a [usize],
    pub values: &'a [f64],
}

impl SparseMatrix {
    /// Empty matrix with `n_cols` columns and no rows.
    #[inline]
    #[must_use]
    pub fn new(n_cols: usize) -> Self {
        Self {
            n_cols,
            indptr: vec![0],
            indices: Vec::new(),
            values: Vec::new(),
        }
    }

    /// All-zero matrix of the given shape.
    #[must_use]
    pub fn zeros(n_rows: usize, n_cols: usize) -> Self {
        Self {
            n_cols,
            indptr: vec![0; n_rows + 1],
            indices: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Build from dense rows, each of which must have exactly `n_cols` values.
    pub fn from_dense(rows: &[Vec<f64>], n_cols: usize) -> Result<Self> {
        let mut matrix = Self::new(n_cols);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n_cols {
                return Err(Error::InvalidInput(format!(
                    "dense row {} has {} values, expected {}",
                    i,
                    row.len(),
                    n_cols
                )));
            }
            matrix.push_row(row.iter().copied().enumerate())?;
        }
        Ok(matrix)
    }

    /// Append a row from `(column, value)` entries in any order.
    ///
    /// Duplicate columns are summed; entries that end up `0.0` are not stored.
    pub fn push_row<I>(&mut self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = (usize, f64)>,
    {
        let mut entries: Vec<(usize, f64)> = entries.into_iter().collect();
        if let Some(&(col, _)) = entries.iter().find(|(col, _)| *col >= self.n_cols) {
            return Err(Error::InvalidInput(format!(
                "column {} out of range for width {}",
                col, self.n_cols
            )));
        }
        entries.sort_unstable_by_key(|(col, _)| *col);

        let mut merged: Vec<(usize, f64)> = Vec::with_capacity(entries.len());
        for (col, value) in entries {
            match merged.last_mut() {
                Some((last, acc)) if *last == col => *acc += value,
                _ => merged.push((col, value)),
            }
        }

        for (col, value) in merged {
            if value != 0.0 {
                self.indices.push(col);
                self.values.push(value);
            }
        }
        self.indptr.push(self.indices.len());
        Ok(())
    }

    #[inline]
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.indptr.len() - 1
    }

    #[inline]
    #[must_use]
    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    /// Number of stored (non-zero) values.
    #[inline]
    #[must_use]
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Borrow row `i`. Panics if `i >= n_rows()`.
    #[inline]
    #[must_use]
    pub fn row(&self, i: usize) -> SparseRow<'_> {
        let (start, end) = (self.indptr[i], self.indptr[i + 1]);
        SparseRow {
            indices: &self.indices[start..end],
            values: &self.values[start..end],
        }
    }

    /// Value at `(row, col)`, `0.0` when not stored.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        let view = self.row(row);
        match view.indices.binary_search(&col) {
            Ok(pos) => view.values[pos],
            Err(_) => 0.0,
        }
    }

    /// Dense copy of row `i`.
    #[must_use]
    pub fn dense_row(&self, i: usize) -> Vec<f64> {
        let mut out = vec![0.0; self.n_cols];
        let view = self.row(i);
        for (&col, &value) in view.indices.iter().zip(view.values) {
            out[col] = value;
        }
        out
    }

    /// Concatenate matrices column-wise. All inputs must share a row count.
    pub fn hstack(blocks: &[&SparseMatrix]) -> Result<Self> {
        let n_rows = blocks.first().map_or(0, |b| b.n_rows());
        for (i, block) in blocks.iter().enumerate() {
            if block.n_rows() != n_rows {
                return Err(Error::ShapeMismatch {
                    block: format!("#{}", i),
                    expected: n_rows,
                    actual: block.n_rows(),
                });
            }
        }

        let n_cols = blocks.iter().map(|b| b.n_cols()).sum();
        let nnz = blocks.iter().map(|b| b.nnz()).sum();
        let mut out = Self {
            n_cols,
            indptr: Vec::with_capacity(n_rows + 1),
            indices: Vec::with_capacity(nnz),
            values: Vec::with_capacity(nnz),
        };
        out.indptr.push(0);

        for r in 0..n_rows {
            let mut offset = 0;
            for block in blocks {
                let view = block.row(r);
                out.indices.extend(view.indices.iter().map(|c| c + offset));
                out.values.extend_from_slice(view.values);
                offset += block.n_cols();
            }
            out.indptr.push(out.indices.len());
        }
        Ok(out)
    }
}

impl<'a> SparseRow<'a> {
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + 'a {
        let (indices, values) = (self.indices, self.values);
        indices.iter().copied().zip(values.iter().copied())
    }

    #[inline]
    #[must_use]
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    #[must_use]
    pub fn norm(&self) -> f64 {
        self.values.iter().map(|v| v * v).sum::<f64>().sqrt()
    }

    /// Sparse dot product via a merge over the sorted indices.
    #[must_use]
    pub fn dot(&self, other: &SparseRow<'_>) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut acc = 0.0;
        while i < self.indices.len() && j < other.indices.len() {
            match self.indices[i].cmp(&other.indices[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    acc += self.values[i] * other.values[j];
                    i += 1;
                    j += 1;
                }
            }
        }
        acc
    }
}

//! Exact nearest-neighbor index over a [`SparseMatrix`].
//!
//! The index is brute force: every query scores all rows in parallel and
//! keeps the `k` smallest distances. Results are exact and ordered by
//! `(distance, row)`, so equal distances always come back in ascending row
//! order regardless of how rayon splits the work.
//!
//! There is no insert or delete. An index exists only once built; a new
//! catalog needs a new index.

use crate::distance::{cosine_distance, DistanceConfig, Metric};
use crate::matrix::{SparseMatrix, SparseRow};
use crate::{Error, Result};
use ordered_float::OrderedFloat;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One entry of a neighbor list
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Neighbor {
    pub row: usize,
    pub distance: f64,
}

pub struct SimilarityIndex {
    matrix: Arc<SparseMatrix>,
    distance: DistanceConfig,
    // Only filled for cosine
    norms: Vec<f64>,
}

impl SimilarityIndex {
    /// Index every row of `matrix` under the given metric.
    pub fn build(matrix: Arc<SparseMatrix>, distance: DistanceConfig) -> Result<Self> {
        distance.validate()?;

        let norms = if distance.metric == Metric::Cosine {
            (0..matrix.n_rows())
                .into_par_iter()
                .map(|i| matrix.row(i).norm())
                .collect()
        } else {
            Vec::new()
        };

        tracing::debug!(
            rows = matrix.n_rows(),
            cols = matrix.n_cols(),
            metric = %distance.metric,
            "similarity index built"
        );

        Ok(Self {
            matrix,
            distance,
            norms,
        })
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.matrix.n_rows()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matrix.n_rows() == 0
    }

    /// Width of the indexed feature space
    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.matrix.n_cols()
    }

    #[inline]
    #[must_use]
    pub fn distance_config(&self) -> DistanceConfig {
        self.distance
    }

    #[inline]
    #[must_use]
    pub fn matrix(&self) -> &Arc<SparseMatrix> {
        &self.matrix
    }

    /// The `k` nearest rows to row `row`, the row itself included.
    pub fn query(&self, row: usize, k: usize) -> Result<Vec<Neighbor>> {
        if row >= self.len() {
            return Err(Error::IndexOutOfRange {
                index: row,
                len: self.len(),
            });
        }
        self.check_k(k)?;

        let norm = self.norms.get(row).copied();
        Ok(self.rank(&self.matrix.row(row), norm, k))
    }

    /// The `k` nearest rows to an arbitrary sparse vector in the indexed space.
    pub fn query_vector(&self, entries: &[(usize, f64)], k: usize) -> Result<Vec<Neighbor>> {
        self.check_k(k)?;

        let mut probe = SparseMatrix::new(self.dim());
        probe.push_row(entries.iter().copied())?;
        let view = probe.row(0);
        let norm = (self.distance.metric == Metric::Cosine).then(|| view.norm());
        Ok(self.rank(&view, norm, k))
    }

    fn check_k(&self, k: usize) -> Result<()> {
        if k == 0 || k > self.len() {
            return Err(Error::InvalidInput(format!(
                "k must be in 1..={}, got {}",
                self.len(),
                k
            )));
        }
        Ok(())
    }

    fn rank(&self, query: &SparseRow<'_>, query_norm: Option<f64>, k: usize) -> Vec<Neighbor> {
        let mut scored: Vec<(OrderedFloat<f64>, usize)> = (0..self.len())
            .into_par_iter()
            .map(|i| {
                let candidate = self.matrix.row(i);
                let d = match (self.distance.metric, query_norm) {
                    (Metric::Cosine, Some(qn)) => {
                        cosine_distance(query, &candidate, qn, self.norms[i])
                    }
                    _ => self.distance.distance(query, &candidate),
                };
                (OrderedFloat(d), i)
            })
            .collect();

        if k < scored.len() {
            scored.select_nth_unstable(k - 1);
            scored.truncate(k);
        }
        scored.sort_unstable();

        scored
            .into_iter()
            .map(|(d, row)| Neighbor {
                row,
                distance: d.into_inner(),
            })
            .collect()
    }
}

//! Distance metrics over sparse rows.
//!
//! All metrics return a distance (smaller is closer). Sparse rows are
//! compared by walking the union of their sorted column indices, so
//! columns absent from both rows cost nothing.

use crate::matrix::SparseRow;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Supported distance metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Minkowski distance with the configured exponent `p`
    #[default]
    Minkowski,
    /// Minkowski with p = 2
    Euclidean,
    /// Minkowski with p = 1
    Manhattan,
    /// 1 - cosine similarity
    Cosine,
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Metric::Minkowski => "minkowski",
            Metric::Euclidean => "euclidean",
            Metric::Manhattan => "manhattan",
            Metric::Cosine => "cosine",
        };
        f.write_str(name)
    }
}

/// A metric together with its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceConfig {
    #[serde(default)]
    pub metric: Metric,
    /// Exponent for [`Metric::Minkowski`]; ignored by the other metrics.
    #[serde(default = "default_p")]
    pub p: f64,
}

fn default_p() -> f64 {
    2.0
}

impl Default for DistanceConfig {
    fn default() -> Self {
        Self {
            metric: Metric::Minkowski,
            p: default_p(),
        }
    }
}

impl DistanceConfig {
    #[must_use]
    pub fn new(metric: Metric) -> Self {
        Self {
            metric,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn minkowski(p: f64) -> Self {
        Self {
            metric: Metric::Minkowski,
            p,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.metric == Metric::Minkowski && !(self.p >= 1.0 && self.p.is_finite()) {
            return Err(Error::InvalidConfig(format!(
                "minkowski exponent must be a finite value >= 1, got {}",
                self.p
            )));
        }
        Ok(())
    }

    /// Distance between two rows.
    #[inline]
    pub fn distance(&self, a: &SparseRow<'_>, b: &SparseRow<'_>) -> f64 {
        match self.metric {
            Metric::Minkowski => minkowski(a, b, self.p),
            Metric::Euclidean => minkowski(a, b, 2.0),
            Metric::Manhattan => minkowski(a, b, 1.0),
            Metric::Cosine => cosine_distance(a, b, a.norm(), b.norm()),
        }
    }
}

/// Call `f` with `a_i - b_i` for every column stored in either row.
#[inline]
fn for_each_diff(a: &SparseRow<'_>, b: &SparseRow<'_>, mut f: impl FnMut(f64)) {
    let (mut i, mut j) = (0, 0);
    while i < a.indices.len() || j < b.indices.len() {
        let ai = a.indices.get(i).copied().unwrap_or(usize::MAX);
        let bj = b.indices.get(j).copied().unwrap_or(usize::MAX);
        if ai < bj {
            f(a.values[i]);
            i += 1;
        } else if bj < ai {
            f(-b.values[j]);
            j += 1;
        } else {
            f(a.values[i] - b.values[j]);
            i += 1;
            j += 1;
        }
    }
}

pub fn minkowski(a: &SparseRow<'_>, b: &SparseRow<'_>, p: f64) -> f64 {
    let mut acc = 0.0;
    if p == 1.0 {
        for_each_diff(a, b, |d| acc += d.abs());
        acc
    } else if p == 2.0 {
        for_each_diff(a, b, |d| acc += d * d);
        acc.sqrt()
    } else {
        for_each_diff(a, b, |d| acc += d.abs().powf(p));
        acc.powf(1.0 / p)
    }
}

/// Cosine distance with precomputed norms. A zero row is at distance 1
/// from everything.
pub fn cosine_distance(a: &SparseRow<'_>, b: &SparseRow<'_>, norm_a: f64, norm_b: f64) -> f64 {
    if norm_a == 0.0 || norm_b == 0.0 {
        return 1.0;
    }
    1.0 - a.dot(b) / (norm_a * norm_b)
}

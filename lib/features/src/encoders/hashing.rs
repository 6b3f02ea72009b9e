//! Feature hashing for high-cardinality label lists (actors, directors).
//!
//! Each label is hashed with `xxh3_64`. The low bits pick one of `n_buckets`
//! columns and the top bit picks the sign, so colliding labels tend to cancel
//! instead of piling up. No vocabulary is kept.

use filmsim_core::{Error, Result, SparseMatrix};
use xxhash_rust::xxh3::xxh3_64;

pub const DEFAULT_DIRECTOR_BUCKETS: usize = 128;
pub const DEFAULT_ACTOR_BUCKETS: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashedSetEncoder {
    n_buckets: usize,
}

impl HashedSetEncoder {
    pub fn new(n_buckets: usize) -> Result<Self> {
        if n_buckets == 0 {
            return Err(Error::InvalidConfig(
                "hash bucket count must be at least 1".to_string(),
            ));
        }
        Ok(Self { n_buckets })
    }

    #[inline]
    #[must_use]
    pub fn width(&self) -> usize {
        self.n_buckets
    }

    /// Column and sign for one label
    #[inline]
    #[must_use]
    pub fn bucket(&self, label: &str) -> (usize, f64) {
        let h = xxh3_64(label.as_bytes());
        let col = (h % self.n_buckets as u64) as usize;
        let sign = if h >> 63 == 0 { 1.0 } else { -1.0 };
        (col, sign)
    }

    pub fn transform<L: AsRef<[String]>>(&self, rows: &[L]) -> Result<SparseMatrix> {
        let mut matrix = SparseMatrix::new(self.n_buckets);
        for row in rows {
            matrix.push_row(
                row.as_ref()
                    .iter()
                    .filter(|label| !label.is_empty())
                    .map(|label| self.bucket(label)),
            )?;
        }
        Ok(matrix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(data: &[&str]) -> Vec<String> {
        data.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_zero_buckets_rejected() {
        assert!(matches!(HashedSetEncoder::new(0), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_deterministic() {
        let enc = HashedSetEncoder::new(128).unwrap();
        let rows = vec![labels(&["Christopher Nolan", "Emma Thomas"])];
        let a = enc.transform(&rows).unwrap();
        let b = enc.transform(&rows).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.n_cols(), 128);
    }

    #[test]
    fn test_signed_unit_entries() {
        let enc = HashedSetEncoder::new(1 << 20).unwrap();
        let m = enc.transform(&[labels(&["Tom Hanks"])]).unwrap();
        let (col, sign) = enc.bucket("Tom Hanks");
        assert_eq!(m.row(0).nnz(), 1);
        assert_eq!(m.get(0, col), sign);
        assert_eq!(sign.abs(), 1.0);
    }

    #[test]
    fn test_repeated_label_accumulates() {
        let enc = HashedSetEncoder::new(64).unwrap();
        let m = enc.transform(&[labels(&["Meryl Streep", "Meryl Streep"])]).unwrap();
        let (col, sign) = enc.bucket("Meryl Streep");
        assert_eq!(m.get(0, col), 2.0 * sign);
    }

    #[test]
    fn test_empty_labels_skipped() {
        let enc = HashedSetEncoder::new(16).unwrap();
        let m = enc.transform(&[labels(&[""]), labels(&[])]).unwrap();
        assert_eq!(m.n_rows(), 2);
        assert_eq!(m.nnz(), 0);
    }
}

//! Multi-hot encoding for low-cardinality label lists (genres, countries).

use ahash::AHashMap;
use filmsim_core::{Result, SparseMatrix};
use std::collections::BTreeSet;

/// Fitted label vocabulary. Columns follow the sorted label order.
#[derive(Debug, Clone, Default)]
pub struct MultiHotEncoder {
    labels: Vec<String>,
    index: AHashMap<String, usize>,
}

impl MultiHotEncoder {
    /// Collect the union of all labels.
    pub fn fit<L: AsRef<[String]>>(rows: &[L]) -> Self {
        let labels: Vec<String> = rows
            .iter()
            .flat_map(|row| row.as_ref().iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let index = labels
            .iter()
            .enumerate()
            .map(|(i, label)| (label.clone(), i))
            .collect();
        Self { labels, index }
    }

    #[inline]
    #[must_use]
    pub fn width(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// One column per fitted label, 1 when present. Unseen labels are dropped.
    pub fn transform<L: AsRef<[String]>>(&self, rows: &[L]) -> Result<SparseMatrix> {
        let mut matrix = SparseMatrix::new(self.width());
        let mut unseen = 0usize;
        for row in rows {
            let mut cols = BTreeSet::new();
            for label in row.as_ref() {
                match self.index.get(label) {
                    Some(&col) => {
                        cols.insert(col);
                    }
                    None => unseen += 1,
                }
            }
            matrix.push_row(cols.into_iter().map(|c| (c, 1.0)))?;
        }
        if unseen > 0 {
            tracing::debug!(unseen, "labels outside the fitted vocabulary ignored");
        }
        Ok(matrix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
        data.iter()
            .map(|r| r.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_fit_sorted_vocabulary() {
        let data = rows(&[&["Drama", "Crime"], &["Action"], &[]]);
        let enc = MultiHotEncoder::fit(&data);
        assert_eq!(enc.labels(), &["Action", "Crime", "Drama"]);
    }

    #[test]
    fn test_transform_multi_hot() {
        let data = rows(&[&["Drama", "Crime", "Drama"], &["Action"], &[]]);
        let enc = MultiHotEncoder::fit(&data);
        let m = enc.transform(&data).unwrap();

        assert_eq!(m.dense_row(0), vec![0.0, 1.0, 1.0]);
        assert_eq!(m.dense_row(1), vec![1.0, 0.0, 0.0]);
        assert_eq!(m.dense_row(2), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_reuses_fitted_vocabulary() {
        let enc = MultiHotEncoder::fit(&rows(&[&["Drama"], &["Comedy"]]));
        let m = enc.transform(&rows(&[&["Comedy", "Western"]])).unwrap();
        assert_eq!(m.n_cols(), 2);
        assert_eq!(m.dense_row(0), vec![1.0, 0.0]);
    }
}

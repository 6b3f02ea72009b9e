//! TF-IDF encoding of the overview column.
//!
//! The vocabulary keeps the `max_features` terms with the highest corpus
//! term count (ties broken by the term itself), then orders columns
//! alphabetically. Weights are raw term count times smoothed IDF,
//! `ln((1 + n) / (1 + df)) + 1`, and every row is L2-normalized.

use crate::stopwords::Stopwords;
use ahash::AHashMap;
use filmsim_core::{Result, SparseMatrix};
use std::cmp::Reverse;

pub const DEFAULT_VOCAB_SIZE: usize = 300;

/// Lowercase and split on anything that is not alphanumeric or `_`.
/// Tokens shorter than two characters are dropped.
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|t| t.chars().nth(1).is_some())
        .map(str::to_lowercase)
}

#[derive(Debug, Clone)]
pub struct TfidfEncoder {
    max_features: usize,
    stopwords: Stopwords,
}

impl TfidfEncoder {
    pub fn new(max_features: usize, stopwords: Stopwords) -> Self {
        Self {
            max_features,
            stopwords,
        }
    }

    fn terms<'a>(&'a self, doc: &'a str) -> impl Iterator<Item = String> + 'a {
        tokenize(doc).filter(move |t| !self.stopwords.contains(t))
    }

    /// Fit vocabulary and IDF on the whole corpus.
    pub fn fit<S: AsRef<str>>(&self, docs: &[S]) -> TfidfModel {
        // term -> (corpus count, document frequency)
        let mut stats: AHashMap<String, (usize, usize)> = AHashMap::new();
        for doc in docs {
            let mut seen: AHashMap<String, usize> = AHashMap::new();
            for term in self.terms(doc.as_ref()) {
                *seen.entry(term).or_insert(0) += 1;
            }
            for (term, count) in seen {
                let entry = stats.entry(term).or_insert((0, 0));
                entry.0 += count;
                entry.1 += 1;
            }
        }

        let mut ranked: Vec<(String, usize, usize)> = stats
            .into_iter()
            .map(|(term, (count, df))| (term, count, df))
            .collect();
        ranked.sort_unstable_by(|a, b| (Reverse(a.1), &a.0).cmp(&(Reverse(b.1), &b.0)));
        ranked.truncate(self.max_features);
        ranked.sort_unstable_by(|a, b| a.0.cmp(&b.0));

        let n_docs = docs.len() as f64;
        let idf = ranked
            .iter()
            .map(|(_, _, df)| ((1.0 + n_docs) / (1.0 + *df as f64)).ln() + 1.0)
            .collect();
        let vocabulary: Vec<String> = ranked.into_iter().map(|(term, _, _)| term).collect();
        let index = vocabulary
            .iter()
            .enumerate()
            .map(|(i, term)| (term.clone(), i))
            .collect();

        tracing::debug!(docs = docs.len(), terms = vocabulary.len(), "tf-idf vocabulary fitted");
        TfidfModel {
            vocabulary,
            index,
            idf,
        }
    }
}

/// Fitted vocabulary and IDF weights
#[derive(Debug, Clone)]
pub struct TfidfModel {
    vocabulary: Vec<String>,
    index: AHashMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfModel {
    #[inline]
    #[must_use]
    pub fn width(&self) -> usize {
        self.vocabulary.len()
    }

    #[must_use]
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    #[must_use]
    pub fn idf(&self, term: &str) -> Option<f64> {
        self.index.get(term).map(|&i| self.idf[i])
    }

    /// Encode documents. Terms outside the vocabulary are ignored.
    pub fn transform<S: AsRef<str>>(&self, docs: &[S]) -> Result<SparseMatrix> {
        let mut matrix = SparseMatrix::new(self.width());
        for doc in docs {
            let mut counts: AHashMap<usize, f64> = AHashMap::new();
            for term in tokenize(doc.as_ref()) {
                if let Some(&col) = self.index.get(&term) {
                    *counts.entry(col).or_insert(0.0) += 1.0;
                }
            }

            let mut row: Vec<(usize, f64)> = counts
                .into_iter()
                .map(|(col, tf)| (col, tf * self.idf[col]))
                .collect();
            let norm = row.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
            if norm > 0.0 {
                for (_, w) in &mut row {
                    *w /= norm;
                }
            }
            matrix.push_row(row)?;
        }
        Ok(matrix)
    }
}

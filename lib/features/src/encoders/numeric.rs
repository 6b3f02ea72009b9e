//! Standardization of numeric columns.

use crate::catalog::CatalogItem;
use filmsim_core::{Error, Result, SparseMatrix};
use std::collections::BTreeSet;

/// Per-column mean and population standard deviation.
///
/// A zero standard deviation is stored as 1 so constant columns encode to 0.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumericStats {
    columns: Vec<String>,
    means: Vec<f64>,
    stds: Vec<f64>,
}

impl NumericStats {
    /// Fit on a row-major table whose rows all have `columns.len()` values.
    pub fn fit(columns: Vec<String>, rows: &[Vec<f64>]) -> Result<Self> {
        let width = columns.len();
        validate(rows, width)?;

        let n = rows.len() as f64;
        let mut means = vec![0.0; width];
        let mut stds = vec![1.0; width];
        if !rows.is_empty() {
            for (j, mean) in means.iter_mut().enumerate() {
                *mean = rows.iter().map(|r| r[j]).sum::<f64>() / n;
            }
            for (j, std) in stds.iter_mut().enumerate() {
                let var = rows.iter().map(|r| (r[j] - means[j]).powi(2)).sum::<f64>() / n;
                let s = var.sqrt();
                *std = if s > 0.0 { s } else { 1.0 };
            }
        }

        Ok(Self {
            columns,
            means,
            stds,
        })
    }

    #[inline]
    #[must_use]
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn means(&self) -> &[f64] {
        &self.means
    }

    #[must_use]
    pub fn stds(&self) -> &[f64] {
        &self.stds
    }

    /// `(value - mean) / std` per cell.
    pub fn transform(&self, rows: &[Vec<f64>]) -> Result<SparseMatrix> {
        validate(rows, self.width())?;
        let scaled: Vec<Vec<f64>> = rows
            .iter()
            .map(|row| {
                row.iter()
                    .zip(self.means.iter().zip(&self.stds))
                    .map(|(v, (mean, std))| (v - mean) / std)
                    .collect()
            })
            .collect();
        SparseMatrix::from_dense(&scaled, self.width())
    }

    /// Pull this encoder's columns out of catalog rows.
    pub fn table(&self, items: &[CatalogItem]) -> Result<Vec<Vec<f64>>> {
        numeric_table(&self.columns, items)
    }
}

/// Sorted union of numeric column names across `items`.
pub fn catalog_columns(items: &[CatalogItem]) -> Vec<String> {
    items
        .iter()
        .flat_map(|item| item.numeric_keys())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(String::from)
        .collect()
}

/// Extract `columns` from every item. Missing or non-numeric cells fail.
pub fn numeric_table(columns: &[String], items: &[CatalogItem]) -> Result<Vec<Vec<f64>>> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            columns
                .iter()
                .map(|c| {
                    item.number(c)
                        .map_err(|e| Error::InvalidInput(format!("row {}: {}", i, e)))
                })
                .collect::<Result<Vec<f64>>>()
        })
        .collect()
}

fn validate(rows: &[Vec<f64>], width: usize) -> Result<()> {
    for (i, row) in rows.iter().enumerate() {
        if row.len() != width {
            return Err(Error::InvalidInput(format!(
                "row {} has {} numeric values, expected {}",
                i,
                row.len(),
                width
            )));
        }
        if let Some(j) = row.iter().position(|v| !v.is_finite()) {
            return Err(Error::InvalidInput(format!(
                "row {} column {} is not a finite number",
                i, j
            )));
        }
    }
    Ok(())
}

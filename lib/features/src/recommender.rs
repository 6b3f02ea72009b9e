//! End-to-end recommender: fit every column encoder on the catalog, fuse
//! the blocks in schema order, index the fused rows and answer "movies like
//! row i" queries.
//!
//! Vocabularies and scaling statistics are fit on the full catalog,
//! including the item later used as a query. For a similarity index that is
//! the intended behavior; it would be train/test leakage in a supervised
//! model.

use crate::catalog::{Catalog, CatalogItem};
use crate::config::PipelineConfig;
use crate::encoders::FittedColumn;
use crate::fusion::{fuse, FeatureBlock, FusedMatrix};
use crate::report::BuildReport;
use crate::stopwords::Stopwords;
use filmsim_core::{Error, Neighbor, Result, SimilarityIndex};
use rayon::prelude::*;
use std::slice;

pub struct Recommender {
    catalog: Catalog,
    config: PipelineConfig,
    columns: Vec<FittedColumn>,
    fused: FusedMatrix,
    index: SimilarityIndex,
    report: BuildReport,
}

impl Recommender {
    /// Fit, fuse and index `catalog`.
    ///
    /// Column encoders are independent and run in parallel. Unavailable
    /// stopword lists do not fail the build; they are listed in
    /// [`BuildReport::degraded`].
    pub fn build(catalog: Catalog, config: PipelineConfig) -> Result<Self> {
        config.validate()?;

        let (stopwords, degraded) =
            Stopwords::resolve(&config.stopword_languages, config.stopword_dir.as_deref());

        let items = catalog.items();
        let encoded: Vec<(FittedColumn, FeatureBlock)> = config
            .schema
            .blocks
            .par_iter()
            .map(|&kind| {
                let column = FittedColumn::fit(kind, items, &config, &stopwords)?;
                let block = column.encode(items)?;
                tracing::debug!(block = %kind, width = block.width(), "column encoded");
                Ok((column, block))
            })
            .collect::<Result<Vec<_>>>()?;
        let (columns, blocks): (Vec<FittedColumn>, Vec<FeatureBlock>) = encoded.into_iter().unzip();

        let fused = fuse(&config.schema, &blocks)?;
        let index = SimilarityIndex::build(fused.matrix().clone(), config.distance())?;

        let report = BuildReport {
            rows: fused.n_rows(),
            dim: fused.n_cols(),
            schema_version: config.schema.version,
            block_widths: fused.block_widths(),
            degraded,
        };
        tracing::info!(
            rows = report.rows,
            dim = report.dim,
            metric = %config.distance_metric,
            degraded = report.degraded.len(),
            "recommender built"
        );

        Ok(Self {
            catalog,
            config,
            columns,
            fused,
            index,
            report,
        })
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn item(&self, row: usize) -> Option<&CatalogItem> {
        self.catalog.get(row)
    }

    #[must_use]
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    #[must_use]
    pub fn columns(&self) -> &[FittedColumn] {
        &self.columns
    }

    #[must_use]
    pub fn fused(&self) -> &FusedMatrix {
        &self.fused
    }

    #[must_use]
    pub fn index(&self) -> &SimilarityIndex {
        &self.index
    }

    #[must_use]
    pub fn report(&self) -> &BuildReport {
        &self.report
    }

    /// Recommendations for `row` using the configured `neighbor_count`.
    ///
    /// `neighbor_count` counts the query row, so the default of 6 yields at
    /// most 5 recommendations. Small catalogs are clamped to their size.
    pub fn recommend(&self, row: usize) -> Result<Vec<Neighbor>> {
        let k = self.config.neighbor_count.min(self.len()).max(1);
        let mut neighbors = self.index.query(row, k)?;
        neighbors.retain(|n| n.row != row);
        neighbors.truncate(k - 1);
        Ok(neighbors)
    }

    /// Exactly `k` neighbors of `row`, the row itself excluded.
    pub fn recommend_k(&self, row: usize, k: usize) -> Result<Vec<Neighbor>> {
        if row >= self.len() {
            return Err(Error::IndexOutOfRange {
                index: row,
                len: self.len(),
            });
        }
        if k == 0 || k >= self.len() {
            return Err(Error::InvalidInput(format!(
                "k must be in 1..={} excluding the query row, got {}",
                self.len().saturating_sub(1),
                k
            )));
        }

        let mut neighbors = self.index.query(row, k + 1)?;
        neighbors.retain(|n| n.row != row);
        neighbors.truncate(k);
        Ok(neighbors)
    }

    /// Recommendations for the first item titled `title`. Returns the query
    /// row together with its neighbors.
    pub fn recommend_by_title(&self, title: &str) -> Result<(usize, Vec<Neighbor>)> {
        let row = self
            .catalog
            .find_title(title)
            .ok_or_else(|| Error::InvalidInput(format!("unknown title '{}'", title)))?;
        Ok((row, self.recommend(row)?))
    }

    /// Encode an item outside the catalog with the fitted encoders.
    ///
    /// Returns `(column, value)` pairs in the fused space.
    pub fn encode_item(&self, item: &CatalogItem) -> Result<Vec<(usize, f64)>> {
        let mut entries = Vec::new();
        for column in &self.columns {
            let offset = self
                .fused
                .block_range(column.kind())
                .map_or(0, |range| range.start);
            let encoded = column.transform(slice::from_ref(item))?;
            entries.extend(encoded.row(0).iter().map(|(c, v)| (c + offset, v)));
        }
        Ok(entries)
    }

    /// The `k` catalog rows nearest to an item encoded with [`Self::encode_item`].
    pub fn similar_to_item(&self, item: &CatalogItem, k: usize) -> Result<Vec<Neighbor>> {
        let entries = self.encode_item(item)?;
        self.index.query_vector(&entries, k)
    }
}

//! Column encoders.
//!
//! Every encoder is split into a fit step that produces explicit state
//! (vocabulary, IDF, mean/std) and a transform step that only reads it.
//! [`FittedColumn`] binds one fitted encoder to the catalog column it reads.

pub mod hashing;
pub mod multihot;
pub mod numeric;
pub mod text;

pub use hashing::HashedSetEncoder;
pub use multihot::MultiHotEncoder;
pub use numeric::NumericStats;
pub use text::{TfidfEncoder, TfidfModel};

use crate::catalog::CatalogItem;
use crate::config::PipelineConfig;
use crate::fusion::FeatureBlock;
use crate::schema::BlockKind;
use crate::stopwords::Stopwords;
use filmsim_core::{Result, SparseMatrix};

/// A fitted encoder for one schema block
#[derive(Debug, Clone)]
pub enum FittedColumn {
    Overview(TfidfModel),
    Genres(MultiHotEncoder),
    Countries(MultiHotEncoder),
    Directors(HashedSetEncoder),
    Actors(HashedSetEncoder),
    Numeric(NumericStats),
}

fn country_rows(items: &[CatalogItem]) -> Result<Vec<Vec<String>>> {
    items.iter().map(CatalogItem::country_labels).collect()
}

impl FittedColumn {
    /// Fit the encoder for `kind` on the whole catalog.
    pub fn fit(
        kind: BlockKind,
        items: &[CatalogItem],
        config: &PipelineConfig,
        stopwords: &Stopwords,
    ) -> Result<Self> {
        Ok(match kind {
            BlockKind::Overview => {
                let docs: Vec<&str> = items.iter().map(CatalogItem::overview_text).collect();
                let encoder = TfidfEncoder::new(config.text_vocab_size, stopwords.clone());
                FittedColumn::Overview(encoder.fit(&docs))
            }
            BlockKind::Genres => {
                let rows: Vec<Vec<String>> = items.iter().map(CatalogItem::genre_labels).collect();
                FittedColumn::Genres(MultiHotEncoder::fit(&rows))
            }
            BlockKind::Countries => {
                FittedColumn::Countries(MultiHotEncoder::fit(&country_rows(items)?))
            }
            BlockKind::Directors => {
                FittedColumn::Directors(HashedSetEncoder::new(config.director_hash_buckets)?)
            }
            BlockKind::Actors => {
                FittedColumn::Actors(HashedSetEncoder::new(config.actor_hash_buckets)?)
            }
            BlockKind::Numeric => {
                let columns = numeric::catalog_columns(items);
                let table = numeric::numeric_table(&columns, items)?;
                FittedColumn::Numeric(NumericStats::fit(columns, &table)?)
            }
        })
    }

    #[must_use]
    pub fn kind(&self) -> BlockKind {
        match self {
            FittedColumn::Overview(_) => BlockKind::Overview,
            FittedColumn::Genres(_) => BlockKind::Genres,
            FittedColumn::Countries(_) => BlockKind::Countries,
            FittedColumn::Directors(_) => BlockKind::Directors,
            FittedColumn::Actors(_) => BlockKind::Actors,
            FittedColumn::Numeric(_) => BlockKind::Numeric,
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        match self {
            FittedColumn::Overview(m) => m.width(),
            FittedColumn::Genres(m) | FittedColumn::Countries(m) => m.width(),
            FittedColumn::Directors(h) | FittedColumn::Actors(h) => h.width(),
            FittedColumn::Numeric(s) => s.width(),
        }
    }

    /// Encode `items` with the fitted state.
    pub fn transform(&self, items: &[CatalogItem]) -> Result<SparseMatrix> {
        match self {
            FittedColumn::Overview(model) => {
                let docs: Vec<&str> = items.iter().map(CatalogItem::overview_text).collect();
                model.transform(&docs)
            }
            FittedColumn::Genres(enc) => {
                let rows: Vec<Vec<String>> = items.iter().map(CatalogItem::genre_labels).collect();
                enc.transform(&rows)
            }
            FittedColumn::Countries(enc) => enc.transform(&country_rows(items)?),
            FittedColumn::Directors(enc) => {
                let rows: Vec<Vec<String>> =
                    items.iter().map(CatalogItem::director_labels).collect();
                enc.transform(&rows)
            }
            FittedColumn::Actors(enc) => {
                let rows: Vec<Vec<String>> = items.iter().map(CatalogItem::actor_labels).collect();
                enc.transform(&rows)
            }
            FittedColumn::Numeric(stats) => stats.transform(&stats.table(items)?),
        }
    }

    pub fn encode(&self, items: &[CatalogItem]) -> Result<FeatureBlock> {
        Ok(FeatureBlock::new(self.kind(), self.transform(items)?))
    }
}

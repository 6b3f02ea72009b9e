//! # filmsim Features
//!
//! Content-based movie similarity from heterogeneous catalog columns.
//!
//! ## Overview
//!
//! Each catalog column gets its own encoder, fitted once on the whole
//! catalog:
//!
//! - **overview** - TF-IDF over a bounded vocabulary with English and French stopwords removed
//! - **genres**, **production_countries** - multi-hot over the observed labels
//! - **directors**, **actors** - signed feature hashing into fixed buckets
//! - **numeric columns** - standardized to zero mean, unit variance
//!
//! The blocks are concatenated in the order fixed by [`FeatureSchema`] and
//! indexed by an exact [`filmsim_core::SimilarityIndex`].
//!
//! ## Example
//!
//! ```rust
//! use filmsim_features::{Catalog, CatalogItem, PipelineConfig, Recommender};
//!
//! let catalog = Catalog::new(vec![
//!     CatalogItem::new("A").with_genres(vec!["Drama"]).with_overview("love story"),
//!     CatalogItem::new("B").with_genres(vec!["Drama"]).with_overview("a love story drama"),
//!     CatalogItem::new("C").with_genres(vec!["Action"]).with_overview("explosions"),
//! ]);
//!
//! let recommender = Recommender::build(catalog, PipelineConfig::default()).unwrap();
//! let neighbors = recommender.recommend_k(0, 2).unwrap();
//! assert_eq!(neighbors[0].row, 1);
//! ```
//!
//! ## Pipeline
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Catalog   │────>│  Encoders   │────>│   Fusion    │────>│    Index    │
//! │   (rows)    │     │ (per column)│     │  (schema)   │     │   (exact)   │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```

pub mod catalog;
pub mod config;
pub mod encoders;
pub mod fusion;
pub mod recommender;
pub mod report;
pub mod schema;
pub mod stopwords;

pub use catalog::{parse_list_literal, Catalog, CatalogItem, LabelField};
pub use config::{PipelineConfig, DEFAULT_NEIGHBOR_COUNT};
pub use encoders::{FittedColumn, HashedSetEncoder, MultiHotEncoder, NumericStats, TfidfEncoder, TfidfModel};
pub use fusion::{fuse, FeatureBlock, FusedMatrix};
pub use recommender::Recommender;
pub use report::{BuildReport, DegradedResource};
pub use schema::{BlockKind, FeatureSchema};
pub use stopwords::Stopwords;

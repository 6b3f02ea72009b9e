//! # filmsim
//!
//! Content-based movie recommendations over a static catalog.
//!
//! filmsim encodes every column of a movie catalog into numbers (TF-IDF for
//! the synopsis, multi-hot for genres and countries, feature hashing for
//! people, standardization for numeric columns), concatenates the blocks
//! into one sparse feature space and answers exact k-nearest-neighbor
//! queries over it.
//!
//! ## Quick Start
//!
//! ### From the command line
//!
//! ```bash
//! filmsim --catalog movies.jsonl --title "Heat"
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use filmsim::prelude::*;
//!
//! let catalog = Catalog::load("movies.jsonl").unwrap();
//! let recommender = Recommender::build(catalog, PipelineConfig::default()).unwrap();
//!
//! let (row, neighbors) = recommender.recommend_by_title("Heat").unwrap();
//! for n in neighbors {
//!     let item = recommender.item(n.row).unwrap();
//!     println!("{:?} at {:.3}", item.title, n.distance);
//! }
//! # let _ = row;
//! ```
//!
//! ## Crate Structure
//!
//! - `filmsim-core` - sparse matrix, distance metrics, exact similarity index, errors
//! - `filmsim-features` - catalog model, column encoders, feature schema, fusion, recommender

// Re-export core types
pub use filmsim_core::{
    DistanceConfig, Metric, Neighbor, SimilarityIndex, SparseMatrix,
    Error, Result,
};

// Re-export the feature pipeline
pub use filmsim_features::{
    BlockKind, BuildReport, Catalog, CatalogItem, DegradedResource, FeatureBlock,
    FeatureSchema, FusedMatrix, LabelField, PipelineConfig, Recommender,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Catalog, CatalogItem, PipelineConfig, Recommender,
        DistanceConfig, Metric, Neighbor, SimilarityIndex,
        Error, Result,
    };
}

/// Column encoders
pub mod encoders {
    pub use filmsim_features::encoders::{
        FittedColumn, HashedSetEncoder, MultiHotEncoder, NumericStats, TfidfEncoder, TfidfModel,
    };
    pub use filmsim_features::Stopwords;
}

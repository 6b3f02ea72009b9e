//! # filmsim Core
//!
//! Core library for the filmsim recommender.
//!
//! This crate provides the numeric building blocks the feature pipeline
//! sits on:
//!
//! - [`SparseMatrix`] - CSR matrix used for every feature block and the fused matrix
//! - [`DistanceConfig`] / [`Metric`] - Minkowski-family and cosine distances on sparse rows
//! - [`SimilarityIndex`] - exact k-nearest-neighbor search with deterministic tie-breaking
//! - [`Error`] - the error taxonomy shared by all filmsim crates
//!
//! ## Example
//!
//! ```rust
//! use filmsim_core::{DistanceConfig, SimilarityIndex, SparseMatrix};
//! use std::sync::Arc;
//!
//! let rows = vec![vec![0.0, 1.0], vec![0.0, 2.0], vec![5.0, 5.0]];
//! let matrix = SparseMatrix::from_dense(&rows, 2).unwrap();
//! let index = SimilarityIndex::build(Arc::new(matrix), DistanceConfig::default()).unwrap();
//!
//! let neighbors = index.query(0, 2).unwrap();
//! assert_eq!(neighbors[0].row, 0);
//! assert_eq!(neighbors[1].row, 1);
//! ```

pub mod distance;
pub mod error;
pub mod index;
pub mod matrix;

pub use distance::{DistanceConfig, Metric};
pub use error::{Error, Result};
pub use index::{Neighbor, SimilarityIndex};
pub use matrix::{SparseMatrix, SparseRow};

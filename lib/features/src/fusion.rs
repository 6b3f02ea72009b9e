//! Horizontal concatenation of feature blocks.

use crate::schema::{BlockKind, FeatureSchema};
use filmsim_core::{Error, Result, SparseMatrix};
use std::ops::Range;
use std::sync::Arc;

/// Encoded output of one column for the whole catalog
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureBlock {
    pub kind: BlockKind,
    pub matrix: SparseMatrix,
}

impl FeatureBlock {
    pub fn new(kind: BlockKind, matrix: SparseMatrix) -> Self {
        Self { kind, matrix }
    }

    #[inline]
    #[must_use]
    pub fn width(&self) -> usize {
        self.matrix.n_cols()
    }
}

/// All blocks side by side, one row per catalog item
#[derive(Debug, Clone)]
pub struct FusedMatrix {
    schema: FeatureSchema,
    matrix: Arc<SparseMatrix>,
    ranges: Vec<(BlockKind, Range<usize>)>,
}

impl FusedMatrix {
    #[must_use]
    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    #[must_use]
    pub fn matrix(&self) -> &Arc<SparseMatrix> {
        &self.matrix
    }

    #[inline]
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.matrix.n_rows()
    }

    #[inline]
    #[must_use]
    pub fn n_cols(&self) -> usize {
        self.matrix.n_cols()
    }

    /// Fused column range occupied by `kind`
    #[must_use]
    pub fn block_range(&self, kind: BlockKind) -> Option<Range<usize>> {
        self.ranges
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, r)| r.clone())
    }

    pub fn block_widths(&self) -> Vec<(BlockKind, usize)> {
        self.ranges.iter().map(|(k, r)| (*k, r.len())).collect()
    }
}

/// Concatenate `blocks` in schema order.
///
/// Blocks must match the schema kind for kind and share one row count.
pub fn fuse(schema: &FeatureSchema, blocks: &[FeatureBlock]) -> Result<FusedMatrix> {
    schema.validate()?;

    let kinds: Vec<BlockKind> = blocks.iter().map(|b| b.kind).collect();
    if kinds != schema.blocks {
        return Err(Error::InvalidInput(format!(
            "blocks {:?} do not follow schema v{} order {:?}",
            kinds, schema.version, schema.blocks
        )));
    }

    let expected = blocks.first().map_or(0, |b| b.matrix.n_rows());
    if let Some(bad) = blocks.iter().find(|b| b.matrix.n_rows() != expected) {
        return Err(Error::ShapeMismatch {
            block: bad.kind.to_string(),
            expected,
            actual: bad.matrix.n_rows(),
        });
    }

    let mut ranges = Vec::with_capacity(blocks.len());
    let mut offset = 0;
    for block in blocks {
        ranges.push((block.kind, offset..offset + block.width()));
        offset += block.width();
    }

    let parts: Vec<&SparseMatrix> = blocks.iter().map(|b| &b.matrix).collect();
    let matrix = SparseMatrix::hstack(&parts)?;

    tracing::debug!(rows = matrix.n_rows(), cols = matrix.n_cols(), "feature blocks fused");
    Ok(FusedMatrix {
        schema: schema.clone(),
        matrix: Arc::new(matrix),
        ranges,
    })
}

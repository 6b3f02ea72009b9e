//! Build diagnostics.

use crate::schema::BlockKind;
use serde::Serialize;

/// A resource that could not be loaded. The build continues with an empty
/// substitute and lower quality results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DegradedResource {
    pub resource: String,
    pub reason: String,
}

impl DegradedResource {
    pub fn new(resource: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            reason: reason.into(),
        }
    }

    /// Emit the warning through `tracing`.
    pub fn warn(&self) {
        tracing::warn!(
            resource = %self.resource,
            reason = %self.reason,
            "resource unavailable, continuing with degraded quality"
        );
    }
}

impl std::fmt::Display for DegradedResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} unavailable: {}", self.resource, self.reason)
    }
}

/// Summary of a recommender build
#[derive(Debug, Clone, Default, Serialize)]
pub struct BuildReport {
    pub rows: usize,
    pub dim: usize,
    pub schema_version: u32,
    pub block_widths: Vec<(BlockKind, usize)>,
    pub degraded: Vec<DegradedResource>,
}

impl BuildReport {
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        !self.degraded.is_empty()
    }
}

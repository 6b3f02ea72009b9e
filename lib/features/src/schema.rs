//! Feature schema
//!
//! Fusion drops column labels, so the order in which blocks are
//! concatenated is the only thing tying a fused column back to its source.
//! The schema pins that order down and versions it.

use filmsim_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Source column of a feature block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    /// TF-IDF over the overview text
    Overview,
    /// Multi-hot genres
    Genres,
    /// Multi-hot production countries
    Countries,
    /// Hashed directors
    Directors,
    /// Hashed actors
    Actors,
    /// Standardized numeric columns
    Numeric,
}

impl BlockKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKind::Overview => "overview",
            BlockKind::Genres => "genres",
            BlockKind::Countries => "countries",
            BlockKind::Directors => "directors",
            BlockKind::Actors => "actors",
            BlockKind::Numeric => "numeric",
        }
    }
}

impl std::fmt::Display for BlockKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSchema {
    /// Schema version for future compatibility
    #[serde(default = "default_version")]
    pub version: u32,

    /// Blocks in concatenation order
    pub blocks: Vec<BlockKind>,
}

fn default_version() -> u32 {
    FeatureSchema::CURRENT_VERSION
}

impl FeatureSchema {
    pub const CURRENT_VERSION: u32 = 1;

    /// Version 1 layout: text, genres, countries, directors, actors, numeric.
    #[must_use]
    pub fn v1() -> Self {
        Self {
            version: 1,
            blocks: vec![
                BlockKind::Overview,
                BlockKind::Genres,
                BlockKind::Countries,
                BlockKind::Directors,
                BlockKind::Actors,
                BlockKind::Numeric,
            ],
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.version != Self::CURRENT_VERSION {
            return Err(Error::InvalidConfig(format!(
                "unsupported feature schema version {}",
                self.version
            )));
        }
        if self.blocks.is_empty() {
            return Err(Error::InvalidConfig("feature schema has no blocks".to_string()));
        }
        for (i, kind) in self.blocks.iter().enumerate() {
            if self.blocks[..i].contains(kind) {
                return Err(Error::InvalidConfig(format!(
                    "block '{}' appears twice in the feature schema",
                    kind
                )));
            }
        }
        Ok(())
    }
}

impl Default for FeatureSchema {
    fn default() -> Self {
        Self::v1()
    }
}

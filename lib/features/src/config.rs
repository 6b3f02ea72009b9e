//! Pipeline configuration.
//!
//! Every field has a default, so a JSON file only needs the options it
//! changes:
//!
//! ```json
//! { "text_vocab_size": 500, "distance_metric": "cosine" }
//! ```

use crate::encoders::hashing::{DEFAULT_ACTOR_BUCKETS, DEFAULT_DIRECTOR_BUCKETS};
use crate::encoders::text::DEFAULT_VOCAB_SIZE;
use crate::schema::FeatureSchema;
use filmsim_core::{DistanceConfig, Error, Metric, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

pub const DEFAULT_NEIGHBOR_COUNT: usize = 6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Maximum TF-IDF vocabulary size
    pub text_vocab_size: usize,
    pub director_hash_buckets: usize,
    pub actor_hash_buckets: usize,
    /// Neighbors fetched per query, the query row included
    pub neighbor_count: usize,
    pub distance_metric: Metric,
    /// Exponent used when `distance_metric` is `minkowski`
    pub minkowski_p: f64,
    pub stopword_languages: BTreeSet<String>,
    /// Read stopwords from `<dir>/<language>` instead of the built-in lists
    pub stopword_dir: Option<PathBuf>,
    pub schema: FeatureSchema,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            text_vocab_size: DEFAULT_VOCAB_SIZE,
            director_hash_buckets: DEFAULT_DIRECTOR_BUCKETS,
            actor_hash_buckets: DEFAULT_ACTOR_BUCKETS,
            neighbor_count: DEFAULT_NEIGHBOR_COUNT,
            distance_metric: Metric::Minkowski,
            minkowski_p: 2.0,
            stopword_languages: ["en", "fr"].iter().map(|s| s.to_string()).collect(),
            stopword_dir: None,
            schema: FeatureSchema::v1(),
        }
    }
}

impl PipelineConfig {
    pub fn from_json_str(input: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    #[must_use]
    pub fn distance(&self) -> DistanceConfig {
        DistanceConfig {
            metric: self.distance_metric,
            p: self.minkowski_p,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.text_vocab_size == 0 {
            return Err(Error::InvalidConfig("text_vocab_size must be at least 1".to_string()));
        }
        if self.director_hash_buckets == 0 || self.actor_hash_buckets == 0 {
            return Err(Error::InvalidConfig("hash bucket counts must be at least 1".to_string()));
        }
        if self.neighbor_count == 0 {
            return Err(Error::InvalidConfig("neighbor_count must be at least 1".to_string()));
        }
        self.distance().validate()?;
        self.schema.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.text_vocab_size, 300);
        assert_eq!(config.director_hash_buckets, 128);
        assert_eq!(config.actor_hash_buckets, 256);
        assert_eq!(config.neighbor_count, 6);
        assert_eq!(config.distance_metric, Metric::Minkowski);
        assert!(config.stopword_languages.contains("en"));
        assert!(config.stopword_languages.contains("fr"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let config =
            PipelineConfig::from_json_str(r#"{"text_vocab_size": 50, "distance_metric": "cosine"}"#)
                .unwrap();
        assert_eq!(config.text_vocab_size, 50);
        assert_eq!(config.distance_metric, Metric::Cosine);
        assert_eq!(config.actor_hash_buckets, 256);
    }

    #[test]
    fn test_rejects_invalid_values() {
        for bad in [
            r#"{"text_vocab_size": 0}"#,
            r#"{"actor_hash_buckets": 0}"#,
            r#"{"neighbor_count": 0}"#,
            r#"{"minkowski_p": 0.5}"#,
        ] {
            assert!(
                matches!(PipelineConfig::from_json_str(bad), Err(Error::InvalidConfig(_))),
                "accepted {}",
                bad
            );
        }
    }

    #[test]
    fn test_rejects_unknown_fields() {
        assert!(matches!(
            PipelineConfig::from_json_str(r#"{"vocab": 10}"#),
            Err(Error::Serialization(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("filmsim.json");
        std::fs::write(&path, r#"{"stopword_languages": ["en"]}"#).unwrap();
        let config = PipelineConfig::load(&path).unwrap();
        assert_eq!(config.stopword_languages.len(), 1);
    }
}

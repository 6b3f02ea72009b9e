//! Catalog rows and the list normalization rules applied before encoding.
//!
//! List-valued columns arrive in three shapes: a native JSON list, a bare
//! string, or nothing at all. `genres`, `actors` and `directors` treat a bare
//! string as a one-element list. `production_countries` is stored as the
//! textual literal of a list (`"['US', 'FR']"`) and is parsed.

use filmsim_core::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// Raw shape of a list-valued column before normalization
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LabelField {
    #[default]
    Missing,
    One(String),
    Many(Vec<String>),
}

impl LabelField {
    /// Bare string -> singleton, missing -> empty.
    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        match self {
            LabelField::Missing => Vec::new(),
            LabelField::One(label) => vec![label.clone()],
            LabelField::Many(labels) => labels.clone(),
        }
    }

    /// A string is parsed as a list literal; native lists pass through.
    pub fn literal_labels(&self) -> Result<Vec<String>> {
        match self {
            LabelField::Missing => Ok(Vec::new()),
            LabelField::One(literal) => parse_list_literal(literal),
            LabelField::Many(labels) => Ok(labels.clone()),
        }
    }
}

impl From<&str> for LabelField {
    fn from(s: &str) -> Self {
        LabelField::One(s.to_string())
    }
}

impl From<Vec<&str>> for LabelField {
    fn from(v: Vec<&str>) -> Self {
        LabelField::Many(v.into_iter().map(String::from).collect())
    }
}

/// One movie of the catalog
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default, rename = "startYear", deserialize_with = "display_string")]
    pub start_year: Option<String>,

    #[serde(default, rename = "actorsName")]
    pub actors_name: LabelField,

    #[serde(default)]
    pub overview: Option<String>,

    #[serde(default)]
    pub genres: LabelField,

    #[serde(default)]
    pub actors: LabelField,

    #[serde(default)]
    pub directors: LabelField,

    #[serde(default)]
    pub production_countries: LabelField,

    /// Every other column. Number-valued ones are the numeric features.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

fn display_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

impl CatalogItem {
    #[must_use]
    pub fn new(title: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_overview(mut self, overview: &str) -> Self {
        self.overview = Some(overview.to_string());
        self
    }

    #[must_use]
    pub fn with_genres(mut self, genres: impl Into<LabelField>) -> Self {
        self.genres = genres.into();
        self
    }

    #[must_use]
    pub fn with_actors(mut self, actors: impl Into<LabelField>) -> Self {
        self.actors = actors.into();
        self
    }

    #[must_use]
    pub fn with_directors(mut self, directors: impl Into<LabelField>) -> Self {
        self.directors = directors.into();
        self
    }

    #[must_use]
    pub fn with_countries(mut self, countries: impl Into<LabelField>) -> Self {
        self.production_countries = countries.into();
        self
    }

    #[must_use]
    pub fn with_number(mut self, column: &str, value: f64) -> Self {
        self.extra.insert(column.to_string(), Value::from(value));
        self
    }

    /// Overview text, empty when missing
    #[must_use]
    pub fn overview_text(&self) -> &str {
        self.overview.as_deref().unwrap_or("")
    }

    #[must_use]
    pub fn genre_labels(&self) -> Vec<String> {
        self.genres.labels()
    }

    #[must_use]
    pub fn actor_labels(&self) -> Vec<String> {
        self.actors.labels()
    }

    #[must_use]
    pub fn director_labels(&self) -> Vec<String> {
        self.directors.labels()
    }

    pub fn country_labels(&self) -> Result<Vec<String>> {
        self.production_countries.literal_labels()
    }

    /// Names of the number-valued extra columns of this row
    pub fn numeric_keys(&self) -> impl Iterator<Item = &str> {
        self.extra
            .iter()
            .filter(|(_, v)| v.is_number())
            .map(|(k, _)| k.as_str())
    }

    /// Value of a numeric column. Missing, null, non-numeric and
    /// non-finite values are all rejected.
    pub fn number(&self, column: &str) -> Result<f64> {
        let value = self
            .extra
            .get(column)
            .ok_or_else(|| Error::InvalidInput(format!("missing numeric column '{}'", column)))?;
        match value.as_f64() {
            Some(v) if v.is_finite() => Ok(v),
            _ => Err(Error::InvalidInput(format!(
                "column '{}' is not a finite number: {}",
                column, value
            ))),
        }
    }
}

/// Parse the textual literal of a list of strings, e.g. `['US', "FR"]`.
///
/// Accepts single or double quotes, backslash escapes, arbitrary
/// whitespace and a trailing comma.
pub fn parse_list_literal(literal: &str) -> Result<Vec<String>> {
    let malformed = |why: &str| Error::InvalidInput(format!("malformed list literal {:?}: {}", literal, why));

    let inner = literal
        .trim()
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or_else(|| malformed("expected brackets"))?;

    let mut labels = Vec::new();
    let mut chars = inner.chars().peekable();
    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        let quote = match chars.next() {
            None => break,
            Some(q @ ('\'' | '"')) => q,
            Some(_) => return Err(malformed("expected a quoted string")),
        };

        let mut label = String::new();
        loop {
            match chars.next() {
                None => return Err(malformed("unterminated string")),
                Some('\\') => match chars.next() {
                    Some('n') => label.push('\n'),
                    Some('t') => label.push('\t'),
                    Some(c) => label.push(c),
                    None => return Err(malformed("dangling escape")),
                },
                Some(c) if c == quote => break,
                Some(c) => label.push(c),
            }
        }
        labels.push(label);

        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        match chars.next() {
            None => break,
            Some(',') => continue,
            Some(_) => return Err(malformed("expected ',' between items")),
        }
    }
    Ok(labels)
}

/// The immutable set of catalog rows for a session
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

impl Catalog {
    #[must_use]
    pub fn new(items: Vec<CatalogItem>) -> Self {
        Self { items }
    }

    /// Parse either a JSON array of rows or JSON lines (one row per line).
    pub fn from_json_str(input: &str) -> Result<Self> {
        let trimmed = input.trim_start();
        let items: Vec<CatalogItem> = if trimmed.starts_with('[') {
            serde_json::from_str(trimmed)?
        } else {
            trimmed
                .lines()
                .enumerate()
                .filter(|(_, line)| !line.trim().is_empty())
                .map(|(n, line)| {
                    serde_json::from_str(line)
                        .map_err(|e| Error::Serialization(format!("line {}: {}", n + 1, e)))
                })
                .collect::<Result<Vec<CatalogItem>>>()?
        };
        Ok(Self { items })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&content)?;
        tracing::info!(path = %path.display(), rows = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    #[inline]
    #[must_use]
    pub fn get(&self, row: usize) -> Option<&CatalogItem> {
        self.items.get(row)
    }

    /// Row of the first item with exactly this title
    #[must_use]
    pub fn find_title(&self, title: &str) -> Option<usize> {
        self.items
            .iter()
            .position(|item| item.title.as_deref() == Some(title))
    }

    /// Distinct titles in sorted order
    #[must_use]
    pub fn titles(&self) -> Vec<&str> {
        self.items
            .iter()
            .filter_map(|item| item.title.as_deref())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Sorted union of numeric column names across all rows
    #[must_use]
    pub fn numeric_columns(&self) -> Vec<String> {
        crate::encoders::numeric::catalog_columns(&self.items)
    }
}

//! Static catalog of directory categories.
//!
//! The catalog is a JSON document, either wrapped (`{"categories": {...}, "promo": {...}}`)
//! or a bare object keyed by category. It is read once at startup and never mutated.
//! Loading is tolerant: entries that are malformed are skipped with a warning, and a
//! missing or unreadable document degrades to an empty catalog instead of failing.

use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

use crate::model::types::{CategoryRecord, PromoContent};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("reading catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("catalog is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("catalog root must be a JSON object")]
    NotAnObject,
}

/// Per-entry shape as written in the catalog document.
#[derive(Debug, Deserialize)]
struct RawEntry {
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    icon: String,
    #[serde(default)]
    color: String,
    url: String,
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<CategoryRecord>,
    promo: Option<PromoContent>,
}

impl Catalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a catalog from already-typed records, canonicalizing keys and
    /// dropping later duplicates.
    pub fn from_records(records: impl IntoIterator<Item = CategoryRecord>) -> Self {
        let mut seen = HashSet::new();
        let records = records
            .into_iter()
            .filter_map(|mut record| {
                record.key = canonical_key(&record.key)?;
                seen.insert(record.key.clone()).then_some(record)
            })
            .collect();
        Self {
            records,
            promo: None,
        }
    }


    /// Parse a catalog document. Only a non-JSON or non-object root is an error;
    /// bad entries are skipped.
    pub fn parse(json: &str) -> Result<Self, CatalogError> {
        let root: Value = serde_json::from_str(json)?;
        let Value::Object(root) = root else {
            return Err(CatalogError::NotAnObject);
        };

        let (categories, promo) = if is_wrapped(&root) {
            let promo = parse_promo(root.get("promo"));
            match root.get("categories") {
                Some(Value::Object(categories)) => (categories.clone(), promo),
                _ => {
                    warn!(component = "catalog", "`categories` is not an object; catalog is empty");
                    (Map::new(), promo)
                }
            }
        } else {
            (root, None)
        };

        let mut seen = HashSet::new();
        let mut records = Vec::with_capacity(categories.len());
        for (raw_key, value) in categories {
            let Some(key) = canonical_key(&raw_key) else {
                warn!(component = "catalog", "skipping entry with blank key");
                continue;
            };
            if seen.contains(&key) {
                warn!(component = "catalog", key = %key, "skipping duplicate key");
                continue;
            }
            match serde_json::from_value::<RawEntry>(value) {
                Ok(entry) if !entry.title.trim().is_empty() && !entry.url.trim().is_empty() => {
                    seen.insert(key.clone());
                    records.push(CategoryRecord {
                        key,
                        title: entry.title,
                        description: entry.description,
                        icon_ref: entry.icon,
                        color_tag: entry.color,
                        url: entry.url.trim().to_string(),
                    });
                }
                Ok(_) => {
                    warn!(component = "catalog", key = %key, "skipping entry with empty title or url");
                }
                Err(err) => {
                    warn!(component = "catalog", key = %key, error = %err, "skipping malformed entry");
                }
            }
        }

        debug!(
            component = "catalog",
            records = records.len(),
            promo = promo.is_some(),
            "catalog parsed"
        );
        Ok(Self { records, promo })
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let body = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&body)
    }

    /// Load the catalog, degrading to an empty one on any document-level failure.
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::load(path) {
            Ok(catalog) => catalog,
            Err(err) => {
                warn!(component = "catalog", path = %path.display(), error = %err, "using empty catalog");
                Self::empty()
            }
        }
    }

    pub fn records(&self) -> &[CategoryRecord] {
        &self.records
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.key.as_str())
    }

    /// Look up a record; the key is matched case-insensitively.
    pub fn get(&self, key: &str) -> Option<&CategoryRecord> {
        let key = canonical_key(key)?;
        self.records.iter().find(|r| r.key == key)
    }

    pub fn promo(&self) -> Option<&PromoContent> {
        self.promo.as_ref()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn canonical_key(raw: &str) -> Option<String> {
    let key = raw.trim().to_lowercase();
    (!key.is_empty()).then_some(key)
}

/// A root is the wrapped form when it carries a `promo` section, or when its
/// `categories` member is not itself shaped like a category entry.
fn is_wrapped(root: &Map<String, Value>) -> bool {
    if root.contains_key("promo") {
        return true;
    }
    match root.get("categories") {
        Some(Value::Object(inner)) => !looks_like_entry(inner),
        _ => false,
    }
}

fn looks_like_entry(value: &Map<String, Value>) -> bool {
    ["title", "url"]
        .iter()
        .any(|field| matches!(value.get(*field), Some(Value::String(_))))
}

fn parse_promo(value: Option<&Value>) -> Option<PromoContent> {
    let value = value?;
    match serde_json::from_value::<PromoContent>(value.clone()) {
        Ok(promo) if !promo.url.trim().is_empty() => Some(promo),
        Ok(_) => {
            warn!(component = "catalog", "promo section has an empty url; ignoring");
            None
        }
        Err(err) => {
            warn!(component = "catalog", error = %err, "ignoring malformed promo section");
            None
        }
    }
}

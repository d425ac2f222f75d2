//! Favorite categories.
//!
//! A set of catalog keys kept in insertion order for display and export.
//! Stored under the `favorites` key as a JSON array of keys; callers persist
//! after every mutation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::storage::kv::{FAVORITES_KEY, KvStore};

pub const EXPORT_VERSION: &str = "1.0";

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("parsing favorites export: {0}")]
    Json(#[from] serde_json::Error),
    #[error("reading favorites export {path}: {source}")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Portable snapshot of the favorites set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoritesExport {
    pub favorites: Vec<String>,
    #[serde(rename = "exportDate", default)]
    pub export_date: String,
    #[serde(default = "default_version")]
    pub version: String,
}

fn default_version() -> String {
    EXPORT_VERSION.to_string()
}

impl FavoritesExport {
    pub fn parse(json: &str) -> Result<Self, ImportError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn read(path: &std::path::Path) -> Result<Self, ImportError> {
        let body = std::fs::read_to_string(path).map_err(|source| ImportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&body)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FavoritesSet {
    keys: Vec<String>,
}

impl FavoritesSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from keys, dropping blanks and later duplicates.
    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for key in keys {
            set.add(key.as_ref());
        }
        set
    }

    pub fn load(store: &KvStore) -> Self {
        Self::from_keys(store.get_or::<Vec<String>>(FAVORITES_KEY, Vec::new()))
    }

    pub fn save(&self, store: &KvStore) -> bool {
        store.set_json(FAVORITES_KEY, &self.keys)
    }

    pub fn contains(&self, key: &str) -> bool {
        let key = canonical(key);
        self.keys.iter().any(|k| *k == key)
    }

    /// Add `key`; rejected when blank or already present.
    pub fn add(&mut self, key: &str) -> bool {
        let key = canonical(key);
        if key.is_empty() || self.keys.contains(&key) {
            return false;
        }
        self.keys.push(key);
        true
    }

    /// Remove `key`; no-op when absent.
    pub fn remove(&mut self, key: &str) -> bool {
        let key = canonical(key);
        let before = self.keys.len();
        self.keys.retain(|k| *k != key);
        self.keys.len() != before
    }

    /// Flip membership of `key`. Returns whether it is a favorite afterwards.
    pub fn toggle(&mut self, key: &str) -> bool {
        if self.remove(key) {
            false
        } else {
            self.add(key)
        }
    }

    pub fn toggled(&self, key: &str) -> Self {
        let mut next = self.clone();
        next.toggle(key);
        next
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    /// Badge count; hidden when there are no favorites.
    pub fn badge(&self) -> Option<usize> {
        (!self.keys.is_empty()).then_some(self.keys.len())
    }

    pub fn export(&self) -> FavoritesExport {
        FavoritesExport {
            favorites: self.keys.clone(),
            export_date: chrono::Utc::now().to_rfc3339(),
            version: EXPORT_VERSION.to_string(),
        }
    }

    /// Replace the set with the contents of an export.
    pub fn import(&mut self, export: &FavoritesExport) {
        *self = Self::from_keys(&export.favorites);
    }
}

fn canonical(key: &str) -> String {
    key.trim().to_lowercase()
}

//! Recent search terms.
//!
//! Newest first, capped at [`HISTORY_CAP`], one entry per term. Stored under
//! the `searchHistory` key as a JSON array of `{term, timestamp}`.

use serde::{Deserialize, Serialize};

use crate::storage::kv::{KvStore, SEARCH_HISTORY_KEY};

pub const HISTORY_CAP: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHistoryEntry {
    pub term: String,
    /// Unix millis
    pub timestamp: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchHistory {
    entries: Vec<SearchHistoryEntry>,
}

impl SearchHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from stored entries, re-applying the trim/dedup/cap rules.
    pub fn from_entries(entries: impl IntoIterator<Item = SearchHistoryEntry>) -> Self {
        let mut history = Self::new();
        for entry in entries {
            let term = entry.term.trim();
            if term.is_empty() || history.entries.iter().any(|e| e.term == term) {
                continue;
            }
            if history.entries.len() == HISTORY_CAP {
                break;
            }
            history.entries.push(SearchHistoryEntry {
                term: term.to_string(),
                timestamp: entry.timestamp,
            });
        }
        history
    }

    pub fn load(store: &KvStore) -> Self {
        Self::from_entries(store.get_or::<Vec<SearchHistoryEntry>>(SEARCH_HISTORY_KEY, Vec::new()))
    }

    pub fn save(&self, store: &KvStore) -> bool {
        store.set_json(SEARCH_HISTORY_KEY, &self.entries)
    }

    pub fn add(&mut self, term: &str) -> bool {
        self.add_at(term, chrono::Utc::now().timestamp_millis())
    }

    /// Record `term` as the newest entry. Blank terms are ignored.
    pub fn add_at(&mut self, term: &str, timestamp: i64) -> bool {
        let term = term.trim();
        if term.is_empty() {
            return false;
        }
        self.entries.retain(|e| e.term != term);
        self.entries.insert(
            0,
            SearchHistoryEntry {
                term: term.to_string(),
                timestamp,
            },
        );
        self.entries.truncate(HISTORY_CAP);
        true
    }

    pub fn entries(&self) -> &[SearchHistoryEntry] {
        &self.entries
    }

    pub fn get(&self, idx: usize) -> Option<&str> {
        self.entries.get(idx).map(|e| e.term.as_str())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

//! Visibility filter: which cards are shown, and why the grid is empty.

use serde::Serialize;
use unicode_normalization::UnicodeNormalization;

use crate::catalog::Catalog;
use crate::favorites::FavoritesSet;
use crate::model::types::CategoryRecord;

/// Why no cards are shown. `None` means the card grid is rendered, even if it is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyReason {
    None,
    NoResults,
    NoFavorites,
    NoFavoritesMatchingSearch,
}

/// Derived view; recomputed from scratch, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewState {
    pub favorites_only: bool,
    pub visible_keys: Vec<String>,
    pub empty_reason: EmptyReason,
}

impl ViewState {
    pub fn is_empty(&self) -> bool {
        self.visible_keys.is_empty()
    }
}

/// Fold text for case-insensitive comparison: NFC, then lowercase.
pub fn fold(text: &str) -> String {
    text.nfc().collect::<String>().to_lowercase()
}

/// Normalize a search term; whitespace-only terms become empty.
pub fn normalize_term(term: &str) -> String {
    fold(term.trim())
}

/// `needle` must already be normalized with [`normalize_term`].
fn matches_needle(record: &CategoryRecord, needle: &str) -> bool {
    needle.is_empty()
        || fold(&record.key).contains(needle)
        || fold(&record.title).contains(needle)
        || fold(&record.description).contains(needle)
}

/// True when `term` is empty or occurs in the record's key, title or description.
pub fn record_matches(record: &CategoryRecord, term: &str) -> bool {
    matches_needle(record, &normalize_term(term))
}

pub fn compute_view(
    catalog: &Catalog,
    favorites: &FavoritesSet,
    favorites_only: bool,
    term: &str,
) -> ViewState {
    let needle = normalize_term(term);

    let visible_keys: Vec<String> = catalog
        .records()
        .iter()
        .filter(|record| matches_needle(record, &needle))
        .filter(|record| !favorites_only || favorites.contains(&record.key))
        .map(|record| record.key.clone())
        .collect();

    let empty_reason = if favorites_only && favorites.is_empty() {
        EmptyReason::NoFavorites
    } else if visible_keys.is_empty() && !needle.is_empty() {
        if favorites_only {
            EmptyReason::NoFavoritesMatchingSearch
        } else {
            EmptyReason::NoResults
        }
    } else {
        EmptyReason::None
    };

    ViewState {
        favorites_only,
        visible_keys,
        empty_reason,
    }
}

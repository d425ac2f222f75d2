//! What to draw, independent of where it is drawn.
//!
//! Both the terminal UI and the HTML exporter render a [`Presentation`]: a
//! list of cards, or one empty-state block. Never both.

use serde::Serialize;

use crate::catalog::Catalog;
use crate::favorites::FavoritesSet;
use crate::model::types::CategoryRecord;
use crate::search::filter::{EmptyReason, ViewState};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardView {
    pub key: String,
    pub title: String,
    pub description: String,
    pub icon_ref: String,
    pub color_tag: String,
    pub url: String,
    pub favorite: bool,
}

impl CardView {
    pub fn from_record(record: &CategoryRecord, favorite: bool) -> Self {
        Self {
            key: record.key.clone(),
            title: record.title.clone(),
            description: record.description.clone(),
            icon_ref: record.icon_ref.clone(),
            color_tag: record.color_tag.clone(),
            url: record.url.clone(),
            favorite,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmptyStateMessage {
    pub reason: EmptyReason,
    /// Icon name (`heart` or `search`)
    pub icon: &'static str,
    pub title: String,
    pub description: String,
}

impl EmptyStateMessage {
    /// `None` for [`EmptyReason::None`]: the grid is drawn instead.
    pub fn for_reason(reason: EmptyReason, term: &str) -> Option<Self> {
        let (icon, title, description) = match reason {
            EmptyReason::None => return None,
            EmptyReason::NoFavorites => (
                "heart",
                "No favorites yet".to_string(),
                "Add categories to your favorites with the heart toggle".to_string(),
            ),
            EmptyReason::NoFavoritesMatchingSearch => (
                "search",
                "No favorites found".to_string(),
                format!("No favorites match \"{}\"", term.trim()),
            ),
            EmptyReason::NoResults => (
                "search",
                "No results found".to_string(),
                "Try a different search term".to_string(),
            ),
        };
        Some(Self {
            reason,
            icon,
            title,
            description,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Presentation {
    Cards { cards: Vec<CardView> },
    Empty { message: EmptyStateMessage },
}

impl Presentation {
    /// `term` is the debounced term the view was computed from.
    pub fn build(
        catalog: &Catalog,
        favorites: &FavoritesSet,
        view: &ViewState,
        term: &str,
    ) -> Self {
        if let Some(message) = EmptyStateMessage::for_reason(view.empty_reason, term) {
            return Presentation::Empty { message };
        }
        let cards = view
            .visible_keys
            .iter()
            .filter_map(|key| catalog.get(key))
            .map(|record| CardView::from_record(record, favorites.contains(&record.key)))
            .collect();
        Presentation::Cards { cards }
    }

    pub fn cards(&self) -> &[CardView] {
        match self {
            Presentation::Cards { cards } => cards,
            Presentation::Empty { .. } => &[],
        }
    }

    pub fn empty_message(&self) -> Option<&EmptyStateMessage> {
        match self {
            Presentation::Empty { message } => Some(message),
            Presentation::Cards { .. } => None,
        }
    }
}

//! Normalized catalog entities.

use serde::{Deserialize, Serialize};

/// One directory entry, rendered as a card that links out to `url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRecord {
    /// Lowercase canonical key, unique within a catalog
    pub key: String,
    pub title: String,
    pub description: String,
    /// Icon reference as written in the catalog (e.g. `fas fa-bone`)
    #[serde(rename = "icon")]
    pub icon_ref: String,
    /// Colour tag as written in the catalog (e.g. `blue`)
    #[serde(rename = "color")]
    pub color_tag: String,
    pub url: String,
}

/// Content of the promotional modal, taken from the catalog's `promo` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromoContent {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub url: String,
}

/// Emitted after a card (or the promo call-to-action) was opened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationEvent {
    pub key: String,
    pub url: String,
    pub title: String,
}

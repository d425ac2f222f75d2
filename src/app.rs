//! Composed directory state.
//!
//! `DirectoryApp` owns everything a renderer needs and is passed to it
//! explicitly. Every mutation that touches persisted data writes through to
//! the key-value store before returning; the derived view is recomputed
//! whenever one of its inputs changes.

use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;
use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::favorites::{FavoritesExport, FavoritesSet};
use crate::modal::{Modal, ModalState};
use crate::model::types::{NavigationEvent, PromoContent};
use crate::navigation::{NavigationError, Navigator};
use crate::search::filter::{ViewState, compute_view};
use crate::search::history::SearchHistory;
use crate::search::state::SearchState;
use crate::storage::kv::KvStore;
use crate::theme::Theme;

/// Event key reported when the promo call-to-action is opened.
pub const PROMO_KEY: &str = "promo";

pub struct DirectoryApp {
    catalog: Catalog,
    favorites: FavoritesSet,
    favorites_only: bool,
    search: SearchState,
    history: SearchHistory,
    history_cursor: Option<usize>,
    theme: Theme,
    modal: ModalState,
    store: KvStore,
    navigator: Navigator,
    view: ViewState,
    selected: Option<usize>,
    status: Option<String>,
}

impl DirectoryApp {
    /// Rehydrate favorites, history and theme from `store`.
    pub fn new(catalog: Catalog, store: KvStore, navigator: Navigator, debounce: Duration) -> Self {
        let favorites = FavoritesSet::load(&store);
        let history = SearchHistory::load(&store);
        let theme = Theme::load(&store);
        debug!(
            component = "app",
            categories = catalog.len(),
            favorites = favorites.len(),
            history = history.len(),
            theme = %theme,
            persistent = store.is_persistent(),
            "state restored"
        );
        let view = compute_view(&catalog, &favorites, false, "");
        let mut app = Self {
            catalog,
            favorites,
            favorites_only: false,
            search: SearchState::new(debounce),
            history,
            history_cursor: None,
            theme,
            modal: ModalState::default(),
            store,
            navigator,
            view,
            selected: None,
            status: None,
        };
        app.clamp_selection();
        app
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn favorites(&self) -> &FavoritesSet {
        &self.favorites
    }

    pub fn favorites_only(&self) -> bool {
        self.favorites_only
    }

    pub fn search(&self) -> &SearchState {
        &self.search
    }

    pub fn history(&self) -> &SearchHistory {
        &self.history
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn modal(&self) -> &ModalState {
        &self.modal
    }

    pub fn store(&self) -> &KvStore {
        &self.store
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn promo(&self) -> Option<&PromoContent> {
        self.catalog.promo()
    }

    pub fn badge(&self) -> Option<usize> {
        self.favorites.badge()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    pub fn subscribe(&mut self) -> Receiver<NavigationEvent> {
        self.navigator.subscribe()
    }

    fn refresh_view(&mut self) {
        self.view = compute_view(
            &self.catalog,
            &self.favorites,
            self.favorites_only,
            self.search.debounced_term(),
        );
        self.clamp_selection();
    }

    // -- favorites --------------------------------------------------------

    /// Flip `key` in the favorites set and persist. Returns whether it is now a favorite.
    pub fn toggle_favorite(&mut self, key: &str) -> bool {
        self.favorites = self.favorites.toggled(key);
        self.favorites.save(&self.store);
        let now_favorite = self.favorites.contains(key);
        info!(component = "favorites", key, favorite = now_favorite, count = self.favorites.len(), "toggled");
        self.refresh_view();
        now_favorite
    }

    pub fn toggle_selected_favorite(&mut self) -> Option<bool> {
        let key = self.selected_key()?.to_string();
        Some(self.toggle_favorite(&key))
    }

    pub fn is_favorite(&self, key: &str) -> bool {
        self.favorites.contains(key)
    }

    pub fn clear_favorites(&mut self) {
        self.favorites.clear();
        self.favorites.save(&self.store);
        self.refresh_view();
    }

    pub fn import_favorites(&mut self, export: &FavoritesExport) {
        self.favorites.import(export);
        self.favorites.save(&self.store);
        info!(component = "favorites", count = self.favorites.len(), "imported");
        self.refresh_view();
    }

    pub fn set_favorites_only(&mut self, on: bool) {
        if self.favorites_only != on {
            self.favorites_only = on;
            self.refresh_view();
        }
    }

    pub fn toggle_favorites_only(&mut self) -> bool {
        self.set_favorites_only(!self.favorites_only);
        self.favorites_only
    }

    // -- search -----------------------------------------------------------

    /// Keystroke path: the raw term updates now, the view after the quiet window.
    pub fn set_raw_term(&mut self, term: impl Into<String>, now: Instant) {
        self.history_cursor = None;
        self.search.on_raw_term_change(term, now);
    }

    /// Apply a due debounced term. Returns true when the view was recomputed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.search.tick(now) {
            debug!(component = "search", term = self.search.debounced_term(), "debounced term applied");
            self.refresh_view();
            true
        } else {
            false
        }
    }

    /// Set the term and filter immediately (non-interactive callers).
    pub fn set_search_now(&mut self, term: impl Into<String>) {
        self.search.set_now(term);
        self.refresh_view();
    }

    pub fn clear_search(&mut self) {
        self.history_cursor = None;
        self.search.clear();
        self.refresh_view();
    }

    /// Record the current raw term in history. Filtering still waits for the
    /// debounce window.
    pub fn commit_search(&mut self) -> bool {
        let term = self.search.raw_term().to_string();
        self.add_history(&term)
    }

    pub fn add_history(&mut self, term: &str) -> bool {
        let added = self.history.add(term);
        if added {
            self.history.save(&self.store);
        }
        added
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
        self.history_cursor = None;
        self.history.save(&self.store);
    }

    /// Load the next history entry as raw input, wrapping at the end.
    pub fn recall_history(&mut self, now: Instant) -> Option<&str> {
        if self.history.is_empty() {
            return None;
        }
        let next = match self.history_cursor {
            Some(idx) => (idx + 1) % self.history.len(),
            None => 0,
        };
        let term = self.history.get(next)?.to_string();
        self.search.on_raw_term_change(term, now);
        self.history_cursor = Some(next);
        self.history.get(next)
    }

    // -- theme ------------------------------------------------------------

    pub fn toggle_theme(&mut self) -> Theme {
        self.set_theme(self.theme.toggle());
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        theme.save(&self.store);
        info!(component = "theme", theme = %theme, "theme set");
    }

    // -- modal ------------------------------------------------------------

    /// Open the promo overlay. False when the catalog carries no promo.
    pub fn open_promo(&mut self) -> bool {
        if self.catalog.promo().is_none() {
            self.set_status("No promotion available");
            return false;
        }
        self.modal.open(Modal::Promo);
        true
    }

    pub fn open_modal(&mut self, modal: Modal) {
        self.modal.open(modal);
    }

    pub fn close_modal(&mut self) -> Option<Modal> {
        self.modal.close()
    }

    // -- navigation -------------------------------------------------------

    pub fn activate(&mut self, key: &str) -> Result<NavigationEvent, NavigationError> {
        let result = self.navigator.activate_card(&self.catalog, key);
        self.report(&result);
        result
    }

    pub fn activate_selected(&mut self) -> Option<Result<NavigationEvent, NavigationError>> {
        let key = self.selected_key()?.to_string();
        Some(self.activate(&key))
    }

    /// Open the promo call-to-action and close the overlay on success.
    pub fn open_promo_cta(&mut self) -> Option<Result<NavigationEvent, NavigationError>> {
        let promo = self.catalog.promo()?.clone();
        let result = self.navigator.open_link(PROMO_KEY, &promo.title, &promo.url);
        self.report(&result);
        if result.is_ok() {
            self.modal.close();
        }
        Some(result)
    }

    fn report(&mut self, result: &Result<NavigationEvent, NavigationError>) {
        self.status = Some(match result {
            Ok(event) => format!("Opened {}", event.title),
            Err(err) => err.to_string(),
        });
    }

    // -- card focus -------------------------------------------------------

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_key(&self) -> Option<&str> {
        self.selected
            .and_then(|idx| self.view.visible_keys.get(idx))
            .map(String::as_str)
    }

    fn clamp_selection(&mut self) {
        let len = self.view.visible_keys.len();
        self.selected = match (len, self.selected) {
            (0, _) => None,
            (_, None) => Some(0),
            (len, Some(idx)) => Some(idx.min(len - 1)),
        };
    }

    pub fn select_next(&mut self) {
        let len = self.view.visible_keys.len();
        if len > 0 {
            self.selected = Some(self.selected.map_or(0, |idx| (idx + 1) % len));
        }
    }

    pub fn select_prev(&mut self) {
        let len = self.view.visible_keys.len();
        if len > 0 {
            self.selected = Some(self.selected.map_or(len - 1, |idx| (idx + len - 1) % len));
        }
    }

    pub fn select_first(&mut self) {
        if !self.view.visible_keys.is_empty() {
            self.selected = Some(0);
        }
    }

    pub fn select_last(&mut self) {
        let len = self.view.visible_keys.len();
        if len > 0 {
            self.selected = Some(len - 1);
        }
    }
}

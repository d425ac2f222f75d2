use std::time::{Duration, Instant};

use super::debounce::Debouncer;

/// Raw input plus the debounced term that drives filtering.
#[derive(Debug)]
pub struct SearchState {
    raw_term: String,
    debounced_term: String,
    debouncer: Debouncer<String>,
}

impl SearchState {
    pub fn new(quiet: Duration) -> Self {
        Self {
            raw_term: String::new(),
            debounced_term: String::new(),
            debouncer: Debouncer::new(quiet),
        }
    }

    pub fn raw_term(&self) -> &str {
        &self.raw_term
    }

    pub fn debounced_term(&self) -> &str {
        &self.debounced_term
    }

    /// Echo the input immediately; the debounced term follows after the quiet window.
    pub fn on_raw_term_change(&mut self, term: impl Into<String>, now: Instant) {
        self.raw_term = term.into();
        self.debouncer.push(self.raw_term.clone(), now);
    }

    /// Apply a due update. Returns true when the debounced term was replaced.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.debouncer.poll(now) {
            Some(term) => {
                self.debounced_term = term;
                true
            }
            None => false,
        }
    }

    /// Set both terms at once, bypassing the quiet window.
    pub fn set_now(&mut self, term: impl Into<String>) {
        self.debouncer.cancel();
        self.raw_term = term.into();
        self.debounced_term = self.raw_term.clone();
    }

    pub fn clear(&mut self) {
        self.set_now(String::new());
    }

    pub fn is_settling(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// The clear affordance is shown whenever there is raw input.
    pub fn shows_clear_button(&self) -> bool {
        !self.raw_term.is_empty()
    }
}

impl Default for SearchState {
    fn default() -> Self {
        Self::new(super::debounce::DEFAULT_QUIET_WINDOW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_term_echoes_before_debounced_term() {
        let t0 = Instant::now();
        let mut state = SearchState::new(Duration::from_millis(300));
        state.on_raw_term_change("an", t0);
        assert_eq!(state.raw_term(), "an");
        assert_eq!(state.debounced_term(), "");
        assert!(state.shows_clear_button());
        assert!(!state.tick(t0 + Duration::from_millis(100)));
        assert!(state.tick(t0 + Duration::from_millis(300)));
        assert_eq!(state.debounced_term(), "an");
    }

    #[test]
    fn clear_is_immediate_and_cancels_pending() {
        let t0 = Instant::now();
        let mut state = SearchState::default();
        state.on_raw_term_change("bio", t0);
        state.clear();
        assert_eq!(state.raw_term(), "");
        assert_eq!(state.debounced_term(), "");
        assert!(!state.is_settling());
        assert!(!state.tick(t0 + Duration::from_secs(5)));
        assert!(!state.shows_clear_button());
    }
}

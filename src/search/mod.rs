//! Catalog search.
//!
//! - **[`filter`]**: the pure visibility filter turning catalog + favorites + term into a view.
//! - **[`debounce`]**: single-slot quiescence timer driven by an injected clock.
//! - **[`state`]**: raw/debounced search term pair built on the debouncer.
//! - **[`history`]**: recent search terms, capped and de-duplicated.

pub mod debounce;
pub mod filter;
pub mod history;
pub mod state;

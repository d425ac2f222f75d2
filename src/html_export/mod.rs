//! Static HTML export of the directory.
//!
//! Produces one self-contained page (inline CSS, a small inline theme-toggle
//! script) showing the same [`Presentation`](crate::ui::data::Presentation)
//! the terminal UI would draw.
//!
//! # Architecture
//!
//! ```text
//! html_export/
//! ├── mod.rs           # Module facade (this file)
//! ├── template.rs      # Page skeleton, options, escaping
//! ├── styles.rs        # Inline CSS, dark default + light-mode overrides
//! ├── scripts.rs       # Theme toggle
//! └── renderer.rs      # Cards, empty state, promo -> HTML
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use tyo_directory::html_export::{ExportOptions, HtmlExporter};
//!
//! let exporter = HtmlExporter::with_options(ExportOptions::default());
//! let html = exporter.export(&presentation, catalog.promo(), favorites.badge());
//! std::fs::write("directory.html", html)?;
//! ```

mod renderer;
mod scripts;
mod styles;
mod template;

pub use renderer::{render_card, render_empty_state, render_presentation, render_promo};
pub use scripts::{ScriptBundle, generate_scripts};
pub use styles::{StyleBundle, generate_styles};
pub use template::{ExportOptions, HtmlExporter, html_escape};

/// Page colours, kept in step with the terminal palettes.
pub mod colors {
    /// Deep background (#1a1b26)
    pub const BG_DEEP: &str = "#1a1b26";
    /// Cards and modals (#24283b)
    pub const BG_SURFACE: &str = "#24283b";
    pub const BORDER: &str = "#3b4261";
    pub const TEXT_PRIMARY: &str = "#c0caf5";
    pub const TEXT_MUTED: &str = "#696e9e";
    pub const ACCENT_PRIMARY: &str = "#7aa2f7";
    pub const ACCENT_SECONDARY: &str = "#bb9af7";
    pub const HEART: &str = "#f7768e";

    pub const LIGHT_BG: &str = "#fafafc";
    pub const LIGHT_SURFACE: &str = "#f0f1f5";
    pub const LIGHT_BORDER: &str = "#d8dee4";
    pub const LIGHT_TEXT: &str = "#24292e";
    pub const LIGHT_MUTED: &str = "#646c76";
    pub const LIGHT_ACCENT: &str = "#2f6be7";
    pub const LIGHT_HEART: &str = "#c82850";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_are_valid_hex() {
        let all_colors = [
            colors::BG_DEEP,
            colors::BG_SURFACE,
            colors::BORDER,
            colors::TEXT_PRIMARY,
            colors::TEXT_MUTED,
            colors::ACCENT_PRIMARY,
            colors::ACCENT_SECONDARY,
            colors::HEART,
            colors::LIGHT_BG,
            colors::LIGHT_SURFACE,
            colors::LIGHT_BORDER,
            colors::LIGHT_TEXT,
            colors::LIGHT_MUTED,
            colors::LIGHT_ACCENT,
            colors::LIGHT_HEART,
        ];

        for color in all_colors {
            assert!(
                color.starts_with('#') && color.len() == 7,
                "Invalid color format: {color}"
            );
            assert!(
                color[1..].chars().all(|c| c.is_ascii_hexdigit()),
                "Invalid hex in color: {color}"
            );
        }
    }
}

//! Terminal palettes for the light and dark themes, plus the mapping from
//! catalog colour tags and icon references to terminal colours and glyphs.

use ratatui::style::{Color, Modifier, Style};

use crate::theme::Theme;

/// Dark palette base colours.
pub mod colors {
    use ratatui::style::Color;

    // ═══════════════════════════════════════════════════════════════════════════
    // BASE COLORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Deep background - primary canvas color
    pub const BG_DEEP: Color = Color::Rgb(26, 27, 38); // #1a1b26

    /// Elevated surface - cards, modals
    pub const BG_SURFACE: Color = Color::Rgb(36, 40, 59); // #24283b

    /// Selected card
    pub const BG_HIGHLIGHT: Color = Color::Rgb(41, 46, 66); // #292e42

    pub const BORDER: Color = Color::Rgb(59, 66, 97); // #3b4261
    pub const BORDER_FOCUS: Color = Color::Rgb(125, 145, 200); // #7d91c8

    // ═══════════════════════════════════════════════════════════════════════════
    // TEXT COLORS
    // ═══════════════════════════════════════════════════════════════════════════

    pub const TEXT_PRIMARY: Color = Color::Rgb(192, 202, 245); // #c0caf5
    pub const TEXT_MUTED: Color = Color::Rgb(105, 114, 158); // #696e9e

    // ═══════════════════════════════════════════════════════════════════════════
    // ACCENTS
    // ═══════════════════════════════════════════════════════════════════════════

    pub const ACCENT_PRIMARY: Color = Color::Rgb(122, 162, 247); // #7aa2f7
    pub const ACCENT_SECONDARY: Color = Color::Rgb(187, 154, 247); // #bb9af7

    /// Favorite marker
    pub const HEART: Color = Color::Rgb(247, 118, 142); // #f7768e
    pub const STATUS_WARNING: Color = Color::Rgb(224, 175, 104); // #e0af68
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThemePalette {
    pub accent: Color,
    pub accent_alt: Color,
    pub bg: Color,
    pub fg: Color,
    pub surface: Color,
    pub highlight: Color,
    pub hint: Color,
    pub border: Color,
    pub border_focus: Color,
    pub heart: Color,
    pub warning: Color,
}

impl ThemePalette {
    /// Light theme - clean, minimal
    pub fn light() -> Self {
        Self {
            accent: Color::Rgb(47, 107, 231),        // Rich blue
            accent_alt: Color::Rgb(124, 93, 198),    // Purple
            bg: Color::Rgb(250, 250, 252),           // Off-white
            fg: Color::Rgb(36, 41, 46),              // Near-black
            surface: Color::Rgb(240, 241, 245),      // Light gray
            highlight: Color::Rgb(225, 232, 248),    // Pale blue
            hint: Color::Rgb(100, 108, 118),         // Medium gray
            border: Color::Rgb(216, 222, 228),       // Border gray
            border_focus: Color::Rgb(47, 107, 231),  // Same as accent
            heart: Color::Rgb(200, 40, 80),          // Crimson
            warning: Color::Rgb(177, 133, 41),       // Amber
        }
    }

    /// Dark theme - the default
    pub fn dark() -> Self {
        Self {
            accent: colors::ACCENT_PRIMARY,
            accent_alt: colors::ACCENT_SECONDARY,
            bg: colors::BG_DEEP,
            fg: colors::TEXT_PRIMARY,
            surface: colors::BG_SURFACE,
            highlight: colors::BG_HIGHLIGHT,
            hint: colors::TEXT_MUTED,
            border: colors::BORDER,
            border_focus: colors::BORDER_FOCUS,
            heart: colors::HEART,
            warning: colors::STATUS_WARNING,
        }
    }

    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self::light(),
            Theme::Dark => Self::dark(),
        }
    }

    /// Title style - accent colored with bold modifier
    pub fn title(self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn title_subtle(self) -> Style {
        Style::default().fg(self.fg).add_modifier(Modifier::BOLD)
    }

    pub fn base_style(self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    pub fn hint_style(self) -> Style {
        Style::default().fg(self.hint)
    }

    pub fn border_style(self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn border_focus_style(self) -> Style {
        Style::default().fg(self.border_focus)
    }

    /// Surface style - for cards and modals
    pub fn surface_style(self) -> Style {
        Style::default().bg(self.surface).fg(self.fg)
    }

    /// Selected card
    pub fn selected_style(self) -> Style {
        Style::default()
            .bg(self.highlight)
            .fg(self.fg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn heart_style(self) -> Style {
        Style::default().fg(self.heart).add_modifier(Modifier::BOLD)
    }

    /// Accent for a catalog colour tag. Unknown tags use the theme accent.
    pub fn tag_color(self, tag: &str) -> Color {
        match tag.trim().to_ascii_lowercase().as_str() {
            "blue" => Color::Rgb(59, 130, 246),
            "green" => Color::Rgb(34, 160, 94),
            "red" => Color::Rgb(220, 38, 38),
            "purple" => Color::Rgb(147, 51, 234),
            "orange" => Color::Rgb(234, 108, 0),
            "teal" => Color::Rgb(13, 148, 136),
            "pink" => Color::Rgb(219, 39, 119),
            "yellow" => Color::Rgb(202, 138, 4),
            "indigo" => Color::Rgb(79, 70, 229),
            "cyan" => Color::Rgb(8, 145, 178),
            "gray" | "grey" => self.hint,
            _ => self.accent,
        }
    }
}

/// Single-width glyph for a catalog icon reference such as `fas fa-bone`.
///
/// Only the last `fa-*` class is considered; anything unrecognised gets a bullet.
pub fn icon_glyph(icon_ref: &str) -> &'static str {
    let name = icon_ref
        .split_whitespace()
        .filter_map(|class| class.strip_prefix("fa-"))
        .last()
        .unwrap_or("");
    match name {
        "heart" => "♥",
        "search" => "⌕",
        "bone" | "skeleton" => "⚕",
        "brain" => "✺",
        "heartbeat" | "heart-pulse" => "♡",
        "book" | "book-open" | "book-medical" => "▤",
        "video" | "play" | "play-circle" => "▶",
        "dumbbell" | "running" | "person-running" => "⚑",
        "cog" | "cogs" | "gear" => "⚙",
        "star" => "★",
        "flask" | "vial" => "⚗",
        "graduation-cap" | "user-graduate" => "✎",
        "link" | "external-link-alt" => "↗",
        _ => "•",
    }
}

/// Keyboard shortcut style (for help text)
pub fn kbd_style(palette: ThemePalette) -> Style {
    Style::default()
        .fg(palette.accent)
        .add_modifier(Modifier::BOLD)
}

/// Badge/chip style for the favorites counter and filter indicators
pub fn chip_style(palette: ThemePalette) -> Style {
    Style::default()
        .fg(palette.accent_alt)
        .add_modifier(Modifier::BOLD)
}

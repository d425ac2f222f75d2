//! CSS generation for HTML export.

use super::colors;
use super::template::ExportOptions;
use tracing::debug;

/// Bundle of CSS styles for the template.
pub struct StyleBundle {
    /// Critical CSS inlined in the document
    pub critical_css: String,

    /// Print-specific CSS
    pub print_css: String,
}

pub fn generate_styles(options: &ExportOptions) -> StyleBundle {
    let toggle_styles = if options.include_theme_toggle {
        TOGGLE_STYLES
    } else {
        ""
    };
    let critical_css = format!(
        "{}\n{}\n{}\n{}\n{}",
        root_variables(),
        CORE_STYLES,
        COMPONENT_STYLES,
        TAG_STYLES,
        toggle_styles
    );
    let print_css = PRINT_STYLES.to_string();
    debug!(
        component = "styles",
        operation = "generate",
        critical_bytes = critical_css.len(),
        print_bytes = print_css.len(),
        "Generated CSS styles"
    );
    StyleBundle {
        critical_css,
        print_css,
    }
}

fn root_variables() -> String {
    format!(
        r#":root {{
  --bg: {bg};
  --surface: {surface};
  --border: {border};
  --text: {text};
  --muted: {muted};
  --accent: {accent};
  --accent-alt: {accent_alt};
  --heart: {heart};
}}

body.light-mode {{
  --bg: {light_bg};
  --surface: {light_surface};
  --border: {light_border};
  --text: {light_text};
  --muted: {light_muted};
  --accent: {light_accent};
  --heart: {light_heart};
}}"#,
        bg = colors::BG_DEEP,
        surface = colors::BG_SURFACE,
        border = colors::BORDER,
        text = colors::TEXT_PRIMARY,
        muted = colors::TEXT_MUTED,
        accent = colors::ACCENT_PRIMARY,
        accent_alt = colors::ACCENT_SECONDARY,
        heart = colors::HEART,
        light_bg = colors::LIGHT_BG,
        light_surface = colors::LIGHT_SURFACE,
        light_border = colors::LIGHT_BORDER,
        light_text = colors::LIGHT_TEXT,
        light_muted = colors::LIGHT_MUTED,
        light_accent = colors::LIGHT_ACCENT,
        light_heart = colors::LIGHT_HEART,
    )
}

const CORE_STYLES: &str = r#"
*, *::before, *::after { box-sizing: border-box; }

body {
  margin: 0;
  padding: 2rem clamp(1rem, 4vw, 3rem);
  background: var(--bg);
  color: var(--text);
  font-family: system-ui, -apple-system, "Segoe UI", Roboto, sans-serif;
  line-height: 1.5;
  transition: background 0.2s ease, color 0.2s ease;
}

h1, h2, h3 { margin: 0; line-height: 1.25; }

.site-header {
  display: flex;
  flex-wrap: wrap;
  align-items: center;
  gap: 0.75rem 1.5rem;
  margin-bottom: 2rem;
}

.site-header h1 { color: var(--accent); font-size: 1.75rem; }
.subtitle { margin: 0; color: var(--muted); }
.header-actions { margin-left: auto; display: flex; gap: 0.75rem; align-items: center; }

.favorites-badge {
  padding: 0.2rem 0.6rem;
  border-radius: 999px;
  background: var(--surface);
  color: var(--heart);
  font-weight: 700;
}
"#;

const COMPONENT_STYLES: &str = r#"
.card-grid {
  display: grid;
  grid-template-columns: repeat(auto-fill, minmax(240px, 1fr));
  gap: 1rem;
}

.category-card {
  --tag: var(--accent);
  position: relative;
  display: flex;
  flex-direction: column;
  gap: 0.5rem;
  padding: 1.25rem;
  border: 1px solid var(--border);
  border-top: 4px solid var(--tag);
  border-radius: 12px;
  background: var(--surface);
  color: inherit;
  text-decoration: none;
  transition: transform 0.15s ease, border-color 0.15s ease;
}

a.category-card:hover,
a.category-card:focus-visible {
  transform: translateY(-2px);
  border-color: var(--tag);
  outline: none;
}

.category-card.disabled { opacity: 0.55; cursor: not-allowed; }
.card-icon { color: var(--tag); font-size: 1.5rem; }
.card-title { font-size: 1.1rem; }
.card-description { margin: 0; color: var(--muted); font-size: 0.95rem; }
.favorite-marker { position: absolute; top: 0.75rem; right: 0.9rem; color: var(--heart); }

.empty-state {
  max-width: 32rem;
  margin: 4rem auto;
  text-align: center;
  color: var(--muted);
}
.empty-state h2 { color: var(--text); margin: 1rem 0 0.5rem; }
.empty-icon .icon { width: 3rem; height: 3rem; fill: var(--heart); color: var(--accent); }

.promo {
  margin-top: 3rem;
  padding: 1.5rem;
  border: 1px solid var(--accent-alt);
  border-radius: 12px;
  background: var(--surface);
}
.promo-cta {
  display: inline-block;
  margin-top: 0.5rem;
  padding: 0.5rem 1rem;
  border-radius: 8px;
  background: var(--accent);
  color: var(--bg);
  font-weight: 600;
  text-decoration: none;
}
"#;

const TAG_STYLES: &str = r#"
.tag-blue { --tag: #3b82f6; }
.tag-green { --tag: #22a05e; }
.tag-red { --tag: #dc2626; }
.tag-purple { --tag: #9333ea; }
.tag-orange { --tag: #ea6c00; }
.tag-teal { --tag: #0d9488; }
.tag-pink { --tag: #db2777; }
.tag-yellow { --tag: #ca8a04; }
.tag-indigo { --tag: #4f46e5; }
.tag-cyan { --tag: #0891b2; }
.tag-gray, .tag-grey { --tag: var(--muted); }
"#;

const TOGGLE_STYLES: &str = r#"
.theme-toggle {
  width: 2.25rem;
  height: 2.25rem;
  border: 1px solid var(--border);
  border-radius: 50%;
  background: var(--surface);
  color: var(--text);
  font-size: 1.1rem;
  cursor: pointer;
}
"#;

const PRINT_STYLES: &str = r#"
body { background: #fff; color: #000; padding: 0; }
.theme-toggle, .promo { display: none; }
.category-card { break-inside: avoid; border-color: #999; background: #fff; }
.category-card[href]::after { content: " (" attr(href) ")"; font-size: 0.8rem; color: #555; }
"#;

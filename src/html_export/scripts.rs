//! JavaScript generation for HTML export.
//!
//! The only script is the light/dark toggle. Filtering is done before the
//! page is written, so the page itself carries no search logic.

use super::template::ExportOptions;
use tracing::debug;

/// Storage key shared with the terminal preference name.
pub const THEME_STORAGE_KEY: &str = "theme";

/// Bundle of JavaScript for the template.
pub struct ScriptBundle {
    /// Inline JavaScript to include in the document; empty when nothing is needed
    pub inline_js: String,
}

pub fn generate_scripts(options: &ExportOptions) -> ScriptBundle {
    let mut scripts = Vec::new();

    if options.include_theme_toggle {
        scripts.push(generate_theme_js());
    }

    let inline_js = scripts.join("\n\n");
    debug!(
        component = "scripts",
        operation = "generate",
        include_theme_toggle = options.include_theme_toggle,
        inline_bytes = inline_js.len(),
        "Generated inline scripts"
    );
    ScriptBundle { inline_js }
}

fn generate_theme_js() -> String {
    format!(
        r#"// Theme toggle
(function () {{
    const KEY = '{THEME_STORAGE_KEY}';
    const body = document.body;
    const toggle = document.getElementById('theme-toggle');

    let saved = null;
    try {{ saved = localStorage.getItem(KEY); }} catch (e) {{}}
    if (saved === 'light' || saved === 'dark') {{
        body.classList.toggle('light-mode', saved === 'light');
    }}
    if (!toggle) return;

    toggle.addEventListener('click', () => {{
        const next = body.classList.toggle('light-mode') ? 'light' : 'dark';
        try {{ localStorage.setItem(KEY, next); }} catch (e) {{}}
    }});
}})();"#
    )
}

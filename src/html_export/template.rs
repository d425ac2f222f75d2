//! Page skeleton.

use tracing::info;

use super::renderer::{render_presentation, render_promo};
use super::scripts::generate_scripts;
use super::styles::generate_styles;
use crate::model::types::PromoContent;
use crate::theme::Theme;
use crate::ui::data::Presentation;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    pub title: String,
    /// Initial colour scheme; the page toggle can change it afterwards
    pub theme: Theme,
    pub include_theme_toggle: bool,
    /// Caption under the title, e.g. the search that produced the page
    pub subtitle: Option<String>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            title: "TyO Directory".to_string(),
            theme: Theme::Dark,
            include_theme_toggle: true,
            subtitle: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct HtmlExporter {
    options: ExportOptions,
}

impl HtmlExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ExportOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    pub fn export(
        &self,
        presentation: &Presentation,
        promo: Option<&PromoContent>,
        badge: Option<usize>,
    ) -> String {
        let options = &self.options;
        let styles = generate_styles(options);
        let scripts = generate_scripts(options);
        let title = html_escape(&options.title);

        let body_class = match options.theme {
            Theme::Light => " class=\"light-mode\"",
            Theme::Dark => "",
        };
        let badge_html = badge
            .map(|n| format!(r#"<span class="favorites-badge" aria-label="{n} favorites">♥ {n}</span>"#))
            .unwrap_or_default();
        let subtitle_html = options
            .subtitle
            .as_deref()
            .map(|s| format!(r#"<p class="subtitle">{}</p>"#, html_escape(s)))
            .unwrap_or_default();
        let toggle_html = if options.include_theme_toggle {
            r#"<button id="theme-toggle" class="theme-toggle" type="button" aria-label="Toggle theme">◐</button>"#
        } else {
            ""
        };
        let promo_html = promo.and_then(render_promo).unwrap_or_default();
        let script_html = if scripts.inline_js.is_empty() {
            String::new()
        } else {
            format!("<script>\n{}\n</script>", scripts.inline_js)
        };

        let html = format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<meta name="generator" content="tyo {version}">
<title>{title}</title>
<style>
{css}
</style>
<style media="print">
{print_css}
</style>
</head>
<body{body_class}>
<header class="site-header">
<h1>{title}</h1>
{subtitle_html}
<div class="header-actions">{badge_html}{toggle_html}</div>
</header>
<main id="directory">
{content}
</main>
{promo_html}
{script_html}
</body>
</html>
"#,
            version = env!("CARGO_PKG_VERSION"),
            css = styles.critical_css,
            print_css = styles.print_css,
            content = render_presentation(presentation),
        );

        info!(
            component = "html_export",
            operation = "export",
            cards = presentation.cards().len(),
            empty = presentation.empty_message().is_some(),
            bytes = html.len(),
            "Rendered directory page"
        );
        html
    }
}

/// Escape text for use in element content and double-quoted attributes.
pub fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

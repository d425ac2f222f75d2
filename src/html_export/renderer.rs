//! Presentation to HTML rendering.
//!
//! All catalog text is escaped. Links open in a new browsing context with
//! `rel="noopener noreferrer"`; a card whose URL fails validation is rendered
//! without a link.

use tracing::{debug, warn};

use super::template::html_escape;
use crate::model::types::PromoContent;
use crate::navigation::validate_url;
use crate::ui::data::{CardView, EmptyStateMessage, Presentation};

const ICON_HEART: &str = r#"<svg class="icon" viewBox="0 0 24 24" aria-hidden="true"><path d="M12 21s-7.5-4.6-9.5-9.1C1.2 8.8 3.2 5 6.9 5c2.1 0 3.6 1.1 5.1 3 1.5-1.9 3-3 5.1-3 3.7 0 5.7 3.8 4.4 6.9C19.5 16.4 12 21 12 21z"/></svg>"#;
const ICON_SEARCH: &str = r#"<svg class="icon" viewBox="0 0 24 24" aria-hidden="true"><circle cx="11" cy="11" r="7" fill="none" stroke="currentColor" stroke-width="2"/><path d="M20 20l-4-4" stroke="currentColor" stroke-width="2"/></svg>"#;

/// Keep only characters that are safe inside a CSS class name.
fn class_token(raw: &str) -> String {
    raw.trim()
        .to_ascii_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect()
}

pub fn render_card(card: &CardView) -> String {
    let tag = class_token(&card.color_tag);
    let tag_class = if tag.is_empty() {
        String::new()
    } else {
        format!(" tag-{tag}")
    };
    let favorite_class = if card.favorite { " is-favorite" } else { "" };
    let marker = if card.favorite {
        r#"<span class="favorite-marker" aria-label="Favorite">♥</span>"#
    } else {
        ""
    };
    let inner = format!(
        r#"<span class="card-icon"><i class="{icon}" aria-hidden="true"></i></span>
<h3 class="card-title">{title}</h3>
<p class="card-description">{description}</p>
{marker}"#,
        icon = html_escape(&card.icon_ref),
        title = html_escape(&card.title),
        description = html_escape(&card.description),
    );
    let key = html_escape(&card.key);

    match validate_url(&card.url) {
        Some(url) => format!(
            r#"<a class="category-card{tag_class}{favorite_class}" data-key="{key}" href="{href}" target="_blank" rel="noopener noreferrer">
{inner}
</a>"#,
            href = html_escape(url.as_str()),
        ),
        None => {
            warn!(component = "renderer", key = %card.key, url = %card.url, "card rendered without link");
            format!(
                r#"<div class="category-card disabled{tag_class}{favorite_class}" data-key="{key}" aria-disabled="true">
{inner}
</div>"#
            )
        }
    }
}

pub fn render_empty_state(message: &EmptyStateMessage) -> String {
    let icon = match message.icon {
        "heart" => ICON_HEART,
        _ => ICON_SEARCH,
    };
    format!(
        r#"<section class="empty-state" role="status">
<div class="empty-icon">{icon}</div>
<h2>{title}</h2>
<p>{description}</p>
</section>"#,
        title = html_escape(&message.title),
        description = html_escape(&message.description),
    )
}

pub fn render_presentation(presentation: &Presentation) -> String {
    match presentation {
        Presentation::Cards { cards } => {
            let body: Vec<String> = cards.iter().map(render_card).collect();
            debug!(component = "renderer", operation = "render_cards", cards = cards.len(), "Rendered card grid");
            format!("<div class=\"card-grid\">\n{}\n</div>", body.join("\n"))
        }
        Presentation::Empty { message } => render_empty_state(message),
    }
}

/// `None` when the promo URL is not a valid absolute URL.
pub fn render_promo(promo: &PromoContent) -> Option<String> {
    let Some(url) = validate_url(&promo.url) else {
        warn!(component = "renderer", url = %promo.url, "promo omitted: invalid url");
        return None;
    };
    Some(format!(
        r#"<aside class="promo" aria-labelledby="promo-title">
<h2 id="promo-title">{title}</h2>
<p>{description}</p>
<a class="promo-cta" href="{href}" target="_blank" rel="noopener noreferrer">Learn more</a>
</aside>"#,
        title = html_escape(&promo.title),
        description = html_escape(&promo.description),
        href = html_escape(url.as_str()),
    ))
}

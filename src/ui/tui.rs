//! Ratatui-based interface over the directory state.

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use crossterm::{ExecutableCommand, execute};
use ratatui::backend::TestBackend;
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use std::io::{self, Write};
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::app::DirectoryApp;
use crate::modal::Modal;
use crate::model::types::PromoContent;
use crate::ui::components::theme::{ThemePalette, chip_style, icon_glyph, kbd_style};
use crate::ui::data::{CardView, EmptyStateMessage, Presentation};
use crate::ui::shortcuts;

/// Rows per card including borders.
const CARD_HEIGHT: u16 = 4;
const HEADLESS_SIZE: (u16, u16) = (100, 30);

/// Per-session view state that is not part of the directory itself.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct UiState {
    pub help_scroll: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Continue,
    Quit,
}

pub fn help_lines(palette: ThemePalette) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = Vec::new();

    let add_section = |title: &str, items: &[(&str, &str)]| -> Vec<Line<'static>> {
        let mut v = Vec::new();
        v.push(Line::from(Span::styled(title.to_string(), palette.title())));
        for (key, what) in items {
            v.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(format!("{key:<10}"), kbd_style(palette)),
                Span::raw(what.to_string()),
            ]));
        }
        v.push(Line::from(""));
        v
    };

    lines.extend(add_section(
        "Search",
        &[
            ("type", "filter cards by key, title or description"),
            (shortcuts::OPEN, "save the search to history / open the selected card"),
            (shortcuts::HISTORY_CYCLE, "cycle recent searches"),
            (shortcuts::CLEAR_OR_QUIT, "clear the search (quits when already empty)"),
        ],
    ));
    lines.extend(add_section(
        "Favorites",
        &[
            (shortcuts::TOGGLE_FAVORITE, "add/remove the selected card"),
            (shortcuts::FAVORITES_ONLY, "show favorites only"),
        ],
    ));
    lines.extend(add_section(
        "Navigation",
        &[
            (shortcuts::MOVE, "move between cards (wraps)"),
            (shortcuts::JUMP_TOP, "first card"),
            (shortcuts::JUMP_BOTTOM, "last card"),
        ],
    ));
    lines.extend(add_section(
        "Other",
        &[
            (shortcuts::HELP, "toggle this help"),
            (shortcuts::THEME, "theme: dark/light"),
            (shortcuts::PROMO, "promotion"),
            (shortcuts::QUIT, "quit"),
        ],
    ));

    lines
}

pub fn footer_legend(show_help: bool) -> &'static str {
    if show_help {
        "Esc close help • ↑/↓ scroll • PgUp/PgDn page • Home/End jump"
    } else {
        "F1 help | F2 theme | F3 favorites | F4 promo | Ctrl+F favorite | Enter open | Ctrl+R history | Esc clear/quit"
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Cards per row for a terminal width.
pub fn card_columns(width: u16) -> usize {
    if width < 80 {
        1
    } else if width <= 120 {
        2
    } else {
        3
    }
}

pub fn draw(frame: &mut Frame, app: &DirectoryApp, ui: &UiState) {
    let palette = ThemePalette::for_theme(app.theme());
    frame.render_widget(Block::default().style(palette.base_style()), frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // search bar
            Constraint::Length(1), // badges + status
            Constraint::Min(0),    // cards
            Constraint::Length(1), // footer
        ])
        .split(frame.area());

    render_search_bar(frame, chunks[0], app, palette);
    render_status_row(frame, chunks[1], app, palette);

    let presentation = Presentation::build(
        app.catalog(),
        app.favorites(),
        app.view(),
        app.search().debounced_term(),
    );
    match &presentation {
        Presentation::Cards { cards } => {
            render_cards(frame, chunks[2], cards, app.selected(), palette);
        }
        Presentation::Empty { message } => render_empty_state(frame, chunks[2], message, palette),
    }

    let help_open = app.modal().is_open(Modal::Help);
    let mut footer = String::new();
    if let Some(idx) = app.selected() {
        footer.push_str(&format!("{}/{} • ", idx + 1, presentation.cards().len()));
    }
    footer.push_str(footer_legend(help_open));
    frame.render_widget(
        Paragraph::new(footer).style(palette.hint_style()),
        chunks[3],
    );

    match app.modal().current() {
        Some(Modal::Help) => render_help_overlay(frame, palette, ui.help_scroll),
        Some(Modal::Promo) => {
            if let Some(promo) = app.promo() {
                render_promo_modal(frame, palette, promo);
            }
        }
        None => {}
    }
}

fn render_search_bar(frame: &mut Frame, area: Rect, app: &DirectoryApp, palette: ThemePalette) {
    let search = app.search();
    let mut spans = vec![Span::styled("⌕ ", palette.title())];
    if search.raw_term().is_empty() {
        spans.push(Span::styled("Type to search categories…", palette.hint_style()));
    } else {
        spans.push(Span::styled(search.raw_term().to_string(), palette.title_subtle()));
        spans.push(Span::styled("▏", Style::default().fg(palette.accent)));
    }
    if search.shows_clear_button() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled("[Esc ✕ clear]", palette.hint_style()));
    }

    let block = Block::default()
        .title(Span::styled(" TyO Directory ", palette.title()))
        .borders(Borders::ALL)
        .border_style(palette.border_focus_style());
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_status_row(frame: &mut Frame, area: Rect, app: &DirectoryApp, palette: ThemePalette) {
    let mut spans = Vec::new();
    if let Some(count) = app.badge() {
        spans.push(Span::styled(format!("♥ {count}"), palette.heart_style()));
        spans.push(Span::raw("  "));
    }
    if app.favorites_only() {
        spans.push(Span::styled("[F3] favorites only", chip_style(palette)));
        spans.push(Span::raw("  "));
    }
    spans.push(Span::styled(format!("[F2] {}", app.theme()), palette.hint_style()));
    if app.search().is_settling() {
        spans.push(Span::styled("  …", palette.hint_style()));
    }
    if let Some(status) = app.status() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(status.to_string(), Style::default().fg(palette.warning)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_cards(
    frame: &mut Frame,
    area: Rect,
    cards: &[CardView],
    selected: Option<usize>,
    palette: ThemePalette,
) {
    if area.height == 0 || area.width == 0 {
        return;
    }
    let cols = card_columns(area.width);
    let visible_rows = usize::from((area.height / CARD_HEIGHT).max(1));
    let selected_row = selected.unwrap_or(0) / cols;
    let first_row = selected_row.saturating_sub(visible_rows - 1);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(CARD_HEIGHT); visible_rows])
        .split(area);

    for (r, row_area) in rows.iter().enumerate() {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, cols as u32); cols])
            .split(*row_area);
        for (c, cell) in cells.iter().enumerate() {
            let idx = (first_row + r) * cols + c;
            let Some(card) = cards.get(idx) else {
                return;
            };
            frame.render_widget(card_widget(card, selected == Some(idx), palette), *cell);
        }
    }
}

fn card_widget(card: &CardView, selected: bool, palette: ThemePalette) -> Paragraph<'static> {
    let tag = palette.tag_color(&card.color_tag);
    let heart = if card.favorite {
        Span::styled(" ♥", palette.heart_style())
    } else {
        Span::styled(" ♡", palette.hint_style())
    };
    let title = Line::from(vec![
        Span::styled(icon_glyph(&card.icon_ref), Style::default().fg(tag)),
        Span::raw(" "),
        Span::styled(card.title.clone(), palette.title_subtle()),
        heart,
    ]);
    let description = Line::from(Span::styled(card.description.clone(), palette.hint_style()));

    let (style, border) = if selected {
        (palette.selected_style(), palette.border_focus_style())
    } else {
        (palette.surface_style(), Style::default().fg(tag))
    };
    Paragraph::new(vec![title, description]).style(style).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(Span::styled(card.key.clone(), palette.hint_style())),
    )
}

fn render_empty_state(
    frame: &mut Frame,
    area: Rect,
    message: &EmptyStateMessage,
    palette: ThemePalette,
) {
    let glyph = icon_glyph(&format!("fa-{}", message.icon));
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(glyph, palette.heart_style())),
        Line::from(""),
        Line::from(Span::styled(message.title.clone(), palette.title())),
        Line::from(Span::styled(message.description.clone(), palette.hint_style())),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).border_style(palette.border_style())),
        area,
    );
}

fn render_help_overlay(frame: &mut Frame, palette: ThemePalette, scroll: u16) {
    let popup_area = centered_rect(70, 70, frame.area());
    let block = Block::default()
        .title(Span::styled("Help / Shortcuts", palette.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.accent));

    frame.render_widget(Clear, popup_area);
    frame.render_widget(
        Paragraph::new(help_lines(palette))
            .style(palette.surface_style())
            .block(block)
            .wrap(Wrap { trim: true })
            .scroll((scroll, 0)),
        popup_area,
    );
}

fn render_promo_modal(frame: &mut Frame, palette: ThemePalette, promo: &PromoContent) {
    let popup_area = centered_rect(60, 40, frame.area());
    let lines = vec![
        Line::from(Span::styled(promo.title.clone(), palette.title())),
        Line::from(""),
        Line::from(promo.description.clone()),
        Line::from(""),
        Line::from(vec![
            Span::styled(shortcuts::MODAL_CONFIRM, kbd_style(palette)),
            Span::raw(" open  "),
            Span::styled(shortcuts::MODAL_CLOSE, kbd_style(palette)),
            Span::raw(" close"),
        ]),
    ];
    frame.render_widget(Clear, popup_area);
    frame.render_widget(
        Paragraph::new(lines)
            .style(palette.surface_style())
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(palette.accent_alt)),
            ),
        popup_area,
    );
}

/// Apply one key press. Overlays capture every key while open.
pub fn handle_key(app: &mut DirectoryApp, ui: &mut UiState, key: KeyEvent, now: Instant) -> KeyOutcome {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return KeyOutcome::Quit;
    }

    match app.modal().current() {
        Some(Modal::Help) => {
            match key.code {
                KeyCode::Esc | KeyCode::F(1) => {
                    app.close_modal();
                    ui.help_scroll = 0;
                }
                KeyCode::Up => ui.help_scroll = ui.help_scroll.saturating_sub(1),
                KeyCode::Down => ui.help_scroll = ui.help_scroll.saturating_add(1),
                KeyCode::PageUp => ui.help_scroll = ui.help_scroll.saturating_sub(5),
                KeyCode::PageDown => ui.help_scroll = ui.help_scroll.saturating_add(5),
                KeyCode::Home => ui.help_scroll = 0,
                KeyCode::End => {
                    ui.help_scroll = u16::try_from(help_lines(ThemePalette::dark()).len()).unwrap_or(u16::MAX);
                }
                _ => {}
            }
            return KeyOutcome::Continue;
        }
        Some(Modal::Promo) => {
            match key.code {
                KeyCode::Esc | KeyCode::F(4) => {
                    app.close_modal();
                }
                KeyCode::Enter => {
                    app.open_promo_cta();
                }
                _ => {}
            }
            return KeyOutcome::Continue;
        }
        None => {}
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::F(1) => app.open_modal(Modal::Help),
        KeyCode::F(2) => {
            app.toggle_theme();
        }
        KeyCode::F(3) => {
            app.toggle_favorites_only();
        }
        KeyCode::F(4) => {
            app.open_promo();
        }
        KeyCode::Char('f') if ctrl => {
            app.toggle_selected_favorite();
        }
        KeyCode::Char('r') if ctrl => {
            app.recall_history(now);
        }
        KeyCode::Enter => {
            let settling = app.search().is_settling();
            app.commit_search();
            if !settling {
                app.activate_selected();
            }
        }
        KeyCode::Esc => {
            if app.search().raw_term().is_empty() {
                return KeyOutcome::Quit;
            }
            app.clear_search();
        }
        KeyCode::Up | KeyCode::Left => app.select_prev(),
        KeyCode::Down | KeyCode::Right => app.select_next(),
        KeyCode::Home => app.select_first(),
        KeyCode::End => app.select_last(),
        KeyCode::Backspace => {
            let mut term = app.search().raw_term().to_string();
            if term.pop().is_some() {
                app.clear_status();
                app.set_raw_term(term, now);
            }
        }
        KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
            let mut term = app.search().raw_term().to_string();
            term.push(c);
            app.clear_status();
            app.set_raw_term(term, now);
        }
        _ => {}
    }
    KeyOutcome::Continue
}

/// Render one frame of `app` into an in-memory terminal.
pub fn render_to_buffer(app: &DirectoryApp, width: u16, height: u16) -> Result<Vec<String>> {
    let mut terminal = Terminal::new(TestBackend::new(width, height))?;
    terminal.draw(|f| draw(f, app, &UiState::default()))?;
    let buffer = terminal.backend().buffer();
    let lines = (0..height)
        .map(|y| {
            (0..width)
                .map(|x| buffer[(x, y)].symbol())
                .collect::<String>()
                .trim_end()
                .to_string()
        })
        .collect();
    Ok(lines)
}

pub fn run_tui(mut app: DirectoryApp, once: bool) -> Result<()> {
    if once
        && dotenvy::var("TUI_HEADLESS")
            .map(|v| v == "1")
            .unwrap_or(false)
    {
        return run_tui_headless(&app);
    }

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = app.subscribe();
    let mut ui = UiState::default();
    let tick_rate = Duration::from_millis(30);
    let mut last_tick = Instant::now();
    let mut needs_draw = true;
    info!(component = "tui", categories = app.catalog().len(), "tui started");

    loop {
        if needs_draw {
            terminal.draw(|f| draw(f, &app, &ui))?;
            needs_draw = false;
            if once {
                break;
            }
        }

        let timeout = if needs_draw {
            Duration::from_millis(0)
        } else {
            tick_rate
                .checked_sub(last_tick.elapsed())
                .unwrap_or_else(|| Duration::from_millis(0))
        };

        if crossterm::event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    needs_draw = true;
                    if handle_key(&mut app, &mut ui, key, Instant::now()) == KeyOutcome::Quit {
                        break;
                    }
                }
            } else {
                // resize and focus changes
                needs_draw = true;
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
            if app.tick(last_tick) {
                needs_draw = true;
            }
            while let Ok(event) = events.try_recv() {
                debug!(component = "tui", key = %event.key, url = %event.url, "navigation event");
            }
        }
    }

    teardown_terminal()
}

fn run_tui_headless(app: &DirectoryApp) -> Result<()> {
    let (width, height) = HEADLESS_SIZE;
    let lines = render_to_buffer(app, width, height)?;
    let mut out = io::stdout().lock();
    for line in lines {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

fn teardown_terminal() -> Result<()> {
    let mut stdout = io::stdout();
    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen)?;
    Ok(())
}

pub mod app;
pub mod catalog;
pub mod config;
pub mod favorites;
pub mod html_export;
pub mod logging;
pub mod modal;
pub mod model;
pub mod navigation;
pub mod search;
pub mod storage;
pub mod theme;
pub mod ui;

use anyhow::{Context, Result};
use clap::{ArgAction, CommandFactory, FromArgMatches, Parser, Subcommand};
use colored::Colorize;
use serde_json::json;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::app::DirectoryApp;
use crate::catalog::Catalog;
use crate::config::{AppConfig, Overrides};
use crate::favorites::FavoritesExport;
use crate::html_export::{ExportOptions, HtmlExporter};
use crate::navigation::{DryRunOpener, NavigationError, Navigator, SystemOpener};
use crate::storage::kv::KvStore;
use crate::theme::Theme;
use crate::ui::data::Presentation;

/// Exit status for a rejected card activation.
pub const EXIT_REJECTED: u8 = 2;

/// Command-line interface.
#[derive(Parser, Debug)]
#[command(
    name = "tyo",
    version,
    about = "Searchable, favoritable link directory"
)]
pub struct Cli {
    /// Catalog JSON document (defaults to <data-dir>/catalog.json)
    #[arg(long, global = true, env = config::CATALOG_ENV)]
    pub catalog: Option<PathBuf>,

    /// Directory holding state.db and logs (defaults to platform data dir)
    #[arg(long, global = true, env = config::DATA_DIR_ENV)]
    pub data_dir: Option<PathBuf>,

    /// Config file (defaults to platform config dir)
    #[arg(long, global = true, env = config::CONFIG_ENV)]
    pub config: Option<PathBuf>,

    /// Raise log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Defaults to `tui`
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Launch interactive TUI
    Tui {
        /// Render once and exit (headless-friendly)
        #[arg(long, default_value_t = false)]
        once: bool,
    },
    /// Print the cards matching a search
    List {
        #[arg(long)]
        search: Option<String>,
        /// Only favorites
        #[arg(long)]
        favorites: bool,
        #[arg(long)]
        json: bool,
    },
    /// Open a card's link in the browser
    Open {
        key: String,
        /// Validate and report without launching a browser
        #[arg(long)]
        dry_run: bool,
        #[arg(long)]
        json: bool,
    },
    /// Manage favorites
    Fav {
        #[command(subcommand)]
        action: FavCommand,
    },
    /// Show or change the theme
    Theme {
        #[command(subcommand)]
        action: Option<ThemeCommand>,
    },
    /// Recent searches
    History {
        #[command(subcommand)]
        action: Option<HistoryCommand>,
    },
    /// Write the directory as a standalone HTML page
    ExportHtml {
        /// Output file (stdout when omitted)
        #[arg(long)]
        out: Option<PathBuf>,
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        favorites: bool,
        /// Initial page theme (defaults to the saved preference)
        #[arg(long, value_enum)]
        theme: Option<Theme>,
    },
    /// Generate shell completions to stdout
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
    /// Generate man page to stdout
    Man,
}

#[derive(Subcommand, Debug)]
pub enum FavCommand {
    /// Add or remove a category
    Toggle { key: String },
    List {
        #[arg(long)]
        json: bool,
    },
    Clear,
    /// Write favorites as JSON (stdout when --out is omitted)
    Export {
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Replace favorites from an export file
    Import { file: PathBuf },
}

#[derive(Subcommand, Debug)]
pub enum ThemeCommand {
    Show,
    Toggle,
    Set {
        #[arg(value_enum)]
        theme: Theme,
    },
}

#[derive(Subcommand, Debug)]
pub enum HistoryCommand {
    List {
        #[arg(long)]
        json: bool,
    },
    Add { term: String },
    Clear,
}

pub fn long_version() -> String {
    let mut out = env!("CARGO_PKG_VERSION").to_string();
    for (label, value) in [
        ("built", option_env!("VERGEN_BUILD_TIMESTAMP")),
        ("target", option_env!("VERGEN_CARGO_TARGET_TRIPLE")),
        ("debug", option_env!("VERGEN_CARGO_DEBUG")),
    ] {
        if let Some(value) = value {
            out.push_str(&format!("\n{label}: {value}"));
        }
    }
    out
}

/// Process exit status for an error returned by [`run`].
pub fn exit_code(err: &anyhow::Error) -> u8 {
    if err.downcast_ref::<NavigationError>().is_some() {
        EXIT_REJECTED
    } else {
        1
    }
}

pub fn run() -> Result<()> {
    let matches = Cli::command().long_version(long_version()).get_matches();
    let cli = Cli::from_arg_matches(&matches)?;
    let command = cli.command.unwrap_or(Commands::Tui { once: false });

    // The TUI logs to a file under the data dir, so it can only start after config resolution.
    let interactive = matches!(command, Commands::Tui { once: false });
    if !interactive {
        logging::init_stderr(cli.verbose);
    }

    let cfg = AppConfig::resolve(Overrides {
        catalog: cli.catalog,
        data_dir: cli.data_dir,
        config: cli.config,
    });

    let _log_guard = if interactive {
        Some(logging::init_file(&cfg.log_dir(), cli.verbose)?)
    } else {
        None
    };
    info!(
        component = "cli",
        catalog = %cfg.catalog.display(),
        data_dir = %cfg.data_dir.display(),
        "starting"
    );

    match command {
        Commands::Tui { once } => {
            let app = build_app(&cfg, system_navigator(&cfg));
            ui::tui::run_tui(app, once)
        }
        Commands::List {
            search,
            favorites,
            json,
        } => run_list(&cfg, search.as_deref(), favorites, json),
        Commands::Open { key, dry_run, json } => run_open(&cfg, &key, dry_run, json),
        Commands::Fav { action } => run_fav(&cfg, action),
        Commands::Theme { action } => run_theme(&cfg, action.unwrap_or(ThemeCommand::Show)),
        Commands::History { action } => {
            run_history(&cfg, action.unwrap_or(HistoryCommand::List { json: false }))
        }
        Commands::ExportHtml {
            out,
            search,
            favorites,
            theme,
        } => run_export_html(&cfg, out.as_deref(), search.as_deref(), favorites, theme),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "tyo", &mut std::io::stdout());
            Ok(())
        }
        Commands::Man => {
            let cmd = Cli::command();
            let man = clap_mangen::Man::new(cmd);
            let mut out = std::io::stdout();
            man.render(&mut out)?;
            Ok(())
        }
    }
}

fn system_navigator(cfg: &AppConfig) -> Navigator {
    Navigator::new(SystemOpener::from_env(cfg.browser.clone()))
}

fn build_app(cfg: &AppConfig, navigator: Navigator) -> DirectoryApp {
    let catalog = Catalog::load_or_empty(&cfg.catalog);
    let store = KvStore::open_or_memory(&cfg.state_db_path());
    DirectoryApp::new(catalog, store, navigator, cfg.debounce)
}

/// Store-only access for commands that never need the catalog.
fn open_store(cfg: &AppConfig) -> KvStore {
    KvStore::open_or_memory(&cfg.state_db_path())
}

fn print_json(value: &impl serde::Serialize) -> Result<()> {
    let mut out = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}

fn run_list(cfg: &AppConfig, search: Option<&str>, favorites_only: bool, json: bool) -> Result<()> {
    let mut app = build_app(cfg, Navigator::dry_run());
    app.set_favorites_only(favorites_only);
    app.set_search_now(search.unwrap_or(""));
    let term = app.search().debounced_term().to_string();
    let presentation = Presentation::build(app.catalog(), app.favorites(), app.view(), &term);

    if json {
        return print_json(&json!({
            "term": term,
            "favorites_only": favorites_only,
            "badge": app.badge(),
            "empty_reason": app.view().empty_reason,
            "visible_keys": app.view().visible_keys,
            "presentation": presentation,
        }));
    }

    let mut out = std::io::stdout().lock();
    match &presentation {
        Presentation::Cards { cards } => {
            for card in cards {
                let heart = if card.favorite { "♥".red().to_string() } else { " ".to_string() };
                writeln!(out, "{heart} {}  {}", card.key.bold(), card.title)?;
                if !card.description.is_empty() {
                    writeln!(out, "    {}", card.description.dimmed())?;
                }
                writeln!(out, "    {}", card.url.cyan())?;
            }
        }
        Presentation::Empty { message } => {
            writeln!(out, "{}", message.title.yellow().bold())?;
            writeln!(out, "{}", message.description)?;
        }
    }
    Ok(())
}

fn run_open(cfg: &AppConfig, key: &str, dry_run: bool, json: bool) -> Result<()> {
    let navigator = if dry_run {
        Navigator::new(DryRunOpener)
    } else {
        system_navigator(cfg)
    };
    let mut app = build_app(cfg, navigator);
    let event = app.activate(key)?;
    if json {
        print_json(&json!({ "opened": !dry_run, "event": event }))
    } else {
        let verb = if dry_run { "Would open" } else { "Opened" };
        println!("{verb} {} ({})", event.title, event.url);
        Ok(())
    }
}

fn run_fav(cfg: &AppConfig, action: FavCommand) -> Result<()> {
    let mut app = build_app(cfg, Navigator::dry_run());
    match action {
        FavCommand::Toggle { key } => {
            if app.catalog().get(&key).is_none() && !app.is_favorite(&key) {
                anyhow::bail!("unknown category: {key}");
            }
            let now = app.toggle_favorite(&key);
            let state = if now { "added to" } else { "removed from" };
            println!("{} {state} favorites ({} total)", key.trim().to_lowercase(), app.favorites().len());
        }
        FavCommand::List { json } => {
            let keys: Vec<&str> = app.favorites().iter().collect();
            if json {
                print_json(&keys)?;
            } else {
                for key in keys {
                    let title = app.catalog().get(key).map(|r| r.title.as_str()).unwrap_or("(not in catalog)");
                    println!("{} {key}  {title}", "♥".red());
                }
            }
        }
        FavCommand::Clear => {
            app.clear_favorites();
            println!("favorites cleared");
        }
        FavCommand::Export { out } => {
            let export = app.favorites().export();
            let body = serde_json::to_string_pretty(&export)?;
            write_output(out.as_deref(), &body)?;
        }
        FavCommand::Import { file } => {
            let export = FavoritesExport::read(&file)?;
            app.import_favorites(&export);
            println!("imported {} favorites", app.favorites().len());
        }
    }
    Ok(())
}

fn run_theme(cfg: &AppConfig, action: ThemeCommand) -> Result<()> {
    let store = open_store(cfg);
    let theme = match action {
        ThemeCommand::Show => Theme::load(&store),
        ThemeCommand::Toggle => {
            let next = Theme::load(&store).toggle();
            next.save(&store);
            next
        }
        ThemeCommand::Set { theme } => {
            theme.save(&store);
            theme
        }
    };
    println!("{theme}");
    Ok(())
}

fn run_history(cfg: &AppConfig, action: HistoryCommand) -> Result<()> {
    let mut app = build_app(cfg, Navigator::dry_run());
    match action {
        HistoryCommand::List { json } => {
            if json {
                return print_json(&app.history().entries());
            }
            for entry in app.history().entries() {
                let when = chrono::DateTime::from_timestamp_millis(entry.timestamp)
                    .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_default();
                println!("{}  {}", when.dimmed(), entry.term);
            }
        }
        HistoryCommand::Add { term } => {
            if !app.add_history(&term) {
                anyhow::bail!("search term is empty");
            }
        }
        HistoryCommand::Clear => {
            app.clear_history();
            println!("history cleared");
        }
    }
    Ok(())
}

fn run_export_html(
    cfg: &AppConfig,
    out: Option<&Path>,
    search: Option<&str>,
    favorites_only: bool,
    theme: Option<Theme>,
) -> Result<()> {
    let mut app = build_app(cfg, Navigator::dry_run());
    app.set_favorites_only(favorites_only);
    app.set_search_now(search.unwrap_or(""));
    let term = app.search().debounced_term().to_string();
    let presentation = Presentation::build(app.catalog(), app.favorites(), app.view(), &term);

    let subtitle = match (term.trim().is_empty(), favorites_only) {
        (true, false) => None,
        (true, true) => Some("Favorites".to_string()),
        (false, false) => Some(format!("Search: {}", term.trim())),
        (false, true) => Some(format!("Favorites matching: {}", term.trim())),
    };
    let exporter = HtmlExporter::with_options(ExportOptions {
        theme: theme.unwrap_or(app.theme()),
        subtitle,
        ..ExportOptions::default()
    });
    let html = exporter.export(&presentation, app.promo(), app.badge());
    write_output(out, &html)?;
    if let Some(path) = out {
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}

fn write_output(out: Option<&Path>, body: &str) -> Result<()> {
    match out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
            std::fs::write(path, body).with_context(|| format!("writing {}", path.display()))
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(body.as_bytes())?;
            if !body.ends_with('\n') {
                writeln!(stdout)?;
            }
            Ok(())
        }
    }
}

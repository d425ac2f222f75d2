//! Card activation: resolve a key to its URL, validate it, open it, announce it.
//!
//! Opening happens in a separate browser process, so the new browsing context
//! has no handle back to this program. Subscribers receive a
//! [`NavigationEvent`] only after the launch succeeded.

use crossbeam_channel::{Receiver, Sender};
use thiserror::Error;
use tracing::{debug, info, warn};
use url::Url;

use crate::catalog::Catalog;
use crate::model::types::NavigationEvent;

/// Environment variable naming a browser command used instead of the platform opener.
pub const BROWSER_ENV: &str = "TYO_BROWSER";

#[derive(Debug, Error)]
pub enum NavigationError {
    #[error("unknown category: {0}")]
    UnknownCategory(String),
    #[error("invalid url for {key}: {url:?}")]
    InvalidUrl { key: String, url: String },
    #[error("opening {url}: {source}")]
    Launch {
        url: String,
        #[source]
        source: std::io::Error,
    },
}

/// Something that can hand a URL to a browser.
pub trait UrlOpener {
    fn open(&self, url: &Url) -> std::io::Result<()>;
}

/// Launches the platform browser, or the configured command when one is set.
#[derive(Debug, Clone, Default)]
pub struct SystemOpener {
    command: Option<String>,
}

impl SystemOpener {
    pub fn new(command: Option<String>) -> Self {
        Self {
            command: command.filter(|c| !c.trim().is_empty()),
        }
    }

    /// `TYO_BROWSER` wins over the configured command.
    pub fn from_env(configured: Option<String>) -> Self {
        Self::new(dotenvy::var(BROWSER_ENV).ok().or(configured))
    }
}

impl UrlOpener for SystemOpener {
    fn open(&self, url: &Url) -> std::io::Result<()> {
        let argv = match &self.command {
            Some(command) => configured_argv(command, url.as_str())?,
            None => platform_argv(std::env::consts::OS, url.as_str()).ok_or_else(|| {
                std::io::Error::new(
                    std::io::ErrorKind::Unsupported,
                    format!("no browser opener for this platform ({url})"),
                )
            })?,
        };
        spawn_reaped(&argv)
    }
}

/// Split a user browser command and append the URL as its last argument.
fn configured_argv(command: &str, url: &str) -> std::io::Result<Vec<String>> {
    let mut words = shell_words::split(command)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
    if words.is_empty() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "empty browser command",
        ));
    }
    words.push(url.to_string());
    Ok(words)
}

/// Opener command line for `os`. None of these go through a shell, so the
/// URL reaches the opener as a single argument.
fn platform_argv(os: &str, url: &str) -> Option<Vec<String>> {
    let prefix: &[&str] = match os {
        "windows" => &["rundll32", "url.dll,FileProtocolHandler"],
        "macos" => &["open"],
        "linux" | "freebsd" | "openbsd" | "netbsd" | "dragonfly" => &["xdg-open"],
        _ => return None,
    };
    let mut argv: Vec<String> = prefix.iter().map(|s| s.to_string()).collect();
    argv.push(url.to_string());
    Some(argv)
}

/// Spawn the opener and wait for it on a background thread so it never
/// lingers as a zombie.
fn spawn_reaped(argv: &[String]) -> std::io::Result<()> {
    let Some((program, args)) = argv.split_first() else {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "empty browser command",
        ));
    };
    let mut child = std::process::Command::new(program).args(args).spawn()?;
    std::thread::Builder::new()
        .name("tyo-opener-reaper".into())
        .spawn(move || {
            if let Err(err) = child.wait() {
                debug!(component = "navigation", error = %err, "waiting on browser process failed");
            }
        })?;
    Ok(())
}

/// Opens nothing; used by `--dry-run` and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRunOpener;

impl UrlOpener for DryRunOpener {
    fn open(&self, _url: &Url) -> std::io::Result<()> {
        Ok(())
    }
}

/// Generic URL-syntax check: an absolute URL with a scheme.
pub fn validate_url(raw: &str) -> Option<Url> {
    Url::parse(raw.trim()).ok()
}

pub struct Navigator {
    opener: Box<dyn UrlOpener>,
    subscribers: Vec<Sender<NavigationEvent>>,
}

impl Navigator {
    pub fn new(opener: impl UrlOpener + 'static) -> Self {
        Self {
            opener: Box::new(opener),
            subscribers: Vec::new(),
        }
    }

    pub fn dry_run() -> Self {
        Self::new(DryRunOpener)
    }

    /// Receive every future navigation event.
    pub fn subscribe(&mut self) -> Receiver<NavigationEvent> {
        let (tx, rx) = crossbeam_channel::unbounded();
        self.subscribers.push(tx);
        rx
    }

    pub fn activate_card(
        &mut self,
        catalog: &Catalog,
        key: &str,
    ) -> Result<NavigationEvent, NavigationError> {
        let Some(record) = catalog.get(key) else {
            warn!(component = "navigation", key, "no catalog entry for card");
            return Err(NavigationError::UnknownCategory(key.to_string()));
        };
        self.open_link(&record.key, &record.title, &record.url)
    }

    /// Validate and open an arbitrary link on behalf of `key`.
    pub fn open_link(
        &mut self,
        key: &str,
        title: &str,
        raw_url: &str,
    ) -> Result<NavigationEvent, NavigationError> {
        let Some(url) = validate_url(raw_url) else {
            warn!(component = "navigation", key, url = raw_url, "rejecting invalid url");
            return Err(NavigationError::InvalidUrl {
                key: key.to_string(),
                url: raw_url.to_string(),
            });
        };

        if let Err(source) = self.opener.open(&url) {
            warn!(component = "navigation", key, url = %url, error = %source, "browser launch failed");
            return Err(NavigationError::Launch {
                url: url.to_string(),
                source,
            });
        }

        let event = NavigationEvent {
            key: key.to_string(),
            url: url.to_string(),
            title: title.to_string(),
        };
        info!(component = "navigation", key, url = %event.url, "opened");
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::types::CategoryRecord;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<String>>>);

    impl UrlOpener for Recorder {
        fn open(&self, url: &Url) -> std::io::Result<()> {
            self.0.borrow_mut().push(url.to_string());
            Ok(())
        }
    }

    struct Failing;

    impl UrlOpener for Failing {
        fn open(&self, _url: &Url) -> std::io::Result<()> {
            Err(std::io::Error::other("no browser"))
        }
    }

    fn catalog() -> Catalog {
        let record = |key: &str, url: &str| CategoryRecord {
            key: key.into(),
            title: key.to_uppercase(),
            description: String::new(),
            icon_ref: String::new(),
            color_tag: String::new(),
            url: url.into(),
        };
        Catalog::from_records([
            record("good", "https://example.com/good"),
            record("bad", "not a url"),
        ])
    }

    #[test]
    fn valid_card_opens_and_emits() {
        let recorder = Recorder::default();
        let mut nav = Navigator::new(recorder.clone());
        let rx = nav.subscribe();

        let event = nav.activate_card(&catalog(), "GOOD").unwrap();
        assert_eq!(event.key, "good");
        assert_eq!(event.title, "GOOD");
        assert_eq!(recorder.0.borrow().as_slice(), ["https://example.com/good"]);
        assert_eq!(rx.try_recv().unwrap(), event);
    }

    #[test]
    fn invalid_url_is_rejected_without_side_effects() {
        let recorder = Recorder::default();
        let mut nav = Navigator::new(recorder.clone());
        let rx = nav.subscribe();

        let err = nav.activate_card(&catalog(), "bad").unwrap_err();
        assert!(matches!(err, NavigationError::InvalidUrl { .. }));
        assert!(recorder.0.borrow().is_empty());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn unknown_key_is_rejected() {
        let mut nav = Navigator::dry_run();
        let err = nav.activate_card(&catalog(), "missing").unwrap_err();
        assert!(matches!(err, NavigationError::UnknownCategory(_)));
    }

    #[test]
    fn failed_launch_emits_nothing() {
        let mut nav = Navigator::new(Failing);
        let rx = nav.subscribe();
        let err = nav.activate_card(&catalog(), "good").unwrap_err();
        assert!(matches!(err, NavigationError::Launch { .. }));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let mut nav = Navigator::dry_run();
        let kept = nav.subscribe();
        drop(nav.subscribe());
        nav.activate_card(&catalog(), "good").unwrap();
        assert_eq!(nav.subscribers.len(), 1);
        assert!(kept.try_recv().is_ok());
    }

    #[test]
    fn platform_openers_keep_query_urls_whole() {
        let url = "https://x.example/?a=1&b=2";
        assert_eq!(
            platform_argv("windows", url).unwrap(),
            ["rundll32", "url.dll,FileProtocolHandler", url]
        );
        assert_eq!(platform_argv("macos", url).unwrap(), ["open", url]);
        assert_eq!(platform_argv("linux", url).unwrap(), ["xdg-open", url]);
        assert!(platform_argv("haiku", url).is_none());
    }

    #[test]
    fn configured_command_appends_url() {
        let argv = configured_argv("firefox --new-tab --profile 'my profile'", "https://e.example/?q=a&b").unwrap();
        assert_eq!(
            argv,
            ["firefox", "--new-tab", "--profile", "my profile", "https://e.example/?q=a&b"]
        );
        assert!(configured_argv("   ", "https://e.example").is_err());
        assert!(configured_argv("'unterminated", "https://e.example").is_err());
    }

    #[cfg(unix)]
    #[test]
    fn configured_opener_process_is_reaped() {
        let opener = SystemOpener::new(Some("true".into()));
        let url = Url::parse("https://example.com").unwrap();
        opener.open(&url).unwrap();
        assert!(spawn_reaped(&[]).is_err());
    }

    #[test]
    fn url_validation_requires_scheme() {
        assert!(validate_url("https://example.com").is_some());
        assert!(validate_url("  https://example.com/a b ").is_some());
        assert!(validate_url("example.com").is_none());
        assert!(validate_url("not a url").is_none());
        assert!(validate_url("").is_none());
    }
}

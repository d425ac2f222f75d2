//! Layered settings: CLI flags > `TYO_*` environment (and `.env`) > `config.toml` > defaults.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::search::debounce::DEFAULT_QUIET_WINDOW;

pub const CATALOG_ENV: &str = "TYO_CATALOG";
pub const DATA_DIR_ENV: &str = "TYO_DATA_DIR";
pub const CONFIG_ENV: &str = "TYO_CONFIG";
pub const DEBOUNCE_ENV: &str = "TYO_DEBOUNCE_MS";

pub const CATALOG_FILE: &str = "catalog.json";
pub const CONFIG_FILE: &str = "config.toml";
pub const STATE_DB_FILE: &str = "state.db";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing config {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Shape of `config.toml`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub catalog: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
    pub debounce_ms: Option<u64>,
    pub browser: Option<String>,
}

impl FileConfig {
    pub fn parse(body: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(body).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// `Ok(None)` when the file does not exist.
    pub fn read(path: &Path) -> Result<Option<Self>, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(body) => Self::parse(&body, path).map(Some),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

/// Values supplied on the command line. clap already folds in the `TYO_*` variables.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub catalog: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub catalog: PathBuf,
    pub data_dir: PathBuf,
    pub debounce: Duration,
    pub browser: Option<String>,
}

impl AppConfig {
    /// Resolve the effective settings. A broken config file is reported and ignored.
    pub fn resolve(overrides: Overrides) -> Self {
        let _ = dotenvy::dotenv();

        let config_path = overrides
            .config
            .clone()
            .or_else(|| dotenvy::var(CONFIG_ENV).ok().map(PathBuf::from))
            .or_else(default_config_path);

        let file = match config_path.as_deref().map(FileConfig::read) {
            Some(Ok(Some(file))) => {
                debug!(component = "config", path = ?config_path, "loaded config file");
                file
            }
            Some(Ok(None)) | None => FileConfig::default(),
            Some(Err(err)) => {
                warn!(component = "config", error = %err, "ignoring config file");
                FileConfig::default()
            }
        };

        Self::layer(overrides, file, |key| dotenvy::var(key).ok())
    }

    /// Merge the layers. `env` looks up a variable by name.
    pub fn layer(
        overrides: Overrides,
        file: FileConfig,
        env: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let data_dir = overrides
            .data_dir
            .or_else(|| env(DATA_DIR_ENV).map(PathBuf::from))
            .or(file.data_dir)
            .unwrap_or_else(default_data_dir);

        let catalog = overrides
            .catalog
            .or_else(|| env(CATALOG_ENV).map(PathBuf::from))
            .or(file.catalog)
            .unwrap_or_else(|| data_dir.join(CATALOG_FILE));

        let debounce_ms = env(DEBOUNCE_ENV).and_then(|raw| match raw.trim().parse::<u64>() {
            Ok(ms) => Some(ms),
            Err(_) => {
                warn!(component = "config", value = %raw, "ignoring non-numeric {DEBOUNCE_ENV}");
                None
            }
        });
        let debounce = debounce_ms
            .or(file.debounce_ms)
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_QUIET_WINDOW);

        Self {
            catalog,
            data_dir,
            debounce,
            browser: file.browser.filter(|b| !b.trim().is_empty()),
        }
    }

    pub fn state_db_path(&self) -> PathBuf {
        self.data_dir.join(STATE_DB_FILE)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("org", "tyo", "tyo-directory")
}

/// Platform data dir, or `./.tyo` when no home directory can be determined.
pub fn default_data_dir() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".tyo"))
}

pub fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

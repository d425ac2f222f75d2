//! Key-value persistence for session preferences.
//!
//! Values are JSON documents stored in a single `kv` table. The store never
//! surfaces failures to callers: if the database file cannot be opened the
//! store runs in memory for the session, and individual read/write errors are
//! logged and treated as "absent" / "not saved".

use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

pub const THEME_KEY: &str = "theme";
pub const FAVORITES_KEY: &str = "favorites";
pub const SEARCH_HISTORY_KEY: &str = "searchHistory";

const SCHEMA: &str = r"
CREATE TABLE IF NOT EXISTS kv (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at INTEGER NOT NULL
);
";

pub struct KvStore {
    conn: Option<Connection>,
    path: Option<PathBuf>,
}

impl KvStore {
    /// Open or create the store at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating state directory {}", parent.display()))?;
        }

        let conn = Connection::open(path)
            .with_context(|| format!("opening state db at {}", path.display()))?;
        conn.busy_timeout(Duration::from_secs(2))?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )?;
        conn.execute_batch(SCHEMA)?;

        Ok(Self {
            conn: Some(conn),
            path: Some(path.to_path_buf()),
        })
    }

    /// Session-only store.
    pub fn in_memory() -> Self {
        let conn = Connection::open_in_memory()
            .and_then(|conn| conn.execute_batch(SCHEMA).map(|()| conn));
        match conn {
            Ok(conn) => Self {
                conn: Some(conn),
                path: None,
            },
            Err(err) => {
                warn!(component = "kv", error = %err, "in-memory store unavailable; persistence disabled");
                Self {
                    conn: None,
                    path: None,
                }
            }
        }
    }

    /// Open the store at `path`, falling back to an in-memory store.
    pub fn open_or_memory(path: &Path) -> Self {
        match Self::open(path) {
            Ok(store) => store,
            Err(err) => {
                warn!(
                    component = "kv",
                    path = %path.display(),
                    error = format!("{err:#}"),
                    "state db unavailable; preferences will not survive this session"
                );
                Self::in_memory()
            }
        }
    }

    /// True when writes reach disk.
    pub fn is_persistent(&self) -> bool {
        self.conn.is_some() && self.path.is_some()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn get_raw(&self, key: &str) -> Option<String> {
        let conn = self.conn.as_ref()?;
        conn.query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| row.get(0))
            .optional()
            .unwrap_or_else(|err| {
                warn!(component = "kv", key, error = %err, "read failed");
                None
            })
    }

    /// Read and decode a JSON value. Undecodable values read as absent.
    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.get_raw(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(component = "kv", key, error = %err, "ignoring undecodable stored value");
                None
            }
        }
    }

    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.get_json(key).unwrap_or(default)
    }

    /// Encode and write a value. Returns whether the write succeeded.
    pub fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> bool {
        let Some(conn) = self.conn.as_ref() else {
            return false;
        };
        let body = match serde_json::to_string(value) {
            Ok(body) => body,
            Err(err) => {
                warn!(component = "kv", key, error = %err, "value not serializable");
                return false;
            }
        };
        let now = chrono::Utc::now().timestamp_millis();
        match conn.execute(
            "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, body, now],
        ) {
            Ok(_) => {
                debug!(component = "kv", key, bytes = body.len(), "stored");
                true
            }
            Err(err) => {
                warn!(component = "kv", key, error = %err, "write failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn values_survive_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("state.db");
        {
            let store = KvStore::open(&path).unwrap();
            assert!(store.is_persistent());
            assert!(store.set_json(FAVORITES_KEY, &vec!["a", "b"]));
            assert!(store.set_json(THEME_KEY, "light"));
        }
        let store = KvStore::open(&path).unwrap();
        let favorites: Vec<String> = store.get_json(FAVORITES_KEY).unwrap();
        assert_eq!(favorites, vec!["a", "b"]);
        assert_eq!(store.get_raw(THEME_KEY).as_deref(), Some("\"light\""));
    }

    #[test]
    fn overwrite_keeps_latest_value() {
        let store = KvStore::in_memory();
        assert!(store.set_json("k", &1));
        assert!(store.set_json("k", &2));
        assert_eq!(store.get_or("k", 0), 2);
        assert_eq!(store.get_or("missing", 7), 7);
    }

    #[test]
    fn undecodable_value_reads_as_absent() {
        let store = KvStore::in_memory();
        assert!(store.set_json("k", "text"));
        let decoded: Option<Vec<String>> = store.get_json("k");
        assert!(decoded.is_none());
    }

    #[test]
    fn unusable_path_falls_back_to_memory() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();

        let store = KvStore::open_or_memory(&blocker.join("state.db"));
        assert!(!store.is_persistent());
        assert!(store.set_json(THEME_KEY, "dark"));
        let theme: String = store.get_json(THEME_KEY).unwrap();
        assert_eq!(theme, "dark");
    }
}

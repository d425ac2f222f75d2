use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Captures tracing output for tests.
#[allow(dead_code)]
pub struct TestTracing {
    buffer: std::sync::Arc<std::sync::Mutex<Vec<u8>>>,
}

#[allow(dead_code)]
impl TestTracing {
    pub fn new() -> Self {
        Self {
            buffer: std::sync::Arc::new(std::sync::Mutex::new(Vec::new())),
        }
    }

    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let writer = self.buffer.clone();
        let make_writer = move || TestWriter(writer.clone());
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .without_time()
            .with_writer(make_writer)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn output(&self) -> String {
        let buf = self.buffer.lock().unwrap();
        String::from_utf8_lossy(&buf).to_string()
    }

    pub fn assert_contains(&self, needle: &str) {
        let out = self.output();
        assert!(
            out.contains(needle),
            "expected logs to contain `{needle}`, got:\n{out}"
        );
    }
}

struct TestWriter(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

impl std::io::Write for TestWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let mut guard = self.0.lock().unwrap();
        guard.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[allow(dead_code)]
pub struct EnvGuard {
    key: String,
    prev: Option<String>,
}

#[allow(dead_code)]
impl EnvGuard {
    pub fn set(key: &str, val: impl AsRef<str>) -> Self {
        let prev = std::env::var(key).ok();
        unsafe { std::env::set_var(key, val.as_ref()) };
        Self {
            key: key.to_string(),
            prev,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match &self.prev {
            Some(v) => unsafe { std::env::set_var(&self.key, v) },
            None => unsafe { std::env::remove_var(&self.key) },
        }
    }
}

/// Four categories plus a promo, in document order.
#[allow(dead_code)]
pub const SAMPLE_CATALOG: &str = r#"{
  "categories": {
    "anatomy": {
      "title": "Anatomy",
      "description": "Bones, muscles and joints",
      "icon": "fas fa-bone",
      "color": "blue",
      "url": "https://example.com/anatomy"
    },
    "biomechanics": {
      "title": "Biomechanics",
      "description": "Forces acting on the body",
      "icon": "fas fa-person-running",
      "color": "green",
      "url": "https://example.com/biomechanics"
    },
    "nutrition": {
      "title": "Nutrition",
      "description": "Diet and recovery",
      "icon": "fas fa-apple-whole",
      "color": "orange",
      "url": "https://example.com/nutrition"
    },
    "broken": {
      "title": "Broken Link",
      "description": "Card whose url is not absolute",
      "icon": "fas fa-link-slash",
      "color": "red",
      "url": "not a url"
    }
  },
  "promo": {
    "title": "Join the course",
    "description": "Spring cohort is open",
    "url": "https://example.com/course"
  }
}"#;

/// Isolated data dir with a catalog; config lookups point at a file that does not exist.
#[allow(dead_code)]
pub struct Sandbox {
    pub dir: TempDir,
}

#[allow(dead_code)]
impl Sandbox {
    pub fn new() -> Self {
        Self::with_catalog(SAMPLE_CATALOG)
    }

    pub fn with_catalog(body: &str) -> Self {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("catalog.json"), body).unwrap();
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.path().join("catalog.json")
    }

    /// `tyo` with every path pinned inside the sandbox.
    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("tyo");
        cmd.env("TYO_DATA_DIR", self.path())
            .env("TYO_CONFIG", self.path().join("missing-config.toml"))
            .env_remove("TYO_CATALOG")
            .env_remove("TYO_BROWSER")
            .env_remove("TYO_DEBOUNCE_MS")
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1");
        cmd
    }
}

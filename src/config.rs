use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

/// Env var naming an optional YAML config file.
pub const CONFIG_ENV: &str = "WEBSERVER_CONFIG";
/// Env var overriding `listen_addr`.
pub const LISTEN_ENV: &str = "LISTEN";

/// How the accept loop treats connections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServeMode {
    /// Handle each connection to completion before accepting the next.
    #[default]
    Serial,
    /// Spawn a task per connection.
    Concurrent,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub listen_addr: String,
    pub backlog: u32,
    pub mode: ServeMode,
    /// Per-line read timeout. `None` waits forever.
    pub read_timeout_ms: Option<u64>,
    pub max_header_lines: usize,
    pub max_line_bytes: usize,
    /// HTML-escape the requested path before echoing it in the 404 page.
    pub escape_path: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8000".to_string(),
            backlog: 1024,
            mode: ServeMode::Serial,
            read_timeout_ms: None,
            max_header_lines: 256,
            max_line_bytes: 8192,
            escape_path: false,
        }
    }
}

impl Config {
    /// Loads the file named by `WEBSERVER_CONFIG` (if any), then applies `LISTEN`.
    pub fn load() -> anyhow::Result<Self> {
        let mut cfg = match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::from_file(&path)?,
            Err(_) => Self::default(),
        };

        if let Ok(addr) = std::env::var(LISTEN_ENV) {
            cfg.listen_addr = addr;
        }

        Ok(cfg)
    }

    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_yaml_str(&text)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn from_yaml_str(text: &str) -> anyhow::Result<Self> {
        // An empty document deserializes to unit, not to a map.
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let cfg: Config = serde_yaml::from_str(text).context("failed to parse YAML config")?;
        Ok(cfg)
    }

    pub fn read_timeout(&self) -> Option<Duration> {
        self.read_timeout_ms.map(Duration::from_millis)
    }
}

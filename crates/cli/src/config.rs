use anyhow::{Context, Result};
use logs_viewer_core::DEFAULT_LIMIT;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "logs-viewer.toml";

/// Top-level viewer configuration (`~/.openclaw/logs-viewer.toml`).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ViewerConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub watch: WatchSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Announced in the startup log line instead of the bind address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_url: Option<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
            public_url: None,
        }
    }
}

impl ServerSettings {
    pub fn base_url(&self) -> String {
        match &self.public_url {
            Some(url) => url.clone(),
            None => format!("http://{}:{}", self.bind, self.port),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchSettings {
    #[serde(default = "default_interval")]
    pub interval_secs: u64,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

impl Default for WatchSettings {
    fn default() -> Self {
        Self {
            interval_secs: default_interval(),
            limit: default_limit(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8004
}

fn default_interval() -> u64 {
    5
}

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

/// `~/.openclaw/logs-viewer.toml`
pub fn config_path() -> Result<PathBuf> {
    let base = directories::BaseDirs::new().context("Could not determine home directory")?;
    Ok(base.home_dir().join(".openclaw").join(CONFIG_FILE_NAME))
}

/// Load the config file, or the defaults when there is none.
pub fn load_config() -> Result<ViewerConfig> {
    load_config_from(&config_path()?)
}

pub fn load_config_from(path: &Path) -> Result<ViewerConfig> {
    if !path.exists() {
        return Ok(ViewerConfig::default());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read viewer config at {}", path.display()))?;
    let config: ViewerConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse viewer config at {}", path.display()))?;
    Ok(config)
}

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::registry::github::DEFAULT_BASE_URL;

/// Root configuration structure, deserialized from `.add-license/config.toml`.
///
/// Every field is optional; missing ones take the built-in defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub cache: CacheConfig,
}

/// Where and how the license catalogue is requested.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL; `/licenses` and `/licenses/{key}` are appended to it.
    pub base_url: String,
    /// Sent as `User-Agent`; the GitHub API rejects requests without one.
    pub user_agent: String,
    /// Client timeout. Unset means requests may wait indefinitely.
    pub timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: format!("add-license/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: None,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub mode: CacheMode,
    /// Lifetime of a cached response. Defaults to one hour.
    pub ttl_secs: u64,
    /// Directory for `mode = "disk"`. Defaults to the user cache directory.
    pub dir: Option<PathBuf>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        CacheConfig {
            mode: CacheMode::Memory,
            ttl_secs: 60 * 60,
            dir: None,
        }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CacheMode {
    /// Every request goes to the network.
    Off,
    /// Responses are reused for the rest of the process.
    Memory,
    /// Responses are stored on disk and reused across runs.
    Disk,
}

/// Load the configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `<workspace>/.add-license/config.toml`
/// 3. `~/.config/add-license/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(workspace: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let project_config = workspace.join(".add-license").join("config.toml");
    if project_config.exists() {
        return read_config(&project_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home.join(".config").join("add-license").join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("invalid config file {}", path.display()))
}

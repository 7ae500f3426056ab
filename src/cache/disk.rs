use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::LicenseCache;

/// Cache that keeps one JSON file per key so entries outlive the process.
///
/// Read and write failures are logged and otherwise ignored: a broken cache
/// only costs an extra request.
#[derive(Debug, Clone)]
pub struct DiskCache {
    dir: PathBuf,
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredEntry {
    /// Seconds since the Unix epoch.
    expires_at: u64,
    value: Value,
}

impl DiskCache {
    /// Open (and create if needed) a cache rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// `~/.cache/add-license` on Linux, the platform equivalent elsewhere.
    pub fn default_dir() -> Option<PathBuf> {
        dirs::cache_dir().map(|d| d.join("add-license"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        let file: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '.' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{}.json", file))
    }
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

impl LicenseCache for DiskCache {
    fn get(&self, key: &str) -> Option<Value> {
        let path = self.entry_path(key);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read cache entry");
                return None;
            }
        };

        let entry: StoredEntry = match serde_json::from_str(&content) {
            Ok(entry) => entry,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring corrupt cache entry");
                return None;
            }
        };

        if entry.expires_at <= now_secs() {
            debug!(key, "cache entry expired");
            return None;
        }
        Some(entry.value)
    }

    fn put(&self, key: &str, value: Value, ttl: Duration) {
        let entry = StoredEntry {
            expires_at: now_secs().saturating_add(ttl.as_secs()),
            value,
        };
        let path = self.entry_path(key);
        let result = serde_json::to_vec(&entry)
            .map_err(anyhow::Error::from)
            .and_then(|bytes| std::fs::write(&path, bytes).map_err(anyhow::Error::from));
        if let Err(e) = result {
            warn!(path = %path.display(), error = %e, "failed to write cache entry");
        }
    }
}

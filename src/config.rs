//! Configuration file support for worktrip
//!
//! Reads `config.toml` from the data directory (or an explicit path).
//! Every section is optional; a missing file means all defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the config file inside the data directory
pub const CONFIG_FILE: &str = "config.toml";

/// Environment variable that overrides the data directory
pub const DATA_DIR_ENV: &str = "WORKTRIP_DATA_DIR";

/// Project-local data directory name, found by walking up from the cwd
pub const LOCAL_DIR: &str = ".worktrip";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Configuration structure
#[derive(Debug, Deserialize, Serialize, Default, Clone, PartialEq)]
pub struct Config {
    /// Storage keys
    #[serde(default)]
    pub storage: StorageConfig,

    /// Log file settings
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Terminal UI settings
    #[serde(default)]
    pub ui: UiConfig,
}

/// The two keys the app writes to
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct StorageConfig {
    /// Key holding the item snapshot
    /// Default: "@toDos"
    #[serde(default = "default_items_key")]
    pub items_key: String,

    /// Key holding the selected mode
    /// Default: "@location"
    #[serde(default = "default_mode_key")]
    pub mode_key: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LoggingConfig {
    /// Filter directive used when RUST_LOG is unset
    /// Default: "info"
    #[serde(default = "default_level")]
    pub level: String,

    /// Log file name, relative to the data directory
    /// Default: "worktrip.log"
    #[serde(default = "default_log_file")]
    pub file: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct UiConfig {
    /// Seconds a status message stays in the footer
    /// Default: 3
    #[serde(default = "default_status_timeout")]
    pub status_timeout_secs: u64,
}

fn default_items_key() -> String {
    "@toDos".to_string()
}

fn default_mode_key() -> String {
    "@location".to_string()
}

fn default_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "worktrip.log".to_string()
}

fn default_status_timeout() -> u64 {
    3
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            items_key: default_items_key(),
            mode_key: default_mode_key(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            file: default_log_file(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            status_timeout_secs: default_status_timeout(),
        }
    }
}

impl Config {
    /// Load config from `path`.
    /// Returns default config if the file doesn't exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_toml_str(&contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }
}

/// Resolve the data directory.
///
/// Order: explicit path, `WORKTRIP_DATA_DIR`, the nearest `.worktrip`
/// directory above the cwd, the platform data dir, `./.worktrip`.
pub fn resolve_data_dir(explicit: Option<PathBuf>) -> PathBuf {
    if let Some(path) = explicit {
        return path;
    }
    if let Some(path) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        return PathBuf::from(path);
    }
    if let Some(path) = find_local_dir() {
        return path;
    }
    dirs::data_dir()
        .map(|dir| dir.join("worktrip"))
        .unwrap_or_else(|| PathBuf::from(LOCAL_DIR))
}

/// Find `.worktrip/` by walking up the directory tree
fn find_local_dir() -> Option<PathBuf> {
    let current_dir = std::env::current_dir().ok()?;
    let mut dir = current_dir.as_path();

    loop {
        let candidate = dir.join(LOCAL_DIR);
        if candidate.is_dir() {
            return Some(candidate);
        }

        match dir.parent() {
            Some(parent) => dir = parent,
            None => break,
        }
    }
    None
}

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::version::error::ConfigError;
use crate::version::semver::{Version, parse_version};

/// Application name, used for the data directory and log file
pub const APP_NAME: &str = "bcos-node-version";

/// Minimum node version accepted when none is configured
pub const DEFAULT_MINIMUM_VERSION: &str = "3.0.0";

/// Default log level when RUST_LOG is not set
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Top-level configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Oldest node version considered compatible
    pub minimum_version: String,
    pub log: LogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            minimum_version: DEFAULT_MINIMUM_VERSION.to_string(),
            log: LogConfig::default(),
        }
    }
}

impl Config {
    /// Parsed form of `minimum_version`
    pub fn minimum_version(&self) -> Result<Version, ConfigError> {
        Ok(parse_version(&self.minimum_version)?)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    /// Filter directive, e.g. "info" or "bcos_node_version=debug"
    pub level: String,
    /// Emit JSON lines instead of human-readable text
    pub json: bool,
    /// Write to the log file in the data directory instead of stderr
    pub file: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json: false,
            file: false,
        }
    }
}

/// Load configuration from `path`.
///
/// A missing file yields the default configuration. The minimum version is
/// validated so a bad value is reported at startup.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let config = match std::fs::read_to_string(path) {
        Ok(content) => serde_json::from_str::<Config>(&content)?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Config::default(),
        Err(e) => return Err(e.into()),
    };

    config.minimum_version()?;
    Ok(config)
}

/// Returns the path to the data directory for bcos-node-version.
/// Uses $XDG_DATA_HOME/bcos-node-version if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/bcos-node-version,
/// or ./bcos-node-version if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the default config file.
pub fn config_path() -> PathBuf {
    data_dir().join("config.json")
}

/// Returns the path to the log file.
pub fn log_path() -> PathBuf {
    data_dir().join(format!("{APP_NAME}.log"))
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join(APP_NAME)
}

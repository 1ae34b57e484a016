//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/solstice/config.toml`.
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/solstice/` (~/.config/solstice/)
//! - State/Logs: `$XDG_STATE_HOME/solstice/` (~/.local/state/solstice/)

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Wrapped generation defaults
    #[serde(default)]
    pub wrapped: WrappedConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Defaults for wrapped generation; CLI flags override these.
#[derive(Debug, Deserialize)]
pub struct WrappedConfig {
    /// Pin the summer window to this year
    #[serde(default)]
    pub year: Option<i32>,

    /// Terms given boosted keyword weight (names, handles, projects)
    #[serde(default)]
    pub aliases: Vec<String>,

    /// Number of keywords to keep
    #[serde(default = "default_top_keywords")]
    pub top_keywords: usize,
}

impl Default for WrappedConfig {
    fn default() -> Self {
        Self {
            year: None,
            aliases: Vec::new(),
            top_keywords: default_top_keywords(),
        }
    }
}

fn default_top_keywords() -> usize {
    12
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Log level filter (overridable via RUST_LOG)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// A missing file yields the defaults; a malformed file is a
    /// configuration error.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a specific path (for testing).
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| Error::Config(format!("invalid config file: {}", e)))
    }

    /// Path to the config file.
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("solstice/config.toml")
    }

    /// Directory for logs and other mutable state.
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("solstice")
    }

    /// Path to the log file.
    pub fn log_path() -> PathBuf {
        Self::state_dir().join("solstice.log")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.wrapped.top_keywords, 12);
        assert_eq!(config.wrapped.year, None);
        assert!(config.wrapped.aliases.is_empty());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = Config::load_from(Path::new("/nonexistent/config.toml")).unwrap();
        assert_eq!(config.wrapped.top_keywords, 12);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[wrapped]\nyear = 2024\naliases = [\"ferris\"]\ntop_keywords = 8\n\n[logging]\nlevel = \"debug\""
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.wrapped.year, Some(2024));
        assert_eq!(config.wrapped.aliases, vec!["ferris"]);
        assert_eq!(config.wrapped.top_keywords, 8);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "not [ valid { toml").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(crate::error::Error::Config(_))
        ));
    }

    #[test]
    fn test_paths() {
        assert!(Config::config_path().ends_with("solstice/config.toml"));
        assert!(Config::log_path().ends_with("solstice.log"));
    }
}

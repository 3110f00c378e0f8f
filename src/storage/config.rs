//! Configuration handling for envstash
//!
//! CLI defaults live in `~/.config/envstash/config.toml`; the
//! `ENVSTASH_CONFIG` environment variable overrides the location. A
//! missing file simply yields the built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::envfile::{SortOrder, DEFAULT_ITERATION_PAD};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// CLI defaults, all optional on disk
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Zero-pad width for iteration suffixes
    pub iteration_pad: usize,

    /// Which candidate wins when a load template matches several files
    pub sort_order: SortOrder,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            iteration_pad: DEFAULT_ITERATION_PAD,
            sort_order: SortOrder::Latest,
        }
    }
}

impl Config {
    /// Default config file location (`~/.config/envstash/config.toml`)
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "envstash").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Loads the config from `ENVSTASH_CONFIG` or the default location.
    pub fn load() -> Result<Self> {
        let path = std::env::var_os("ENVSTASH_CONFIG")
            .map(PathBuf::from)
            .or_else(Self::default_path);

        match path {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Reads and parses a specific config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        toml::from_str(&text).map_err(|e| ConfigError::Parse(e.to_string()).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.iteration_pad, 6);
        assert_eq!(config.sort_order, SortOrder::Latest);
    }

    #[test]
    fn parses_full_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "iteration_pad = 3\nsort_order = \"earliest\"\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.iteration_pad, 3);
        assert_eq!(config.sort_order, SortOrder::Earliest);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "iteration_pad = 4\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.iteration_pad, 4);
        assert_eq!(config.sort_order, SortOrder::Latest);
    }

    #[test]
    fn malformed_config_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "iteration_pad = \"not a number\"\n").unwrap();

        let err = Config::from_file(&path).unwrap_err();
        assert!(err.downcast_ref::<ConfigError>().is_some());
    }
}

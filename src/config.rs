//! CLI configuration file
//!
//! `~/.rusty-curs/config.toml` unless `--config` points elsewhere. Every field
//! has a default, so an empty or missing file is a valid configuration.

use crate::error::{CursError, Result};
use crate::format::NumberLocale;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Remote `rates.json`; takes precedence over `rates_path` when set
    #[serde(default)]
    pub rates_url: Option<String>,
    #[serde(default = "default_rates_path")]
    pub rates_path: PathBuf,
    /// Directory holding the history store
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default)]
    pub locale: NumberLocale,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_from")]
    pub default_from: String,
    #[serde(default = "default_to")]
    pub default_to: String,
}

fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".rusty-curs")
}

fn default_rates_path() -> PathBuf {
    PathBuf::from("rates.json")
}

fn default_data_dir() -> PathBuf {
    home_dir().join("data")
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_from() -> String {
    "eur".to_string()
}

fn default_to() -> String {
    "mdl".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rates_url: None,
            rates_path: default_rates_path(),
            data_dir: default_data_dir(),
            locale: NumberLocale::default(),
            timeout_secs: default_timeout_secs(),
            default_from: default_from(),
            default_to: default_to(),
        }
    }
}

impl Config {
    /// Location used when no `--config` is given
    pub fn default_path() -> PathBuf {
        home_dir().join("config.toml")
    }

    /// Parse a config file, failing on unreadable or invalid TOML
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            CursError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        toml::from_str(&contents).map_err(|e| {
            CursError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    /// Load from `path` or the default location, falling back to defaults
    pub fn load(path: Option<&Path>) -> Self {
        let path = path.map(Path::to_path_buf).unwrap_or_else(Self::default_path);
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Config::default();
        }

        match Self::from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{}; using defaults", e);
                Config::default()
            }
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.data_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.rates_url, None);
        assert_eq!(config.rates_path, PathBuf::from("rates.json"));
        assert_eq!(config.locale, NumberLocale::Plain);
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.default_from, "eur");
        assert_eq!(config.default_to, "mdl");
        assert!(config.data_dir.ends_with("data"));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "rates_url = \"https://example.org/rates.json\"\nlocale = \"ro-md\"\ntimeout_secs = 3\n",
        )
        .unwrap();

        let config = Config::load(Some(path.as_path()));
        assert_eq!(config.rates_url.as_deref(), Some("https://example.org/rates.json"));
        assert_eq!(config.locale, NumberLocale::RoMd);
        assert_eq!(config.timeout_secs, 3);
        assert_eq!(config.default_to, "mdl");
    }

    #[test]
    fn test_invalid_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "locale = [").unwrap();

        assert!(matches!(Config::from_file(&path), Err(CursError::Config(_))));
        assert_eq!(Config::load(Some(path.as_path())), Config::default());
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            Config::load(Some(dir.path().join("absent.toml").as_path())),
            Config::default()
        );
    }
}

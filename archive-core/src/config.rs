use anyhow::{Context, Result, anyhow};
use chrono::format::{Item, StrftimeItems};
use directories::ProjectDirs;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use log::warn;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::client::open_meteo::DEFAULT_ENDPOINT;

/// Default strftime pattern for the table's time column.
pub const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// endpoint = "https://archive-api.open-meteo.com/v1/archive"
/// time_format = "%d.%m.%Y %H:%M"
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Archive URL; the public Open-Meteo archive when unset.
    pub endpoint: Option<String>,

    /// chrono format string used when printing timestamps.
    pub time_format: Option<String>,
}

impl Config {
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT)
    }

    pub fn time_format(&self) -> &str {
        self.time_format.as_deref().unwrap_or(DEFAULT_TIME_FORMAT)
    }

    /// Store a new endpoint after checking it is an absolute http(s) URL.
    pub fn set_endpoint(&mut self, endpoint: &str) -> Result<()> {
        let url = Url::parse(endpoint).with_context(|| format!("Invalid endpoint URL: {endpoint}"))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(anyhow!("Endpoint must use http or https, got '{}'", url.scheme()));
        }

        self.endpoint = Some(endpoint.to_string());
        Ok(())
    }

    pub fn set_time_format(&mut self, format: &str) -> Result<()> {
        check_time_format(format)?;

        self.time_format = Some(format.to_string());
        Ok(())
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Like [`load`](Self::load), but a broken file yields the defaults so it
    /// can be overwritten.
    pub fn load_or_default() -> Self {
        match Self::config_file_path() {
            Ok(path) => Self::load_from_or_default(&path),
            Err(err) => {
                warn!("{err:#}");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    fn load_from_or_default(path: &Path) -> Self {
        Self::load_from(path).unwrap_or_else(|err| {
            warn!("Ignoring unreadable config: {err:#}");
            Self::default()
        })
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-archive", "weather-archive")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    fn from_toml(contents: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(contents)?;

        if let Some(format) = &cfg.time_format {
            check_time_format(format)?;
        }

        Ok(cfg)
    }
}

fn check_time_format(format: &str) -> Result<()> {
    if format.trim().is_empty() {
        return Err(anyhow!("Time format must not be empty"));
    }

    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(anyhow!("Invalid time format '{format}'"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_unset() {
        let cfg = Config::default();

        assert_eq!(cfg.endpoint(), DEFAULT_ENDPOINT);
        assert_eq!(cfg.time_format(), DEFAULT_TIME_FORMAT);
    }

    #[test]
    fn set_endpoint_accepts_http_urls() {
        let mut cfg = Config::default();

        cfg.set_endpoint("http://localhost:8080/v1/archive").unwrap();
        assert_eq!(cfg.endpoint(), "http://localhost:8080/v1/archive");
    }

    #[test]
    fn set_endpoint_rejects_garbage_and_other_schemes() {
        let mut cfg = Config::default();

        assert!(cfg.set_endpoint("not a url").is_err());
        let err = cfg.set_endpoint("ftp://example.com/archive").unwrap_err();
        assert!(err.to_string().contains("http or https"));
        assert_eq!(cfg.endpoint(), DEFAULT_ENDPOINT);
    }

    #[test]
    fn bad_time_format_is_rejected() {
        let mut cfg = Config::default();
        assert!(cfg.set_time_format("  ").is_err());
        assert!(cfg.set_time_format("%Y-%").is_err());
        assert_eq!(cfg.time_format(), DEFAULT_TIME_FORMAT);

        cfg.set_time_format("%H:%M").unwrap();
        assert_eq!(cfg.time_format(), "%H:%M");
    }

    #[test]
    fn toml_roundtrip() {
        let mut cfg = Config::default();
        cfg.set_endpoint("https://example.com/archive").unwrap();
        cfg.set_time_format("%d.%m.%Y %H:%M").unwrap();

        let toml = toml::to_string_pretty(&cfg).unwrap();
        assert_eq!(Config::from_toml(&toml).unwrap(), cfg);
    }

    #[test]
    fn empty_file_parses_to_defaults() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn invalid_time_format_in_file_is_rejected() {
        let err = Config::from_toml(r#"time_format = "%Y-%""#).unwrap_err();
        assert!(err.to_string().contains("Invalid time format"));
    }

    #[test]
    fn broken_file_fails_load_but_not_load_or_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "time_format = \"%Y-%\"\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse config file"));
        assert_eq!(Config::load_from_or_default(&path), Config::default());
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg, Config::default());
    }
}

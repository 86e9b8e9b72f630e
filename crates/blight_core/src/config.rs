use crate::error::ConfigError;
use directories_next::ProjectDirs;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the configured endpoint.
pub const ENDPOINT_ENV: &str = "BLIGHTCHECK_ENDPOINT";

const CONFIG_FILE: &str = "config.toml";

/// Client settings read from `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    /// Where images are posted.
    pub endpoint: String,
    pub window_title: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:8000/predict".to_string(),
            window_title: "Potato Disease Classifier".to_string(),
        }
    }
}

impl ClientConfig {
    /// Platform config location, e.g. `~/.config/blightcheck/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("nl", "blightcheck", "BlightCheck")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Config from the default location with the environment applied.
    pub fn load() -> Result<Self, ConfigError> {
        let cfg = match Self::default_path() {
            Some(path) => Self::load_from(&path)?,
            None => {
                tracing::warn!("no config directory available, using defaults");
                Self::default()
            }
        };
        let cfg = cfg.with_env(|key| std::env::var(key).ok());
        cfg.endpoint_url()?;
        Ok(cfg)
    }

    /// Read `path`; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("config {} not found, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let cfg: Self = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!("loaded config from {}", path.display());
        Ok(cfg)
    }

    /// Apply overrides looked up through `lookup`.
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(endpoint) = lookup(ENDPOINT_ENV).filter(|v| !v.trim().is_empty()) {
            self.endpoint = endpoint.trim().to_string();
        }
        self
    }

    /// The endpoint as an absolute http(s) URL.
    pub fn endpoint_url(&self) -> Result<Url, ConfigError> {
        let invalid = |reason: String| ConfigError::Endpoint {
            url: self.endpoint.clone(),
            reason,
        };
        let url = Url::parse(&self.endpoint).map_err(|e| invalid(e.to_string()))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(invalid(format!("unsupported scheme {other}"))),
        }
    }
}

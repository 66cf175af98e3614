//! Configuration loading.
//!
//! Reads `config.toml` from `$DESKWATCH_CONFIG` or `~/.deskwatch/`.
//! Precedence: env vars > config file > defaults. The bearer token is not
//! stored here; only the name of the env var that holds it.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use crate::notifications::Role;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Ticket API connection settings.
    pub api: ApiConfig,
    /// Portal settings.
    pub portal: PortalConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Ticket API connection settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the ticket API.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Environment variable name holding the bearer token.
    pub token_env: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_owned(),
            timeout_secs: 15,
            token_env: "DESKWATCH_TOKEN".to_owned(),
        }
    }
}

/// Portal settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    /// Role whose classifier rules apply.
    pub role: Role,
}

/// Logging settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset.
    pub level: String,
    /// Directory for rotated JSON logs; console only when absent.
    pub dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            dir: None,
        }
    }
}

impl Config {
    /// Load with precedence env vars > TOML file > defaults.
    ///
    /// A missing file yields defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed, or
    /// the config directory cannot be resolved.
    pub fn load() -> anyhow::Result<Self> {
        let env = |key: &str| std::env::var(key).ok();
        let path = config_path_with(env)?;
        let mut config = Self::load_from(&path)?;
        config.apply_overrides(env);
        Ok(config)
    }

    /// Load from a specific file; missing file yields defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(contents) => {
                tracing::debug!(path = %path.display(), "loading config from file");
                Self::from_toml(&contents)
                    .with_context(|| format!("failed to parse config at {}", path.display()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file found, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(anyhow::anyhow!(
                "failed to read config at {}: {e}",
                path.display()
            )),
        }
    }

    /// Parse a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error on invalid TOML or unknown role names.
    pub fn from_toml(toml_str: &str) -> anyhow::Result<Self> {
        toml::from_str(toml_str).context("failed to parse config TOML")
    }

    /// Apply environment overrides through a resolver (injectable for tests).
    pub fn apply_overrides(&mut self, env: impl Fn(&str) -> Option<String>) {
        if let Some(v) = env("DESKWATCH_API_URL") {
            self.api.base_url = v;
        }
        if let Some(v) = env("DESKWATCH_ROLE") {
            match v.parse() {
                Ok(role) => self.portal.role = role,
                Err(e) => tracing::warn!(
                    var = "DESKWATCH_ROLE",
                    value = %v,
                    error = %e,
                    "ignoring invalid env override"
                ),
            }
        }
        if let Some(v) = env("DESKWATCH_LOG_LEVEL") {
            self.logging.level = v;
        }
    }
}

/// Resolve the config file path using a custom env resolver.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn config_path_with(env: impl Fn(&str) -> Option<String>) -> anyhow::Result<PathBuf> {
    if let Some(p) = env("DESKWATCH_CONFIG") {
        return Ok(PathBuf::from(p));
    }
    Ok(config_dir()?.join("config.toml"))
}

/// Resolve the default config directory (`~/.deskwatch/`).
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn config_dir() -> anyhow::Result<PathBuf> {
    let home = directories::BaseDirs::new()
        .ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
    Ok(home.home_dir().join(".deskwatch"))
}

//! Configuration management for the staff console.
//!
//! Loads configuration from ${PMS_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

fn default_config_template() -> &'static str {
    include_str!("default_config.toml")
}

pub mod paths {
    //! Path resolution for configuration and data files.
    //!
    //! PMS_HOME resolution order:
    //! 1. PMS_HOME environment variable (if set)
    //! 2. ~/.config/hotel-pms (default)

    use std::path::PathBuf;

    /// Environment variable overriding the application home directory.
    pub const HOME_ENV: &str = "PMS_HOME";

    /// Returns the application home directory.
    ///
    /// Checks PMS_HOME env var first, falls back to ~/.config/hotel-pms
    /// (or `.hotel-pms` in the working directory when no home exists).
    pub fn pms_home() -> PathBuf {
        if let Ok(home) = std::env::var(HOME_ENV) {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".hotel-pms"),
            |h| h.join(".config").join("hotel-pms"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        pms_home().join("config.toml")
    }

    /// Returns the path to the durable key-value storage file.
    pub fn storage_path() -> PathBuf {
        pms_home().join("storage.json")
    }

    /// Returns the directory log files are written to.
    pub fn logs_dir() -> PathBuf {
        pms_home().join("logs")
    }
}

/// Authentication service settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AuthConfig {
    /// Base address; login requests go to `<base_url>/login`.
    pub base_url: String,
    /// Client-side request timeout in seconds (0 or unset = none).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            base_url: Config::DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Config::DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
}

impl Config {
    const DEFAULT_BASE_URL: &'static str = "http://127.0.0.1:5000/api";
    const DEFAULT_LOG_LEVEL: &'static str = "info";

    /// Loads configuration from the default config path.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Returns the login request timeout, if any.
    ///
    /// A value of 0 disables the timeout.
    pub fn request_timeout(&self) -> Option<Duration> {
        match self.auth.request_timeout_secs {
            None | Some(0) => None,
            Some(secs) => Some(Duration::from_secs(secs)),
        }
    }

    /// Creates a default config file at the given path.
    /// Returns an error if the file already exists.
    ///
    /// # Errors
    /// Returns an error if the file exists or cannot be written.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    /// Writes config content to a file, creating parent directories as needed.
    /// Uses atomic write (temp file + rename) to prevent corruption.
    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}

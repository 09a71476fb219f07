//! Application settings and configuration management

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::kodi::Credentials;

/// Application settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Settings {
    /// Kodi host name or IP address
    pub host: String,
    /// Kodi web server port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Username for the Kodi web server (empty disables basic auth)
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// Directory thumbnails are cached into; caching is off when unset
    #[serde(default)]
    pub thumbnail_cache: Option<PathBuf>,
    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_port() -> u16 {
    8080
}

fn default_timeout_secs() -> u64 {
    crate::kodi::http::DEFAULT_TIMEOUT_SECS
}

/// Error types for configuration operations
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            host: "localhost".to_string(),
            port: default_port(),
            username: String::new(),
            password: String::new(),
            thumbnail_cache: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Settings {
    /// Load settings from a file, falling back to defaults when it does not exist
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&content)?;
        Ok(settings)
    }

    /// Save settings to a file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(&self)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, content)?;
        Ok(())
    }

    /// Get the default config file path
    pub fn default_path() -> PathBuf {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join(".config").join("kodi-controller").join("config.json")
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::Validation("Host cannot be empty".to_string()));
        }

        if self.port == 0 {
            return Err(ConfigError::Validation("Port must be between 1 and 65535".to_string()));
        }

        if self.timeout_secs == 0 {
            return Err(ConfigError::Validation("Timeout must be at least one second".to_string()));
        }

        Ok(())
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.host, self.port, &self.username, &self.password)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

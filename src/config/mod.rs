//! Configuration loading and management
//!
//! The client reads a single YAML document. Every field has a default, so an
//! empty file (or no file at all) yields a working configuration pointed at
//! `http://localhost:8000`.
//!
//! ```yaml
//! api:
//!   base_url: http://localhost:8000
//!   timeout_secs: 10
//! notifications:
//!   dismiss_after_ms: 3000
//! cascade: server
//! ```

use crate::core::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// Environment variable overriding `api.base_url`
pub const ENV_API_BASE: &str = "STOCKROOM_API_BASE";

/// Environment variable overriding `cascade`
pub const ENV_CASCADE: &str = "STOCKROOM_CASCADE";

/// Connection settings for the inventory API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base address every endpoint path is appended to
    /// (e.g. `http://localhost:8000` or `https://shop.example/api`)
    pub base_url: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: 10,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Status banner behaviour
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// How long non-error notices stay visible
    pub dismiss_after_ms: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            dismiss_after_ms: 3000,
        }
    }
}

impl NotificationConfig {
    pub fn dismiss_after(&self) -> Duration {
        Duration::from_millis(self.dismiss_after_ms)
    }
}

/// Who removes stock entries when their store or product is deleted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CascadePolicy {
    /// The backend cascades; the client issues only the parent delete
    #[default]
    Server,

    /// The backend does not cascade; the client deletes each dependent
    /// stock entry before deleting the parent
    Client,
}

impl FromStr for CascadePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "server" => Ok(CascadePolicy::Server),
            "client" => Ok(CascadePolicy::Client),
            other => Err(ConfigError::InvalidValue {
                field: "cascade".to_string(),
                value: other.to_string(),
                message: "expected 'server' or 'client'".to_string(),
            }),
        }
    }
}

/// Complete client configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api: ApiConfig,
    pub notifications: NotificationConfig,
    pub cascade: CascadePolicy,
}

impl ClientConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                ConfigError::IoError {
                    message: e.to_string(),
                }
            }
        })?;

        Self::from_yaml_str(&content).map_err(|e| match e {
            ConfigError::ParseError { message, .. } => ConfigError::ParseError {
                file: Some(path.display().to_string()),
                message,
            },
            other => other,
        })
    }

    /// Load configuration from a YAML string
    ///
    /// An empty document yields the defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `STOCKROOM_*` environment overrides
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides(
            std::env::var(ENV_API_BASE).ok(),
            std::env::var(ENV_CASCADE).ok(),
        )
    }

    /// Apply explicit overrides; `None` keeps the current value
    pub fn with_overrides(
        mut self,
        base_url: Option<String>,
        cascade: Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(base_url) = base_url {
            self.api.base_url = base_url;
        }
        if let Some(cascade) = cascade {
            self.cascade = cascade.parse()?;
        }
        self.validate()?;
        Ok(self)
    }

    /// Check that the base URL is an absolute http(s) address
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |message: &str| ConfigError::InvalidValue {
            field: "api.base_url".to_string(),
            value: self.api.base_url.clone(),
            message: message.to_string(),
        };

        let url = reqwest::Url::parse(&self.api.base_url).map_err(|e| invalid(&e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid("scheme must be http or https"));
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "api.timeout_secs".to_string(),
                value: "0".to_string(),
                message: "timeout must be at least one second".to_string(),
            });
        }
        Ok(())
    }
}

//! Configuration loading and management
//!
//! Every key has a default, so an empty YAML document (or no file at all)
//! yields a working configuration:
//!
//! ```yaml
//! server:
//!   host: 0.0.0.0
//!   port: 8000
//!   api_prefix: /api/v1
//! pagination:
//!   default_limit: 50
//!   max_limit: 500
//! filters:
//!   unknown_fields: reject   # or: ignore
//! cors:
//!   allowed_origins: ["http://localhost:3000"]
//! ```

use crate::core::query::PageLimits;
use crate::storage::UnknownFieldPolicy;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Environment variable naming the YAML file to load
pub const CONFIG_PATH_ENV: &str = "CREDITSCAN_CONFIG";
pub const HOST_ENV: &str = "CREDITSCAN_HOST";
pub const PORT_ENV: &str = "CREDITSCAN_PORT";
pub const DEFAULT_LIMIT_ENV: &str = "CREDITSCAN_DEFAULT_LIMIT";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid value for {key}: {message}")]
    Invalid { key: String, message: String },
}

impl ConfigError {
    fn invalid(key: &str, message: impl Into<String>) -> Self {
        ConfigError::Invalid {
            key: key.to_string(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Prefix every domain router is nested under
    pub api_prefix: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            api_prefix: "/api/v1".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PaginationConfig {
    pub default_limit: i64,
    pub max_limit: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        let limits = PageLimits::default();
        Self {
            default_limit: limits.default_limit,
            max_limit: limits.max_limit,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FiltersConfig {
    pub unknown_fields: UnknownFieldPolicy,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CorsConfig {
    /// Empty means any origin
    pub allowed_origins: Vec<String>,
}

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub pagination: PaginationConfig,
    pub filters: FiltersConfig,
    pub cors: CorsConfig,
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults, then the file named by `CREDITSCAN_CONFIG`, then the
    /// individual environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        let config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => {
                tracing::info!(%path, "loading configuration file");
                Self::from_yaml_file(path)?
            }
            Err(_) => Self::default(),
        };
        config.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides looked up by environment variable name
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(host) = lookup(HOST_ENV) {
            self.server.host = host;
        }
        if let Some(port) = lookup(PORT_ENV) {
            self.server.port = port
                .parse()
                .map_err(|_| ConfigError::invalid(PORT_ENV, format!("'{}' is not a port", port)))?;
        }
        if let Some(limit) = lookup(DEFAULT_LIMIT_ENV) {
            self.pagination.default_limit = limit.parse().map_err(|_| {
                ConfigError::invalid(DEFAULT_LIMIT_ENV, format!("'{}' is not an integer", limit))
            })?;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::invalid("server.port", "must be greater than 0"));
        }
        if !self.server.api_prefix.starts_with('/') {
            return Err(ConfigError::invalid("server.api_prefix", "must start with '/'"));
        }
        if self.server.api_prefix.len() > 1 && self.server.api_prefix.ends_with('/') {
            return Err(ConfigError::invalid(
                "server.api_prefix",
                "must not end with '/' unless it is the root",
            ));
        }
        if self.pagination.default_limit <= 0 {
            return Err(ConfigError::invalid(
                "pagination.default_limit",
                "must be greater than 0",
            ));
        }
        if self.pagination.default_limit as u64 > self.pagination.max_limit as u64 {
            return Err(ConfigError::invalid(
                "pagination.default_limit",
                format!("must not exceed max_limit ({})", self.pagination.max_limit),
            ));
        }
        Ok(())
    }

    pub fn page_limits(&self) -> PageLimits {
        PageLimits {
            default_limit: self.pagination.default_limit,
            max_limit: self.pagination.max_limit,
        }
    }

    /// `host:port` to bind
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = AppConfig::from_yaml_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.server.api_prefix, "/api/v1");
        assert_eq!(config.page_limits(), PageLimits::default());
        assert_eq!(config.filters.unknown_fields, UnknownFieldPolicy::Reject);
    }

    #[test]
    fn test_partial_document_keeps_other_defaults() {
        let config = AppConfig::from_yaml_str(
            r#"
pagination:
  default_limit: 20
filters:
  unknown_fields: ignore
"#,
        )
        .unwrap();
        assert_eq!(config.pagination.default_limit, 20);
        assert_eq!(config.pagination.max_limit, 500);
        assert_eq!(config.filters.unknown_fields, UnknownFieldPolicy::Ignore);
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(AppConfig::from_yaml_str("server:\n  port: 0\n").is_err());
        assert!(AppConfig::from_yaml_str("pagination:\n  default_limit: 0\n").is_err());
        assert!(
            AppConfig::from_yaml_str("pagination:\n  default_limit: 600\n  max_limit: 500\n")
                .is_err()
        );
        assert!(matches!(
            AppConfig::from_yaml_str("server: [1, 2]"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_api_prefix_forms() {
        let root = AppConfig::from_yaml_str("server:\n  api_prefix: /\n").unwrap();
        assert_eq!(root.server.api_prefix, "/");

        assert!(matches!(
            AppConfig::from_yaml_str("server:\n  api_prefix: /api/\n"),
            Err(ConfigError::Invalid { .. })
        ));
        assert!(matches!(
            AppConfig::from_yaml_str("server:\n  api_prefix: api\n"),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn test_environment_overrides() {
        let env = HashMap::from([(PORT_ENV, "9090"), (DEFAULT_LIMIT_ENV, "10")]);
        let config = AppConfig::default()
            .with_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.pagination.default_limit, 10);
        assert_eq!(config.bind_addr(), "0.0.0.0:9090");

        let bad = HashMap::from([(PORT_ENV, "not-a-port")]);
        assert!(
            AppConfig::default()
                .with_overrides(|key| bad.get(key).map(|v| v.to_string()))
                .is_err()
        );
    }

    #[test]
    fn test_from_yaml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "server:\n  host: 127.0.0.1\n  port: 8081").unwrap();

        let config = AppConfig::from_yaml_file(file.path()).unwrap();
        assert_eq!(config.bind_addr(), "127.0.0.1:8081");

        assert!(matches!(
            AppConfig::from_yaml_file("/nonexistent/creditscan.yaml"),
            Err(ConfigError::Read { .. })
        ));
    }
}

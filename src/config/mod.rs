//! Configuration loading and management
//!
//! Settings come from an optional YAML file (path in `INVENTORY_API_CONFIG`)
//! and are then overridden by individual environment variables:
//!
//! | Variable | Field |
//! |---|---|
//! | `INVENTORY_API_HOST` | `server.host` |
//! | `INVENTORY_API_PORT` | `server.port` |
//! | `INVENTORY_API_MAX_LIMIT` | `listing.max_limit` |

use crate::core::PagePolicy;
use crate::core::query::DEFAULT_MAX_LIMIT;
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const CONFIG_PATH_VAR: &str = "INVENTORY_API_CONFIG";
pub const HOST_VAR: &str = "INVENTORY_API_HOST";
pub const PORT_VAR: &str = "INVENTORY_API_PORT";
pub const MAX_LIMIT_VAR: &str = "INVENTORY_API_MAX_LIMIT";

/// Listening address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

/// Settings for the time-windowed listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingConfig {
    /// Page size ceiling
    pub max_limit: usize,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            max_limit: DEFAULT_MAX_LIMIT,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub listing: ListingConfig,
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Load from the process environment: YAML file if configured, then
    /// variable overrides, then validation
    pub fn load() -> Result<Self> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// [`load`](Self::load) with an explicit variable lookup
    pub fn load_with(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = match lookup(CONFIG_PATH_VAR) {
            Some(path) => {
                tracing::info!(path = %path, "loading configuration file");
                Self::from_yaml_file(path)?
            }
            None => Self::default(),
        };

        config.apply_env_overrides(lookup)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `INVENTORY_API_*` overrides
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(host) = lookup(HOST_VAR) {
            self.server.host = host;
        }
        if let Some(port) = lookup(PORT_VAR) {
            self.server.port = port
                .trim()
                .parse()
                .with_context(|| format!("{PORT_VAR} must be a port number, got '{port}'"))?;
        }
        if let Some(max_limit) = lookup(MAX_LIMIT_VAR) {
            self.listing.max_limit = max_limit.trim().parse().with_context(|| {
                format!("{MAX_LIMIT_VAR} must be a positive integer, got '{max_limit}'")
            })?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.listing.max_limit == 0 {
            bail!("listing.max_limit must be at least 1");
        }
        if self.server.host.trim().is_empty() {
            bail!("server.host must not be empty");
        }
        Ok(())
    }

    /// `host:port` to bind
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn page_policy(&self) -> PagePolicy {
        PagePolicy::new(self.listing.max_limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.bind_address(), "127.0.0.1:3000");
        assert_eq!(config.listing.max_limit, 3);
        assert_eq!(config.page_policy(), PagePolicy::default());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = AppConfig::from_yaml_str("server:\n  port: 8080\n").unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.listing.max_limit, 3);
    }

    #[test]
    fn test_yaml_serialization() {
        let config = AppConfig {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 9000,
            },
            listing: ListingConfig { max_limit: 5 },
        };
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert_eq!(AppConfig::from_yaml_str(&yaml).unwrap(), config);
    }

    #[test]
    fn test_invalid_yaml_fails() {
        assert!(AppConfig::from_yaml_str("server: [1, 2").is_err());
    }

    #[test]
    fn test_from_yaml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "listing:\n  max_limit: 10").unwrap();

        let config = AppConfig::from_yaml_file(file.path()).unwrap();
        assert_eq!(config.listing.max_limit, 10);
    }

    #[test]
    fn test_missing_file_fails() {
        assert!(AppConfig::from_yaml_file("/nonexistent/inventory-api.yaml").is_err());
    }

    #[test]
    fn test_env_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "server:\n  host: 0.0.0.0\n  port: 4000").unwrap();
        let path = file.path().to_string_lossy().to_string();

        let config = AppConfig::load_with(env(&[
            (CONFIG_PATH_VAR, path.as_str()),
            (PORT_VAR, "5000"),
            (MAX_LIMIT_VAR, "2"),
        ]))
        .unwrap();

        assert_eq!(config.bind_address(), "0.0.0.0:5000");
        assert_eq!(config.listing.max_limit, 2);
    }

    #[test]
    fn test_load_without_env_uses_defaults() {
        let config = AppConfig::load_with(env(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_bad_port_override_fails() {
        let mut config = AppConfig::default();
        assert!(
            config
                .apply_env_overrides(env(&[(PORT_VAR, "http")]))
                .is_err()
        );
    }

    #[test]
    fn test_zero_max_limit_is_invalid() {
        let result = AppConfig::load_with(env(&[(MAX_LIMIT_VAR, "0")]));
        assert!(result.is_err());
    }
}

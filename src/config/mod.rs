//! Configuration loading and management
//!
//! Configuration comes from an optional YAML file, then `WAYFARER_*`
//! environment variables override individual values. Every field has a
//! default so an empty file (or no file) is a valid configuration.
//!
//! ```yaml
//! server:
//!   bind: 0.0.0.0:3001
//!   cors_origins: ["https://www.example.com"]
//! storage:
//!   data_dir: ./data
//!   upload_dir: ./uploads
//! auth:
//!   admin_tokens: ["change-me"]
//! listing:
//!   items_per_page: 10
//!   max_limit: 100
//! client:
//!   debounce_ms: 1000
//!   upload_delay_ms: 300
//! ```

use crate::core::error::ConfigError;
use crate::core::listing::Paginator;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// HTTP server settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address
    pub bind: String,

    /// Allowed CORS origins; empty or `*` allows any origin
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3001".to_string(),
            cors_origins: Vec::new(),
        }
    }
}

/// Where collections and uploads are kept
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub upload_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            upload_dir: PathBuf::from("uploads"),
        }
    }
}

/// Admin token settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Accepted bearer tokens; when empty any token is accepted
    pub admin_tokens: Vec<String>,
}

/// List endpoint defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingConfig {
    pub items_per_page: usize,
    pub max_limit: usize,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            items_per_page: Paginator::DEFAULT_ITEMS_PER_PAGE,
            max_limit: 100,
        }
    }
}

/// Admin client timings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Quiet period before an optimistic toggle or reorder is synced
    pub debounce_ms: u64,

    /// Pause between sequential gallery uploads
    pub upload_delay_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 1000,
            upload_delay_ms: 300,
        }
    }
}

impl ClientConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn upload_delay(&self) -> Duration {
        Duration::from_millis(self.upload_delay_ms)
    }
}

/// Complete configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WayfarerConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub auth: AuthConfig,
    pub listing: ListingConfig,
    pub client: ClientConfig,
}

impl WayfarerConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
            file: Some(path.display().to_string()),
            message: e.to_string(),
        })
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError {
            file: None,
            message: e.to_string(),
        })
    }

    /// Apply `WAYFARER_*` overrides from the process environment
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    ///
    /// `WAYFARER_ADMIN_TOKEN` and `WAYFARER_CORS_ORIGINS` accept
    /// comma-separated lists.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(bind) = lookup("WAYFARER_BIND") {
            self.server.bind = bind;
        }
        if let Some(dir) = lookup("WAYFARER_DATA_DIR") {
            self.storage.data_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup("WAYFARER_UPLOAD_DIR") {
            self.storage.upload_dir = PathBuf::from(dir);
        }
        if let Some(tokens) = lookup("WAYFARER_ADMIN_TOKEN") {
            self.auth.admin_tokens = split_list(&tokens);
        }
        if let Some(origins) = lookup("WAYFARER_CORS_ORIGINS") {
            self.server.cors_origins = split_list(&origins);
        }
        self
    }

    /// Parsed listen address
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.server
            .bind
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::InvalidValue {
                key: "server.bind".to_string(),
                message: e.to_string(),
            })
    }

    /// Check values that parse but make no sense
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bind_addr()?;
        if self.listing.items_per_page == 0 {
            return Err(ConfigError::InvalidValue {
                key: "listing.items_per_page".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.listing.max_limit < self.listing.items_per_page {
            return Err(ConfigError::InvalidValue {
                key: "listing.max_limit".to_string(),
                message: "must not be below items_per_page".to_string(),
            });
        }
        Ok(())
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_empty_yaml_uses_defaults() {
        let config = WayfarerConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, WayfarerConfig::default());
        assert_eq!(config.listing.items_per_page, 10);
        assert_eq!(config.client.debounce(), Duration::from_millis(1000));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_other_defaults() {
        let yaml = r#"
server:
  bind: 0.0.0.0:8080
auth:
  admin_tokens: [s3cret]
"#;
        let config = WayfarerConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.server.bind, "0.0.0.0:8080");
        assert!(config.server.cors_origins.is_empty());
        assert_eq!(config.auth.admin_tokens, vec!["s3cret"]);
        assert_eq!(config.storage.data_dir, PathBuf::from("data"));
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("WAYFARER_BIND", "0.0.0.0:9000"),
            ("WAYFARER_ADMIN_TOKEN", "a, b,,"),
            ("WAYFARER_CORS_ORIGINS", "https://a.example"),
        ]
        .into_iter()
        .collect();

        let config = WayfarerConfig::default()
            .with_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.server.bind, "0.0.0.0:9000");
        assert_eq!(config.auth.admin_tokens, vec!["a", "b"]);
        assert_eq!(config.server.cors_origins, vec!["https://a.example"]);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let mut config = WayfarerConfig::default();
        config.server.bind = "nowhere".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));

        let mut config = WayfarerConfig::default();
        config.listing.items_per_page = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file() {
        let result = WayfarerConfig::from_yaml_file("/definitely/not/here.yaml");
        assert!(matches!(result, Err(ConfigError::FileNotFound { .. })));
    }

    #[test]
    fn test_malformed_yaml() {
        let result = WayfarerConfig::from_yaml_str("server: [unclosed");
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }
}

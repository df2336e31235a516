//! Configuration structures for deserialisation.
//!
//! These structures map directly to the JSON configuration file format.

use std::path::PathBuf;

use serde::Deserialize;
use url::Url;

use crate::error::ConfigError;

/// Default Attio API base URL.
pub const API_BASE_URL: &str = "https://api.attio.com";

/// Root configuration structure.
///
/// This is the top-level structure that matches the JSON config file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Optional JSON schema reference (ignored during parsing).
    #[serde(rename = "$schema", default)]
    _schema: Option<String>,

    /// Optional comment field (ignored during parsing).
    #[serde(rename = "_comment", default)]
    _comment: Option<String>,

    /// Attio API base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path to a JSON tool catalog; the built-in Attio catalog is used
    /// when absent.
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,

    /// HTTP client settings.
    #[serde(default)]
    pub http: HttpConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            _schema: None,
            _comment: None,
            base_url: default_base_url(),
            catalog_path: None,
            http: HttpConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any validation checks fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.api_base_url()?;
        if self.http.timeout_secs == 0 {
            return Err(ConfigError::ValidationError {
                message: "http.timeout_secs must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Parses `base_url` into a [`Url`].
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is malformed or not http(s).
    pub fn api_base_url(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(&self.base_url).map_err(|e| ConfigError::ValidationError {
            message: format!("invalid base_url '{}': {e}", self.base_url),
        })?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "base_url must be http or https, got '{}'",
                    url.scheme()
                ),
            });
        }
        Ok(url)
    }
}

fn default_base_url() -> String {
    API_BASE_URL.to_string()
}

/// HTTP client configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HttpConfig {
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

const fn default_timeout_secs() -> u64 {
    30
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_config() {
        let json = r"{}";
        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.base_url, API_BASE_URL);
        assert_eq!(config.http.timeout_secs, 30);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn parse_full_config() {
        let json = r#"{
            "$schema": "https://json-schema.org/draft/2020-12/schema",
            "_comment": "Test config",
            "base_url": "https://api.attio.example",
            "catalog_path": "/path/to/catalog.json",
            "http": {
                "timeout_secs": 10
            },
            "logging": {
                "level": "debug"
            }
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.base_url, "https://api.attio.example");
        assert_eq!(
            config.catalog_path,
            Some(PathBuf::from("/path/to/catalog.json"))
        );
        assert_eq!(config.http.timeout_secs, 10);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn default_config_targets_attio() {
        let config = Config::default();
        assert_eq!(
            config.api_base_url().unwrap().as_str(),
            "https://api.attio.com/"
        );
    }

    #[test]
    fn reject_malformed_base_url() {
        let json = r#"{ "base_url": "not a url" }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn reject_non_http_base_url() {
        let json = r#"{ "base_url": "ftp://api.attio.com" }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn reject_zero_timeout() {
        let json = r#"{ "http": { "timeout_secs": 0 } }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn reject_unknown_fields() {
        let json = r#"{
            "unknown_field": "value"
        }"#;

        let result: Result<Config, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
